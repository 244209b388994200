use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use jusnexus::models::{AdditionalFields, DocumentJob, DocumentRequest};
use jusnexus::services::CaseExtractor;
use jusnexus::{process_job, App, CaseRecord, Config, MockExtractor, Parties, TemplateRenderer};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jusnexus-it-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn test_config(dir: &PathBuf) -> Config {
    Config {
        max_concurrent_jobs: 2,
        jobs_folder: dir.join("jobs").to_string_lossy().into_owned(),
        output_folder: dir.join("out").to_string_lossy().into_owned(),
        output_log_file: dir.join("output.txt").to_string_lossy().into_owned(),
        extraction_delay_ms: 0,
        login_delay_ms: 0,
        session_dir: dir.join("session").to_string_lossy().into_owned(),
        login_email: "maria@escritorio.com.br".to_string(),
        login_password: "segredo".to_string(),
        ..Config::default()
    }
}

fn fields(pairs: &[(&str, &str)]) -> AdditionalFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn sample_record() -> CaseRecord {
    CaseRecord::new(
        "0001234-56.2024.8.26.0100",
        Parties::new("BANCO DO BRASIL S.A.", "JOÃO DA SILVA SANTOS"),
        "1ª Vara Cível de São Paulo",
        "R$ 50.000,00",
        "Cobrança de Dívida",
        "10/03/2024",
        "Em andamento",
    )
}

#[test]
fn test_render_dilacao_prazo() {
    let renderer = TemplateRenderer::default();
    let text = renderer
        .render(
            "dilacao-prazo",
            &sample_record(),
            &fields(&[("days", "15"), ("reason", "excesso de prazo")]),
        )
        .unwrap();

    assert!(text.contains("AUTOS: 0001234-56.2024.8.26.0100"));
    assert!(text.contains("por 15 dias, pelos motivos: excesso de prazo"));
    assert!(!text.contains("{{"));
}

#[tokio::test]
async fn test_process_job_with_manual_case() {
    let dir = scratch_dir("manual");
    let config = test_config(&dir);
    let extractor: Arc<dyn CaseExtractor> = Arc::new(MockExtractor::new(Duration::ZERO));

    let job = DocumentJob {
        name: "manual".to_string(),
        assistant: jusnexus::models::Assistant::Processual,
        file: None,
        case: Some(sample_record()),
        notes: None,
        documents: vec![
            DocumentRequest {
                template: "manifestacao-endereco".to_string(),
                fields: fields(&[("newAddress", "Rua das Flores, 100")]),
            },
            DocumentRequest {
                template: "nao-existe".to_string(),
                fields: AdditionalFields::new(),
            },
        ],
        job_path: None,
    };

    let stats = process_job(job, 1, &config, extractor).await.unwrap();
    assert_eq!(
        stats.generated,
        vec!["manifestacao-endereco-0001234-56.2024.8.26.0100.txt".to_string()]
    );
    assert_eq!(stats.skipped, 1);

    let written = tokio::fs::read_to_string(
        dir.join("out")
            .join("manifestacao-endereco-0001234-56.2024.8.26.0100.txt"),
    )
    .await
    .unwrap();
    assert!(written.contains("Informa que o endereço atual é: Rua das Flores, 100"));
    assert!(written.contains("Sem observações adicionais."));
}

#[tokio::test]
async fn test_process_job_extracts_case_file() {
    let dir = scratch_dir("extract");
    let config = test_config(&dir);
    let extractor: Arc<dyn CaseExtractor> =
        Arc::new(MockExtractor::new(Duration::ZERO).with_filed_date("01/02/2024"));

    tokio::fs::write(dir.join("autos.pdf"), b"%PDF-1.4 conteudo")
        .await
        .unwrap();

    let job = DocumentJob {
        name: "arquivo".to_string(),
        assistant: jusnexus::models::Assistant::Processual,
        file: Some(PathBuf::from("autos.pdf")),
        case: None,
        notes: Some("urgente".to_string()),
        documents: vec![DocumentRequest {
            template: "dilacao-prazo".to_string(),
            fields: fields(&[("days", "15"), ("reason", "excesso de prazo")]),
        }],
        job_path: None,
    }
    .with_job_path(dir.join("arquivo.toml"));

    let stats = process_job(job, 1, &config, extractor).await.unwrap();
    assert_eq!(stats.generated.len(), 1);
    assert_eq!(stats.skipped, 0);
}

#[tokio::test]
async fn test_process_job_without_case_source_fails() {
    let dir = scratch_dir("nosource");
    let config = test_config(&dir);
    let extractor: Arc<dyn CaseExtractor> = Arc::new(MockExtractor::new(Duration::ZERO));

    let job = DocumentJob {
        name: "vazio".to_string(),
        assistant: jusnexus::models::Assistant::Processual,
        file: None,
        case: None,
        notes: None,
        documents: Vec::new(),
        job_path: None,
    };

    assert!(process_job(job, 1, &config, extractor).await.is_err());
}

#[tokio::test]
async fn test_app_runs_jobs_folder() {
    let dir = scratch_dir("app");
    let config = test_config(&dir);
    let jobs = dir.join("jobs");
    tokio::fs::create_dir_all(&jobs).await.unwrap();
    tokio::fs::write(jobs.join("caso.pdf"), b"%PDF-1.4").await.unwrap();
    tokio::fs::write(
        jobs.join("a.toml"),
        r#"
name = "caso A"
file = "caso.pdf"

[[documents]]
template = "pesquisa-endereco"
[documents.fields]
targetParty = "JOÃO DA SILVA SANTOS"
searchOrgans = "BACENJUD, RENAJUD"
justification = "Réu não localizado"
"#,
    )
    .await
    .unwrap();
    tokio::fs::write(
        jobs.join("b.toml"),
        r#"
name = "caso B"
file = "caso.pdf"

[[documents]]
template = "dilacao-prazo"
[documents.fields]
days = "15"
"#,
    )
    .await
    .unwrap();

    let app = App::initialize(config).await.unwrap();
    assert_eq!(app.session().user().name, "maria");
    assert!(!app.session().is_admin());

    let summary = app.run().await.unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.success, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.documents, 1);

    assert!(dir
        .join("out")
        .join("pesquisa-endereco-0001234-56.2024.8.26.0100.txt")
        .exists());
    assert!(dir.join("session").join("jusnexus_user.json").exists());

    app.logout().await.unwrap();
    assert!(!dir.join("session").join("jusnexus_user.json").exists());
}
