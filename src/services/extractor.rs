//! 案件数据提取服务 - 业务能力层
//!
//! 只负责"文件 → CaseRecord"能力。任何能产出完整 `CaseRecord` 的组件
//! 都可以作为上游实现 [`CaseExtractor`]。

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::case_record::{CaseRecord, Parties};
use crate::models::file_handle::FileHandle;

/// 案件数据提取能力
#[async_trait]
pub trait CaseExtractor: Send + Sync {
    /// 从上传文件中提取案件数据
    async fn extract(&self, file: &FileHandle) -> Result<CaseRecord, ExtractionError>;
}

/// 巴西日期格式
pub fn today_pt_br() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}

fn ensure_supported(file: &FileHandle) -> Result<(), ExtractionError> {
    if !file.media_type().is_supported() {
        return Err(ExtractionError::UnsupportedFormat {
            media_type: file.media_type().to_string(),
        });
    }
    if file.is_empty() {
        return Err(ExtractionError::EmptyFile {
            file: file.name().to_string(),
        });
    }
    Ok(())
}

/// 模拟提取器
///
/// 读取文件后等待一段模拟的处理时间，返回固定的案件数据。
/// 不区分文件类型，空文件同样返回固定数据。
pub struct MockExtractor {
    delay: Duration,
    filed_date: Option<String>,
}

impl MockExtractor {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            filed_date: None,
        }
    }

    /// 固定立案日期（默认使用当天日期）
    pub fn with_filed_date(mut self, date: impl Into<String>) -> Self {
        self.filed_date = Some(date.into());
        self
    }

    fn mock_record(&self) -> CaseRecord {
        CaseRecord::new(
            "0001234-56.2024.8.26.0100",
            Parties::new("BANCO DO BRASIL S.A.", "JOÃO DA SILVA SANTOS"),
            "1ª Vara Cível de São Paulo",
            "R$ 50.000,00",
            "Cobrança de Dívida",
            self.filed_date.clone().unwrap_or_else(today_pt_br),
            "Em andamento",
        )
    }
}

#[async_trait]
impl CaseExtractor for MockExtractor {
    async fn extract(&self, file: &FileHandle) -> Result<CaseRecord, ExtractionError> {
        // 二进制格式按字节读取，文本格式按 UTF-8 读取（有损）
        let read_len = if file.media_type().is_binary() {
            file.bytes().len()
        } else {
            String::from_utf8_lossy(file.bytes()).chars().count()
        };
        debug!(
            "模拟提取: {} ({}, 读取 {} 个单位)",
            file.name(),
            file.media_type(),
            read_len
        );

        tokio::time::sleep(self.delay).await;

        let record = self.mock_record();
        info!("✓ 已从 {} 提取案件 {}", file.name(), record.case_number());
        Ok(record)
    }
}

/// 结构化文本提取器
///
/// 解析法院系统导出的纯文本，每行一个 `标签: 值`：
///
/// ```text
/// Processo: 0001234-56.2024.8.26.0100
/// Autor: BANCO DO BRASIL S.A.
/// Réu: JOÃO DA SILVA SANTOS
/// Vara: 1ª Vara Cível de São Paulo
/// Valor: R$ 50.000,00
/// Assunto: Cobrança de Dívida
/// Data: 15/10/2024
/// Status: Em andamento
/// ```
///
/// `Data` 和 `Status` 可省略（分别默认为当天和 "Em andamento"）
pub struct StructuredTextExtractor {
    line: Regex,
}

/// (标签, 是否必需)
const LABELS: &[(&str, bool)] = &[
    ("processo", true),
    ("autor", true),
    ("réu", true),
    ("vara", true),
    ("valor", true),
    ("assunto", true),
    ("data", false),
    ("status", false),
];

impl StructuredTextExtractor {
    pub fn new() -> Self {
        Self {
            line: Regex::new(r"(?m)^[ \t]*([^:\r\n]+?)[ \t]*:[ \t]*(.*?)[ \t]*\r?$").expect("标签行正则表达式无效"),
        }
    }

    fn parse(&self, text: &str) -> Result<CaseRecord, ExtractionError> {
        let mut values: [Option<String>; 8] = Default::default();

        for caps in self.line.captures_iter(text) {
            let label = normalize_label(&caps[1]);
            if let Some(idx) = LABELS.iter().position(|(l, _)| *l == label) {
                let value = caps[2].to_string();
                if values[idx].is_none() && !value.is_empty() {
                    values[idx] = Some(value);
                }
            }
        }

        let missing: Vec<String> = LABELS
            .iter()
            .zip(values.iter())
            .filter(|((_, required), value)| *required && value.is_none())
            .map(|((label, _), _)| label.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ExtractionError::PartialExtraction { missing });
        }

        let [number, plaintiff, defendant, court, value, subject, date, status] =
            values.map(Option::unwrap_or_default);

        Ok(CaseRecord::new(
            number,
            Parties::new(plaintiff, defendant),
            court,
            value,
            subject,
            if date.is_empty() { today_pt_br() } else { date },
            if status.is_empty() {
                "Em andamento".to_string()
            } else {
                status
            },
        ))
    }
}

impl Default for StructuredTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// 标签统一为小写，`Reu` 视同 `Réu`
fn normalize_label(label: &str) -> String {
    let lower = label.trim().to_lowercase();
    if lower == "reu" {
        "réu".to_string()
    } else {
        lower
    }
}

#[async_trait]
impl CaseExtractor for StructuredTextExtractor {
    async fn extract(&self, file: &FileHandle) -> Result<CaseRecord, ExtractionError> {
        ensure_supported(file)?;

        if file.media_type().is_binary() {
            return Err(ExtractionError::UnsupportedFormat {
                media_type: file.media_type().to_string(),
            });
        }

        let text = std::str::from_utf8(file.bytes()).map_err(|e| ExtractionError::Unparseable {
            file: file.name().to_string(),
            reason: e.to_string(),
        })?;

        let record = self.parse(text)?;
        info!("✓ 已从 {} 解析案件 {}", file.name(), record.case_number());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "Processo: 0009999-11.2023.8.26.0001
Autor: BANCO DO BRASIL S.A.
Reu: MARIA DE SOUZA
Vara: 3ª Vara Cível de Campinas
Valor: R$ 12.345,67
Assunto: Execução de Título
Data: 02/03/2023
";

    #[tokio::test(start_paused = true)]
    async fn test_mock_extractor_returns_fixed_record_after_delay() {
        let extractor =
            MockExtractor::new(Duration::from_millis(2000)).with_filed_date("15/10/2024");
        let file = FileHandle::new("autos.pdf", vec![1, 2, 3]);

        let start = tokio::time::Instant::now();
        let record = extractor.extract(&file).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(record.case_number(), "0001234-56.2024.8.26.0100");
        assert_eq!(record.plaintiff(), "BANCO DO BRASIL S.A.");
        assert_eq!(record.defendant(), "JOÃO DA SILVA SANTOS");
        assert_eq!(record.court(), "1ª Vara Cível de São Paulo");
        assert_eq!(record.monetary_value(), "R$ 50.000,00");
        assert_eq!(record.filed_date(), "15/10/2024");
        assert_eq!(record.status(), "Em andamento");
    }

    #[tokio::test]
    async fn test_mock_extractor_accepts_any_file() {
        let extractor = MockExtractor::new(Duration::ZERO);

        let record = extractor
            .extract(&FileHandle::new("foto.png", vec![1]))
            .await
            .unwrap();
        assert_eq!(record.case_number(), "0001234-56.2024.8.26.0100");

        let record = extractor
            .extract(&FileHandle::new("vazio.txt", Vec::new()))
            .await
            .unwrap();
        assert_eq!(record.plaintiff(), "BANCO DO BRASIL S.A.");
    }

    #[tokio::test]
    async fn test_structured_text_extractor() {
        let extractor = StructuredTextExtractor::new();
        let file = FileHandle::new("export.txt", EXPORT.as_bytes().to_vec());

        let record = extractor.extract(&file).await.unwrap();
        assert_eq!(record.case_number(), "0009999-11.2023.8.26.0001");
        assert_eq!(record.defendant(), "MARIA DE SOUZA");
        assert_eq!(record.court(), "3ª Vara Cível de Campinas");
        assert_eq!(record.filed_date(), "02/03/2023");
        assert_eq!(record.status(), "Em andamento");
    }

    #[tokio::test]
    async fn test_structured_text_extractor_reports_missing_labels() {
        let extractor = StructuredTextExtractor::new();
        let file = FileHandle::new("parcial.txt", b"Processo: 1\nAutor: X\n".to_vec());

        let err = extractor.extract(&file).await.unwrap_err();
        assert_eq!(
            err,
            ExtractionError::PartialExtraction {
                missing: vec![
                    "réu".to_string(),
                    "vara".to_string(),
                    "valor".to_string(),
                    "assunto".to_string()
                ]
            }
        );
    }

    #[tokio::test]
    async fn test_structured_text_extractor_empty_value_keeps_next_line() {
        let extractor = StructuredTextExtractor::new();
        let text = "Processo: 1\r\nAutor: A\r\nReu: B\r\nVara: V\r\nValor: R$ 1,00\r\nAssunto: S\r\nData:\r\nStatus: Arquivado\r\n";
        let file = FileHandle::new("export.txt", text.as_bytes().to_vec());

        let record = extractor.extract(&file).await.unwrap();
        assert_eq!(record.status(), "Arquivado");
        assert_eq!(record.subject(), "S");
        assert_ne!(record.filed_date(), "Status: Arquivado");

        let file = FileHandle::new(
            "sem-processo.txt",
            b"Processo:\nAutor: X\nReu: Y\nVara: V\nValor: R$ 1,00\nAssunto: S\n".to_vec(),
        );
        let err = extractor.extract(&file).await.unwrap_err();
        assert_eq!(
            err,
            ExtractionError::PartialExtraction {
                missing: vec!["processo".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_structured_text_extractor_rejects_unsupported_and_empty() {
        let extractor = StructuredTextExtractor::new();

        let err = extractor
            .extract(&FileHandle::new("foto.png", vec![1]))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat { .. }));

        let err = extractor
            .extract(&FileHandle::new("vazio.txt", Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ExtractionError::EmptyFile {
                file: "vazio.txt".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_structured_text_extractor_rejects_invalid_utf8() {
        let extractor = StructuredTextExtractor::new();
        let file = FileHandle::new("lixo.txt", vec![0xff, 0xfe, 0x00]);
        let err = extractor.extract(&file).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Unparseable { .. }));
    }
}
