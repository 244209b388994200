use crate::models::job::DocumentJob;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载一个案件任务
pub async fn load_job(toml_file_path: &Path) -> Result<DocumentJob> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let job: DocumentJob = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    // 记录任务文件路径，用于解析相对的案件文件路径
    Ok(job.with_job_path(toml_file_path.to_path_buf()))
}

/// 从文件夹中加载所有 TOML 任务文件
///
/// 单个文件解析失败只记录警告，不影响其他任务；结果按文件名排序
pub async fn load_all_jobs(folder_path: &str) -> Result<Vec<DocumentJob>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut jobs = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_job(&path).await {
            Ok(job) => {
                tracing::info!("成功加载任务 {}，共 {} 份文书", job.name, job.documents.len());
                jobs.push(job);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "jusnexus-loader-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_all_jobs_skips_broken_files() {
        let dir = scratch_dir("skip");
        std::fs::write(
            dir.join("b.toml"),
            "name = \"B\"\nfile = \"autos.pdf\"\n",
        )
        .unwrap();
        std::fs::write(dir.join("a.toml"), "name = \"A\"\nfile = \"x.txt\"\n").unwrap();
        std::fs::write(dir.join("broken.toml"), "name = ").unwrap();
        std::fs::write(dir.join("ignored.txt"), "name = \"C\"").unwrap();

        let jobs = load_all_jobs(dir.to_str().unwrap()).await.unwrap();
        let names: Vec<_> = jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(jobs[1].resolved_file(), Some(dir.join("autos.pdf")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_folder_is_error() {
        assert!(load_all_jobs("/definitely/not/here").await.is_err());
    }
}
