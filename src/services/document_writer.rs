//! 文书写入服务 - 业务能力层
//!
//! 只负责"把生成的文书保存为下载文件"能力，不关心流程

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::artifact::DownloadArtifact;

/// 文书写入服务
///
/// 职责：
/// - 将渲染好的文书以建议文件名写入输出目录
/// - 只处理单份文书
/// - 同名文件直接覆盖
pub struct DocumentWriter {
    output_dir: PathBuf,
}

impl DocumentWriter {
    /// 使用默认输出目录创建
    pub fn new() -> Self {
        Self::with_path("output_docs")
    }

    /// 使用自定义输出目录创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: path.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 写入文书
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn write(&self, artifact: &DownloadArtifact) -> Result<PathBuf> {
        debug!(
            "写入文书: {} | 类型 {} | 长度: {}",
            artifact.filename,
            artifact.content_type,
            artifact.body.len()
        );

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("无法创建输出目录: {}", self.output_dir.display()))?;

        let path = self.output_dir.join(&artifact.filename);
        tokio::fs::write(&path, artifact.body.as_bytes())
            .await
            .with_context(|| format!("无法写入文书: {}", path.display()))?;

        Ok(path)
    }
}

impl Default for DocumentWriter {
    fn default() -> Self {
        Self::new()
    }
}
