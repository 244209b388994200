//! 文书处理流程 - 流程层
//!
//! 核心职责：定义"一份文书"的完整处理流程
//!
//! 流程顺序：
//! 1. 模板渲染（未知模板 / 缺少必填字段 → 跳过）
//! 2. 生成下载文件
//! 3. 写入输出目录

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::artifact::DownloadArtifact;
use crate::models::case_record::CaseRecord;
use crate::models::job::DocumentRequest;
use crate::services::{DocumentWriter, TemplateRenderer};
use crate::utils::logging::truncate_text;
use crate::workflow::document_ctx::DocumentCtx;

/// 文书处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 已生成，附带文件名
    Generated(String),
    /// 跳过（模板错误）
    Skipped,
}

/// 文书处理流程
///
/// - 编排单份文书的渲染与保存
/// - 模板错误只影响当前文书
/// - 不负责获取案件数据
pub struct DocumentFlow {
    renderer: TemplateRenderer,
    writer: DocumentWriter,
    verbose_logging: bool,
}

impl DocumentFlow {
    /// 创建新的文书处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            renderer: TemplateRenderer::new(config.enforce_required_fields),
            writer: DocumentWriter::with_path(&config.output_folder),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(
        &self,
        record: &CaseRecord,
        request: &DocumentRequest,
        ctx: &DocumentCtx,
    ) -> Result<ProcessResult> {
        info!("[任务 {}] 📝 正在生成 {}", ctx.job_index, ctx);

        let body = match self
            .renderer
            .render(&request.template, record, &request.fields)
        {
            Ok(body) => body,
            Err(e) => {
                warn!("[任务 {}] ⚠️ {} 跳过: {}", ctx.job_index, ctx, e);
                return Ok(ProcessResult::Skipped);
            }
        };

        if self.verbose_logging {
            self.log_preview(ctx.job_index, &body);
        }

        let artifact = DownloadArtifact::new(&request.template, record, body);
        let path = self.writer.write(&artifact).await?;

        info!("[任务 {}] ✓ 文书已保存: {}", ctx.job_index, path.display());
        Ok(ProcessResult::Generated(artifact.filename))
    }

    /// 显示文书预览
    fn log_preview(&self, job_index: usize, body: &str) {
        for line in body.lines().filter(|l| !l.trim().is_empty()).take(4) {
            info!("[任务 {}]   {}", job_index, truncate_text(line, 80));
        }
    }
}
