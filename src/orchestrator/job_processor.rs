//! 单个任务处理器 - 编排层
//!
//! 获取案件数据（手工录入或文件提取），再遍历任务中的所有文书请求

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::catalog;
use crate::config::Config;
use crate::error::JobError;
use crate::models::case_record::CaseRecord;
use crate::models::file_handle::FileHandle;
use crate::models::job::DocumentJob;
use crate::services::CaseExtractor;
use crate::workflow::{
    ChatTranscript, DocumentCtx, DocumentFlow, ExtractionTracker, ProcessResult,
};

/// 单个任务的文书统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JobStats {
    pub generated: Vec<String>,
    pub skipped: usize,
}

/// 处理单个任务
///
/// # 参数
/// - `job`: 任务数据
/// - `job_index`: 任务索引（用于日志）
/// - `config`: 配置
/// - `extractor`: 案件提取能力
///
/// # 返回
/// 返回文书统计；无法获得案件数据时返回错误
pub async fn process_job(
    job: DocumentJob,
    job_index: usize,
    config: &Config,
    extractor: Arc<dyn CaseExtractor>,
) -> Result<JobStats> {
    log_job_start(job_index, &job);

    let record = resolve_case(&job, job_index, extractor).await?;

    let mut chat = ChatTranscript::new(job.assistant);
    chat.submit_case_number(record.case_number(), job.notes.as_deref());

    let flow = DocumentFlow::new(config);
    let mut stats = JobStats::default();
    let total = job.documents.len();

    for (idx, request) in job.documents.iter().enumerate() {
        let ctx = DocumentCtx::new(job.name.clone(), job_index, idx + 1, request.template.clone());
        debug!("[任务 {}] 文书 {}/{}", job_index, idx + 1, total);

        if !catalog::is_offered_by(job.assistant, &request.template) {
            if let Some(descriptor) = catalog::descriptor(&request.template) {
                warn!(
                    "[任务 {}] 模板 {} 属于 {}，当前助手为 {}",
                    job_index,
                    descriptor.id,
                    descriptor.assistant,
                    job.assistant
                );
            }
        }

        match flow.run(&record, request, &ctx).await {
            Ok(ProcessResult::Generated(filename)) => {
                chat.document_generated(record.case_number());
                stats.generated.push(filename);
            }
            Ok(ProcessResult::Skipped) => {
                stats.skipped += 1;
            }
            Err(e) => {
                error!("[任务 {}] ❌ {} 保存失败: {:#}", job_index, ctx, e);
                stats.skipped += 1;
            }
        }
    }

    if config.verbose_logging {
        for message in chat.messages() {
            debug!("[任务 {}] 💬 {:?}: {}", job_index, message.speaker, message.content);
        }
    }

    log_job_complete(job_index, &job.name, &stats, total);
    Ok(stats)
}

/// 获取案件数据：优先使用手工录入，否则提取案件文件
async fn resolve_case(
    job: &DocumentJob,
    job_index: usize,
    extractor: Arc<dyn CaseExtractor>,
) -> Result<CaseRecord> {
    if let Some(record) = &job.case {
        info!("[任务 {}] 使用手工录入的案件数据", job_index);
        return Ok(record.clone());
    }

    let path = job
        .resolved_file()
        .ok_or_else(|| JobError::NoCaseSource {
            name: job.name.clone(),
        })?;

    let file = FileHandle::open(&path).await?;
    info!(
        "[任务 {}] 🔍 正在提取案件文件 {} ({})",
        job_index,
        file.name(),
        file.size_mb()
    );

    let tracker = ExtractionTracker::new(extractor);
    let record = tracker
        .submit(file)
        .wait()
        .await
        .with_context(|| format!("案件文件提取失败: {}", path.display()))?;

    info!(
        "[任务 {}] ✓ 案件 {} | {} x {}",
        job_index,
        record.case_number(),
        record.plaintiff(),
        record.defendant()
    );
    Ok(record)
}

// ========== 日志辅助函数 ==========

fn log_job_start(job_index: usize, job: &DocumentJob) {
    info!("{}", "─".repeat(60));
    info!(
        "[任务 {}] 开始处理: {} ({} / {}，{} 份文书)",
        job_index,
        job.name,
        job.assistant.sector().label(),
        job.assistant,
        job.documents.len()
    );
    debug!(
        "[任务 {}] {} | {}",
        job_index,
        job.assistant.sector().title(),
        job.assistant.description()
    );
}

fn log_job_complete(job_index: usize, name: &str, stats: &JobStats, total: usize) {
    info!(
        "[任务 {}] ✓ {} 完成: 生成 {}/{}，跳过 {}",
        job_index,
        name,
        stats.generated.len(),
        total,
        stats.skipped
    );
}
