//! 批量任务处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量任务的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、校验模板目录、建立会话
//! 2. **批量加载**：扫描并加载所有任务文件（`Vec<DocumentJob>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：每批完成后再开始下一批
//! 5. **全局统计**：汇总所有任务的处理结果

use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::catalog;
use crate::config::{Config, ExtractorKind};
use crate::error::SessionError;
use crate::infrastructure::SessionStore;
use crate::models::assistant::Sector;
use crate::models::job::DocumentJob;
use crate::orchestrator::job_processor::{self, JobStats};
use crate::services::renderer::verify_catalog;
use crate::services::{
    CaseExtractor, MockExtractor, Session, SessionManager, StructuredTextExtractor,
};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    session: Session,
    sessions: SessionManager,
    extractor: Arc<dyn CaseExtractor>,
}

/// 运行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub success: usize,
    pub failed: usize,
    pub documents: usize,
    pub total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
    documents: usize,
}

/// 按配置创建提取器
pub fn build_extractor(config: &Config) -> Arc<dyn CaseExtractor> {
    match config.extractor {
        ExtractorKind::Mock => Arc::new(MockExtractor::new(config.extraction_delay())),
        ExtractorKind::Structured => Arc::new(StructuredTextExtractor::new()),
    }
}

/// 恢复已保存的会话，没有时使用配置中的账号登录
pub async fn establish_session(
    sessions: &SessionManager,
    config: &Config,
) -> Result<Session, SessionError> {
    if let Some(session) = sessions.restore().await? {
        info!("✓ 已恢复会话: {}", session.user().email);
        return Ok(session);
    }

    if config.login_email.trim().is_empty() {
        return Err(SessionError::NotAuthenticated);
    }

    sessions
        .login(&config.login_email, &config.login_password)
        .await
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        let problems = verify_catalog();
        if !problems.is_empty() {
            for problem in &problems {
                error!("模板目录错误: {}", problem);
            }
            anyhow::bail!("模板目录校验失败，共 {} 个问题", problems.len());
        }

        let sessions = SessionManager::new(
            SessionStore::new(&config.session_dir),
            config.login_delay(),
        );
        let session = establish_session(&sessions, &config).await?;

        logging::log_startup(config.max_concurrent_jobs, &session.user().name);
        log_assistants();

        let extractor = build_extractor(&config);

        Ok(Self {
            config,
            session,
            sessions,
            extractor,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        // 加载所有待处理的任务
        let all_jobs = self.load_jobs().await?;

        if all_jobs.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(RunSummary::default());
        }

        logging::log_jobs_loaded(all_jobs.len(), self.config.max_concurrent_jobs);

        let summary = self.process_all_jobs(all_jobs).await?;

        logging::print_final_stats(
            summary.success,
            summary.failed,
            summary.documents,
            summary.total,
            &self.config.output_log_file,
        );

        Ok(summary)
    }

    /// 登出并清除保存的会话
    pub async fn logout(self) -> Result<()> {
        self.sessions.logout(self.session).await?;
        Ok(())
    }

    /// 加载任务
    async fn load_jobs(&self) -> Result<Vec<DocumentJob>> {
        info!("📁 正在扫描待处理的任务...");
        crate::models::load_all_jobs(&self.config.jobs_folder).await
    }

    /// 处理所有任务
    async fn process_all_jobs(&self, all_jobs: Vec<DocumentJob>) -> Result<RunSummary> {
        let batch_size = self.config.max_concurrent_jobs.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total_jobs = all_jobs.len();
        let total_batches = total_jobs.div_ceil(batch_size);
        let mut summary = RunSummary {
            total: total_jobs,
            ..Default::default()
        };

        for (batch_idx, batch_jobs) in all_jobs.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            let batch_num = batch_idx + 1;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch_jobs.len(),
                total_jobs,
            );

            let batch_result = self
                .process_batch(batch_jobs, batch_start, semaphore.clone())
                .await?;

            summary.success += batch_result.success;
            summary.failed += batch_result.failed;
            summary.documents += batch_result.documents;

            logging::log_batch_complete(
                batch_num,
                batch_result.success,
                batch_result.success + batch_result.failed,
            );
        }

        Ok(summary)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_jobs: &[DocumentJob],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut batch_handles = Vec::new();

        for (idx, job) in batch_jobs.iter().enumerate() {
            let job_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let job = job.clone();
            let config = self.config.clone();
            let extractor = Arc::clone(&self.extractor);

            let handle = tokio::spawn(async move {
                let _permit = permit;
                job_processor::process_job(job, job_index, &config, extractor).await
            });
            batch_handles.push((job_index, handle));
        }

        let mut result = BatchResult::default();

        // 等待本批所有任务完成
        let outcomes = join_all(
            batch_handles
                .into_iter()
                .map(|(idx, handle)| async move { (idx, handle.await) }),
        )
        .await;

        for (job_index, outcome) in outcomes {
            match outcome {
                Ok(Ok(stats)) => record_job(&mut result, job_index, stats),
                Ok(Err(e)) => {
                    error!("[任务 {}] ❌ 处理过程中发生错误: {:#}", job_index, e);
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[任务 {}] 任务执行失败: {}", job_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 列出各部门的助手及其模板数量
fn log_assistants() {
    for sector in Sector::ALL {
        for assistant in sector.assistants() {
            debug!(
                "{} → {} ({} 个模板)",
                sector.label(),
                assistant,
                catalog::templates_for(*assistant).count()
            );
        }
    }
}

/// 有文书请求但一份都没生成的任务计为失败
fn record_job(result: &mut BatchResult, job_index: usize, stats: JobStats) {
    result.documents += stats.generated.len();
    if stats.generated.is_empty() && stats.skipped > 0 {
        warn!("[任务 {}] ⚠️ 没有生成任何文书", job_index);
        result.failed += 1;
    } else {
        result.success += 1;
    }
}
