//! # JusNexus
//!
//! 法律文书生成流水线：案件文件 → 案件数据 → 模板 + 附加字段 → 文书文本
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有持久化资源，只暴露能力
//! - `SessionStore` - 唯一的会话文件 owner，提供 load/save/clear
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个案件或单份文书
//! - `CaseExtractor` - 案件数据提取能力（模拟 / 结构化文本）
//! - `TemplateRenderer` - 模板渲染能力（纯函数）
//! - `DocumentWriter` - 保存下载文件能力
//! - `SessionManager` - 登录/登出能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份文书"的处理流程
//! - `ExtractionTracker` - 可取消、按票据丢弃过期结果的提取
//! - `DocumentFlow` - 流程编排（render → artifact → write）
//! - `ChatTranscript` - 助手对话记录
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量任务处理器，管理会话和并发
//! - `orchestrator/job_processor` - 单个任务处理器，遍历文书请求
//!
//! ## 模块结构

pub mod catalog;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, ExtractorKind};
pub use error::{AppError, AppResult, ExtractionError, SessionError, TemplateError};
pub use infrastructure::SessionStore;
pub use models::{AdditionalFields, CaseRecord, DownloadArtifact, FileHandle, Parties};
pub use orchestrator::{process_job, App, RunSummary};
pub use services::{CaseExtractor, MockExtractor, Session, SessionManager, TemplateRenderer};
pub use workflow::{DocumentCtx, DocumentFlow, ExtractionTracker, ProcessResult};
