//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量任务处理器
//! - 管理应用生命周期（初始化、运行、登出）
//! - 批量加载任务（Vec<DocumentJob>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `job_processor` - 单个任务处理器
//! - 获取案件数据（手工录入 / 可取消的文件提取）
//! - 遍历任务中的所有文书请求
//! - 维护对话记录
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<DocumentJob>)
//!     ↓
//! job_processor (处理一个案件 + Vec<DocumentRequest>)
//!     ↓
//! workflow::DocumentFlow / ExtractionTracker
//!     ↓
//! services (能力层：extract / render / write / session)
//!     ↓
//! infrastructure (基础设施：SessionStore)
//! ```

pub mod batch_processor;
pub mod job_processor;

// 重新导出主要类型
pub use batch_processor::{build_extractor, establish_session, App, RunSummary};
pub use job_processor::{process_job, JobStats};
