//! 文书处理上下文
//!
//! 封装"我正在处理哪个任务的第几份文书"这一信息

use std::fmt::Display;

/// 文书处理上下文
#[derive(Debug, Clone)]
pub struct DocumentCtx {
    /// 任务名称
    pub job_name: String,

    /// 任务索引（仅用于日志显示）
    pub job_index: usize,

    /// 文书在任务中的索引（从1开始）
    pub document_index: usize,

    /// 模板 ID
    pub template_id: String,
}

impl DocumentCtx {
    /// 创建新的文书上下文
    pub fn new(
        job_name: String,
        job_index: usize,
        document_index: usize,
        template_id: String,
    ) -> Self {
        Self {
            job_name,
            job_index,
            document_index,
            template_id,
        }
    }
}

impl Display for DocumentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[任务 {} 文书#{} 模板#{}]",
            self.job_name, self.document_index, self.template_id
        )
    }
}
