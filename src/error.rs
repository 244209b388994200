use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 模板渲染错误
    #[error("模板错误: {0}")]
    Template(#[from] TemplateError),
    /// 案件数据提取错误
    #[error("提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 会话错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 任务文件错误
    #[error("任务错误: {0}")]
    Job(#[from] JobError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 模板渲染错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// 模板 ID 不在已知模板集合中
    #[error("未知模板: {id}")]
    UnknownTemplate { id: String },
    /// 必填字段缺失或为空
    #[error("模板 {template_id} 缺少必填字段: {key}")]
    MissingRequiredField { template_id: String, key: String },
}

/// 案件数据提取错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// 不支持的文件类型
    #[error("不支持的文件类型: {media_type}")]
    UnsupportedFormat { media_type: String },
    /// 文件内容为空
    #[error("文件内容为空: {file}")]
    EmptyFile { file: String },
    /// 文件无法解析
    #[error("无法解析文件 {file}: {reason}")]
    Unparseable { file: String, reason: String },
    /// 只提取到部分字段
    #[error("提取不完整，缺少字段: {}", .missing.join(", "))]
    PartialExtraction { missing: Vec<String> },
    /// 提取已被取消
    #[error("提取请求 #{ticket} 已取消")]
    Cancelled { ticket: u64 },
    /// 提取结果已过期（有更新的请求）
    #[error("提取请求 #{ticket} 已被 #{current} 取代")]
    Superseded { ticket: u64, current: u64 },
    /// 后台任务异常退出
    #[error("提取任务执行失败: {0}")]
    TaskFailed(String),
}

/// 会话错误
#[derive(Debug, Error)]
pub enum SessionError {
    /// 邮箱或密码为空
    #[error("登录失败: 邮箱和密码不能为空")]
    InvalidCredentials,
    /// 当前没有登录用户
    #[error("当前没有已登录的用户")]
    NotAuthenticated,
    /// 会话存储读写失败
    #[error("会话存储失败 ({path}): {source}")]
    Store {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 任务文件错误
#[derive(Debug, Error)]
pub enum JobError {
    /// 任务既没有案件文件也没有手工录入的案件数据
    #[error("任务 {name} 没有案件来源（file 或 [case]）")]
    NoCaseSource { name: String },
}

// ========== 从常见错误类型转换 ==========

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Other(format!("TOML解析失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl SessionError {
    /// 创建会话存储错误
    pub fn store(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SessionError::Store {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

impl ExtractionError {
    /// 是否是因为请求过期/取消而被丢弃的结果
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            ExtractionError::Cancelled { .. } | ExtractionError::Superseded { .. }
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
