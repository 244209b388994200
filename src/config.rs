use std::time::Duration;

/// 案件提取方式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractorKind {
    /// 模拟提取，返回固定数据
    Mock,
    /// 解析 `标签: 值` 格式的纯文本导出
    Structured,
}

impl std::str::FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ExtractorKind::Mock),
            "structured" => Ok(ExtractorKind::Structured),
            other => Err(format!("未知的提取方式: {}", other)),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的任务数量
    pub max_concurrent_jobs: usize,
    /// 任务 TOML 文件存放目录
    pub jobs_folder: String,
    /// 生成文书的输出目录
    pub output_folder: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 案件提取方式
    pub extractor: ExtractorKind,
    /// 模拟提取耗时（毫秒）
    pub extraction_delay_ms: u64,
    /// 模拟登录耗时（毫秒）
    pub login_delay_ms: u64,
    /// 渲染前是否校验必填字段
    pub enforce_required_fields: bool,
    // --- 会话配置 ---
    pub session_dir: String,
    pub login_email: String,
    pub login_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 4,
            jobs_folder: "jobs".to_string(),
            output_folder: "output_docs".to_string(),
            output_log_file: "output.txt".to_string(),
            verbose_logging: false,
            extractor: ExtractorKind::Mock,
            extraction_delay_ms: 2000,
            login_delay_ms: 1000,
            enforce_required_fields: true,
            session_dir: ".jusnexus".to_string(),
            login_email: String::new(),
            login_password: String::new(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_jobs: env_parse::<usize>("MAX_CONCURRENT_JOBS")
                .filter(|n| *n > 0)
                .unwrap_or(default.max_concurrent_jobs),
            jobs_folder: std::env::var("JOBS_FOLDER").unwrap_or(default.jobs_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
            extractor: env_parse("EXTRACTOR").unwrap_or(default.extractor),
            extraction_delay_ms: env_parse("EXTRACTION_DELAY_MS")
                .unwrap_or(default.extraction_delay_ms),
            login_delay_ms: env_parse("LOGIN_DELAY_MS").unwrap_or(default.login_delay_ms),
            enforce_required_fields: env_parse("ENFORCE_REQUIRED_FIELDS")
                .unwrap_or(default.enforce_required_fields),
            session_dir: std::env::var("SESSION_DIR").unwrap_or(default.session_dir),
            login_email: std::env::var("LOGIN_EMAIL").unwrap_or(default.login_email),
            login_password: std::env::var("LOGIN_PASSWORD").unwrap_or(default.login_password),
        }
    }

    pub fn extraction_delay(&self) -> Duration {
        Duration::from_millis(self.extraction_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_kind_from_str() {
        assert_eq!("Mock".parse::<ExtractorKind>(), Ok(ExtractorKind::Mock));
        assert_eq!(
            " structured ".parse::<ExtractorKind>(),
            Ok(ExtractorKind::Structured)
        );
        assert!("ocr".parse::<ExtractorKind>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.extraction_delay(), Duration::from_millis(2000));
        assert_eq!(config.login_delay(), Duration::from_millis(1000));
        assert!(config.enforce_required_fields);
    }
}
