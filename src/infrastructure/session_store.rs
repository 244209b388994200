//! 会话存储 - 基础设施层
//!
//! 持有唯一的持久化资源（会话文件），只暴露读/写/清除能力

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SessionError;
use crate::models::user::User;

/// 会话记录使用的固定键名
pub const SESSION_KEY: &str = "jusnexus_user";

/// 会话存储
///
/// 职责：
/// - 在目录 `dir` 下以 `jusnexus_user.json` 保存唯一的用户记录
/// - 不关心登录规则
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", SESSION_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_str(&self) -> String {
        self.path.display().to_string()
    }

    /// 读取已保存的用户；不存在时返回 `None`
    pub async fn load(&self) -> Result<Option<User>, SessionError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::store(self.path_str(), e)),
        };

        let user: User =
            serde_json::from_str(&content).map_err(|e| SessionError::store(self.path_str(), e))?;
        debug!("已从 {} 恢复会话: {}", self.path.display(), user.email);
        Ok(Some(user))
    }

    /// 保存用户记录（覆盖）
    pub async fn save(&self, user: &User) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| SessionError::store(self.path_str(), e))?;
        }
        let json =
            serde_json::to_string_pretty(user).map_err(|e| SessionError::store(self.path_str(), e))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| SessionError::store(self.path_str(), e))?;
        Ok(())
    }

    /// 清除用户记录；记录不存在时视为成功
    pub async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::store(self.path_str(), e)),
        }
    }
}
