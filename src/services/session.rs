//! 会话服务 - 业务能力层
//!
//! 登录规则 + 显式的会话对象。会话通过参数传递，不从全局状态读取。

use std::time::Duration;

use tracing::{info, warn};

use crate::error::SessionError;
use crate::infrastructure::SessionStore;
use crate::models::user::{Role, User};

/// 拥有管理员权限的固定邮箱
pub const ADMIN_EMAIL: &str = "admin@jusnexus.com";
const ADMIN_NAME: &str = "Administrador JusNexus";

/// 已建立的会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

/// 会话服务
pub struct SessionManager {
    store: SessionStore,
    login_delay: Duration,
}

impl SessionManager {
    pub fn new(store: SessionStore, login_delay: Duration) -> Self {
        Self { store, login_delay }
    }

    /// 启动时从存储中恢复会话
    pub async fn restore(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.store.load().await?.map(|user| Session { user }))
    }

    /// 登录（模拟一次远程调用的延迟）
    ///
    /// - 管理员邮箱直接获得管理员角色
    /// - 其他邮箱需要邮箱和密码都不为空，用户名取邮箱 `@` 之前的部分
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        tokio::time::sleep(self.login_delay).await;

        let email = email.trim();
        let user = if email == ADMIN_EMAIL {
            User {
                email: email.to_string(),
                role: Role::Admin,
                name: ADMIN_NAME.to_string(),
            }
        } else if !email.is_empty() && !password.is_empty() {
            User {
                email: email.to_string(),
                role: Role::User,
                name: email.split('@').next().unwrap_or(email).to_string(),
            }
        } else {
            warn!("⚠️ 登录失败: 邮箱或密码为空");
            return Err(SessionError::InvalidCredentials);
        };

        self.store.save(&user).await?;
        info!("✓ 登录成功: {} ({:?})", user.name, user.role);
        Ok(Session { user })
    }

    /// 登出：消费会话并清除存储
    pub async fn logout(&self, session: Session) -> Result<(), SessionError> {
        self.store.clear().await?;
        info!("已登出: {}", session.user.email);
        Ok(())
    }
}
