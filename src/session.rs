//! 会话状态管理
//!
//! 显式构造的 `SessionStore` 对象，通过 Context 注入视图，
//! 不使用模块级全局状态。持久化走 `SessionStorage` 缝隙，
//! 生产为 LocalStorage，测试为内存实现。
//!
//! 不变量：身份与访问令牌要么同时存在要么同时缺失，
//! 恢复时发现部分残留或损坏数据，整组键一并丢弃。

use std::fmt;

use leptos::prelude::*;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::transport::HttpClient;
use crate::api::types::UserProfile;


pub const KEY_ACCESS_TOKEN: &str = "accessToken";
pub const KEY_REFRESH_TOKEN: &str = "refreshToken";
pub const KEY_USER: &str = "user";

/// 登录失败错误，携带后端给出的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub message: String,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// 当前会话：用户身份 + 令牌对
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

// =========================================================
// 持久化缝隙 (Storage Seam)
// =========================================================

pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// 浏览器 LocalStorage 实现
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl SessionStorage for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        use gloo_storage::Storage;
        if let Err(e) = gloo_storage::LocalStorage::set(key, value) {
            log_error!("[Session] failed to persist {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::delete(key);
    }
}

/// 内存实现（测试用）
#[cfg(test)]
pub use memory::MemoryStorage;

#[cfg(test)]
mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::SessionStorage;

    #[derive(Clone, Default)]
    pub struct MemoryStorage {
        entries: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.entries.borrow().len()
        }
    }

    impl SessionStorage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.entries.borrow_mut().remove(key);
        }
    }
}

// =========================================================
// 会话存储
// =========================================================

/// 每个进程至多一个活动会话。并发登录不做合并，后写入者胜出。
#[derive(Clone)]
pub struct SessionStore<S> {
    session: RwSignal<Option<Session>>,
    storage: S,
}

impl<S: SessionStorage + Clone + 'static> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            session: RwSignal::new(None),
            storage,
        }
    }

    /// 进程启动时从持久存储恢复一次。
    /// 部分残留（缺身份或缺令牌）和损坏的 JSON 都按无会话处理并清除。
    pub fn restore(&self) {
        let access = self.storage.get(KEY_ACCESS_TOKEN);
        let user_raw = self.storage.get(KEY_USER);

        match (access, user_raw) {
            (Some(access_token), Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => {
                    let refresh_token = self.storage.get(KEY_REFRESH_TOKEN).unwrap_or_default();
                    self.session.set(Some(Session {
                        user,
                        access_token,
                        refresh_token,
                    }));
                }
                Err(e) => {
                    log_error!("[Session] discarding corrupt stored user: {}", e);
                    self.clear_storage();
                }
            },
            (None, None) => {}
            _ => {
                // 半个会话等于没有会话
                self.clear_storage();
            }
        }
    }

    /// 登录：失败时持久存储与内存状态都保持原样
    pub async fn login<T, S2>(
        &self,
        api: &ApiClient<T, S2>,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError>
    where
        T: HttpClient,
        S2: SessionStorage,
    {
        let resp = api.login(email, password).await?;

        let user_json = serde_json::to_string(&resp.user)
            .map_err(|e| AuthError { message: e.to_string() })?;
        self.storage.set(KEY_ACCESS_TOKEN, &resp.access);
        self.storage.set(KEY_REFRESH_TOKEN, &resp.refresh);
        self.storage.set(KEY_USER, &user_json);

        self.session.set(Some(Session {
            user: resp.user,
            access_token: resp.access,
            refresh_token: resp.refresh,
        }));
        Ok(())
    }

    /// 登出：尽力通知后端失效化令牌，失败只记日志；
    /// 本地清理无条件执行，路由守卫随后会重定向到登录页。
    pub async fn logout<T, S2>(&self, api: &ApiClient<T, S2>)
    where
        T: HttpClient,
        S2: SessionStorage,
    {
        let refresh = self.storage.get(KEY_REFRESH_TOKEN).unwrap_or_default();
        if let Err(e) = api.logout(&refresh).await {
            log_warn!("[Session] logout request failed (ignored): {}", e);
        }
        self.clear_local();
    }

    /// 仅清除本地状态（密码修改后强制重新登录时使用）
    pub fn clear_local(&self) {
        self.clear_storage();
        self.session.set(None);
    }

    fn clear_storage(&self) {
        self.storage.remove(KEY_ACCESS_TOKEN);
        self.storage.remove(KEY_REFRESH_TOKEN);
        self.storage.remove(KEY_USER);
    }

    /// 认证状态信号（用于路由守卫注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.get().is_some())
    }

    pub fn current_session(&self) -> ReadSignal<Option<Session>> {
        self.session.read_only()
    }
}

/// 生产环境使用的会话存储类型
pub type AppSession = SessionStore<LocalStore>;

/// 从 Context 获取会话存储
pub fn use_session() -> AppSession {
    use_context::<AppSession>().expect("SessionStore should be provided")
}
