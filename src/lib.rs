//! FileShare 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `api`: HTTP 适配层（传输抽象 + 类型化端点）
//! - `session`: 会话状态管理（登录/登出/持久化）
//! - `web::route` / `web::router`: 路由定义与路由服务（含认证守卫）
//! - `components`: UI 组件层（资源视图）

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

mod api {
    pub mod client;
    pub mod error;
    pub mod transport;
    pub mod types;
}
mod session;

mod components {
    pub mod change_password;
    pub mod file_list;
    pub mod forgot_password;
    mod icons;
    pub mod login;
    pub mod navbar;
    pub mod public_download;
    pub mod register;
    pub mod reset_password;
    pub mod share;
    pub mod shared_list;
    pub mod status;
    pub mod upload;
}

// 原生 Web API 相关模块（History 路由、Blob 下载、日期格式化）
pub(crate) mod web {
    pub mod date;
    pub mod route;
    pub mod router;
    pub mod save;
}

use leptos::prelude::*;

use crate::api::client::{ApiClient, AppApi};
use crate::api::transport::FetchHttpClient;
use crate::components::change_password::ChangePasswordPage;
use crate::components::file_list::FileListPage;
use crate::components::forgot_password::ForgotPasswordPage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::public_download::PublicDownloadPage;
use crate::components::register::RegisterPage;
use crate::components::reset_password::ResetPasswordPage;
use crate::components::share::SharePage;
use crate::components::shared_list::SharedListPage;
use crate::components::upload::UploadPage;
use crate::session::{LocalStore, SessionStore};
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 后端 API 根路径（部署时由反向代理指向后端）
pub(crate) const API_BASE: &str = "/api";

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ResetPassword { uid, token } => {
            view! { <ResetPasswordPage uid=uid token=token /> }.into_any()
        }
        AppRoute::ChangePassword => view! { <ChangePasswordPage /> }.into_any(),
        AppRoute::Files => view! { <FileListPage /> }.into_any(),
        AppRoute::Upload => view! { <UploadPage /> }.into_any(),
        AppRoute::Share => view! { <SharePage /> }.into_any(),
        AppRoute::SharedList => view! { <SharedListPage /> }.into_any(),
        AppRoute::PublicDownload { token } => {
            view! { <PublicDownloadPage token=token /> }.into_any()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话存储并从 LocalStorage 恢复上次会话
    let session = SessionStore::new(LocalStore);
    session.restore();

    // 2. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = session.is_authenticated_signal();
    provide_context(session);

    // 3. API 客户端：基础 URL + 传输层 + 令牌来源
    let api: AppApi = ApiClient::new(API_BASE, FetchHttpClient, LocalStore);
    provide_context(api);

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <Navbar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
