//! 顶部导航栏：品牌 + 按认证状态切换的链接集

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::components::icons::LogOut;
use crate::session::use_session;
use crate::web::router::use_router;

/// 走 SPA 路由的导航链接
#[component]
fn NavLink(to: &'static str, label: &'static str) -> impl IntoView {
    let router = use_router();
    view! {
        <a
            class="btn btn-ghost btn-sm"
            href=to
            on:click=move |ev: leptos::web_sys::MouseEvent| {
                ev.prevent_default();
                router.navigate(to);
            }
        >
            {label}
        </a>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let router = use_router();
    let is_authenticated = session.is_authenticated_signal();

    let on_logout = move |_| {
        let session = session.clone();
        let api = api.clone();
        spawn_local(async move {
            // 后端失效化失败也照常清理本地会话，守卫随后重定向
            session.logout(&api).await;
        });
    };

    view! {
        <div class="navbar bg-base-100 shadow">
            <div class="flex-1">
                <a
                    class="btn btn-ghost text-xl"
                    href="/"
                    on:click=move |ev: leptos::web_sys::MouseEvent| {
                        ev.prevent_default();
                        router.navigate("/");
                    }
                >
                    "FileShare"
                </a>
            </div>
            <div class="flex-none gap-1">
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| {
                        view! {
                            <NavLink to="/login" label="Login" />
                            <NavLink to="/register" label="Register" />
                        }
                    }
                >
                    <NavLink to="/files" label="My Files" />
                    <NavLink to="/upload" label="Upload" />
                    <NavLink to="/share" label="Share File" />
                    <NavLink to="/shared-list" label="Shared List" />
                    <NavLink to="/change-password" label="Change Password" />
                    // children 闭包会被多次调用，处理器按次克隆
                    <button on:click=on_logout.clone() class="btn btn-outline btn-error btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </Show>
            </div>
        </div>
    }
}
