//! 登录表单
//!
//! 成功后不手动导航：会话信号翻转，路由服务的认证监听
//! 会把用户送到文件列表。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::components::status::{StatusAlert, ViewStatus};
use crate::session::use_session;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let status = RwSignal::new(ViewStatus::Idle);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            status.set(ViewStatus::error("Please fill in all fields"));
            return;
        }

        status.set(ViewStatus::Pending);

        let session = session.clone();
        let api = api.clone();
        spawn_local(async move {
            match session.login(&api, &email.get_untracked(), &password.get_untracked()).await {
                // 重定向由路由服务处理
                Ok(()) => status.set(ViewStatus::Idle),
                Err(e) => status.set(ViewStatus::error(e.message)),
            }
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-2">"Login"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <StatusAlert status=status />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || status.get().is_pending()>
                                {move || if status.get().is_pending() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                        <div class="text-sm mt-2">
                            <a
                                class="link link-primary"
                                href="/forgot-password"
                                on:click=move |ev: leptos::web_sys::MouseEvent| {
                                    ev.prevent_default();
                                    router.navigate("/forgot-password");
                                }
                            >
                                "Forgot Password?"
                            </a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
