//! 重置密码：路由携带 `{uid}/{token}`，过期链接由后端拒绝

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::components::status::{StatusAlert, ViewStatus};
use crate::web::router::use_router;

#[component]
pub fn ResetPasswordPage(uid: String, token: String) -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let status = RwSignal::new(ViewStatus::Idle);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if new_password.get() != confirm_password.get() {
            status.set(ViewStatus::error("Passwords do not match"));
            return;
        }

        status.set(ViewStatus::Pending);
        let api = api.clone();
        let uid = uid.clone();
        let token = token.clone();
        spawn_local(async move {
            let result = api
                .reset_password(
                    &uid,
                    &token,
                    &new_password.get_untracked(),
                    &confirm_password.get_untracked(),
                )
                .await;
            match result {
                Ok(()) => {
                    status.set(ViewStatus::success(
                        "Password reset successful. Redirecting to login...",
                    ));
                    set_timeout(
                        move || router.navigate("/login"),
                        std::time::Duration::from_millis(2000),
                    );
                }
                // 无效/过期链接：后端返回 {"error": "Invalid or expired token"}
                Err(e) => status.set(ViewStatus::error(e.to_string())),
            }
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-2">"Reset Password"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <StatusAlert status=status />

                        <div class="form-control">
                            <label class="label" for="new_password">
                                <span class="label-text">"New password"</span>
                            </label>
                            <input
                                id="new_password"
                                type="password"
                                on:input=move |ev| set_new_password.set(event_target_value(&ev))
                                prop:value=new_password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="confirm_password">
                                <span class="label-text">"Confirm new password"</span>
                            </label>
                            <input
                                id="confirm_password"
                                type="password"
                                on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                                prop:value=confirm_password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || status.get().is_pending()>
                                {move || if status.get().is_pending() {
                                    view! { <span class="loading loading-spinner"></span> "Resetting..." }.into_any()
                                } else {
                                    "Reset Password".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
