//! 修改密码（需认证）
//!
//! 成功后清除本地会话强制重新登录，由路由守卫把用户送回登录页。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::components::status::{StatusAlert, ViewStatus};
use crate::session::use_session;

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();

    let (old_password, set_old_password) = signal(String::new());
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
        let session = session.clone();
        spawn_local(async move {
            let result = api
                .change_password(
                    &old_password.get_untracked(),
                    &new_password.get_untracked(),
                    &confirm_password.get_untracked(),
                )
                .await;
            match result {
                Ok(()) => {
                    status.set(ViewStatus::success("Password changed successfully"));
                    set_timeout(
                        move || session.clear_local(),
                        std::time::Duration::from_millis(1500),
                    );
                }
                Err(e) => status.set(ViewStatus::error(e.to_string())),
            }
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-2">"Change Password"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <StatusAlert status=status />

                        <div class="form-control">
                            <label class="label" for="old_password">
                                <span class="label-text">"Old password"</span>
                            </label>
                            <input
                                id="old_password"
                                type="password"
                                on:input=move |ev| set_old_password.set(event_target_value(&ev))
                                prop:value=old_password
                                class="input input-bordered"
                                required
                            />
                        </div>
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
                                    view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                } else {
                                    "Change Password".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
