//! 忘记密码：提交邮箱，后端发送重置链接

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::components::status::{StatusAlert, ViewStatus};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let status = RwSignal::new(ViewStatus::Idle);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() {
            status.set(ViewStatus::error("Please enter your email"));
            return;
        }

        status.set(ViewStatus::Pending);
        let api = api.clone();
        spawn_local(async move {
            match api.forgot_password(&email.get_untracked()).await {
                Ok(()) => status.set(ViewStatus::success("Reset link sent to your email.")),
                Err(e) => status.set(ViewStatus::error(e.to_string())),
            }
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-2">"Forgot Password"</h1>

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
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || status.get().is_pending()>
                                {move || if status.get().is_pending() {
                                    view! { <span class="loading loading-spinner"></span> "Sending..." }.into_any()
                                } else {
                                    "Send Reset Link".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
