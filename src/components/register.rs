//! 注册表单
//!
//! 密码不一致在发请求前拦截；后端字段级错误已在
//! `api::error::extract_message` 中压平为一条消息。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::api::types::RegisterRequest;
use crate::components::status::{StatusAlert, ViewStatus};
use crate::web::router::use_router;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let date_of_birth = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let status = RwSignal::new(ViewStatus::Idle);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        if password.get() != confirm_password.get() {
            status.set(ViewStatus::error("Passwords do not match."));
            return;
        }

        status.set(ViewStatus::Pending);
        let request = RegisterRequest {
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            email: email.get_untracked(),
            date_of_birth: date_of_birth.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };

        let api = api.clone();
        spawn_local(async move {
            match api.register(&request).await {
                Ok(()) => {
                    status.set(ViewStatus::success(
                        "Registration successful. Redirecting to login...",
                    ));
                    set_timeout(
                        move || router.navigate("/login"),
                        std::time::Duration::from_millis(1500),
                    );
                }
                Err(e) => status.set(ViewStatus::error(e.to_string())),
            }
        });
    };

    let text_field = move |id: &'static str,
                           label: &'static str,
                           input_type: &'static str,
                           value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=input_type
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                    required
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <h1 class="text-3xl font-bold mb-2">"Register"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <StatusAlert status=status />

                        {text_field("first_name", "First Name", "text", first_name)}
                        {text_field("last_name", "Last Name", "text", last_name)}
                        {text_field("email", "Email", "email", email)}
                        {text_field("date_of_birth", "Date of Birth", "date", date_of_birth)}
                        {text_field("password", "Password", "password", password)}
                        {text_field("confirm_password", "Confirm Password", "password", confirm_password)}

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || status.get().is_pending()>
                                {move || if status.get().is_pending() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
