//! 分享表单
//!
//! 校验（文件已选、邮箱非空、过期小时数 ≥ 1）全部在发请求前完成。
//! 成功后表单恢复默认值；失败时保留输入以便修正后重交。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::api::types::{FileRecord, ShareRequest};
use crate::components::icons::Share2;
use crate::components::status::{StatusAlert, ViewStatus};

/// 过期时间默认 24 小时
const DEFAULT_EXPIRATION_HOURS: &str = "24";

/// 把表单输入校验并组装为请求体；违例返回用户可见的消息。
/// 网络调用只会发生在此函数成功之后。
fn build_share_request(
    file_id: &str,
    recipient_email: &str,
    expiration_hours: &str,
    message: &str,
) -> Result<ShareRequest, String> {
    let file = file_id
        .trim()
        .parse::<u64>()
        .map_err(|_| "Please select a file to share.".to_string())?;

    let recipient_email = recipient_email.trim();
    if recipient_email.is_empty() {
        return Err("Please enter a recipient email.".to_string());
    }

    let hours = expiration_hours
        .trim()
        .parse::<i64>()
        .map_err(|_| "Expiration must be a whole number of hours.".to_string())?;
    if hours < 1 {
        return Err("Expiration must be at least 1 hour.".to_string());
    }
    // 超出 u32 范围整体拒绝，不做截断
    let expiration_hours =
        u32::try_from(hours).map_err(|_| "Expiration is out of range.".to_string())?;

    Ok(ShareRequest {
        file,
        recipient_email: recipient_email.to_string(),
        expiration_hours,
        message: message.to_string(),
    })
}

#[component]
pub fn SharePage() -> impl IntoView {
    let api = use_api();

    let files = RwSignal::new(Vec::<FileRecord>::new());
    let selected_file = RwSignal::new(String::new());
    let recipient_email = RwSignal::new(String::new());
    let expiration_hours = RwSignal::new(DEFAULT_EXPIRATION_HOURS.to_string());
    let message = RwSignal::new(String::new());
    let status = RwSignal::new(ViewStatus::Idle);

    // 挂载时拉取可选文件（第一页，未过滤）
    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.list_files(1, "").await {
                    Ok(page) => files.set(page.items),
                    Err(_) => status.set(ViewStatus::error("Could not fetch your files.")),
                }
            });
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let request = match build_share_request(
            &selected_file.get(),
            &recipient_email.get(),
            &expiration_hours.get(),
            &message.get(),
        ) {
            Ok(request) => request,
            Err(message) => {
                status.set(ViewStatus::error(message));
                return;
            }
        };

        status.set(ViewStatus::Pending);
        let api = api.clone();
        spawn_local(async move {
            match api.create_share(&request).await {
                Ok(()) => {
                    status.set(ViewStatus::success(
                        "File shared successfully! The recipient will receive an email.",
                    ));
                    // 成功后恢复默认值
                    selected_file.set(String::new());
                    recipient_email.set(String::new());
                    expiration_hours.set(DEFAULT_EXPIRATION_HOURS.to_string());
                    message.set(String::new());
                }
                // 失败保留输入
                Err(e) => status.set(ViewStatus::error(e.to_string())),
            }
        });
    };

    view! {
        <div class="max-w-2xl mx-auto p-4 md:p-8 space-y-4">
            <h2 class="text-2xl font-bold">"Share a File"</h2>

            <StatusAlert status=status />

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit>
                    <div class="form-control">
                        <label class="label" for="file">
                            <span class="label-text">"Choose File:"</span>
                        </label>
                        <select
                            id="file"
                            on:change=move |ev| selected_file.set(event_target_value(&ev))
                            prop:value=selected_file
                            class="select select-bordered"
                            required
                        >
                            <option value="">"-- Select a file --"</option>
                            <For
                                each=move || files.get()
                                key=|f| f.id
                                children=move |file| {
                                    view! {
                                        <option value=file.id.to_string()>
                                            {format!("{} ({})", file.filename, file.size_mb())}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </div>

                    <div class="form-control">
                        <label class="label" for="recipient">
                            <span class="label-text">"Recipient's Email:"</span>
                        </label>
                        <input
                            id="recipient"
                            type="email"
                            on:input=move |ev| recipient_email.set(event_target_value(&ev))
                            prop:value=recipient_email
                            class="input input-bordered"
                            required
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="expiration">
                            <span class="label-text">"Expiration (hours):"</span>
                        </label>
                        <input
                            id="expiration"
                            type="number"
                            min="1"
                            on:input=move |ev| expiration_hours.set(event_target_value(&ev))
                            prop:value=expiration_hours
                            class="input input-bordered"
                            required
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="message">
                            <span class="label-text">"Message (optional):"</span>
                        </label>
                        <textarea
                            id="message"
                            rows="4"
                            on:input=move |ev| message.set(event_target_value(&ev))
                            prop:value=message
                            class="textarea textarea-bordered"
                        ></textarea>
                    </div>

                    <div class="form-control mt-4">
                        <button class="btn btn-primary" disabled=move || status.get().is_pending()>
                            {move || if status.get().is_pending() {
                                view! { <span class="loading loading-spinner"></span> "Sharing..." }.into_any()
                            } else {
                                view! { <Share2 attr:class="h-4 w-4" /> "Share File" }.into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
