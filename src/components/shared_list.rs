//! 我分享出去的文件列表
//!
//! 只读视图：挂载时拉取一次，失败只提示，不重试。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::api::types::SharedFileRecord;
use crate::components::status::{StatusAlert, ViewStatus};
use crate::web::date;

#[component]
pub fn SharedListPage() -> impl IntoView {
    let api = use_api();

    let shares = RwSignal::new(Vec::<SharedFileRecord>::new());
    let loaded = RwSignal::new(false);
    let status = RwSignal::new(ViewStatus::Idle);

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.shared_list().await {
                    Ok(records) => shares.set(records),
                    Err(_) => status.set(ViewStatus::error("Could not fetch shared files.")),
                }
                loaded.set(true);
            });
        }
    });

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-4">
            <h2 class="text-2xl font-bold">"Files You Have Shared"</h2>

            <StatusAlert status=status />

            <Show
                when=move || !shares.get().is_empty()
                fallback=move || {
                    view! {
                        <Show when=move || loaded.get() && !status.get().is_error()>
                            <p class="text-base-content/60">"You have not shared any files yet."</p>
                        </Show>
                    }
                }
            >
                <div class="overflow-x-auto">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Filename"</th>
                                <th>"Recipient"</th>
                                <th>"Shared At"</th>
                                <th>"Accessed"</th>
                                <th>"Link"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || shares.get()
                                key=|share| share.token.clone()
                                children=move |share| {
                                    let link = format!("/shared/{}", share.token);
                                    view! {
                                        <tr>
                                            <td>{share.filename.clone()}</td>
                                            <td>{share.recipient_email.clone()}</td>
                                            <td>{date::to_locale_string(&share.shared_at)}</td>
                                            <td>
                                                {if share.accessed {
                                                    view! { <span class="badge badge-success">"Yes"</span> }.into_any()
                                                } else {
                                                    view! { <span class="badge badge-ghost">"No"</span> }.into_any()
                                                }}
                                            </td>
                                            <td>
                                                <a class="link link-primary" href=link target="_blank">
                                                    "Open"
                                                </a>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
