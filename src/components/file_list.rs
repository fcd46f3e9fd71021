//! 文件列表：分页 + 搜索 + 下载 + 删除
//!
//! 页码 1 起始，当前页数据在每次拉取时整体重建，不做跨视图缓存。
//! 删除成功后用同样的页码和搜索词重新拉取当前页。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::api::types::{FilePage, FileRecord};
use crate::components::icons::{Download, RefreshCw, Trash2};
use crate::components::status::{StatusAlert, ViewStatus};
use crate::web::date;
use crate::web::save;

#[component]
pub fn FileListPage() -> impl IntoView {
    let api = use_api();

    let page_data = RwSignal::new(FilePage::default());
    let (page, set_page) = signal(1_i32);
    let (search_term, set_search_term) = signal(String::new());
    let status = RwSignal::new(ViewStatus::Idle);

    let fetch_files = {
        let api = api.clone();
        move |page_number: i32, search: String| {
            let api = api.clone();
            status.set(ViewStatus::Pending);
            spawn_local(async move {
                match api.list_files(page_number, &search).await {
                    Ok(result) => {
                        page_data.set(result);
                        set_page.set(page_number);
                        status.set(ViewStatus::Idle);
                    }
                    Err(_) => status.set(ViewStatus::error("Could not fetch files.")),
                }
            });
        }
    };

    // 挂载时拉取第一页
    Effect::new({
        let fetch_files = fetch_files.clone();
        move |_| {
            fetch_files(1, String::new());
        }
    });

    let on_search = {
        let fetch_files = fetch_files.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            fetch_files(1, search_term.get());
        }
    };

    let handle_download = {
        let api = api.clone();
        move |id: u64| {
            let api = api.clone();
            spawn_local(async move {
                match api.download_file(id).await {
                    Ok(file) => save::save_file(&file.bytes, &file.filename),
                    Err(_) => status.set(ViewStatus::error("Download failed.")),
                }
            });
        }
    };

    let handle_delete = {
        let api = api.clone();
        let fetch_files = fetch_files.clone();
        move |id: u64| {
            let confirmed = web_sys::window()
                .and_then(|w| {
                    w.confirm_with_message("Are you sure you want to delete this file?")
                        .ok()
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let api = api.clone();
            let fetch_files = fetch_files.clone();
            spawn_local(async move {
                match api.delete_file(id).await {
                    // 重新拉取当前页，沿用当前搜索词
                    Ok(()) => fetch_files(page.get_untracked(), search_term.get_untracked()),
                    Err(_) => status.set(ViewStatus::error("Delete failed.")),
                }
            });
        }
    };

    let is_empty = move || page_data.with(|p| p.items.is_empty());

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"My Files"</h2>
                <button
                    on:click={
                        let fetch_files = fetch_files.clone();
                        move |_| fetch_files(page.get(), search_term.get())
                    }
                    disabled=move || status.get().is_pending()
                    class="btn btn-ghost btn-circle"
                >
                    <RefreshCw attr:class=move || {
                        if status.get().is_pending() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                    } />
                </button>
            </div>

            <StatusAlert status=status />

            <form on:submit=on_search class="join w-full">
                <input
                    type="text"
                    placeholder="Search files..."
                    on:input=move |ev| set_search_term.set(event_target_value(&ev))
                    prop:value=search_term
                    class="input input-bordered join-item w-full"
                />
                <button type="submit" class="btn btn-primary join-item">"Search"</button>
            </form>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Size"</th>
                                    <th class="hidden md:table-cell">"Uploaded At"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || is_empty() && !status.get().is_pending()>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            "No files found."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || page_data.get().items
                                    key=|f| f.id
                                    children={
                                        let handle_download = handle_download.clone();
                                        let handle_delete = handle_delete.clone();
                                        move |file: FileRecord| {
                                            let handle_download = handle_download.clone();
                                            let handle_delete = handle_delete.clone();
                                            let id = file.id;
                                            view! {
                                                <tr>
                                                    <td class="font-medium">{file.filename.clone()}</td>
                                                    <td>{file.size_mb()}</td>
                                                    <td class="hidden md:table-cell">
                                                        {date::to_locale_string(&file.uploaded_at)}
                                                    </td>
                                                    <td class="text-right">
                                                        <button
                                                            on:click=move |_| handle_download(id)
                                                            class="btn btn-ghost btn-sm gap-1"
                                                        >
                                                            <Download attr:class="h-4 w-4" /> "Download"
                                                        </button>
                                                        <button
                                                            on:click=move |_| handle_delete(id)
                                                            class="btn btn-ghost btn-sm text-error gap-1"
                                                        >
                                                            <Trash2 attr:class="h-4 w-4" /> "Delete"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            <div class="flex items-center justify-between">
                <button
                    on:click={
                        let fetch_files = fetch_files.clone();
                        move |_| fetch_files(page.get() - 1, search_term.get())
                    }
                    disabled=move || !page_data.with(|p| p.has_previous)
                    class="btn btn-outline btn-sm"
                >
                    "Previous"
                </button>
                <span class="text-sm">"Page " {page}</span>
                <button
                    on:click={
                        let fetch_files = fetch_files.clone();
                        move |_| fetch_files(page.get() + 1, search_term.get())
                    }
                    disabled=move || !page_data.with(|p| p.has_next)
                    class="btn btn-outline btn-sm"
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
