//! 上传视图：暂存（文件选择 + 拖放）、软配额、单批 multipart 提交
//!
//! 提交是客户端视角的全有或全无：不做单文件进度，也不处理
//! 部分成功；在途期间禁用重复提交，成功后跳转到文件列表。

pub mod staging;

use gloo_file::{File, FileList};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::components::icons::CloudUpload;
use crate::components::status::{StatusAlert, ViewStatus};
use crate::web::router::use_router;
use staging::StagedSet;

/// 所有暂存文件的累计大小上限
const MAX_TOTAL_BYTES: u64 = 100 * 1024 * 1024;

fn files_from_input(ev: &leptos::web_sys::Event) -> Vec<File> {
    event_target::<leptos::web_sys::HtmlInputElement>(ev)
        .files()
        .map(|list| FileList::from(list).iter().cloned().collect())
        .unwrap_or_default()
}

fn files_from_drop(ev: &leptos::web_sys::DragEvent) -> Vec<File> {
    ev.data_transfer()
        .and_then(|dt| dt.files())
        .map(|list| FileList::from(list).iter().cloned().collect())
        .unwrap_or_default()
}

#[component]
pub fn UploadPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    // File 是 JS 句柄，信号必须落在本地存储域
    let staged = RwSignal::new_local(StagedSet::<File>::new(MAX_TOTAL_BYTES));
    let status = RwSignal::new(ViewStatus::Idle);

    // 文件选择与拖放共用同一条原子配额检查路径
    let stage_batch = move |incoming: Vec<File>| {
        if incoming.is_empty() {
            return;
        }
        let mut rejected = None;
        staged.update(|set| {
            if let Err(e) = set.try_stage(incoming) {
                rejected = Some(e.to_string());
            }
        });
        match rejected {
            Some(message) => status.set(ViewStatus::error(message)),
            None => status.set(ViewStatus::Idle),
        }
    };

    let on_file_change = move |ev: leptos::web_sys::Event| {
        stage_batch(files_from_input(&ev));
    };

    let on_drop = move |ev: leptos::web_sys::DragEvent| {
        ev.prevent_default();
        stage_batch(files_from_drop(&ev));
    };

    let on_drag_over = move |ev: leptos::web_sys::DragEvent| ev.prevent_default();

    let remove_file = move |index: usize| {
        staged.update(|set| set.remove(index));
        status.set(ViewStatus::Idle);
    };

    let on_submit = move |_| {
        if staged.with(|set| set.is_empty()) {
            status.set(ViewStatus::error("Please select files to upload."));
            return;
        }

        status.set(ViewStatus::Pending);
        let api = api.clone();
        let files: Vec<File> = staged.with_untracked(|set| set.items().to_vec());
        spawn_local(async move {
            match api.upload_files(&files).await {
                Ok(()) => router.navigate("/files"),
                Err(_) => status.set(ViewStatus::error("Upload failed. Please try again.")),
            }
        });
    };

    let staged_rows = move || {
        staged.with(|set| {
            set.items()
                .iter()
                .enumerate()
                .map(|(index, file)| {
                    let label = format!(
                        "{} ({:.2} MB)",
                        file.name(),
                        file.size() as f64 / (1024.0 * 1024.0)
                    );
                    (index, label)
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="max-w-2xl mx-auto p-4 md:p-8 space-y-4">
            <h2 class="text-2xl font-bold">"Upload Files"</h2>

            <StatusAlert status=status />

            <div
                on:drop=on_drop
                on:dragover=on_drag_over
                class="border-2 border-dashed border-base-300 rounded-box p-10 text-center text-base-content/60"
            >
                <CloudUpload attr:class="h-10 w-10 mx-auto mb-2 opacity-50" />
                "Drag & Drop files here"
            </div>

            <input
                type="file"
                multiple
                on:change=on_file_change
                class="file-input file-input-bordered w-full"
            />

            <Show when=move || !staged.with(|set| set.is_empty())>
                <div class="card bg-base-100 shadow">
                    <div class="card-body p-4">
                        <h3 class="font-semibold">"Selected Files:"</h3>
                        <ul class="space-y-1">
                            <For
                                each=staged_rows
                                key=|(index, label)| (*index, label.clone())
                                children=move |(index, label)| {
                                    view! {
                                        <li class="flex items-center justify-between text-sm">
                                            <span>{label}</span>
                                            <button
                                                on:click=move |_| remove_file(index)
                                                class="btn btn-error btn-xs"
                                            >
                                                "Remove"
                                            </button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>
                </div>
            </Show>

            <button
                on:click=on_submit
                disabled=move || status.get().is_pending()
                class="btn btn-primary w-full"
            >
                {move || if status.get().is_pending() {
                    view! { <span class="loading loading-spinner"></span> "Uploading..." }.into_any()
                } else {
                    "Upload".into_any()
                }}
            </button>
        </div>
    }
}
