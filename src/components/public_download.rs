//! 公开下载页
//!
//! 通过邮件里的分享令牌访问，不需要登录。挂载时把文件整体拉到内存，
//! 点击下载才触发浏览器保存。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::use_api;
use crate::api::error::ApiError;
use crate::api::types::DownloadedFile;
use crate::web::save;

/// 令牌失效（404）与其它失败必须给出不同的提示，
/// 前者让收件人知道该找分享者重新生成链接。
fn resolve_error_message(error: &ApiError) -> String {
    if error.is_not_found() {
        "Link not found or expired.".to_string()
    } else {
        "Could not download this file.".to_string()
    }
}

#[component]
pub fn PublicDownloadPage(token: String) -> impl IntoView {
    let api = use_api();

    let file = RwSignal::new(None::<DownloadedFile>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(true);

    Effect::new({
        let api = api.clone();
        let token = token.clone();
        move |_| {
            let api = api.clone();
            let token = token.clone();
            spawn_local(async move {
                match api.fetch_shared(&token).await {
                    Ok(downloaded) => file.set(Some(downloaded)),
                    Err(e) => error.set(Some(resolve_error_message(&e))),
                }
                loading.set(false);
            });
        }
    });

    let on_download = move |_| {
        if let Some(downloaded) = file.get() {
            save::save_file(&downloaded.bytes, &downloaded.filename);
        }
    };

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="card bg-base-100 shadow-xl w-full max-w-md">
                    <div class="card-body items-center space-y-2">
                        <h2 class="card-title">"Shared File"</h2>

                        <Show when=move || loading.get()>
                            <span class="loading loading-spinner loading-lg"></span>
                            <p>"Fetching file..."</p>
                        </Show>

                        <Show when=move || error.get().is_some()>
                            <div class="alert alert-error">
                                <span>{move || error.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || file.get().is_some()>
                            <p class="font-mono break-all">
                                {move || file.get().map(|f| f.filename).unwrap_or_default()}
                            </p>
                            <button class="btn btn-primary" on:click=on_download>
                                "Download"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_token_gets_its_own_message() {
        let error = ApiError::http(404, "Not found.");
        assert_eq!(resolve_error_message(&error), "Link not found or expired.");
    }

    #[test]
    fn other_http_failures_are_not_conflated_with_expiry() {
        for status in [400, 403, 500, 503] {
            let error = ApiError::http(status, "boom");
            assert_eq!(
                resolve_error_message(&error),
                "Could not download this file.",
                "status {status} must not read as an expired link"
            );
        }
    }

    #[test]
    fn network_failures_are_not_conflated_with_expiry() {
        let error = ApiError::network("connection refused");
        assert_eq!(resolve_error_message(&error), "Could not download this file.");
    }
}
