//! 浏览器侧的文件保存
//!
//! 字节 -> Blob -> ObjectUrl -> 隐藏锚点点击。
//! `ObjectUrl` 在函数结束时 drop，自动 revoke 对象引用。

use gloo_file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;

/// 触发浏览器的"另存为"下载
pub fn save_file(bytes: &[u8], filename: &str) {
    let blob = Blob::new(bytes);
    let url = ObjectUrl::from(blob);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(element) = document.create_element("a") else {
        return;
    };
    let anchor: web_sys::HtmlAnchorElement = element.unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(filename);

    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
        anchor.click();
        anchor.remove();
    }
}
