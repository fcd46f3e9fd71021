//! ISO 时间戳的本地化渲染
//!
//! 依赖浏览器的 `Date.toLocaleString`；原生目标（测试）下原样返回。

#[cfg(target_arch = "wasm32")]
pub fn to_locale_string(timestamp: &str) -> String {
    use wasm_bindgen::JsValue;

    let date = js_sys::Date::new(&JsValue::from_str(timestamp));
    if date.get_time().is_nan() {
        return timestamp.to_string();
    }
    String::from(date.to_locale_string("en-US", &JsValue::UNDEFINED))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn to_locale_string(timestamp: &str) -> String {
    timestamp.to_string()
}
