//! API 错误类型
//!
//! 将传输层与 HTTP 层的失败统一为一个错误枚举：
//! - `Network`: 请求未收到响应（fetch 失败、跨域、断网）
//! - `Http`: 收到非 2xx 响应，携带状态码与后端给出的消息
//! - `Payload`: 2xx 响应但响应体无法解析

use std::fmt;

use serde_json::Value;

use crate::api::transport::HttpResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Payload(String),
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload(message.into())
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// 从非 2xx 响应构造错误，消息从响应体中提取
    pub fn from_response(resp: &HttpResponse) -> Self {
        Self::Http {
            status: resp.status,
            message: extract_message(resp.status, &resp.text()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http { message, .. } => write!(f, "{}", message),
            ApiError::Payload(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// 从后端错误响应体中提取人类可读的消息
///
/// 后端（DRF 风格）有三种错误形态：
/// 1. `{"error": "..."}` 业务错误
/// 2. `{"detail": "..."}` 框架级错误（如 401/404）
/// 3. `{"field": ["msg", ...], ...}` 字段校验错误，需要压平拼接
///
/// 都不匹配时退化为 "HTTP <status>"。
pub fn extract_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "detail"] {
            if let Some(Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }

        // 压平字段级错误
        let mut parts: Vec<String> = Vec::new();
        for value in map.values() {
            match value {
                Value::String(s) => parts.push(s.clone()),
                Value::Array(items) => {
                    parts.extend(items.iter().filter_map(|v| v.as_str().map(String::from)));
                }
                _ => {}
            }
        }
        if !parts.is_empty() {
            return parts.join(" ");
        }
    }

    format!("HTTP {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_error_key() {
        let msg = extract_message(400, r#"{"error": "Invalid credentials"}"#);
        assert_eq!(msg, "Invalid credentials");
    }

    #[test]
    fn extracts_detail_key() {
        let msg = extract_message(
            401,
            r#"{"detail": "Authentication credentials were not provided."}"#,
        );
        assert_eq!(msg, "Authentication credentials were not provided.");
    }

    #[test]
    fn error_key_wins_over_field_errors() {
        let msg = extract_message(400, r#"{"error": "Nope", "email": ["bad"]}"#);
        assert_eq!(msg, "Nope");
    }

    #[test]
    fn flattens_field_errors() {
        let msg = extract_message(
            400,
            r#"{"email": ["Enter a valid email address."], "password": ["This field is required."]}"#,
        );
        assert!(msg.contains("Enter a valid email address."));
        assert!(msg.contains("This field is required."));
    }

    #[test]
    fn flattens_plain_string_field() {
        // change-password/ 返回 {"old_password": "Wrong password"}
        let msg = extract_message(400, r#"{"old_password": "Wrong password"}"#);
        assert_eq!(msg, "Wrong password");
    }

    #[test]
    fn falls_back_on_unparseable_body() {
        assert_eq!(extract_message(502, "<html>Bad Gateway</html>"), "HTTP 502");
        assert_eq!(extract_message(500, ""), "HTTP 500");
    }

    #[test]
    fn not_found_predicate() {
        assert!(ApiError::http(404, "gone").is_not_found());
        assert!(!ApiError::http(403, "expired").is_not_found());
        assert!(!ApiError::network("offline").is_not_found());
    }
}
