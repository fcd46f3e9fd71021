//! 后端 API 的数据类型
//!
//! 除 `RegisterRequest` / `ShareRequest` 为只写外，其余都是后端拥有的
//! 只读数据；客户端不做任何跨视图缓存，每次挂载重新拉取。

use serde::{Deserialize, Serialize};

/// 登录成功后后端返回的用户身份
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
}

/// `login/` 的响应体
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserProfile,
}

/// `register/` 的请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub password: String,
    pub confirm_password: String,
}

/// 文件列表中的一行
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileRecord {
    pub id: u64,
    pub filename: String,
    /// 字节数
    pub size: u64,
    pub uploaded_at: String,
}

impl FileRecord {
    /// 以 "X.XX MB" 渲染文件大小
    pub fn size_mb(&self) -> String {
        format!("{:.2} MB", self.size as f64 / (1024.0 * 1024.0))
    }
}

/// DRF 分页信封：`{ count, next, previous, results }`
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope {
    #[allow(dead_code)]
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<FileRecord>,
}

/// 视图消费的单页结果，每次拉取时从信封重建
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilePage {
    pub items: Vec<FileRecord>,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<ListEnvelope> for FilePage {
    fn from(envelope: ListEnvelope) -> Self {
        Self {
            items: envelope.results,
            has_next: envelope.next.is_some(),
            has_previous: envelope.previous.is_some(),
        }
    }
}

/// `files/share/` 的请求体；分享令牌由后端生成，客户端从不自行构造
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareRequest {
    pub file: u64,
    pub recipient_email: String,
    pub expiration_hours: u32,
    pub message: String,
}

/// `files/shared-list/` 中的一行（只读）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SharedFileRecord {
    pub token: String,
    pub filename: String,
    pub recipient_email: String,
    pub shared_at: String,
    pub accessed: bool,
}

/// 二进制下载结果：字节 + 从 content-disposition 解析出的文件名
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_maps_pagination_flags() {
        let envelope: ListEnvelope = serde_json::from_str(
            r#"{
                "count": 12,
                "next": "http://x/api/files/list/?page=3&search=report",
                "previous": "http://x/api/files/list/?search=report",
                "results": [
                    {"id": 7, "filename": "report-q3.pdf", "size": 2048, "uploaded_at": "2026-08-01T10:00:00Z"}
                ]
            }"#,
        )
        .unwrap();
        let page = FilePage::from(envelope);
        assert!(page.has_next);
        assert!(page.has_previous);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].filename, "report-q3.pdf");
    }

    #[test]
    fn envelope_without_neighbours() {
        let envelope: ListEnvelope = serde_json::from_str(
            r#"{"count": 0, "next": null, "previous": null, "results": []}"#,
        )
        .unwrap();
        let page = FilePage::from(envelope);
        assert!(!page.has_next);
        assert!(!page.has_previous);
        assert!(page.items.is_empty());
    }

    #[test]
    fn size_renders_as_megabytes() {
        let record = FileRecord {
            id: 1,
            filename: "a.bin".into(),
            size: 60 * 1024 * 1024,
            uploaded_at: String::new(),
        };
        assert_eq!(record.size_mb(), "60.00 MB");
    }
}
