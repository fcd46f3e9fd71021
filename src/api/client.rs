//! 类型化 API 客户端
//!
//! 负责三件事：把相对路径拼到 API 根上、为受保护端点附加 Bearer
//! 令牌、把响应归一化为类型化结果或 `ApiError`。
//! 不做重试，也不在 401 时静默刷新令牌，错误原样交给调用方。

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::error::ApiError;
use crate::api::transport::{HttpClient, HttpMethod, HttpRequest};
use crate::api::types::{
    DownloadedFile, FilePage, ListEnvelope, LoginResponse, RegisterRequest, ShareRequest,
    SharedFileRecord,
};
use crate::session::{KEY_ACCESS_TOKEN, LocalStore, SessionStorage};

#[cfg(test)]
mod tests;

/// 生产环境使用的客户端类型
pub type AppApi = ApiClient<crate::api::transport::FetchHttpClient, LocalStore>;

/// 从 Context 获取 API 客户端
pub fn use_api() -> AppApi {
    leptos::prelude::use_context::<AppApi>().expect("ApiClient should be provided")
}

/// content-disposition 缺失或不可解析时的兜底文件名
const DEFAULT_DOWNLOAD_NAME: &str = "downloaded_file";

#[derive(Debug, Clone)]
pub struct ApiClient<T, S> {
    base_url: String,
    transport: T,
    storage: S,
}

impl<T: HttpClient, S: SessionStorage> ApiClient<T, S> {
    pub fn new(base_url: &str, transport: T, storage: S) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            storage,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 附加 Bearer 令牌（存储中有令牌时）。公开端点不调用此方法。
    fn authed(&self, req: HttpRequest) -> HttpRequest {
        match self.storage.get(KEY_ACCESS_TOKEN) {
            Some(token) => req.with_header("Authorization", &format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn request_json<D: DeserializeOwned>(&self, req: HttpRequest) -> Result<D, ApiError> {
        let resp = self.transport.send(req).await?;
        if !resp.ok() {
            return Err(ApiError::from_response(&resp));
        }
        resp.json::<D>().map_err(|e| ApiError::payload(e.to_string()))
    }

    async fn request_unit(&self, req: HttpRequest) -> Result<(), ApiError> {
        let resp = self.transport.send(req).await?;
        if !resp.ok() {
            return Err(ApiError::from_response(&resp));
        }
        Ok(())
    }

    async fn request_binary(&self, req: HttpRequest) -> Result<DownloadedFile, ApiError> {
        let resp = self.transport.send(req).await?;
        if !resp.ok() {
            return Err(ApiError::from_response(&resp));
        }
        Ok(DownloadedFile {
            filename: filename_from_disposition(resp.header("content-disposition")),
            bytes: resp.body,
        })
    }

    // --- 认证 ---

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let req = HttpRequest::new(&self.url("login/"), HttpMethod::Post)
            .with_json(json!({ "email": email, "password": password }));
        self.request_json(req).await
    }

    /// 服务端令牌失效化（尽力而为，调用方决定是否忽略失败）
    pub async fn logout(&self, refresh: &str) -> Result<(), ApiError> {
        let req = HttpRequest::new(&self.url("logout/"), HttpMethod::Post)
            .with_json(json!({ "refresh": refresh }));
        self.request_unit(self.authed(req)).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::payload(e.to_string()))?;
        let req = HttpRequest::new(&self.url("register/"), HttpMethod::Post).with_json(body);
        self.request_unit(req).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let req = HttpRequest::new(&self.url("forgot-password/"), HttpMethod::Post)
            .with_json(json!({ "email": email }));
        self.request_unit(req).await
    }

    pub async fn reset_password(
        &self,
        uid: &str,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), ApiError> {
        let path = format!("reset-password/{}/{}/", uid, token);
        let req = HttpRequest::new(&self.url(&path), HttpMethod::Post).with_json(json!({
            "new_password": new_password,
            "confirm_password": confirm_password,
        }));
        self.request_unit(req).await
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), ApiError> {
        let req = HttpRequest::new(&self.url("change-password/"), HttpMethod::Post).with_json(
            json!({
                "old_password": old_password,
                "new_password": new_password,
                "confirm_password": confirm_password,
            }),
        );
        self.request_unit(self.authed(req)).await
    }

    // --- 文件 ---

    /// 分页 + 搜索的文件列表。页码 1 起始，越界页码不在客户端拦截，
    /// 后端的响应（错误或空页）原样传回。
    pub async fn list_files(&self, page: i32, search: &str) -> Result<FilePage, ApiError> {
        let mut query = format!("?page={}", page);
        if !search.is_empty() {
            query.push_str("&search=");
            query.push_str(&encode_query_value(search));
        }
        let url = format!("{}{}", self.url("files/list/"), query);
        let req = HttpRequest::new(&url, HttpMethod::Get);
        let envelope: ListEnvelope = self.request_json(self.authed(req)).await?;
        Ok(envelope.into())
    }

    /// 单批 multipart 上传，所有文件走同一个 `files[]` 字段
    pub async fn upload_files(&self, files: &[gloo_file::File]) -> Result<(), ApiError> {
        let form = web_sys::FormData::new()
            .map_err(|_| ApiError::network("failed to build form data"))?;
        for file in files {
            form.append_with_blob_and_filename("files[]", file.as_ref(), &file.name())
                .map_err(|_| ApiError::network("failed to append file to form data"))?;
        }
        let req = HttpRequest::new(&self.url("files/upload/"), HttpMethod::Post).with_form(form);
        self.request_unit(self.authed(req)).await
    }

    pub async fn download_file(&self, id: u64) -> Result<DownloadedFile, ApiError> {
        let path = format!("files/download/{}/", id);
        let req = HttpRequest::new(&self.url(&path), HttpMethod::Get);
        self.request_binary(self.authed(req)).await
    }

    pub async fn delete_file(&self, id: u64) -> Result<(), ApiError> {
        let path = format!("files/delete/{}/", id);
        let req = HttpRequest::new(&self.url(&path), HttpMethod::Delete);
        self.request_unit(self.authed(req)).await
    }

    // --- 分享 ---

    pub async fn create_share(&self, request: &ShareRequest) -> Result<(), ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::payload(e.to_string()))?;
        let req = HttpRequest::new(&self.url("files/share/"), HttpMethod::Post).with_json(body);
        self.request_unit(self.authed(req)).await
    }

    pub async fn shared_list(&self) -> Result<Vec<SharedFileRecord>, ApiError> {
        let req = HttpRequest::new(&self.url("files/shared-list/"), HttpMethod::Get);
        self.request_json(self.authed(req)).await
    }

    /// 公开的分享令牌下载，无需会话，刻意不附加任何凭据
    pub async fn fetch_shared(&self, token: &str) -> Result<DownloadedFile, ApiError> {
        let path = format!("files/shared/{}/", token);
        let req = HttpRequest::new(&self.url(&path), HttpMethod::Get);
        self.request_binary(req).await
    }
}

/// 从 `content-disposition` 解析 `filename="<name>"`，失败时用兜底名
fn filename_from_disposition(header: Option<&str>) -> String {
    header
        .and_then(|value| {
            let rest = value.split_once("filename=\"")?.1;
            let name = rest.split_once('"')?.0;
            (!name.is_empty()).then(|| name.to_string())
        })
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}

/// 查询参数百分号编码（保留 RFC 3986 unreserved 字符）
fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
