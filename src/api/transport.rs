//! HTTP 传输抽象层
//!
//! 与具体端点无关的请求/响应结构 + `HttpClient` trait。
//! 生产环境使用 `FetchHttpClient`（gloo-net / 浏览器 fetch），
//! 测试使用 `MockHttpClient`（记录请求并回放预置响应）以及
//! 可选的 `ReqwestHttpClient`（针对真实后端的冒烟测试）。

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::api::error::ApiError;

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// 请求体：JSON 或 multipart 表单（文件上传）
#[derive(Debug)]
pub enum HttpBody {
    Json(serde_json::Value),
    Form(web_sys::FormData),
}

/// 通用 HTTP 请求结构
#[derive(Debug)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(HttpBody::Json(body));
        self
    }

    pub fn with_form(mut self, form: web_sys::FormData) -> Self {
        self.body = Some(HttpBody::Form(form));
        self
    }

    /// 测试辅助：取出 JSON 体（若有）
    #[cfg(test)]
    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Some(HttpBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
///
/// 响应体保留为字节，二进制下载与 JSON 解析共用同一条路径。
/// 头名称统一小写存储。
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(|v| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP 客户端特性 (Trait)
/// 使用 async_trait 以支持异步调用，(?Send) 是因为 WASM 环境下的 future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError>;
}

// =========================================================
// 实现层: Fetch 客户端 (Production)
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        use gloo_net::http::Request;

        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(HttpBody::Json(value)) => builder
                .header("Content-Type", "application/json")
                .body(value.to_string()),
            // multipart 边界由浏览器设置，不能手动指定 Content-Type
            Some(HttpBody::Form(form)) => builder.body(form),
            None => builder.build(),
        }
        .map_err(|e| ApiError::network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let mut headers = HashMap::new();
        for (key, value) in response.headers().entries() {
            headers.insert(key.to_ascii_lowercase(), value);
        }

        let body = response
            .binary()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        Ok(HttpResponse {
            status: response.status(),
            headers,
            body,
        })
    }
}

// =========================================================
// 实现层: Mock 客户端 (Test)
// =========================================================

#[cfg(test)]
pub use mock::MockHttpClient;

#[cfg(test)]
mod mock {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;

    /// 记录每个发出的请求，按入队顺序回放预置响应。
    /// 队列为空时回放一个空的 200 响应。
    #[derive(Clone, Default)]
    pub struct MockHttpClient {
        pub requests: Rc<RefCell<Vec<HttpRequest>>>,
        responses: Rc<RefCell<VecDeque<Result<HttpResponse, ApiError>>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn enqueue(&self, response: HttpResponse) {
            self.responses.borrow_mut().push_back(Ok(response));
        }

        pub fn enqueue_error(&self, error: ApiError) {
            self.responses.borrow_mut().push_back(Err(error));
        }

        pub fn enqueue_json(&self, status: u16, body: serde_json::Value) {
            self.enqueue(HttpResponse {
                status,
                headers: HashMap::new(),
                body: body.to_string().into_bytes(),
            });
        }

        pub fn enqueue_binary(&self, status: u16, disposition: Option<&str>, bytes: &[u8]) {
            let mut headers = HashMap::new();
            if let Some(value) = disposition {
                headers.insert("content-disposition".to_string(), value.to_string());
            }
            self.enqueue(HttpResponse {
                status,
                headers,
                body: bytes.to_vec(),
            });
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(req);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| {
                    Ok(HttpResponse {
                        status: 200,
                        headers: HashMap::new(),
                        body: b"{}".to_vec(),
                    })
                })
        }
    }
}

// =========================================================
// 实现层: Reqwest 客户端 (针对真实后端的冒烟测试)
// =========================================================

#[cfg(test)]
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(test)]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        match req.body {
            Some(HttpBody::Json(value)) => {
                builder = builder
                    .header("Content-Type", "application/json")
                    .body(value.to_string());
            }
            Some(HttpBody::Form(_)) => {
                return Err(ApiError::network("multipart not supported natively"));
            }
            None => {}
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_ascii_lowercase(), v.to_string());
            }
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
