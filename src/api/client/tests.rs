use serde_json::json;

use super::*;
use crate::api::transport::{HttpMethod, MockHttpClient, ReqwestHttpClient};
use crate::session::{KEY_ACCESS_TOKEN, MemoryStorage};

fn client_with(mock: &MockHttpClient, storage: &MemoryStorage) -> ApiClient<MockHttpClient, MemoryStorage> {
    ApiClient::new("/api", mock.clone(), storage.clone())
}

fn file_page_body(next: Option<&str>, previous: Option<&str>) -> serde_json::Value {
    json!({
        "count": 3,
        "next": next,
        "previous": previous,
        "results": [
            {"id": 1, "filename": "report.pdf", "size": 1024, "uploaded_at": "2026-08-01T10:00:00Z"}
        ]
    })
}

// =========================================================
// URL 拼接与查询串
// =========================================================

#[test]
fn url_join_handles_slashes() {
    let api = ApiClient::new("/api/", MockHttpClient::new(), MemoryStorage::new());
    assert_eq!(api.url("login/"), "/api/login/");
    assert_eq!(api.url("/login/"), "/api/login/");
}

#[test]
fn encodes_query_values() {
    assert_eq!(encode_query_value("report"), "report");
    assert_eq!(encode_query_value("annual report"), "annual%20report");
    assert_eq!(encode_query_value("a&b=c"), "a%26b%3Dc");
}

#[tokio::test]
async fn list_sends_page_and_search_params() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_json(200, file_page_body(Some("p3"), Some("p1")));

    let api = client_with(&mock, &storage);
    let page = api.list_files(2, "report").await.unwrap();

    let requests = mock.requests.borrow();
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].url, "/api/files/list/?page=2&search=report");
    // 信封中的 next/previous 原样映射到分页标志
    assert!(page.has_next);
    assert!(page.has_previous);
    assert_eq!(page.items[0].id, 1);
}

#[tokio::test]
async fn empty_search_is_omitted() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_json(200, file_page_body(None, None));

    let api = client_with(&mock, &storage);
    api.list_files(1, "").await.unwrap();

    assert_eq!(mock.requests.borrow()[0].url, "/api/files/list/?page=1");
}

// =========================================================
// Bearer 令牌附加
// =========================================================

#[tokio::test]
async fn attaches_bearer_token_when_present() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    storage.set(KEY_ACCESS_TOKEN, "tok-123");
    mock.enqueue_json(200, file_page_body(None, None));

    let api = client_with(&mock, &storage);
    api.list_files(1, "").await.unwrap();

    let requests = mock.requests.borrow();
    assert_eq!(requests[0].header("authorization"), Some("Bearer tok-123"));
}

#[tokio::test]
async fn no_token_means_no_auth_header() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_json(200, file_page_body(None, None));

    let api = client_with(&mock, &storage);
    api.list_files(1, "").await.unwrap();

    assert_eq!(mock.requests.borrow()[0].header("authorization"), None);
}

#[tokio::test]
async fn public_share_fetch_never_sends_credentials() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    // 即使存储中有令牌，公开端点也不得携带
    storage.set(KEY_ACCESS_TOKEN, "tok-123");
    mock.enqueue_binary(200, Some(r#"attachment; filename="shared.txt""#), b"hi");

    let api = client_with(&mock, &storage);
    let file = api.fetch_shared("abc-token").await.unwrap();

    let requests = mock.requests.borrow();
    assert_eq!(requests[0].url, "/api/files/shared/abc-token/");
    assert_eq!(requests[0].header("authorization"), None);
    assert_eq!(file.filename, "shared.txt");
}

// =========================================================
// 认证端点
// =========================================================

#[tokio::test]
async fn login_parses_tokens_and_user() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_json(
        200,
        json!({
            "access": "acc",
            "refresh": "ref",
            "user": {
                "id": 9,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "a@x.com",
                "date_of_birth": "1815-12-10"
            },
            "message": "Login successful"
        }),
    );

    let api = client_with(&mock, &storage);
    let resp = api.login("a@x.com", "pw1").await.unwrap();

    assert_eq!(resp.access, "acc");
    assert_eq!(resp.refresh, "ref");
    assert_eq!(resp.user.email, "a@x.com");

    let requests = mock.requests.borrow();
    assert_eq!(requests[0].url, "/api/login/");
    assert_eq!(
        requests[0].json_body().unwrap(),
        &json!({"email": "a@x.com", "password": "pw1"})
    );
}

#[tokio::test]
async fn login_failure_carries_backend_message() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_json(400, json!({"error": "Invalid credentials"}));

    let api = client_with(&mock, &storage);
    let err = api.login("a@x.com", "wrong").await.unwrap_err();

    assert_eq!(err, ApiError::http(400, "Invalid credentials"));
}

#[tokio::test]
async fn logout_posts_refresh_token() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();

    let api = client_with(&mock, &storage);
    api.logout("ref-token").await.unwrap();

    let requests = mock.requests.borrow();
    assert_eq!(requests[0].url, "/api/logout/");
    assert_eq!(
        requests[0].json_body().unwrap(),
        &json!({"refresh": "ref-token"})
    );
}

#[tokio::test]
async fn reset_password_path_carries_uid_and_token() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();

    let api = client_with(&mock, &storage);
    api.reset_password("Mg", "tok-xyz", "new", "new").await.unwrap();

    assert_eq!(
        mock.requests.borrow()[0].url,
        "/api/reset-password/Mg/tok-xyz/"
    );
}

// =========================================================
// 下载与删除
// =========================================================

#[tokio::test]
async fn download_parses_content_disposition() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_binary(
        200,
        Some(r#"attachment; filename="q3 report.pdf""#),
        &[1, 2, 3],
    );

    let api = client_with(&mock, &storage);
    let file = api.download_file(7).await.unwrap();

    assert_eq!(mock.requests.borrow()[0].url, "/api/files/download/7/");
    assert_eq!(file.filename, "q3 report.pdf");
    assert_eq!(file.bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn download_falls_back_to_default_name() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_binary(200, None, b"data");

    let api = client_with(&mock, &storage);
    let file = api.download_file(7).await.unwrap();
    assert_eq!(file.filename, "downloaded_file");
}

#[test]
fn disposition_parsing_edge_cases() {
    assert_eq!(
        filename_from_disposition(Some(r#"attachment; filename="a.txt""#)),
        "a.txt"
    );
    // 未闭合的引号、空文件名、完全缺失都退回兜底名
    assert_eq!(
        filename_from_disposition(Some(r#"attachment; filename="broken"#)),
        "downloaded_file"
    );
    assert_eq!(
        filename_from_disposition(Some(r#"attachment; filename="""#)),
        "downloaded_file"
    );
    assert_eq!(filename_from_disposition(Some("inline")), "downloaded_file");
    assert_eq!(filename_from_disposition(None), "downloaded_file");
}

#[tokio::test]
async fn delete_then_refetch_uses_same_page_and_search() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_json(204, json!({}));
    mock.enqueue_json(200, file_page_body(None, None));

    let api = client_with(&mock, &storage);
    api.delete_file(42).await.unwrap();
    api.list_files(2, "report").await.unwrap();

    let requests = mock.requests.borrow();
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].url, "/api/files/delete/42/");
    assert_eq!(requests[1].url, "/api/files/list/?page=2&search=report");
}

// =========================================================
// 分享端点
// =========================================================

#[tokio::test]
async fn create_share_serializes_payload() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_json(201, json!({"detail": "File shared and email sent."}));

    let api = client_with(&mock, &storage);
    let request = ShareRequest {
        file: 5,
        recipient_email: "friend@x.com".into(),
        expiration_hours: 24,
        message: "enjoy".into(),
    };
    api.create_share(&request).await.unwrap();

    let requests = mock.requests.borrow();
    assert_eq!(requests[0].url, "/api/files/share/");
    assert_eq!(
        requests[0].json_body().unwrap(),
        &json!({
            "file": 5,
            "recipient_email": "friend@x.com",
            "expiration_hours": 24,
            "message": "enjoy"
        })
    );
}

#[tokio::test]
async fn shared_list_parses_records() {
    let mock = MockHttpClient::new();
    let storage = MemoryStorage::new();
    mock.enqueue_json(
        200,
        json!([{
            "token": "uuid-1",
            "filename": "report.pdf",
            "recipient_email": "friend@x.com",
            "shared_at": "2026-08-02T09:00:00Z",
            "accessed": false
        }]),
    );

    let api = client_with(&mock, &storage);
    let shares = api.shared_list().await.unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].token, "uuid-1");
    assert!(!shares[0].accessed);
}

// =========================================================
// 真实后端冒烟测试 (cargo test -- --ignored)
// =========================================================

#[tokio::test]
#[ignore]
async fn live_backend_shared_token_is_not_found() {
    let base = std::env::var("FILESHARE_API_BASE")
        .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());
    let api = ApiClient::new(&base, ReqwestHttpClient::new(), MemoryStorage::new());

    let err = api
        .fetch_shared("00000000-0000-0000-0000-000000000000")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "expected 404, got {:?}", err);
}
