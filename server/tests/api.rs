use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{header, Request, StatusCode},
    Router,
};
use filemgr_server::{app, fs::FileSystem, registry::ClientRegistry, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::tempdir;
use tower::ServiceExt;

fn test_app() -> Router {
    let state = AppState {
        registry: ClientRegistry::with_host("test-host"),
        fs: FileSystem::new(),
    };
    app(Arc::new(state)).layer(MockConnectInfo(SocketAddr::from(([192, 168, 1, 20], 53211))))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn p(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn enc(path: &Path) -> String {
    // Minimal query encoding for temp paths.
    p(path).replace('%', "%25").replace(' ', "%20").replace('&', "%26").replace('+', "%2B")
}

#[tokio::test]
async fn home_reports_running() {
    let app = test_app();
    let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"File Manager Server is running");
}

#[tokio::test]
async fn register_records_caller_address() {
    let app = test_app();
    let (status, body) = post_json(&app, "/register", json!({ "client_name": "laptop" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));

    let (status, clients) = get_json(&app, "/clients").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        clients,
        json!({ "laptop": { "ip": "192.168.1.20", "name": "laptop", "last_seen": "test-host" } })
    );
}

#[tokio::test]
async fn reregister_keeps_single_entry() {
    let app = test_app();
    post_json(&app, "/register", json!({ "client_name": "laptop" })).await;
    post_json(&app, "/register", json!({ "client_name": "laptop" })).await;
    post_json(&app, "/register", json!({ "client_name": "desk" })).await;

    let (_, clients) = get_json(&app, "/clients").await;
    let map = clients.as_object().unwrap();
    assert_eq!(map.len(), 2);
    assert!(map.contains_key("laptop"));
}

#[tokio::test]
async fn register_rejects_malformed_body() {
    let app = test_app();
    let (status, body) = post_json(&app, "/register", json!({ "name": "oops" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let request = Request::post("/register")
        .body(Body::from(r#"{"client_name":"x"}"#))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn file_list_for_registered_client() {
    let app = test_app();
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("ten.bin"), b"0123456789").unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();

    post_json(&app, "/register", json!({ "client_name": "any-name" })).await;
    let (status, listing) =
        get_json(&app, &format!("/file_list/any-name?path={}", enc(dir.path()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        listing,
        json!({
            "path": p(dir.path()),
            "files": [{ "name": "ten.bin", "size": 10, "type": "file" }],
            "directories": [{ "name": "nested", "type": "directory" }]
        })
    );
}

#[tokio::test]
async fn file_list_defaults_to_working_directory() {
    let app = test_app();
    post_json(&app, "/register", json!({ "client_name": "c" })).await;

    let (status, listing) = get_json(&app, "/file_list/c").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["path"], json!(p(&std::env::current_dir().unwrap())));

    let (status, _) = get_json(&app, "/file_list/c?path=").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn file_list_unknown_client_is_not_found() {
    let app = test_app();
    let dir = tempdir().unwrap();

    let (status, body) = get_json(&app, "/file_list/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Client not found" }));

    let (status, _) = get_json(&app, &format!("/file_list/ghost?path={}", enc(dir.path()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn file_list_missing_directory_fails() {
    let app = test_app();
    let dir = tempdir().unwrap();
    post_json(&app, "/register", json!({ "client_name": "c" })).await;

    let missing = dir.path().join("missing");
    let (status, body) = get_json(&app, &format!("/file_list/c?path={}", enc(&missing))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn create_then_read_round_trip() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let file = dir.path().join("greeting.txt");

    let (status, body) = post_json(
        &app,
        "/create_file/whoever",
        json!({ "path": p(&file), "content": "hello" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));

    let (status, body) = get_json(&app, &format!("/read_file/whoever?path={}", enc(&file))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "content": "hello" }));
}

#[tokio::test]
async fn create_file_without_content_is_empty() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let file = dir.path().join("blank.txt");
    std::fs::write(&file, "old").unwrap();

    let (status, _) = post_json(&app, "/create_file/c", json!({ "path": p(&file) })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "");
}

#[tokio::test]
async fn read_missing_file_fails() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let (status, body) =
        get_json(&app, &format!("/read_file/c?path={}", enc(&dir.path().join("nope")))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_directory_builds_chain_idempotently() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let nested = dir.path().join("x").join("y").join("z");

    for _ in 0..2 {
        let (status, body) =
            post_json(&app, "/create_directory/c", json!({ "path": p(&nested) })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "success" }));
    }
    assert!(nested.is_dir());
}

#[tokio::test]
async fn delete_non_empty_directory_fails() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let full = dir.path().join("full");
    std::fs::create_dir(&full).unwrap();
    std::fs::write(full.join("inside.txt"), "x").unwrap();

    let (status, body) = post_json(&app, "/delete_file/c", json!({ "path": p(&full) })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(full.join("inside.txt").exists());
}

#[tokio::test]
async fn delete_empty_file_succeeds() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let file = dir.path().join("empty.txt");
    std::fs::write(&file, "").unwrap();

    let (status, body) = post_json(&app, "/delete_file/c", json!({ "path": p(&file) })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));
    assert!(!file.exists());
}

#[tokio::test]
async fn missing_path_is_bad_request() {
    let app = test_app();

    let (status, body) = get_json(&app, "/read_file/c").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No file path provided" }));

    let (status, _) = get_json(&app, "/read_file/c?path=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for uri in ["/delete_file/c", "/create_file/c", "/create_directory/c"] {
        let (status, body) = post_json(&app, uri, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "error": "No path provided" }));

        let (status, _) = post_json(&app, uri, json!({ "path": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn create_file_accepts_large_content() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let file = dir.path().join("big.txt");
    let content = "x".repeat(3 * 1024 * 1024);

    let (status, body) = post_json(
        &app,
        "/create_file/c",
        json!({ "path": p(&file), "content": content }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));
    assert_eq!(std::fs::metadata(&file).unwrap().len(), 3 * 1024 * 1024);
}

#[tokio::test]
async fn read_file_returns_unix_line_endings() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let file = dir.path().join("dos.txt");
    std::fs::write(&file, "a\r\nb\rc").unwrap();

    let (status, body) = get_json(&app, &format!("/read_file/c?path={}", enc(&file))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "content": "a\nb\nc" }));
}

#[tokio::test]
async fn repeated_path_parameter_uses_first() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.txt");
    std::fs::write(&first, "one").unwrap();
    let other = dir.path().join("other.txt");

    let uri = format!("/read_file/c?path={}&path={}", enc(&first), enc(&other));
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "content": "one" }));

    post_json(&app, "/register", json!({ "client_name": "c" })).await;
    let uri = format!("/file_list/c?path={}&path={}", enc(dir.path()), enc(&other));
    let (status, listing) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["path"], json!(p(dir.path())));
}

#[tokio::test]
async fn null_content_writes_empty_file() {
    let app = test_app();
    let dir = tempdir().unwrap();
    let file = dir.path().join("null.txt");
    std::fs::write(&file, "previous").unwrap();

    let (status, _) = post_json(
        &app,
        "/create_file/c",
        json!({ "path": p(&file), "content": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "");
}
