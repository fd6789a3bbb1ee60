use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, ConnectInfo, Path, Query, State},
    Json,
};
use filemgr_common::types::{
    ClientMap, ContentResponse, CreateFileRequest, DirectoryListing, PathRequest,
    RegisterRequest, StatusResponse,
};
use tracing::debug;
use crate::{error::AppError, AppState};

pub type ApiResult<T> = Result<Json<T>, AppError>;

pub async fn home() -> &'static str {
    "File Manager Server is running"
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<StatusResponse> {
    let Json(req) = body?;
    state
        .registry
        .register(&req.client_name, &addr.ip().to_string())
        .await;
    Ok(Json(StatusResponse::success()))
}

pub async fn list_clients(State(state): State<Arc<AppState>>) -> Json<ClientMap> {
    Json(state.registry.list_clients().await)
}

/// Lists a directory on this server. The client name only gates access; the
/// listing is never forwarded to the named client.
pub async fn file_list(
    State(state): State<Arc<AppState>>,
    Path(client_name): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<DirectoryListing> {
    let record = state
        .registry
        .lookup(&client_name)
        .await
        .ok_or_else(|| AppError::NotFound("Client not found".into()))?;
    debug!(client = %record.name, ip = %record.source_address, "serving local listing");
    let Query(pairs) = query?;
    let path = query_path(pairs).unwrap_or_default();
    let listing = state.fs.list_directory(&path).await?;
    Ok(Json(listing))
}

pub async fn read_file(
    State(state): State<Arc<AppState>>,
    Path(_client_name): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<ContentResponse> {
    let Query(pairs) = query?;
    let path = required(query_path(pairs))
        .ok_or_else(|| AppError::BadRequest("No file path provided".into()))?;
    let content = state.fs.read_file(&path).await?;
    Ok(Json(ContentResponse { content }))
}

pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(_client_name): Path<String>,
    body: Result<Json<PathRequest>, JsonRejection>,
) -> ApiResult<StatusResponse> {
    let Json(req) = body?;
    let path = required(req.path).ok_or_else(AppError::missing_path)?;
    state.fs.delete_path(&path).await?;
    Ok(Json(StatusResponse::success()))
}

pub async fn create_file(
    State(state): State<Arc<AppState>>,
    Path(_client_name): Path<String>,
    body: Result<Json<CreateFileRequest>, JsonRejection>,
) -> ApiResult<StatusResponse> {
    let Json(req) = body?;
    let path = required(req.path).ok_or_else(AppError::missing_path)?;
    // A JSON null content writes an empty file, same as an absent one.
    let content = req.content.unwrap_or_default();
    state.fs.create_file(&path, &content).await?;
    Ok(Json(StatusResponse::success()))
}

pub async fn create_directory(
    State(state): State<Arc<AppState>>,
    Path(_client_name): Path<String>,
    body: Result<Json<PathRequest>, JsonRejection>,
) -> ApiResult<StatusResponse> {
    let Json(req) = body?;
    let path = required(req.path).ok_or_else(AppError::missing_path)?;
    state.fs.create_directory(&path).await?;
    Ok(Json(StatusResponse::success()))
}

/// First `path` value of the query string; later repeats are ignored.
fn query_path(pairs: Vec<(String, String)>) -> Option<String> {
    pairs.into_iter().find(|(key, _)| key == "path").map(|(_, value)| value)
}

// Absent and empty paths are treated alike.
fn required(path: Option<String>) -> Option<String> {
    path.filter(|p| !p.is_empty())
}
