use filemgr_common::types::{
    ClientMap, ContentResponse, CreateFileRequest, DirectoryListing, PathRequest,
    RegisterRequest, StatusResponse,
};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: StatusCode, message: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Typed client for the file manager HTTP API.
#[derive(Debug, Clone)]
pub struct FileManagerClient {
    http: Client,
    base_url: String,
}

impl FileManagerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        FileManagerClient {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str, client_name: Option<&str>) -> String {
        match client_name {
            Some(name) => format!("{}/{}/{}", self.base_url, route, urlencoding::encode(name)),
            None => format!("{}/{}", self.base_url, route),
        }
    }

    pub async fn health(&self) -> Result<String> {
        let resp = self.http.get(self.url("", None)).send().await?;
        Ok(check(resp).await?.text().await?)
    }

    pub async fn register(&self, client_name: &str) -> Result<StatusResponse> {
        let body = RegisterRequest { client_name: client_name.to_string() };
        self.post(self.url("register", None), &body).await
    }

    pub async fn clients(&self) -> Result<ClientMap> {
        self.get(self.url("clients", None), None).await
    }

    /// Lists `path` on the server; `None` lists its working directory.
    pub async fn file_list(&self, client_name: &str, path: Option<&str>) -> Result<DirectoryListing> {
        self.get(self.url("file_list", Some(client_name)), path).await
    }

    pub async fn read_file(&self, client_name: &str, path: &str) -> Result<String> {
        let resp: ContentResponse = self
            .get(self.url("read_file", Some(client_name)), Some(path))
            .await?;
        Ok(resp.content)
    }

    pub async fn delete_file(&self, client_name: &str, path: &str) -> Result<StatusResponse> {
        let body = PathRequest { path: Some(path.to_string()) };
        self.post(self.url("delete_file", Some(client_name)), &body).await
    }

    pub async fn create_file(
        &self,
        client_name: &str,
        path: &str,
        content: &str,
    ) -> Result<StatusResponse> {
        let body = CreateFileRequest {
            path: Some(path.to_string()),
            content: Some(content.to_string()),
        };
        self.post(self.url("create_file", Some(client_name)), &body).await
    }

    pub async fn create_directory(&self, client_name: &str, path: &str) -> Result<StatusResponse> {
        let body = PathRequest { path: Some(path.to_string()) };
        self.post(self.url("create_directory", Some(client_name)), &body).await
    }

    async fn get<T: DeserializeOwned>(&self, url: String, path: Option<&str>) -> Result<T> {
        debug!("GET {} path={:?}", url, path);
        let mut req = self.http.get(&url);
        if let Some(path) = path {
            req = req.query(&[("path", path)]);
        }
        let resp = req.send().await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, url: String, body: &B) -> Result<T> {
        debug!("POST {}", url);
        let resp = self.http.post(&url).json(body).send().await?;
        Ok(check(resp).await?.json().await?)
    }
}

/// Turns a non-success response into `ClientError::Server`, preferring the
/// `error` field of a JSON body.
async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await?;
    Err(ClientError::Server {
        status,
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
