use serde::{Deserialize, Serialize};

// Wire types shared between the server and the agent
pub mod types {
    use super::*;
    use std::collections::BTreeMap;

    /// Registry entry for a named client.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ClientRecord {
        #[serde(rename = "ip")]
        pub source_address: String,
        pub name: String,
        /// Host name of the server process at registration time.
        pub last_seen: String,
    }

    pub type ClientMap = BTreeMap<String, ClientRecord>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum EntryKind {
        File,
        Directory,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FileEntry {
        pub name: String,
        pub size: u64,
        #[serde(rename = "type")]
        pub kind: EntryKind,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DirectoryEntry {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: EntryKind,
    }

    impl FileEntry {
        pub fn new(name: String, size: u64) -> Self {
            FileEntry { name, size, kind: EntryKind::File }
        }
    }

    impl DirectoryEntry {
        pub fn new(name: String) -> Self {
            DirectoryEntry { name, kind: EntryKind::Directory }
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DirectoryListing {
        pub path: String,
        pub files: Vec<FileEntry>,
        pub directories: Vec<DirectoryEntry>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub client_name: String,
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct PathRequest {
        #[serde(default)]
        pub path: Option<String>,
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct CreateFileRequest {
        #[serde(default)]
        pub path: Option<String>,
        #[serde(default)]
        pub content: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StatusResponse {
        pub status: String,
    }

    impl StatusResponse {
        pub fn success() -> Self {
            StatusResponse { status: "success".to_string() }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ContentResponse {
        pub content: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
    }
}
