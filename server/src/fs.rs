use std::io;
use std::path::Path;
use tokio::fs;
use tracing::debug;
use filemgr_common::types::{DirectoryEntry, DirectoryListing, FileEntry};

/// Filesystem adapter used by the handlers.
///
/// Paths are taken as given by the caller: relative paths resolve against the
/// server's working directory and nothing is confined to a root.
pub struct FileSystem;

impl FileSystem {
    pub fn new() -> Self {
        FileSystem
    }

    /// Lists `path`, or the working directory when `path` is empty.
    pub async fn list_directory(&self, path: &str) -> io::Result<DirectoryListing> {
        let target = if path.is_empty() {
            std::env::current_dir()?.to_string_lossy().into_owned()
        } else {
            path.to_string()
        };
        debug!(path = %target, "listing directory");

        let mut listing = DirectoryListing {
            path: target,
            ..Default::default()
        };
        let mut dir = fs::read_dir(&listing.path).await?;
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks; anything that is not a regular file counts as a directory.
            match fs::metadata(entry.path()).await {
                Ok(metadata) if metadata.is_file() => {
                    listing.files.push(FileEntry::new(name, metadata.len()));
                }
                _ => listing.directories.push(DirectoryEntry::new(name)),
            }
        }

        Ok(listing)
    }

    /// Reads `path` as UTF-8 text with `\r\n` and lone `\r` turned into `\n`.
    pub async fn read_file(&self, path: &str) -> io::Result<String> {
        debug!(path, "reading file");
        let text = fs::read_to_string(path).await?;
        Ok(normalize_newlines(text))
    }

    /// Removes a regular file, or else an empty directory.
    pub async fn delete_path(&self, path: &str) -> io::Result<()> {
        debug!(path, "deleting path");
        match fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => fs::remove_file(path).await,
            _ => fs::remove_dir(path).await,
        }
    }

    /// Creates or truncates `path`. The parent directory must already exist.
    pub async fn create_file(&self, path: &str, content: &str) -> io::Result<()> {
        debug!(path, bytes = content.len(), "writing file");
        fs::write(path, content.as_bytes()).await
    }

    pub async fn create_directory(&self, path: &str) -> io::Result<()> {
        debug!(path, "creating directory");
        fs::create_dir_all(Path::new(path)).await
    }
}

fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}
