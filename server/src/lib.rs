//! HTTP file manager: a client registry plus direct filesystem operations on
//! the host running the server.

pub mod config;
pub mod error;
pub mod fs;
pub mod http;
pub mod registry;
pub mod routes;

pub use crate::http::{app, HttpServer};

/// Shared state handed to every handler.
pub struct AppState {
    pub registry: registry::ClientRegistry,
    pub fs: fs::FileSystem,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            registry: registry::ClientRegistry::new(),
            fs: fs::FileSystem::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
