//! Agent side of the file manager: a typed HTTP client for the server API.

pub mod api;

pub use api::{ClientError, FileManagerClient};
