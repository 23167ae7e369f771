//! HTTP surface a phone talks to after scanning the advertised URL.
//!
//! Serves the static upload page at `/`, accepts multipart uploads at
//! `/upload`, and reports upload-folder statistics plus the current candidate
//! addresses at `/status`. Listens on all interfaces so whichever candidate
//! the operator advertises will reach it.

mod routes;
mod server;

pub use routes::{StatusResponse, UploadResponse};
pub use server::{ServerConfig, UploadServer};

/// Upper bound on a single upload request body (500 MiB, matching what the
/// phone page advertises).
pub const MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

/// Errors produced by the upload server.
///
/// Per-file upload failures are not errors; they travel inside the JSON
/// response so the phone can show them.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
