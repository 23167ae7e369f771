//! Route handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::Html;
use serde::{Deserialize, Serialize};

/// Shared handler state.
pub(crate) struct AppState {
    pub(crate) upload_dir: PathBuf,
}

/// JSON reply for `POST /upload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// JSON reply for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub upload_folder: String,
    pub total_files: usize,
    pub total_size_mb: f64,
    pub available_ips: Vec<String>,
}

/// `GET /` — the phone-facing upload page.
pub(crate) async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

/// `POST /upload` — multipart upload; the page submits under the `files`
/// field, any field carrying a file name is accepted.
///
/// Per-file failures accumulate into the response instead of aborting the
/// request, so a batch with one bad file still lands the rest.
pub(crate) async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Json<UploadResponse> {
    let mut saved: Vec<String> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                errors.push(format!("malformed multipart data: {e}"));
                break;
            }
        };

        let original = field.file_name().unwrap_or_default().to_string();
        let Some(name) = sanitize_filename(&original) else {
            errors.push(format!("invalid file name: {original:?}"));
            continue;
        };

        let stamped = format!("{}{name}", chrono::Local::now().format("%Y%m%d_%H%M%S_"));
        let path = state.upload_dir.join(&stamped);
        match store_field(field, &path).await {
            Ok(size) => {
                tracing::info!(file = %stamped, size, "file uploaded");
                saved.push(stamped);
            }
            Err(e) => {
                tracing::warn!(file = %stamped, "failed to store upload: {e}");
                errors.push(format!("failed to store {original}: {e}"));
                // Don't leave a truncated file behind.
                let _ = tokio::fs::remove_file(&path).await;
            }
        }
    }

    let response = if saved.is_empty() {
        UploadResponse {
            success: false,
            message: "no files were uploaded".into(),
            files: saved,
            errors,
        }
    } else {
        let mut message = format!("uploaded {} file(s)", saved.len());
        if !errors.is_empty() {
            message.push_str(&format!(", {} failed", errors.len()));
        }
        UploadResponse {
            success: true,
            message,
            files: saved,
            errors,
        }
    };
    Json(response)
}

/// `GET /status` — upload-folder statistics and current candidates.
pub(crate) async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (total_files, total_bytes) = folder_stats(&state.upload_dir).await;

    Json(StatusResponse {
        upload_folder: state.upload_dir.to_string_lossy().into_owned(),
        total_files,
        total_size_mb: (total_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0,
        available_ips: pocketdrop_netscan::collect_candidates().await,
    })
}

/// Streams one multipart field to `path` chunk by chunk, so an upload near
/// the body limit never has to fit in memory. Returns the byte count.
async fn store_field(
    mut field: axum::extract::multipart::Field<'_>,
    path: &Path,
) -> Result<u64, String> {
    use tokio::io::AsyncWriteExt;

    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| format!("create failed: {e}"))?;

    let mut written = 0u64;
    loop {
        let chunk = match field.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => return Err(format!("receive failed: {e}")),
        };
        file.write_all(&chunk)
            .await
            .map_err(|e| format!("write failed: {e}"))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| format!("flush failed: {e}"))?;
    Ok(written)
}

/// Counts regular files and their total size in the upload directory.
async fn folder_stats(dir: &Path) -> (usize, u64) {
    let mut count = 0usize;
    let mut bytes = 0u64;

    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return (0, 0);
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        if let Ok(meta) = entry.metadata().await
            && meta.is_file()
        {
            count += 1;
            bytes += meta.len();
        }
    }

    (count, bytes)
}

/// Reduces a client-supplied file name to a safe basename.
///
/// Strips any path components, maps everything outside `[A-Za-z0-9._-]` to
/// `_`, and refuses names that end up empty or all underscores/dots.
fn sanitize_filename(name: &str) -> Option<String> {
    let base = Path::new(name).file_name()?.to_string_lossy();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_' || c == '.') {
        return None;
    }
    Some(cleaned)
}
