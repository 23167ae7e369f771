//! Windows interface-listing tool probe (`ipconfig`).

use std::time::Duration;

use regex::Regex;

/// `ipconfig` terminates quickly; the timeout only guards against a hung
/// console subsystem.
const TOOL_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs `ipconfig` and extracts every IPv4 address it reports.
///
/// Best-effort: any spawn failure, timeout or non-UTF-8 output yields an
/// empty list.
pub(crate) async fn tool_ips() -> Vec<String> {
    let output = tokio::time::timeout(
        TOOL_TIMEOUT,
        tokio::process::Command::new("ipconfig").output(),
    )
    .await;

    match output {
        Ok(Ok(o)) => extract_ips(&String::from_utf8_lossy(&o.stdout)),
        Ok(Err(e)) => {
            tracing::debug!("ipconfig probe failed: {e}");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!("ipconfig probe timed out");
            Vec::new()
        }
    }
}

/// Pulls dotted quads off lines carrying an "IPv4" label.
fn extract_ips(output: &str) -> Vec<String> {
    let Ok(pattern) = Regex::new(r"IPv4[^\r\n]*?(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})") else {
        return Vec::new();
    };
    pattern
        .captures_iter(output)
        .map(|c| c[1].to_string())
        .collect()
}
