//! Linux interface-listing tool probe (`ip -4 -o addr show`).

use std::time::Duration;

use regex::Regex;

const TOOL_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs `ip -4 -o addr show` and extracts every IPv4 address it reports.
///
/// Best-effort: any spawn failure, timeout or non-UTF-8 output yields an
/// empty list.
pub(crate) async fn tool_ips() -> Vec<String> {
    let output = tokio::time::timeout(
        TOOL_TIMEOUT,
        tokio::process::Command::new("ip")
            .args(["-4", "-o", "addr", "show"])
            .output(),
    )
    .await;

    match output {
        Ok(Ok(o)) => extract_ips(&String::from_utf8_lossy(&o.stdout)),
        Ok(Err(e)) => {
            tracing::debug!("ip addr probe failed: {e}");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!("ip addr probe timed out");
            Vec::new()
        }
    }
}

/// Pulls the address out of `inet <addr>/<prefix>` tokens.
fn extract_ips(output: &str) -> Vec<String> {
    let Ok(pattern) = Regex::new(r"inet (\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})/") else {
        return Vec::new();
    };
    pattern
        .captures_iter(output)
        .map(|c| c[1].to_string())
        .collect()
}
