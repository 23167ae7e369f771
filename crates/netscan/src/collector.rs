//! Candidate collection across independent discovery strategies.

use std::collections::BTreeSet;
use std::net::{IpAddr, UdpSocket};

use crate::probe;
use crate::validator::is_valid_ip;

/// Fallback returned when every discovery strategy comes up empty, so
/// downstream code never has to handle an empty candidate list.
pub const LOOPBACK_PLACEHOLDER: &str = "127.0.0.1";

/// Address the outbound-route probe targets. A public DNS resolver; no
/// datagram is ever sent, the `connect` only asks the OS which local address
/// it would route from.
const ROUTE_PROBE_TARGET: &str = "8.8.8.8:80";

/// Collects every plausible LAN IPv4 address of this machine.
///
/// Three strategies run in order, each best-effort (a failure is logged and
/// the others still run):
/// 1. interface enumeration,
/// 2. outbound-route probe,
/// 3. the platform's interface-listing tool.
///
/// The merged result is deduplicated and sorted lexicographically as strings.
/// The string sort (not numeric: `"10.0.0.2"` before `"9.0.0.1"`) is a
/// deliberate compatibility policy; keep it.
pub async fn collect_candidates() -> Vec<String> {
    let mut ips: Vec<String> = Vec::new();

    for ip in interface_ips() {
        if !ips.contains(&ip) {
            ips.push(ip);
        }
    }

    if let Some(ip) = outbound_route_ip() {
        if !ips.contains(&ip) {
            ips.push(ip);
        }
    }

    for ip in probe::tool_ips().await {
        if is_valid_ip(&ip) && !ips.contains(&ip) {
            ips.push(ip);
        }
    }

    merge_candidates(ips)
}

/// Deduplicates, sorts and applies the empty-list fallback.
///
/// Pure so the fallback path is testable without disabling live strategies.
fn merge_candidates(ips: Vec<String>) -> Vec<String> {
    let merged: BTreeSet<String> = ips.into_iter().collect();
    let list: Vec<String> = merged.into_iter().collect();

    if list.is_empty() {
        tracing::warn!("no usable addresses discovered, falling back to loopback");
        vec![LOOPBACK_PLACEHOLDER.to_string()]
    } else {
        tracing::debug!(count = list.len(), "discovered candidate addresses");
        list
    }
}

/// Returns this machine's hostname, or `"unknown"` if it cannot be read.
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".into())
}

/// Strategy 1: IPv4 addresses bound to local interfaces.
fn interface_ips() -> Vec<String> {
    let interfaces = match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces,
        Err(e) => {
            tracing::warn!("interface enumeration failed: {e}");
            return Vec::new();
        }
    };

    interfaces
        .into_iter()
        .filter_map(|iface| match iface.ip() {
            IpAddr::V4(ip) => Some(ip.to_string()),
            _ => None,
        })
        .filter(|ip| is_valid_ip(ip))
        .collect()
}

/// Strategy 2: the local address the OS would use for the default outbound
/// route.
///
/// Reveals the primary interface even when enumeration misses it (certain
/// virtual adapter setups). UDP connect never blocks and transmits nothing.
fn outbound_route_ip() -> Option<String> {
    let socket = match UdpSocket::bind("0.0.0.0:0") {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!("outbound-route probe: bind failed: {e}");
            return None;
        }
    };
    if let Err(e) = socket.connect(ROUTE_PROBE_TARGET) {
        tracing::debug!("outbound-route probe: connect failed: {e}");
        return None;
    }
    let addr = match socket.local_addr() {
        Ok(a) => a,
        Err(e) => {
            tracing::debug!("outbound-route probe: local_addr failed: {e}");
            return None;
        }
    };

    let ip = addr.ip().to_string();
    is_valid_ip(&ip).then_some(ip)
}
