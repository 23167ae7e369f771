//! Local IPv4 candidate discovery for PocketDrop.
//!
//! A desktop advertising an upload URL to a phone may have several active
//! interfaces (Ethernet, WiFi, VPN, virtual adapters). This crate finds every
//! plausible LAN address through three independent best-effort probes and
//! filters them through a strict validator, so the operator can cycle through
//! candidates until one proves reachable.

pub mod collector;
pub mod validator;

#[cfg(target_os = "windows")]
#[path = "probe_windows.rs"]
mod probe;

#[cfg(target_os = "linux")]
#[path = "probe_linux.rs"]
mod probe;

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
#[path = "probe_other.rs"]
mod probe;

pub use collector::{LOOPBACK_PLACEHOLDER, collect_candidates, local_hostname};
pub use validator::is_valid_ip;
