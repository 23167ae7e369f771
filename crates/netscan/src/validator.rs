//! Candidate address validation.

/// Returns `true` if `addr` is a dotted-quad IPv4 string usable as a LAN
/// address.
///
/// Rejects anything that is not exactly four segments of integers in
/// [0, 255], then rejects ranges a phone could never reach the desktop on:
/// loopback (127/8), link-local autoconfiguration (169.254/16), the zero
/// network (0/8, which covers the literal `0.0.0.0`), multicast (224/8) and
/// broadcast-class (255/8).
///
/// Never panics; every malformed input is simply `false`.
pub fn is_valid_ip(addr: &str) -> bool {
    let parts: Vec<&str> = addr.split('.').collect();
    if parts.len() != 4 {
        return false;
    }

    let mut octets = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        match part.parse::<u8>() {
            Ok(v) => octets[i] = v,
            Err(_) => return false,
        }
    }

    match octets[0] {
        // Loopback, zero network, multicast, broadcast-class.
        127 | 0 | 224 | 255 => false,
        // Link-local / APIPA.
        169 if octets[1] == 254 => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_lan_ranges() {
        assert!(is_valid_ip("192.168.1.5"));
        assert!(is_valid_ip("192.168.0.100"));
        assert!(is_valid_ip("10.0.0.1"));
        assert!(is_valid_ip("172.16.40.2"));
    }

    #[test]
    fn rejects_loopback() {
        assert!(!is_valid_ip("127.0.0.1"));
        assert!(!is_valid_ip("127.255.255.255"));
    }

    #[test]
    fn rejects_link_local() {
        assert!(!is_valid_ip("169.254.1.1"));
        // 169.x outside 169.254/16 is routable.
        assert!(is_valid_ip("169.1.1.1"));
    }

    #[test]
    fn rejects_zero_multicast_broadcast() {
        assert!(!is_valid_ip("0.0.0.0"));
        assert!(!is_valid_ip("0.1.2.3"));
        assert!(!is_valid_ip("224.0.0.251"));
        assert!(!is_valid_ip("255.255.255.255"));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(!is_valid_ip(""));
        assert!(!is_valid_ip("192.168.1"));
        assert!(!is_valid_ip("192.168.1.5.6"));
        assert!(!is_valid_ip("192.168.1.5."));
    }

    #[test]
    fn rejects_non_numeric_or_out_of_range() {
        assert!(!is_valid_ip("300.1.1.1"));
        assert!(!is_valid_ip("192.168.one.5"));
        assert!(!is_valid_ip("192.168..5"));
        assert!(!is_valid_ip("192.168.-1.5"));
        assert!(!is_valid_ip("hostname.local"));
    }
}
