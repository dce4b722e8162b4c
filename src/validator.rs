//! Address validation
//!
//! Pure syntactic validation of IPv4/IPv6 literals. Runs before any
//! network call so malformed input never reaches the wire. No DNS, no
//! reachability checks, no scope classification (reserved/private is
//! the remote service's call).

use std::net::{Ipv4Addr, Ipv6Addr};

/// Returns true if `candidate` is a syntactically valid IPv4 or IPv6
/// address literal.
///
/// Control characters anywhere in the string reject it outright,
/// before any parsing. That check guards header/path injection and is
/// independent of how the address parser treats such bytes.
///
/// A link-local zone suffix (`fe80::1%eth0`) is accepted for IPv6.
pub fn is_valid_address(candidate: &str) -> bool {
    if candidate.is_empty() || contains_control_chars(candidate) {
        return false;
    }
    is_valid_ipv4(candidate) || is_valid_ipv6(candidate)
}

/// Explicit pre-check for `\n`, `\r`, `\t`, NUL and any other control
/// character.
pub fn contains_control_chars(s: &str) -> bool {
    s.chars().any(|c| c.is_control())
}

fn is_valid_ipv4(s: &str) -> bool {
    // std parsing enforces exactly four decimal octets in 0-255 and
    // rejects leading zeros, hex, and trailing garbage.
    s.parse::<Ipv4Addr>().is_ok()
}

fn is_valid_ipv6(s: &str) -> bool {
    // Split off an optional zone index; std does not understand them.
    let (addr, zone) = match s.split_once('%') {
        Some((addr, zone)) => (addr, Some(zone)),
        None => (s, None),
    };

    if let Some(zone) = zone {
        // Zone must be non-empty and free of separators that could
        // smuggle extra path/query content.
        if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_') {
            return false;
        }
    }

    addr.parse::<Ipv6Addr>().is_ok()
}
