//! Address classification.
//!
//! Pure syntactic validation of literal address strings. Malformed input is
//! reported, never rejected with a panic; the admission policy for invalid
//! addresses lives in the orchestrator, not here.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Address family of a validated literal address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    #[serde(rename = "ipv4")]
    V4,
    #[serde(rename = "ipv6")]
    V6,
}

impl AddressFamily {
    /// Derive the family from a parsed address.
    pub fn of(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "ipv4"),
            AddressFamily::V6 => write!(f, "ipv6"),
        }
    }
}

/// Classify a literal address string. `None` means the string is not a
/// well-formed v4 or v6 address.
pub fn classify(address: &str) -> Option<AddressFamily> {
    address.parse::<IpAddr>().ok().map(|ip| AddressFamily::of(&ip))
}

/// Whether the string is a well-formed v4 or v6 address.
pub fn is_valid(address: &str) -> bool {
    classify(address).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_v4() {
        assert_eq!(classify("127.0.0.1"), Some(AddressFamily::V4));
        assert_eq!(classify("10.10.0.255"), Some(AddressFamily::V4));
    }

    #[test]
    fn test_classify_v6() {
        assert_eq!(classify("::1"), Some(AddressFamily::V6));
        assert_eq!(classify("2001:db8::2"), Some(AddressFamily::V6));
    }

    #[test]
    fn test_classify_invalid() {
        assert_eq!(classify("7.7.7.1234"), None);
        assert_eq!(classify("256.0.0.1"), None);
        assert_eq!(classify("not-an-address"), None);
        assert_eq!(classify(""), None);
        assert!(!is_valid("1.2.3"));
    }

    #[test]
    fn test_family_of_parsed() {
        let v4: IpAddr = "192.168.1.1".parse().unwrap();
        let v6: IpAddr = "::2".parse().unwrap();
        assert_eq!(AddressFamily::of(&v4), AddressFamily::V4);
        assert_eq!(AddressFamily::of(&v6), AddressFamily::V6);
    }
}
