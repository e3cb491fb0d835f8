// ── MacAddress ──

use std::fmt;

/// MAC address exactly as the server reported it.
///
/// Comparisons against strings are exact; use [`MacAddress::matches`] for a
/// case- and separator-insensitive check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Same hardware address, ignoring case and `-`/`:` separators.
    pub fn matches(&self, other: &str) -> bool {
        let octets = |s: &str| -> Vec<String> {
            s.split([':', '-']).map(str::to_ascii_lowercase).collect()
        };
        octets(&self.0) == octets(other)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MacAddress {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl PartialEq<str> for MacAddress {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MacAddress {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_wire_text() {
        let mac = MacAddress::new("52:54:00:55:B6:80");
        assert_eq!(mac.as_str(), "52:54:00:55:B6:80");
        assert_eq!(mac.to_string(), "52:54:00:55:B6:80");
    }

    #[test]
    fn string_equality_is_exact() {
        let mac = MacAddress::new("52:54:00:55:B6:80");
        assert_eq!(mac, "52:54:00:55:B6:80");
        assert_ne!(mac, "52:54:00:55:b6:80");
    }

    #[test]
    fn matches_ignores_case_and_separator() {
        let mac = MacAddress::new("52:54:00:55:B6:80");
        assert!(mac.matches("52-54-00-55-b6-80"));
        assert!(!mac.matches("52:54:00:55:b6:81"));
    }
}
