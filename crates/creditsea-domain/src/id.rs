//! Report identifiers

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a stored report based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability matching creation order
/// - 128-bit uniqueness
/// - RFC 9562-standard string format for URLs and JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportId(u128);

impl ReportId {
    /// Generate a new UUIDv7-based ReportId
    ///
    /// # Examples
    ///
    /// ```
    /// use creditsea_domain::ReportId;
    ///
    /// let id = ReportId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ReportId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ReportId from its hyphenated UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use creditsea_domain::ReportId;
    ///
    /// let id = ReportId::new();
    /// let parsed = ReportId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid report id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Big-endian byte form used by the storage layer
    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Inverse of [`ReportId::to_bytes`]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    /// Timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }

    /// Last six hex digits, used as a fallback title for unnamed reports
    pub fn short(&self) -> String {
        let full = self.to_string();
        full[full.len() - 6..].to_string()
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl FromStr for ReportId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl Serialize for ReportId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReportId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Ordering is consistent with the underlying value
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = ReportId::from_value(a);
            let id_b = ReportId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// String and byte forms both preserve the id
        #[test]
        fn test_id_string_and_bytes(value: u128) {
            let id = ReportId::from_value(value);

            prop_assert_eq!(ReportId::from_bytes(id.to_bytes()), id);
            match ReportId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(parsed, id),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
