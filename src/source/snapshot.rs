//! Shared types for poll snapshots.
//!
//! A snapshot is what the host transport produced for one device in one
//! poll cycle: for every section (variant name) a string table whose first
//! row holds one value per declared OID, in declaration order.

use std::collections::BTreeMap;

/// Rows of raw string values as returned by the SNMP transport.
pub type StringTable = Vec<Vec<String>>;

/// A complete poll of one device, keyed by section name.
///
/// ```json
/// {
///   "eltek": [["EL-1", "1.2.3", "SiteA", "1", "1205", "102", "2300"]],
///   "eltek_temperature": [["55", "3", "N/A", "N/A"]]
/// }
/// ```
pub type PollSnapshot = BTreeMap<String, StringTable>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{
            "eltek": [["EL-1", "1.2.3", "SiteA", "1", "1205", "102", "2300"]],
            "eltek_temperature": [["55", "3", "", ""]],
            "flatpack2": []
        }"#;

        let snapshot: PollSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.len(), 3);

        let status = snapshot.get("eltek").unwrap();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].len(), 7);
        assert_eq!(status[0][4], "1205");

        let temperature = snapshot.get("eltek_temperature").unwrap();
        assert_eq!(temperature[0][2], "");

        assert!(snapshot.get("flatpack2").unwrap().is_empty());
    }
}
