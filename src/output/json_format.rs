//! JSON export.

use super::ExportRecord;
use crate::error::ExportResult;

/// Encode a record as pretty-printed JSON.
pub fn to_json(record: &ExportRecord) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Parse a record previously written by [`to_json`].
pub fn from_json(input: &str) -> ExportResult<ExportRecord> {
    Ok(serde_json::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanEntry;
    use crate::types::Port;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_json_shape() {
        let record = ExportRecord {
            generated: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            target: "127.0.0.1".to_string(),
            results: vec![ScanEntry::new(Port::new(22).unwrap(), "SSH")],
        };

        let value: serde_json::Value = serde_json::from_str(&to_json(&record).unwrap()).unwrap();
        assert_eq!(value["generated"], "2024-05-01T12:30:00Z");
        assert_eq!(value["results"][0]["port"], 22);
        assert_eq!(value["results"][0]["service"], "SSH");
    }

    #[test]
    fn test_rejects_port_zero() {
        let input = r#"{"generated":"2024-05-01T12:30:00Z","target":"x","results":[{"port":0,"service":"?"}]}"#;
        assert!(from_json(input).is_err());
    }
}
