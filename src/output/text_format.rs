//! Plain text export.

use super::ExportRecord;
use std::fmt::Write;

/// Render a record as a short human-readable report.
pub fn to_text(record: &ExportRecord) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Port Scan Results for {}", record.target);
    let _ = writeln!(
        out,
        "Generated: {}",
        record.generated.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out.push('\n');

    for entry in &record.results {
        let _ = writeln!(out, "Port {}/TCP - {}", entry.port, entry.service);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanEntry;
    use crate::types::Port;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_text_layout() {
        let record = ExportRecord {
            generated: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            target: "localhost (127.0.0.1)".to_string(),
            results: vec![
                ScanEntry::new(Port::new(22).unwrap(), "SSH"),
                ScanEntry::new(Port::new(8888).unwrap(), "unknown"),
            ],
        };

        let expected = "Port Scan Results for localhost (127.0.0.1)\n\
                        Generated: 2024-05-01 12:30:00 UTC\n\
                        \n\
                        Port 22/TCP - SSH\n\
                        Port 8888/TCP - unknown\n";
        assert_eq!(to_text(&record), expected);
    }
}
