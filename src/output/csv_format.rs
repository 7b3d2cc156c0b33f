//! CSV export.

use super::ExportRecord;
use crate::error::ExportResult;

/// Encode a record as CSV with a `Port,Service` header.
pub fn to_csv(record: &ExportRecord) -> ExportResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["Port", "Service"])?;
    for entry in &record.results {
        wtr.write_record([entry.port.to_string().as_str(), entry.service.as_str()])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanEntry;
    use crate::types::Port;
    use chrono::Utc;

    #[test]
    fn test_csv_rows() {
        let record = ExportRecord {
            generated: Utc::now(),
            target: "127.0.0.1".to_string(),
            results: vec![
                ScanEntry::new(Port::new(22).unwrap(), "SSH"),
                ScanEntry::new(Port::new(80).unwrap(), "HTTP"),
            ],
        };

        assert_eq!(to_csv(&record).unwrap(), "Port,Service\n22,SSH\n80,HTTP\n");
    }

    #[test]
    fn test_csv_header_only() {
        let record = ExportRecord {
            generated: Utc::now(),
            target: "127.0.0.1".to_string(),
            results: Vec::new(),
        };
        assert_eq!(to_csv(&record).unwrap(), "Port,Service\n");
    }
}
