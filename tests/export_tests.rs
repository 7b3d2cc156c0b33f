use portsweep::error::ExportError;
use portsweep::output::{self, ExportFormat, ExportRecord};
use portsweep::scanner::{OutcomeCounts, ScanEntry, ScanReport};
use portsweep::types::{Port, ScanTarget};
use std::collections::HashSet;
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn report() -> ScanReport {
    let results = [(22, "SSH"), (80, "HTTP"), (8888, "unknown")]
        .into_iter()
        .map(|(p, s)| ScanEntry::new(Port::new(p).unwrap(), s))
        .collect();

    ScanReport {
        target: ScanTarget::new("localhost", IpAddr::V4(Ipv4Addr::LOCALHOST)),
        ports: "1-9000".parse().unwrap(),
        ports_scanned: 9000,
        threads: 100,
        duration: Duration::from_secs(3),
        results,
        outcomes: OutcomeCounts::default(),
    }
}

#[test]
fn json_export_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.json");
    let report = report();

    let format = assert_ok!(output::export(&report, &path));
    assert_eq!(format, ExportFormat::Json);

    let parsed = assert_ok!(output::from_json(&fs::read_to_string(&path).unwrap()));
    let written: HashSet<ScanEntry> = parsed.results.iter().cloned().collect();
    let original: HashSet<ScanEntry> = report.results.iter().cloned().collect();
    assert_eq!(written, original);
    assert_eq!(parsed.results, report.results);
    assert_eq!(parsed.target, "localhost (127.0.0.1)");
}

#[test]
fn csv_export_has_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.CSV");

    assert_eq!(assert_ok!(output::export(&report(), &path)), ExportFormat::Csv);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Port,Service\n22,SSH\n80,HTTP\n8888,unknown\n"
    );
}

#[test]
fn other_extensions_export_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.log");

    assert_eq!(assert_ok!(output::export(&report(), &path)), ExportFormat::Text);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Port Scan Results for localhost (127.0.0.1)");
    assert!(lines[1].starts_with("Generated: "));
    assert_eq!(lines[2], "");
    assert_eq!(
        &lines[3..],
        ["Port 22/TCP - SSH", "Port 80/TCP - HTTP", "Port 8888/TCP - unknown"]
    );
}

#[test]
fn unwritable_path_is_reported_not_panicked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("scan.json");

    let err = assert_err!(output::export(&report(), &path));
    assert!(matches!(err, ExportError::Io { .. }));
    assert!(err.to_string().contains("scan.json"));
}

#[test]
fn render_matches_export_record() {
    let record = ExportRecord::new(&report());
    let json = assert_ok!(output::render(&record, ExportFormat::Json));
    let back = assert_ok!(output::from_json(&json));
    assert_eq!(back, record);
}
