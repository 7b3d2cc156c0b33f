//! Terminal output.
//!
//! Produces human-readable output with colors and formatting.

use crate::scanner::{ScanJob, ScanReport};
use crate::types::ScanTarget;
use console::style;
use std::io::{self, Write};

const HEAVY_RULE: &str = "═══════════════════════════════════════════════════════";
const LIGHT_RULE: &str = "───────────────────────────────────────────────────";

/// Print the summary and open-port table of a completed scan.
pub fn print_report(report: &ScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report)
}

fn write_report(out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(HEAVY_RULE).cyan())?;
    writeln!(
        out,
        "                 {} Scan Results",
        style("portsweep").cyan().bold()
    )?;
    writeln!(out, "{}", style(HEAVY_RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Target:").bold(), report.target.original)?;
    writeln!(out, "  {} {}", style("IP Address:").bold(), report.target.ip)?;
    writeln!(
        out,
        "  {} {} ports scanned in {:.2}s with {} workers",
        style("Statistics:").bold(),
        report.ports_scanned,
        report.duration.as_secs_f64(),
        report.threads
    )?;
    writeln!(
        out,
        "              {} open",
        style(report.open_ports()).green().bold()
    )?;
    writeln!(out)?;

    if report.results.is_empty() {
        writeln!(out, "  {}", style("No open ports found.").dim())?;
    } else {
        writeln!(out, "  {}", style(LIGHT_RULE).dim())?;
        writeln!(
            out,
            "  {:>6}  {:<9}  {}",
            style("PORT").bold(),
            style("STATE").bold(),
            style("SERVICE").bold()
        )?;
        writeln!(out, "  {}", style(LIGHT_RULE).dim())?;

        for entry in &report.results {
            writeln!(
                out,
                "  {:>6}  {:<9}  {}",
                entry.port,
                style("open").green().bold(),
                entry.service
            )?;
        }

        writeln!(out, "  {}", style(LIGHT_RULE).dim())?;
    }

    writeln!(out)?;
    Ok(())
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(target: &ScanTarget, job: &ScanJob) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Target: {} ({})",
        style("•").dim(),
        style(&target.original).white().bold(),
        target.ip
    );
    println!(
        "{} Scanning {} ports ({}) with {} workers, {:.1}s timeout",
        style("•").dim(),
        style(job.ports().len()).white().bold(),
        job.ports(),
        job.threads(),
        job.timeout().as_secs_f64()
    );
    println!();
}

/// Print the notice shown when the user interrupts a scan.
pub fn print_aborted(probes_completed: usize, total: usize) {
    eprintln!();
    eprintln!(
        "{} Scan aborted by user after {}/{} probes.",
        style("✗").red().bold(),
        probes_completed,
        total
    );
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}
