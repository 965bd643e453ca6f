use anyhow::Result;
use std::io::Write;

use crate::application::LedgerReport;
use crate::domain::{Ledger, format_cents};

/// Write the percentage breakdown as CSV. Returns the number of rows written.
pub fn export_breakdown_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Write header
    csv_writer.write_record(["name", "cost", "percentage"])?;

    let mut count = 0;
    if let Ok(shares) = ledger.percentage_breakdown() {
        for share in shares {
            csv_writer.write_record([
                share.name.to_string(),
                format_cents(share.cost_cents),
                format!("{:.1}", share.percentage),
            ])?;
            count += 1;
        }
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Write the full report as pretty-printed JSON.
pub fn export_report_json<W: Write>(report: &LedgerReport, mut writer: W) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
