use std::io::{self, Write};

use crate::application::LedgerReport;
use crate::domain::{Cents, Ledger, format_cents, format_percentage};

/// Width of a bar for a 100% share.
const BAR_WIDTH: usize = 30;

/// Plain-text rendering of ledger state.
pub struct Renderer {
    currency: String,
}

impl Renderer {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn money(&self, cents: Cents) -> String {
        format!("{}{}", self.currency, format_cents(cents))
    }

    /// One line with the running totals, printed after every change.
    pub fn write_totals<W: Write>(&self, ledger: &Ledger, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Total: {}/month ({}/year) across {} subscription{}",
            self.money(ledger.total()),
            self.money(ledger.yearly_projection()),
            ledger.len(),
            if ledger.len() == 1 { "" } else { "s" }
        )
    }

    /// Numbered list in insertion order.
    pub fn write_list<W: Write>(&self, ledger: &Ledger, out: &mut W) -> io::Result<()> {
        if ledger.is_empty() {
            return writeln!(out, "No subscriptions yet.");
        }
        for (i, sub) in ledger.iter().enumerate() {
            writeln!(out, "{:>3}. {} - {}", i + 1, sub.name, self.money(sub.cost_cents))?;
        }
        Ok(())
    }

    pub fn write_summary<W: Write>(&self, report: &LedgerReport, out: &mut W) -> io::Result<()> {
        writeln!(out, "Subscription Budget")?;
        writeln!(out, "{}", "-".repeat(40))?;
        writeln!(out, "Subscriptions:      {}", report.count)?;
        writeln!(out, "Monthly total:      {}", self.money(report.total))?;
        if let Some(average) = report.average {
            writeln!(out, "Average:            {}", self.money(average))?;
        }
        if let Some(top) = &report.most_expensive {
            writeln!(
                out,
                "Most expensive:     {} ({})",
                top.name,
                self.money(top.cost_cents)
            )?;
        }
        if let Some(low) = &report.cheapest {
            writeln!(
                out,
                "Cheapest:           {} ({})",
                low.name,
                self.money(low.cost_cents)
            )?;
        }
        writeln!(
            out,
            "Yearly projection:  {}",
            self.money(report.yearly_projection)
        )
    }

    /// Breakdown table with a text bar per row.
    pub fn write_table<W: Write>(&self, report: &LedgerReport, out: &mut W) -> io::Result<()> {
        if report.breakdown.is_empty() {
            return writeln!(out, "No subscriptions yet.");
        }

        writeln!(
            out,
            "{:>3}  {:<24} {:>12} {:>7}  {}",
            "#", "NAME", "COST", "SHARE", "CHART"
        )?;
        writeln!(out, "{}", "-".repeat(52 + BAR_WIDTH))?;
        for row in &report.breakdown {
            writeln!(
                out,
                "{:>3}  {:<24} {:>12} {:>7}  {}",
                row.position,
                row.name,
                self.money(row.cost),
                format_percentage(row.percentage),
                bar(row.percentage)
            )?;
        }
        writeln!(out, "{}", "-".repeat(52 + BAR_WIDTH))?;
        writeln!(
            out,
            "{:>3}  {:<24} {:>12} {:>7}",
            "",
            "TOTAL",
            self.money(report.total),
            format_percentage(100.0)
        )
    }

    pub fn write_report<W: Write>(&self, report: &LedgerReport, out: &mut W) -> io::Result<()> {
        self.write_summary(report, out)?;
        writeln!(out)?;
        self.write_table(report, out)
    }
}

/// Bar of `#` proportional to the percentage. Any non-zero share gets at least one mark.
fn bar(percentage: f64) -> String {
    let width = (percentage / 100.0 * BAR_WIDTH as f64).round() as usize;
    let width = if percentage > 0.0 { width.max(1) } else { 0 };
    "#".repeat(width.min(BAR_WIDTH))
}
