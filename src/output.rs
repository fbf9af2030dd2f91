use std::io::{self, Write};

use anyhow::Context;

use super::classify::MappingSummary;

const DIVIDER_WIDTH: usize = 40;

/// Format an integer with ',' separating groups of three digits
fn thousands(x: u64) -> String {
    let digits = x.to_string();
    let n = digits.len();
    let mut s = String::with_capacity(n + n / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            s.push(',')
        }
        s.push(c)
    }
    s
}

fn write_summary<W: Write>(w: &mut W, summary: &MappingSummary) -> io::Result<()> {
    let divider = "-".repeat(DIVIDER_WIDTH);
    writeln!(w, "{}", divider)?;
    writeln!(w, "Total Reads Parsed:  {}", thousands(summary.total()))?;
    writeln!(w, "Mapped to Ref:       {}", thousands(summary.mapped()))?;
    writeln!(w, "Mapping Rate:        {:.2}%", summary.percent_mapped())?;
    writeln!(w, "{}", divider)?;
    writeln!(w, "{}", summary.verdict().conclusion())?;
    w.flush()
}

/// Write the mapping summary and verdict
pub fn write_report<W: Write>(w: &mut W, summary: &MappingSummary) -> anyhow::Result<()> {
    write_summary(w, summary).with_context(|| "Error writing report")
}
