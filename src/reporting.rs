//! Plain-text tables for analysis results.

use std::fmt;

use crate::analysis::{
    ConfigurationReport, DemandDiagnostics, MetricsRow, ProductComparison, column_labels,
};

const NAME_WIDTH: usize = 10;

fn write_header(f: &mut fmt::Formatter<'_>, window: usize) -> fmt::Result {
    let labels = column_labels(window);
    write!(f, "{:<NAME_WIDTH$}", labels[0])?;
    for label in &labels[1..] {
        write!(f, " {:>w$}", label, w = label.len().max(12))?;
    }
    writeln!(f)
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &MetricsRow, window: usize) -> fmt::Result {
    let labels = column_labels(window);
    write!(f, "{:<NAME_WIDTH$}", row.name)?;
    for (label, value) in labels[1..].iter().zip(row.values()) {
        write!(f, " {:>w$.3}", value, w = label.len().max(12))?;
    }
    writeln!(f)
}

impl fmt::Display for ConfigurationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ({}) ---", self.product, self.mode)?;
        write_header(f, self.window)?;
        for row in self.all_rows() {
            write_row(f, row, self.window)?;
        }
        Ok(())
    }
}

impl fmt::Display for DemandDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<NAME_WIDTH$} {:>8}", "", "CV")?;
        for name in &self.names {
            write!(f, " {name:>9}")?;
        }
        writeln!(f)?;
        for (i, name) in self.names.iter().enumerate() {
            match self.cv[i] {
                Some(cv) => write!(f, "{name:<NAME_WIDTH$} {cv:>8.3}")?,
                None => write!(f, "{name:<NAME_WIDTH$} {:>8}", "n/a")?,
            }
            for corr in &self.correlation[i] {
                write!(f, " {corr:>9.3}")?;
            }
            writeln!(f)?;
        }
        match self.mean_correlation() {
            Some(rho) => writeln!(f, "mean pairwise correlation: {rho:.3}"),
            None => writeln!(f, "mean pairwise correlation: n/a"),
        }
    }
}

/// Regional total versus national daily cost for every compared product.
#[derive(Debug, Clone)]
pub struct CostSummary<'a> {
    pub comparisons: &'a [ProductComparison],
}

impl fmt::Display for CostSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Daily holding + transportation cost ---")?;
        writeln!(
            f,
            "{:<NAME_WIDTH$} {:>12} {:>12} {:>12}  Recommendation",
            "", "Regional", "National", "Savings"
        )?;
        for c in self.comparisons {
            writeln!(
                f,
                "{:<NAME_WIDTH$} {:>12.3} {:>12.3} {:>12.3}  {}",
                c.product,
                c.regional_cost(),
                c.national_cost(),
                c.savings(),
                c.recommendation().label()
            )?;
        }
        Ok(())
    }
}
