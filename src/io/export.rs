//! CSV export for per-series inventory metrics.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::column_labels;
use crate::runner::AnalysisRun;

/// Exports every successful run's rows to a CSV file at the given path.
///
/// Writes a header row followed by one row per (product, mode, series),
/// totals included. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(run: &AnalysisRun, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(run, buf)
}

/// Writes analysis rows as CSV to any writer.
///
/// Columns are `product,mode` followed by the report columns, with the
/// window-demand column named after the exposure window.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(run: &AnalysisRun, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let labels = column_labels(run.window);
    wtr.write_record(
        ["product", "mode"]
            .into_iter()
            .chain(labels.iter().map(String::as_str)),
    )?;

    for outcome in &run.outcomes {
        for report in outcome.reports() {
            for row in report.all_rows() {
                let mut record = vec![
                    report.product.clone(),
                    report.mode.to_string(),
                    row.name.clone(),
                ];
                record.extend(row.values().iter().map(|v| format!("{v:.6}")));
                wtr.write_record(&record)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
