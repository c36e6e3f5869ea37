//! Workbook and CSV readers for per-product daily demand tables.
//!
//! Both formats share one layout: a header row naming the region columns,
//! then one row per day. Extra columns are ignored; only the first
//! `horizon_days` data rows are kept.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::{debug, warn};

use super::series::{DemandSeries, DemandTable};
use super::ProductDemand;
use crate::error::AnalysisError;

/// Reads one sheet per product from an `.xlsx` workbook.
///
/// # Errors
///
/// Returns `Workbook` if the file cannot be opened and `MalformedInput` if a
/// sheet or region column is missing, a cell is empty or non-numeric, or a
/// blank row is followed by more data. Blank rows are accepted only at the
/// end of a sheet.
pub fn load_workbook(
    path: &Path,
    products: &[String],
    regions: &[String],
    horizon_days: usize,
) -> Result<Vec<ProductDemand>, AnalysisError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let mut loaded = Vec::with_capacity(products.len());
    for product in products {
        if !sheet_names.iter().any(|s| s == product) {
            return Err(AnalysisError::malformed(format!(
                "sheet `{product}` not found in \"{}\" (available: {})",
                path.display(),
                sheet_names.join(", ")
            )));
        }
        let range = workbook.worksheet_range(product)?;
        let mut rows = range.rows();

        let header: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(header_text).collect())
            .unwrap_or_default();
        let layout = locate_columns(product, &header, regions)?;

        let mut columns = vec![Vec::new(); regions.len()];
        let mut trailing_blank: Option<usize> = None;
        for (day, row) in rows.enumerate() {
            if row.iter().all(|c| matches!(c, Data::Empty)) {
                trailing_blank.get_or_insert(day);
                continue;
            }
            if let Some(blank) = trailing_blank {
                return Err(AnalysisError::malformed(format!(
                    "sheet `{product}`: blank row on day {blank} followed by data on day {day}"
                )));
            }
            if day >= horizon_days {
                continue;
            }
            for (col, &idx) in columns.iter_mut().zip(&layout) {
                let cell = row.get(idx).unwrap_or(&Data::Empty);
                let value = cell_number(cell).ok_or_else(|| {
                    AnalysisError::malformed(format!(
                        "sheet `{product}`, column `{}`, day {day}: expected a number, found {cell:?}",
                        header[idx]
                    ))
                })?;
                col.push(value);
            }
        }

        if let Some(day) = trailing_blank {
            debug!(product = %product, day, "sheet ends in blank rows");
        }

        let table = build_table(product, regions, columns, horizon_days)?;
        loaded.push(ProductDemand {
            name: product.clone(),
            table,
        });
    }
    Ok(loaded)
}

/// Reads `<dir>/<product>.csv` for every product.
///
/// # Errors
///
/// Returns `Csv` if a file cannot be read and `MalformedInput` for missing
/// columns or non-numeric values.
pub fn load_csv_dir(
    dir: &Path,
    products: &[String],
    regions: &[String],
    horizon_days: usize,
) -> Result<Vec<ProductDemand>, AnalysisError> {
    let mut loaded = Vec::with_capacity(products.len());
    for product in products {
        let path = dir.join(format!("{product}.csv"));
        if !path.is_file() {
            return Err(AnalysisError::malformed(format!(
                "demand file \"{}\" not found",
                path.display()
            )));
        }
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(&path)?;
        let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let layout = locate_columns(product, &header, regions)?;

        let mut columns = vec![Vec::new(); regions.len()];
        for (day, record) in rdr.records().take(horizon_days).enumerate() {
            let record = record?;
            for (col, &idx) in columns.iter_mut().zip(&layout) {
                let raw = record.get(idx).unwrap_or("");
                let value = raw.parse::<f64>().map_err(|_| {
                    AnalysisError::malformed(format!(
                        "{product}.csv, column `{}`, day {day}: expected a number, found {raw:?}",
                        header[idx]
                    ))
                })?;
                col.push(value);
            }
        }

        let table = build_table(product, regions, columns, horizon_days)?;
        loaded.push(ProductDemand {
            name: product.clone(),
            table,
        });
    }
    Ok(loaded)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Column index of each requested region within `header`.
fn locate_columns(
    product: &str,
    header: &[String],
    regions: &[String],
) -> Result<Vec<usize>, AnalysisError> {
    regions
        .iter()
        .map(|region| {
            header.iter().position(|h| h == region).ok_or_else(|| {
                AnalysisError::malformed(format!(
                    "`{product}` has no column `{region}` (found: {})",
                    header.join(", ")
                ))
            })
        })
        .collect()
}

fn build_table(
    product: &str,
    regions: &[String],
    columns: Vec<Vec<f64>>,
    horizon_days: usize,
) -> Result<DemandTable, AnalysisError> {
    let days = columns.first().map_or(0, Vec::len);
    if days < horizon_days {
        warn!(product, days, horizon_days, "fewer demand rows than the horizon");
    }
    let series = regions
        .iter()
        .zip(columns)
        .map(|(region, values)| {
            DemandSeries::new(region.clone(), values).map_err(|e| match e {
                AnalysisError::MalformedInput(msg) => {
                    AnalysisError::malformed(format!("`{product}`: {msg}"))
                }
                other => other,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    DemandTable::new(series)
}
