//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use dc_inventory::demand::{DemandSeries, DemandTable, ProductDemand};
use rust_xlsxwriter::Workbook;

/// Region headers used by every fixture.
pub const REGIONS: [&str; 4] = ["Region1", "Region2", "Region3", "Region4"];

pub fn region_names() -> Vec<String> {
    REGIONS.iter().map(|r| r.to_string()).collect()
}

pub fn product_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Product{i}")).collect()
}

/// Deterministic, varied daily demand for one region: a weekly pattern
/// scaled per region plus a slow trend.
pub fn patterned_demand(region: usize, days: usize) -> Vec<f64> {
    (0..days)
        .map(|d| {
            let weekly = [3.0, 5.0, 8.0, 13.0, 8.0, 5.0, 2.0][d % 7];
            (weekly * (region + 1) as f64 + (d % 29) as f64).round()
        })
        .collect()
}

/// Four regions of constant demand.
pub fn constant_table(value: f64, days: usize) -> DemandTable {
    DemandTable::new(
        REGIONS
            .iter()
            .map(|r| DemandSeries::constant(*r, value, days).expect("constant series"))
            .collect(),
    )
    .expect("constant regions form a table")
}

/// Four regions of [`patterned_demand`].
pub fn patterned_table(days: usize) -> DemandTable {
    DemandTable::new(
        REGIONS
            .iter()
            .enumerate()
            .map(|(i, r)| DemandSeries::new(*r, patterned_demand(i, days)).expect("valid series"))
            .collect(),
    )
    .expect("patterned regions form a table")
}

pub fn product(name: &str, table: DemandTable) -> ProductDemand {
    ProductDemand {
        name: name.to_string(),
        table,
    }
}

/// Writes one sheet per product with a `Region1..4` header and `days` rows
/// of [`patterned_demand`].
pub fn write_workbook(path: &Path, products: &[String], days: usize) {
    let mut workbook = Workbook::new();
    for name in products {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name).expect("valid sheet name");
        for (col, region) in REGIONS.iter().enumerate() {
            sheet
                .write_string(0, col as u16, *region)
                .expect("header cell");
            for (day, v) in patterned_demand(col, days).iter().enumerate() {
                sheet
                    .write_number(day as u32 + 1, col as u16, *v)
                    .expect("demand cell");
            }
        }
    }
    workbook.save(path).expect("workbook saves");
}

/// Writes `<dir>/<product>.csv` with the same layout as [`write_workbook`].
pub fn write_csv_dir(dir: &Path, products: &[String], days: usize) {
    let columns: Vec<Vec<f64>> = (0..REGIONS.len())
        .map(|r| patterned_demand(r, days))
        .collect();
    for name in products {
        let mut body = REGIONS.join(",");
        body.push('\n');
        for day in 0..days {
            let row: Vec<String> = columns.iter().map(|c| c[day].to_string()).collect();
            body.push_str(&row.join(","));
            body.push('\n');
        }
        fs::write(dir.join(format!("{name}.csv")), body).expect("csv written");
    }
}
