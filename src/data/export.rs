use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::model::{category_label, Record};

/// One exported row: the source columns plus the derived ones.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Category Description")]
    category_description: String,
    #[serde(rename = "Shipper Declared")]
    shipper_declared: &'a str,
    #[serde(rename = "International Competitor")]
    international_competitor: Option<&'a str>,
    #[serde(rename = "Domestic Competitor")]
    domestic_competitor: Option<&'a str>,
    #[serde(rename = "Metric Tons")]
    metric_tons: Option<f64>,
    #[serde(rename = "Calculated Value")]
    total_value: Option<f64>,
    #[serde(rename = "Val/KG ($)")]
    value_per_kg: Option<f64>,
    #[serde(rename = "HS Code")]
    hs_code: &'a str,
    #[serde(rename = "Country of Origin")]
    country_of_origin: &'a str,
    #[serde(rename = "Seller")]
    seller: &'a str,
    #[serde(rename = "Buyer")]
    buyer: &'a str,
}

impl<'a> From<&'a Record> for ExportRow<'a> {
    fn from(r: &'a Record) -> Self {
        // Non-finite numbers are written as blank cells.
        let finite = |v: f64| v.is_finite().then_some(v);
        ExportRow {
            date: r.date,
            category: &r.category_code,
            category_description: category_label(&r.category_code),
            shipper_declared: &r.shipper_declared,
            international_competitor: r.international_competitor.as_deref(),
            domestic_competitor: r.domestic_competitor.as_deref(),
            metric_tons: finite(r.metric_tons),
            total_value: finite(r.total_value),
            value_per_kg: finite(r.value_per_kg),
            hs_code: r.hs_code.as_str(),
            country_of_origin: &r.country_of_origin,
            seller: r.seller(),
            buyer: &r.buyer,
        }
    }
}

/// Write `records` as CSV with a header row. Returns the number of rows.
pub fn write_csv<W: io::Write>(writer: W, records: &[&Record]) -> Result<usize> {
    let mut out = csv::Writer::from_writer(writer);
    for record in records {
        out.serialize(ExportRow::from(*record))
            .context("writing export row")?;
    }
    out.flush().context("flushing export")?;
    Ok(records.len())
}

/// Export the filtered view to a CSV file.
pub fn export_csv(path: &Path, records: &[&Record]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let n = write_csv(file, records)?;
    log::info!("Exported {n} rows to {}", path.display());
    Ok(n)
}

/// `Filtered_Data_<timestamp>.csv`
pub fn default_export_name(now: NaiveDateTime) -> String {
    format!("Filtered_Data_{}.csv", now.format("%Y-%m-%d_%H-%M-%S"))
}
