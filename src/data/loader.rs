use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use super::error::DataError;
use super::model::{Dataset, HsCode, Shipment};

// Column names as they appear in the source spreadsheet.
const COL_DATE: &str = "Date";
const COL_CATEGORY: &str = "Category";
const COL_SHIPPER: &str = "Shipper Declared";
const COL_INTERNATIONAL: &str = "International Competitor";
const COL_DOMESTIC: &str = "Domestic Competitor";
const COL_TONS: &str = "Metric Tons";
const COL_VALUE: &str = "Calculated Value";
const COL_VALUE_PER_KG: &str = "Val/KG ($)";
const COL_HS_CODE: &str = "HS Code";
const COL_COUNTRY: &str = "Country of Origin";

const REQUIRED_COLUMNS: &[&str] = &[
    COL_DATE,
    COL_CATEGORY,
    COL_SHIPPER,
    COL_TONS,
    COL_VALUE,
    COL_VALUE_PER_KG,
    COL_HS_CODE,
    COL_COUNTRY,
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a shipment table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – one column per field
/// * `.json`    – `[{ "Date": "...", "Category": "...", ... }, ...]`
/// * `.csv`     – header row with the spreadsheet column names
///
/// Rows without a usable date are dropped; malformed numbers become NaN and
/// are left for the engine to exclude.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string()).into()),
    };

    let dataset = build_dataset(rows)?;
    log::info!("Loaded {} shipments from {}", dataset.len(), path.display());
    Ok(dataset)
}

fn build_dataset(rows: Vec<ShipmentRow>) -> Result<Dataset> {
    let mut shipments = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for (index, row) in rows.into_iter().enumerate() {
        let line = row.line;
        let parsed = row.into_shipment().with_context(|| match line {
            Some(line) => format!("line {line}"),
            None => format!("record {}", index + 1),
        })?;
        match parsed {
            Some(shipment) => shipments.push(shipment),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!("Dropped {dropped} rows with missing or unparsable dates");
    }
    Ok(Dataset::from_shipments(shipments))
}

// ---------------------------------------------------------------------------
// ShipmentRow – loosely typed row shared by every format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ShipmentRow {
    #[serde(rename = "Date", default, deserialize_with = "lenient_date")]
    date: Option<NaiveDate>,
    #[serde(rename = "Category", default, deserialize_with = "verbatim_text")]
    category: Option<String>,
    #[serde(rename = "Shipper Declared", default, deserialize_with = "verbatim_text")]
    shipper_declared: Option<String>,
    #[serde(rename = "International Competitor", default, deserialize_with = "verbatim_text")]
    international_competitor: Option<String>,
    #[serde(rename = "Domestic Competitor", default, deserialize_with = "verbatim_text")]
    domestic_competitor: Option<String>,
    #[serde(rename = "Metric Tons", default = "nan", deserialize_with = "lenient_f64")]
    metric_tons: f64,
    #[serde(rename = "Calculated Value", default = "nan", deserialize_with = "lenient_f64")]
    total_value: f64,
    #[serde(rename = "Val/KG ($)", default = "nan", deserialize_with = "lenient_f64")]
    value_per_kg: f64,
    #[serde(rename = "HS Code", default, deserialize_with = "lenient_text")]
    hs_code: Option<String>,
    #[serde(rename = "Country of Origin", default, deserialize_with = "verbatim_text")]
    country_of_origin: Option<String>,
    /// File line of a CSV row, for error messages.
    #[serde(skip)]
    line: Option<u64>,
}

impl ShipmentRow {
    /// `Ok(None)` when the row has no date and must be dropped.
    fn into_shipment(self) -> Result<Option<Shipment>, DataError> {
        let Some(date) = self.date else {
            return Ok(None);
        };
        let hs_code = HsCode::parse(self.hs_code.as_deref().unwrap_or(""))?;
        Ok(Some(Shipment {
            date,
            category_code: self.category.unwrap_or_default(),
            shipper_declared: self.shipper_declared.unwrap_or_default(),
            international_competitor: self.international_competitor,
            domestic_competitor: self.domestic_competitor,
            metric_tons: self.metric_tons,
            total_value: self.total_value,
            value_per_kg: self.value_per_kg,
            hs_code,
            country_of_origin: self.country_of_origin.unwrap_or_default(),
        }))
    }
}

fn nan() -> f64 {
    f64::NAN
}

/// Parse the date layouts seen in exported spreadsheets.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn date_from_epoch_millis(ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}

// -- Lenient cell visitors (shared by the CSV and JSON deserializers) --

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a text cell")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok((!v.trim().is_empty()).then(|| v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // Integral floats are codes typed as numbers by the spreadsheet.
        if v.fract() == 0.0 && v.abs() < 1e15 {
            Ok(Some(format!("{}", v as i64)))
        } else {
            Ok(Some(v.to_string()))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }
}

/// Text taken as written: CSV fields skip type inference, so `007` stays
/// `007`. Blank cells are `None`.
struct VerbatimText;

impl<'de> Visitor<'de> for VerbatimText {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a text cell")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok((!v.trim().is_empty()).then(|| v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_string(self)
    }
}

fn verbatim_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    d.deserialize_option(VerbatimText)
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    d.deserialize_any(TextVisitor)
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a numeric cell")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let cleaned: String = v
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '$')
            .collect();
        Ok(cleaned.parse().unwrap_or(f64::NAN))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(f64::NAN)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(f64::NAN)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(f64::NAN)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    d.deserialize_any(NumberVisitor)
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
    type Value = Option<NaiveDate>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a date string or epoch milliseconds")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(parse_date(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(date_from_epoch_millis(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).ok().and_then(date_from_epoch_millis))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.is_finite().then(|| v as i64).and_then(date_from_epoch_millis))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }
}

fn lenient_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    d.deserialize_any(DateVisitor)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default of `df.to_json(orient='records')`.
/// Dates may be strings or epoch milliseconds.
fn load_json(path: &Path) -> Result<Vec<ShipmentRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON shipment records")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<ShipmentRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *required) {
            return Err(DataError::MissingColumn(*required).into());
        }
    }

    let hs_idx = headers.iter().position(|h| h == COL_HS_CODE);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("reading CSV record")?;
        let line = record.position().map_or(0, |p| p.line());
        let mut row: ShipmentRow = record
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV line {line}"))?;
        // The raw field keeps dotted codes such as "8544.40" intact.
        if let Some(idx) = hs_idx {
            row.hs_code = record.get(idx).map(str::to_string);
        }
        row.line = Some(line);
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by pandas or polars.  Columns are cast with
/// Arrow so integer HS codes, timestamp dates and string dates all work.
fn load_parquet(path: &Path) -> Result<Vec<ShipmentRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for required in REQUIRED_COLUMNS {
            if batch.schema().index_of(required).is_err() {
                return Err(DataError::MissingColumn(*required).into());
            }
        }

        let dates = date_values(&batch)?;
        let category = cast_column(&batch, COL_CATEGORY, &DataType::Utf8)?;
        let shipper = cast_column(&batch, COL_SHIPPER, &DataType::Utf8)?;
        let international = cast_column(&batch, COL_INTERNATIONAL, &DataType::Utf8)?;
        let domestic = cast_column(&batch, COL_DOMESTIC, &DataType::Utf8)?;
        let tons = cast_column(&batch, COL_TONS, &DataType::Float64)?;
        let value = cast_column(&batch, COL_VALUE, &DataType::Float64)?;
        let value_per_kg = cast_column(&batch, COL_VALUE_PER_KG, &DataType::Float64)?;
        let hs_code = cast_column(&batch, COL_HS_CODE, &DataType::Utf8)?;
        let country = cast_column(&batch, COL_COUNTRY, &DataType::Utf8)?;

        for (row, date) in dates.into_iter().enumerate() {
            rows.push(ShipmentRow {
                date,
                category: text_at(&category, row),
                shipper_declared: text_at(&shipper, row),
                international_competitor: text_at(&international, row),
                domestic_competitor: text_at(&domestic, row),
                metric_tons: f64_at(&tons, row),
                total_value: f64_at(&value, row),
                value_per_kg: f64_at(&value_per_kg, row),
                hs_code: text_at(&hs_code, row),
                country_of_origin: text_at(&country, row),
                line: None,
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Cast a column to `to`, or `None` if the batch does not carry it.
fn cast_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(name) else {
        return Ok(None);
    };
    let casted = cast(batch.column(idx), to)
        .with_context(|| format!("casting column '{name}' to {to}"))?;
    Ok(Some(casted))
}

/// Dates stored as strings go through [`parse_date`]; anything temporal is
/// cast to `Date32`.
fn date_values(batch: &RecordBatch) -> Result<Vec<Option<NaiveDate>>> {
    let schema = batch.schema();
    let idx = schema
        .index_of(COL_DATE)
        .map_err(|_| DataError::MissingColumn(COL_DATE))?;
    let n_rows = batch.num_rows();

    match schema.field(idx).data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let col = cast(batch.column(idx), &DataType::Utf8).context("casting Date to text")?;
            let strings = col.as_string::<i32>();
            Ok((0..n_rows)
                .map(|row| {
                    if strings.is_null(row) {
                        None
                    } else {
                        parse_date(strings.value(row))
                    }
                })
                .collect())
        }
        _ => {
            let col = cast(batch.column(idx), &DataType::Date32).context("casting Date to Date32")?;
            let days = col.as_primitive::<Date32Type>();
            Ok((0..n_rows)
                .map(|row| {
                    if days.is_null(row) {
                        None
                    } else {
                        days.value_as_date(row)
                    }
                })
                .collect())
        }
    }
}

fn text_at(col: &Option<ArrayRef>, row: usize) -> Option<String> {
    let col = col.as_ref()?;
    if col.is_null(row) {
        return None;
    }
    let value = col.as_string::<i32>().value(row);
    (!value.trim().is_empty()).then(|| value.to_string())
}

fn f64_at(col: &Option<ArrayRef>, row: usize) -> f64 {
    match col {
        Some(col) if !col.is_null(row) => col.as_primitive::<Float64Type>().value(row),
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::Builder;

    const HEADER: &str = "Date,Category,Shipper Declared,International Competitor,Domestic Competitor,Metric Tons,Calculated Value,Val/KG ($),HS Code,Country of Origin";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_known_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(parse_date("2024-03-07"), Some(expected));
        assert_eq!(parse_date("03/07/2024"), Some(expected));
        assert_eq!(parse_date("2024-03-07 12:30:00"), Some(expected));
        assert_eq!(parse_date("2024-03-07T00:00:00"), Some(expected));
        assert_eq!(parse_date("2024-03-07T00:00:00.000"), Some(expected));
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn csv_rows_are_typed_and_attributed() {
        let csv = format!(
            "{HEADER}\n\
             2024-01-05,COPP,ACME LTD,Acme Ltd,Global Traders Inc,12.5,\"1,250.00\",0.1,7408,Mexico\n\
             01/20/2024,ALBW,Beta,,,abc,300,,854449,Canada\n\
             garbage,COPP,Gamma,,,1,1,1,854449,Chile\n"
        );
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 2, "row with unparsable date is dropped");
        let first = &ds.records()[0];
        assert_eq!(first.buyer, "Global Traders Inc");
        assert_eq!(first.hs_code.as_str(), "007408");
        assert_eq!(first.total_value, 1250.0);

        let second = &ds.records()[1];
        assert_eq!(second.date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        assert_eq!(second.buyer, "Unknown");
        assert!(second.metric_tons.is_nan());
        assert!(second.value_per_kg.is_nan());
        assert_eq!(second.total_value, 300.0);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let file = write_temp(".csv", "Date,Category\n2024-01-01,COPP\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingColumn(_))
        ));
    }

    #[test]
    fn invalid_hs_code_names_the_file_line() {
        let csv = format!(
            "{HEADER}\n\
             2024-01-05,COPP,A,B,,1,1,1,854449,Mexico\n\
             2024-01-06,COPP,A,B,,1,1,1,85-44,Mexico\n"
        );
        let file = write_temp(".csv", &csv);
        let err = load_file(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("85-44"), "{message}");
    }

    #[test]
    fn invalid_hs_code_in_json_names_the_record() {
        let json = r#"[
            {"Date": "2024-01-05", "Category": "PV", "Shipper Declared": "x",
             "Metric Tons": 1, "Calculated Value": 1, "Val/KG ($)": 1,
             "HS Code": "ABC", "Country of Origin": "Vietnam"}
        ]"#;
        let file = write_temp(".json", json);
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("record 1"));
    }

    #[test]
    fn blank_and_dotted_hs_codes_keep_their_rows() {
        let csv = format!(
            "{HEADER}\n\
             2024-01-05,COPP,A,,,1,1,1,854449,Mexico\n\
             2024-01-06,COPP,A,,,1,1,1,,Mexico\n\
             2024-01-07,COPP,A,,,1,1,1,8544.49,Mexico\n\
             2024-01-08,COPP,A,,,1,1,1,8544.40,Mexico\n"
        );
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path()).unwrap();

        let codes: Vec<&str> = ds.records().iter().map(|r| r.hs_code.as_str()).collect();
        assert_eq!(codes, vec!["854449", "000000", "854449", "854440"]);
    }

    #[test]
    fn csv_text_cells_are_kept_as_written() {
        let csv = format!(
            "{HEADER}\n\
             2024-01-05,1.50,007,true,,1,1,1,854449,0044\n"
        );
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path()).unwrap();

        let r = &ds.records()[0];
        assert_eq!(r.category_code, "1.50");
        assert_eq!(r.shipper_declared, "007");
        assert_eq!(r.international_competitor.as_deref(), Some("true"));
        assert_eq!(r.domestic_competitor, None);
        assert_eq!(r.country_of_origin, "0044");
    }

    #[test]
    fn json_records_accept_epoch_millis_and_nulls() {
        let json = r#"[
            {"Date": 1704412800000, "Category": "PV", "Shipper Declared": "Sun Wire",
             "International Competitor": null, "Domestic Competitor": "Encore Wire",
             "Metric Tons": 4, "Calculated Value": 8000.5, "Val/KG ($)": 2.0,
             "HS Code": 854449, "Country of Origin": "Vietnam"},
            {"Date": null, "Category": "PV", "Shipper Declared": "x",
             "Metric Tons": 1, "Calculated Value": 1, "Val/KG ($)": 1,
             "HS Code": "854449", "Country of Origin": "Vietnam"}
        ]"#;
        let file = write_temp(".json", json);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        let r = &ds.records()[0];
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(r.buyer, "Encore Wire");
        assert_eq!(r.metric_tons, 4.0);
        assert_eq!(r.hs_code.as_str(), "854449");
    }

    #[test]
    fn parquet_with_string_dates_and_integer_hs_codes() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_DATE, DataType::Utf8, true),
            Field::new(COL_CATEGORY, DataType::Utf8, false),
            Field::new(COL_SHIPPER, DataType::Utf8, false),
            Field::new(COL_INTERNATIONAL, DataType::Utf8, true),
            Field::new(COL_TONS, DataType::Float64, true),
            Field::new(COL_VALUE, DataType::Float64, true),
            Field::new(COL_VALUE_PER_KG, DataType::Float64, true),
            Field::new(COL_HS_CODE, DataType::Int64, false),
            Field::new(COL_COUNTRY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("2024-02-01"), None])),
                Arc::new(StringArray::from(vec!["COPP", "COPP"])),
                Arc::new(StringArray::from(vec!["Alpha", "Beta"])),
                Arc::new(StringArray::from(vec![Some("Nexans"), None])),
                Arc::new(Float64Array::from(vec![Some(5.0), None])),
                Arc::new(Float64Array::from(vec![500.0, 1.0])),
                Arc::new(Float64Array::from(vec![0.1, 1.0])),
                Arc::new(Int64Array::from(vec![7408, 7408])),
                Arc::new(StringArray::from(vec!["Chile", "Chile"])),
            ],
        )
        .unwrap();

        let file = Builder::new().suffix(".parquet").tempfile().unwrap();
        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        let r = &ds.records()[0];
        assert_eq!(r.hs_code.as_str(), "007408");
        assert_eq!(r.buyer, "Nexans");
        assert_eq!(r.domestic_competitor, None);
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::UnsupportedFormat("xlsx".into()))
        );
    }
}
