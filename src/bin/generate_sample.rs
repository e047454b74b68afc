//! Writes a synthetic shipments table for trying out the dashboard.
//!
//! ```text
//! cargo run --bin generate_sample -- [output.parquet] [rows]
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use chrono::{Days, NaiveDate};
use parquet::arrow::ArrowWriter;

const CATEGORIES: &[(&str, f64)] = &[
    ("COPP", 9.5),
    ("CATH", 8.8),
    ("ALBW", 2.6),
    ("PV", 4.1),
    ("ALUM-PR", 3.1),
    ("OHT", 3.3),
    ("MV", 12.7),
    ("TRAY", 7.4),
    ("COMMS", 10.2),
];
const SHIPPERS: &[&str] = &[
    "Pacific Metals Trading LLC",
    "Andes Copper S.A.",
    "Nordic Cable Export",
    "Shenzhen Wire Co., Ltd.",
    "Nexans",
];
const INTERNATIONAL: &[&str] = &["Nexans Inc.", "Prysmian Group", "LS Cable", "Sumitomo Electric"];
const DOMESTIC: &[&str] = &["Southwire Company", "Encore Wire", "Cerro Wire LLC"];
const HS_CODES: &[&str] = &["854449", "854460", "7408110", "760511", "74031100"];
const COUNTRIES: &[&str] = &["Chile", "Peru", "Mexico", "Canada", "China", "Korea", "Germany"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Default)]
struct Columns {
    dates: Vec<i32>,
    categories: Vec<String>,
    shippers: Vec<String>,
    international: Vec<Option<String>>,
    domestic: Vec<Option<String>>,
    tons: Vec<f64>,
    values: Vec<f64>,
    per_kg: Vec<f64>,
    hs_codes: Vec<String>,
    countries: Vec<String>,
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Result<Columns> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("epoch")?;
    let first = NaiveDate::from_ymd_opt(2023, 1, 1).context("start date")?;
    let span_days = 730;

    let mut cols = Columns::default();
    for _ in 0..rows {
        let date = first
            .checked_add_days(Days::new(rng.below(span_days) as u64))
            .context("date out of range")?;
        let (category, base_price) = *rng.pick(CATEGORIES);
        let tons = rng.gauss(40.0, 25.0).abs().max(0.5);
        let price = (base_price + rng.gauss(0.0, base_price * 0.1)).max(0.1);

        // Roughly a third of rows name the shipper as a competitor, which
        // exercises the fall-back branch of buyer attribution.
        let shipper = *rng.pick(SHIPPERS);
        let international = match rng.below(6) {
            0 => None,
            1 | 2 => Some(shipper.to_uppercase()),
            _ => Some(rng.pick(INTERNATIONAL).to_string()),
        };
        let domestic = (rng.below(3) > 0).then(|| rng.pick(DOMESTIC).to_string());

        cols.dates.push((date - epoch).num_days() as i32);
        cols.categories.push(category.to_string());
        cols.shippers.push(shipper.to_string());
        cols.international.push(international);
        cols.domestic.push(domestic);
        cols.tons.push(tons);
        cols.values.push(tons * 1000.0 * price);
        cols.per_kg.push(price);
        cols.hs_codes.push(rng.pick(HS_CODES).to_string());
        cols.countries.push(rng.pick(COUNTRIES).to_string());
    }
    Ok(cols)
}

fn to_batch(cols: Columns) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Date", DataType::Date32, false),
        Field::new("Category", DataType::Utf8, false),
        Field::new("Shipper Declared", DataType::Utf8, false),
        Field::new("International Competitor", DataType::Utf8, true),
        Field::new("Domestic Competitor", DataType::Utf8, true),
        Field::new("Metric Tons", DataType::Float64, false),
        Field::new("Calculated Value", DataType::Float64, false),
        Field::new("Val/KG ($)", DataType::Float64, false),
        Field::new("HS Code", DataType::Utf8, false),
        Field::new("Country of Origin", DataType::Utf8, false),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Date32Array::from(cols.dates)),
            Arc::new(StringArray::from(cols.categories)),
            Arc::new(StringArray::from(cols.shippers)),
            Arc::new(StringArray::from(cols.international)),
            Arc::new(StringArray::from(cols.domestic)),
            Arc::new(Float64Array::from(cols.tons)),
            Arc::new(Float64Array::from(cols.values)),
            Arc::new(Float64Array::from(cols.per_kg)),
            Arc::new(StringArray::from(cols.hs_codes)),
            Arc::new(StringArray::from(cols.countries)),
        ],
    )
    .context("Failed to create RecordBatch")
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args
        .next()
        .unwrap_or_else(|| "sample_shipments.parquet".to_string());
    let rows: usize = match args.next() {
        Some(n) => n.parse().context("row count must be a positive integer")?,
        None => 5_000,
    };

    let mut rng = SimpleRng::new(42);
    let batch = to_batch(generate(rows, &mut rng)?)?;

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("Failed to create {output_path}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("{}", pretty_format_batches(&[batch.slice(0, rows.min(5))])?);
    println!("Wrote {rows} shipments to {output_path}");
    Ok(())
}
