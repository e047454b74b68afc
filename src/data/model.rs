use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::attribution::resolve_buyer;
use super::error::DataError;

// ---------------------------------------------------------------------------
// Category lookup
// ---------------------------------------------------------------------------

/// Category code held out of the category-share view.
pub const CATHODE_CATEGORY: &str = "CATH";

const CATEGORY_DESCRIPTIONS: &[(&str, &str)] = &[
    ("ALUM-PR", "Aluminum Wire (Price Inferred) Imports"),
    ("ALBW", "Aluminum Building Wire Imports"),
    ("PV", "Photovoltaic Wire Imports"),
    ("OHT", "Overhead Transmission Wire Imports"),
    ("COPP-PR", "Copper Wire (Price Inferred) Imports"),
    ("COPP", "Copper Wire Imports"),
    ("CORD", "Cord Imports"),
    ("RESI", "Residential Imports"),
    ("MV", "Medium Voltage Imports"),
    ("TRAY", "Tray Cable Imports"),
    ("SPEC", "Specialty Item Imports"),
    ("CATH", "Cathode Imports"),
    ("COMMS", "Communications Wire Imports"),
    ("TOOL", "Tool Imports"),
    ("RM", "Raw Material Imports"),
    ("UNMP", "Unmapped Imports"),
];

/// Human-readable description of a category code, if the code is known.
pub fn category_description(code: &str) -> Option<&'static str> {
    CATEGORY_DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, desc)| *desc)
}

/// Description for display: falls back to the code itself.
pub fn category_label(code: &str) -> String {
    category_description(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

// ---------------------------------------------------------------------------
// HsCode – zero-padded tariff code
// ---------------------------------------------------------------------------

/// Harmonized System code stored as a zero-padded string of at least six
/// digits, so equality and ordering are lexical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HsCode(String);

impl HsCode {
    /// Blank cells become `"000000"`. Dotted tariff notation (`8544.49`) is
    /// read without its separators; a float cell such as `854449.0` drops
    /// the trailing `.0`.
    pub fn parse(raw: &str) -> Result<Self, DataError> {
        let trimmed = raw.trim();
        let digits: String = match trimmed.strip_suffix(".0") {
            Some(whole) if !whole.contains('.') => whole.to_string(),
            _ => trimmed.chars().filter(|&c| c != '.').collect(),
        };
        if digits.len() > 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::InvalidHsCode(raw.to_string()));
        }
        Ok(HsCode(format!("{digits:0>6}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `Some(v)` when `v` may take part in a sum or mean.
pub fn finite_non_negative(v: f64) -> Option<f64> {
    (v.is_finite() && v >= 0.0).then_some(v)
}

// ---------------------------------------------------------------------------
// Shipment – one typed row as produced by the loader
// ---------------------------------------------------------------------------

/// A typed shipment row before attribution.
#[derive(Debug, Clone)]
pub struct Shipment {
    pub date: NaiveDate,
    pub category_code: String,
    pub shipper_declared: String,
    pub international_competitor: Option<String>,
    pub domestic_competitor: Option<String>,
    pub metric_tons: f64,
    pub total_value: f64,
    pub value_per_kg: f64,
    pub hs_code: HsCode,
    pub country_of_origin: String,
}

// ---------------------------------------------------------------------------
// Record – a shipment with its derived counterparty
// ---------------------------------------------------------------------------

/// One shipment plus the fields derived once at dataset construction.
#[derive(Debug, Clone)]
pub struct Record {
    pub date: NaiveDate,
    pub category_code: String,
    pub shipper_declared: String,
    pub international_competitor: Option<String>,
    pub domestic_competitor: Option<String>,
    pub metric_tons: f64,
    pub total_value: f64,
    pub value_per_kg: f64,
    pub hs_code: HsCode,
    pub country_of_origin: String,
    pub buyer: String,
}

impl Record {
    pub fn from_shipment(shipment: Shipment) -> Self {
        let buyer = resolve_buyer(
            &shipment.shipper_declared,
            shipment.international_competitor.as_deref(),
            shipment.domestic_competitor.as_deref(),
        );
        Record {
            date: shipment.date,
            category_code: shipment.category_code,
            shipper_declared: shipment.shipper_declared,
            international_competitor: shipment.international_competitor,
            domestic_competitor: shipment.domestic_competitor,
            metric_tons: shipment.metric_tons,
            total_value: shipment.total_value,
            value_per_kg: shipment.value_per_kg,
            hs_code: shipment.hs_code,
            country_of_origin: shipment.country_of_origin,
            buyer,
        }
    }

    /// The seller is the declared shipper, verbatim.
    pub fn seller(&self) -> &str {
        &self.shipper_declared
    }

    pub fn valid_metric_tons(&self) -> Option<f64> {
        finite_non_negative(self.metric_tons)
    }

    pub fn valid_total_value(&self) -> Option<f64> {
        finite_non_negative(self.total_value)
    }

    pub fn valid_value_per_kg(&self) -> Option<f64> {
        finite_non_negative(self.value_per_kg)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the immutable loaded snapshot
// ---------------------------------------------------------------------------

/// All records in load order. Never mutated once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    /// Attribute every shipment and freeze the result.
    pub fn from_shipments(shipments: Vec<Shipment>) -> Self {
        let records: Vec<Record> = shipments.into_iter().map(Record::from_shipment).collect();
        let date_range = records.iter().fold(None, |range, r| match range {
            None => Some((r.date, r.date)),
            Some((lo, hi)) => Some((lo.min(r.date), hi.max(r.date))),
        });
        Dataset {
            records,
            date_range,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Earliest and latest record dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_range
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(date: &str, shipper: &str, intl: Option<&str>, dom: Option<&str>) -> Shipment {
        Shipment {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category_code: "COPP".into(),
            shipper_declared: shipper.into(),
            international_competitor: intl.map(Into::into),
            domestic_competitor: dom.map(Into::into),
            metric_tons: 1.0,
            total_value: 1.0,
            value_per_kg: 1.0,
            hs_code: HsCode::parse("854449").unwrap(),
            country_of_origin: "Mexico".into(),
        }
    }

    #[test]
    fn hs_code_is_zero_padded() {
        assert_eq!(HsCode::parse("7408").unwrap().as_str(), "007408");
        assert_eq!(HsCode::parse(" 854449 ").unwrap().as_str(), "854449");
        assert_eq!(HsCode::parse("854449.0").unwrap().as_str(), "854449");
        assert_eq!(HsCode::parse("8544490000").unwrap().as_str(), "8544490000");
    }

    #[test]
    fn hs_code_accepts_blank_and_dotted_cells() {
        assert_eq!(HsCode::parse("").unwrap().as_str(), "000000");
        assert_eq!(HsCode::parse("   ").unwrap().as_str(), "000000");
        assert_eq!(HsCode::parse("8544.49").unwrap().as_str(), "854449");
        assert_eq!(HsCode::parse("8544.40").unwrap().as_str(), "854440");
        assert_eq!(HsCode::parse("8544.49.00").unwrap().as_str(), "85444900");
    }

    #[test]
    fn hs_code_rejects_non_digits() {
        assert_eq!(
            HsCode::parse("85A449"),
            Err(DataError::InvalidHsCode("85A449".into()))
        );
        assert!(HsCode::parse("85-44").is_err());
        assert!(HsCode::parse("12345678901").is_err());
    }

    #[test]
    fn padded_codes_sort_lexically() {
        let mut codes = vec![
            HsCode::parse("854449").unwrap(),
            HsCode::parse("7408").unwrap(),
        ];
        codes.sort();
        assert_eq!(codes[0].as_str(), "007408");
    }

    #[test]
    fn numeric_validity() {
        assert_eq!(finite_non_negative(3.5), Some(3.5));
        assert_eq!(finite_non_negative(0.0), Some(0.0));
        assert_eq!(finite_non_negative(-1.0), None);
        assert_eq!(finite_non_negative(f64::NAN), None);
        assert_eq!(finite_non_negative(f64::INFINITY), None);
    }

    #[test]
    fn dataset_attributes_once_and_tracks_dates() {
        let ds = Dataset::from_shipments(vec![
            shipment("2024-03-05", "ACME LTD", Some("Acme Ltd"), Some("Global Traders Inc")),
            shipment("2023-11-20", "X", None, None),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].buyer, "Global Traders Inc");
        assert_eq!(ds.records()[0].seller(), "ACME LTD");
        assert_eq!(ds.records()[1].buyer, "Unknown");
        let (lo, hi) = ds.date_range().unwrap();
        assert_eq!(lo.to_string(), "2023-11-20");
        assert_eq!(hi.to_string(), "2024-03-05");
    }

    #[test]
    fn unknown_category_falls_back_to_code() {
        assert_eq!(category_label("COPP"), "Copper Wire Imports");
        assert_eq!(category_label("NEW"), "NEW");
        assert!(category_description("CATH").is_some());
    }
}
