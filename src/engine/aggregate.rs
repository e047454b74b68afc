//! Chart-ready reductions over a filtered view.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::Datelike;
use serde::Serialize;

use super::kpi::Totals;
use crate::config::EngineConfig;
use crate::data::filter::Facet;
use crate::data::model::{category_label, Record};

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// One bar of a ranking chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub label: String,
    pub metric_tons: f64,
    pub total_value: f64,
    /// `None` when no record in the group carries a valid price.
    pub mean_value_per_kg: Option<f64>,
    pub record_count: usize,
}

impl RankedEntity {
    fn new(label: &str, totals: &Totals) -> Self {
        RankedEntity {
            label: label.to_string(),
            metric_tons: totals.metric_tons,
            total_value: totals.total_value,
            mean_value_per_kg: totals.mean_value_per_kg(),
            record_count: totals.records,
        }
    }
}

/// Every group of `facet`, heaviest first. Groups with equal tonnage keep
/// the order in which they were first seen.
pub fn group_by(records: &[&Record], facet: Facet) -> Vec<RankedEntity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Totals)> = Vec::new();

    for record in records {
        let key = facet.value(record);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, Totals::default()));
            groups.len() - 1
        });
        groups[slot].1.add(record);
    }

    let mut ranked: Vec<RankedEntity> = groups
        .iter()
        .map(|(label, totals)| RankedEntity::new(label, totals))
        .collect();
    // sort_by is stable.
    ranked.sort_by(|a, b| b.metric_tons.total_cmp(&a.metric_tons));
    ranked
}

/// The first `limit` groups of [`group_by`]; `None` keeps them all.
pub fn top_n(records: &[&Record], facet: Facet, limit: Option<usize>) -> Vec<RankedEntity> {
    let mut ranked = group_by(records, facet);
    if let Some(n) = limit {
        ranked.truncate(n);
    }
    ranked
}

// ---------------------------------------------------------------------------
// Category share
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub code: String,
    pub description: String,
    pub metric_tons: f64,
    /// Share of the tonnage across the returned slices.
    pub fraction: f64,
}

/// The `k` heaviest categories, never including `reserved`.
pub fn category_shares(records: &[&Record], reserved: &str, k: usize) -> Vec<CategoryShare> {
    let kept: Vec<&Record> = records
        .iter()
        .copied()
        .filter(|r| r.category_code != reserved)
        .collect();

    let top = top_n(&kept, Facet::Category, Some(k));
    let shown: f64 = top.iter().map(|g| g.metric_tons).sum();

    top.into_iter()
        .map(|g| CategoryShare {
            description: category_label(&g.label),
            fraction: if shown > 0.0 { g.metric_tons / shown } else { 0.0 },
            metric_tons: g.metric_tons,
            code: g.label,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly time series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(record: &Record) -> Self {
        Month {
            year: record.date.year(),
            month: record.date.month(),
        }
    }

    /// Months since year zero, used as a continuous plot axis.
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_ordinal(ordinal: i64) -> Self {
        Month {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: Month,
    pub metric_tons: f64,
    pub total_value: f64,
}

/// One point per calendar month present, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub points: Vec<MonthlyPoint>,
}

impl TimeSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `[month ordinal, tons]` pairs.
    pub fn volume(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|p| [p.month.ordinal() as f64, p.metric_tons])
            .collect()
    }

    /// `[month ordinal, value / divisor]` pairs for a secondary axis.
    pub fn scaled_value(&self, divisor: f64) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|p| [p.month.ordinal() as f64, p.total_value / divisor])
            .collect()
    }
}

pub fn monthly_series(records: &[&Record]) -> TimeSeries {
    let mut months: BTreeMap<Month, Totals> = BTreeMap::new();
    for record in records {
        months.entry(Month::of(record)).or_default().add(record);
    }
    TimeSeries {
        points: months
            .into_iter()
            .map(|(month, totals)| MonthlyPoint {
                month,
                metric_tons: totals.metric_tons,
                total_value: totals.total_value,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Everything the dashboard draws
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    pub buyers: Vec<RankedEntity>,
    pub sellers: Vec<RankedEntity>,
    pub countries: Vec<RankedEntity>,
    pub hs_codes: Vec<RankedEntity>,
    pub categories: Vec<CategoryShare>,
    pub time_series: TimeSeries,
}

pub fn aggregate(records: &[&Record], config: &EngineConfig) -> AggregationResult {
    let top = Some(config.top_n);
    AggregationResult {
        buyers: top_n(records, Facet::Buyer, top),
        sellers: top_n(records, Facet::Seller, top),
        countries: top_n(records, Facet::Country, top),
        hs_codes: top_n(records, Facet::HsCode, config.hs_top_n),
        categories: category_shares(
            records,
            &config.reserved_category,
            config.category_share_k,
        ),
        time_series: monthly_series(records),
    }
}
