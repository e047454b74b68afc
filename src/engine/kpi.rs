use serde::Serialize;

use crate::data::model::Record;

/// Running sums over a group of records. Each numeric field is checked on
/// its own: an invalid tonnage does not hide a valid value on the same row.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Totals {
    pub metric_tons: f64,
    pub total_value: f64,
    price_sum: f64,
    price_count: usize,
    pub records: usize,
}

impl Totals {
    pub fn add(&mut self, record: &Record) {
        self.records += 1;
        if let Some(tons) = record.valid_metric_tons() {
            self.metric_tons += tons;
        }
        if let Some(value) = record.valid_total_value() {
            self.total_value += value;
        }
        if let Some(price) = record.valid_value_per_kg() {
            self.price_sum += price;
            self.price_count += 1;
        }
    }

    /// Mean over the valid prices only; `None` when there were none.
    pub fn mean_value_per_kg(&self) -> Option<f64> {
        (self.price_count > 0).then(|| self.price_sum / self.price_count as f64)
    }
}

/// The four headline figures of a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_metric_tons: f64,
    pub total_value: f64,
    /// Zero when no record carries a valid price.
    pub mean_value_per_kg: f64,
    /// Every record in the view, valid numbers or not.
    pub record_count: usize,
}

pub fn summarize(records: &[&Record]) -> Kpis {
    let mut totals = Totals::default();
    for record in records {
        totals.add(record);
    }
    Kpis {
        total_metric_tons: totals.metric_tons,
        total_value: totals.total_value,
        mean_value_per_kg: totals.mean_value_per_kg().unwrap_or(0.0),
        record_count: totals.records,
    }
}
