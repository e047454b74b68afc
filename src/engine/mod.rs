//! Reductions over a filtered view of the dataset.
//!
//! Every entry point is a pure function of an immutable [`Dataset`] (or a
//! slice of its records), so queries may run concurrently against the same
//! snapshot.

pub mod aggregate;
pub mod kpi;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::data::filter::{filtered_indices, FacetOptions, FilterCriteria};
use crate::data::model::{Dataset, Record};

use aggregate::AggregationResult;
use kpi::Kpis;

/// Everything one interaction needs: the matching rows, the headline
/// figures, the charts and the options left in each filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryOutcome {
    /// Positions of matching records in the dataset, in dataset order.
    pub indices: Vec<usize>,
    pub kpis: Kpis,
    pub aggregation: AggregationResult,
    pub options: FacetOptions,
}

impl QueryOutcome {
    /// The matching records of the snapshot this outcome was computed on.
    pub fn records<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        select(dataset, &self.indices)
    }
}

fn select<'a>(dataset: &'a Dataset, indices: &[usize]) -> Vec<&'a Record> {
    indices
        .iter()
        .filter_map(|&i| dataset.records().get(i))
        .collect()
}

/// Filter, then reduce.
pub fn run_query(
    dataset: &Dataset,
    criteria: &FilterCriteria,
    config: &EngineConfig,
) -> QueryOutcome {
    let indices = filtered_indices(dataset, criteria);
    let view = select(dataset, &indices);

    let outcome = QueryOutcome {
        kpis: kpi::summarize(&view),
        aggregation: aggregate::aggregate(&view, config),
        options: FacetOptions::from_records(&view),
        indices,
    };
    log::debug!(
        "Query {:?} matched {} of {} records ({:.0} t)",
        criteria,
        outcome.kpis.record_count,
        dataset.len(),
        outcome.kpis.total_metric_tons
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Facet;
    use crate::data::model::{HsCode, Shipment};
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let make = |shipper: &str, intl: &str, category: &str, tons: f64| Shipment {
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            category_code: category.into(),
            shipper_declared: shipper.into(),
            international_competitor: Some(intl.into()),
            domestic_competitor: None,
            metric_tons: tons,
            total_value: tons * 10.0,
            value_per_kg: 2.0,
            hs_code: HsCode::parse("854449").unwrap(),
            country_of_origin: "Mexico".into(),
        };
        Dataset::from_shipments(vec![
            make("Alpha", "Nexans", "COPP", 10.0),
            make("Beta", "Southwire", "CATH", 20.0),
            make("Alpha", "Southwire", "ALBW", 5.0),
        ])
    }

    #[test]
    fn outcome_bundles_every_view() {
        let ds = dataset();
        let criteria = FilterCriteria::default().with(Facet::Buyer, "Southwire");
        let outcome = run_query(&ds, &criteria, &EngineConfig::default());

        assert_eq!(outcome.indices, vec![1, 2]);
        assert_eq!(outcome.kpis.record_count, 2);
        assert_eq!(outcome.kpis.total_metric_tons, 25.0);
        assert_eq!(outcome.aggregation.sellers[0].label, "Beta");
        assert_eq!(outcome.aggregation.categories.len(), 1);
        assert_eq!(outcome.aggregation.categories[0].code, "ALBW");
        assert_eq!(outcome.options.sellers, vec!["Alpha", "Beta"]);
        assert_eq!(outcome.records(&ds).len(), 2);
    }

    #[test]
    fn unmatched_query_is_empty_not_an_error() {
        let ds = dataset();
        let criteria = FilterCriteria::default().with(Facet::Country, "Atlantis");
        let outcome = run_query(&ds, &criteria, &EngineConfig::default());
        assert!(outcome.indices.is_empty());
        assert_eq!(outcome.kpis, Kpis::default());
        assert_eq!(outcome.aggregation, AggregationResult::default());
    }
}
