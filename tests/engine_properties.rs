//! End-to-end checks over the public API: load a CSV export, then query it.

use std::io::Write;

use chrono::NaiveDate;
use maritime_board::config::EngineConfig;
use maritime_board::data::attribution::resolve_buyer;
use maritime_board::data::filter::{filter, Facet, FilterCriteria};
use maritime_board::data::loader::load_file;
use maritime_board::data::model::Dataset;
use maritime_board::engine::aggregate::{category_shares, group_by, monthly_series};
use maritime_board::engine::kpi::summarize;
use maritime_board::engine::run_query;

const CSV: &str = "\
Date,Category,Shipper Declared,International Competitor,Domestic Competitor,Metric Tons,Calculated Value,Val/KG ($),HS Code,Country of Origin
2024-01-05,COPP,Andes Copper S.A.,Nexans Inc.,,12.5,\"120,000\",9.6,854449,Chile
2024-01-20,CATH,Andes Copper S.A.,,Southwire Company,40,352000,8.8,74031100,Chile
01/28/2024,PV,Nexans,NEXANS LTD,Encore Wire,3,12300,4.1,854460,Mexico
2024-02-02,ALBW,Nordic Cable Export,Prysmian Group,,7.25,18850,2.6,760511,Germany
2024-02-14,COPP,Pacific Metals Trading LLC,,,n/a,5000,,854449,Peru
2024-03-01,MVC,Nordic Cable Export,LS Cable,Cerro Wire LLC,22,279400,12.7,854449,Korea
2024-03-09,CATH,Andes Copper S.A.,Nexans Inc.,,15,132000,8.8,74031100,Peru
2024-03-30,BLDW,Shenzhen Wire Co.,SHENZHEN WIRE CO,Southwire Company,9,66600,7.4,854449,China
";

fn load() -> Dataset {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(CSV.as_bytes()).unwrap();
    load_file(file.path()).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn criteria_sets() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria::default(),
        FilterCriteria::default().with(Facet::Country, "Chile"),
        FilterCriteria::default()
            .with(Facet::Country, "Chile")
            .with(Facet::Category, "COPP"),
        FilterCriteria::default().with_start_date(date("2024-02-01")),
        FilterCriteria::default()
            .with_start_date(date("2024-02-01"))
            .with_end_date(date("2024-03-01")),
        FilterCriteria::default()
            .with_start_date(date("2024-02-01"))
            .with_end_date(date("2024-03-01"))
            .with(Facet::HsCode, "854449"),
        FilterCriteria::default().with(Facet::Buyer, "Nexans Inc."),
    ]
}

#[test]
fn loader_keeps_every_dated_row() {
    let ds = load();
    assert_eq!(ds.len(), 8);
    assert_eq!(ds.date_range(), Some((date("2024-01-05"), date("2024-03-30"))));
}

#[test]
fn empty_criteria_is_the_identity() {
    let ds = load();
    let all: Vec<_> = ds.records().iter().collect();
    let view = filter(ds.records(), &FilterCriteria::default());
    assert_eq!(view.len(), all.len());
    assert!(view.iter().zip(&all).all(|(a, b)| std::ptr::eq(*a, *b)));
}

#[test]
fn adding_constraints_never_grows_the_view() {
    let ds = load();
    let sets = criteria_sets();
    // Pairs (looser, stricter) where every constraint of the first is in the second.
    for (loose, strict) in [(0, 1), (1, 2), (0, 3), (3, 4), (4, 5), (0, 6)] {
        let wide = filter(ds.records(), &sets[loose]);
        let narrow = filter(ds.records(), &sets[strict]);
        assert!(narrow.len() <= wide.len(), "{:?} vs {:?}", sets[loose], sets[strict]);
        assert!(narrow.iter().all(|r| wide.iter().any(|w| std::ptr::eq(*r, *w))));
    }
}

#[test]
fn filtering_is_idempotent() {
    let ds = load();
    for criteria in criteria_sets() {
        let once = filter(ds.records(), &criteria);
        let twice = filter(once.iter().copied(), &criteria);
        assert_eq!(once.len(), twice.len());
    }
}

#[test]
fn unbounded_groups_account_for_every_ton() {
    let ds = load();
    for criteria in criteria_sets() {
        let view = filter(ds.records(), &criteria);
        let total = summarize(&view).total_metric_tons;
        for &facet in Facet::all() {
            let summed: f64 = group_by(&view, facet).iter().map(|g| g.metric_tons).sum();
            assert!((summed - total).abs() < 1e-9, "{facet:?} under {criteria:?}");
        }
    }
}

#[test]
fn cathode_never_appears_in_category_shares() {
    let ds = load();
    let view = filter(ds.records(), &FilterCriteria::default());
    let shares = category_shares(&view, "CATH", 10);
    assert!(shares.iter().all(|s| s.code != "CATH"));
    let fractions: f64 = shares.iter().map(|s| s.fraction).sum();
    assert!((fractions - 1.0).abs() < 1e-9);

    // Cathode tonnage still counts toward the headline figures.
    assert_eq!(summarize(&view).total_metric_tons, 108.75);
}

#[test]
fn months_are_unique_and_ascending() {
    let ds = load();
    let view = filter(ds.records(), &FilterCriteria::default());
    let series = monthly_series(&view);
    let months: Vec<String> = series.points.iter().map(|p| p.month.to_string()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
    assert!(series.points.windows(2).all(|w| w[0].month < w[1].month));
}

#[test]
fn attribution_prefers_a_distinct_international_competitor() {
    assert_eq!(resolve_buyer("ACME Ltd", Some("Globex Inc"), Some("Initech LLC")), "Globex Inc");
    assert_eq!(resolve_buyer("ACME Ltd", Some("ACME"), Some("Initech LLC")), "Initech LLC");
    assert_eq!(resolve_buyer("ACME Ltd", Some("acme ltd."), None), "acme ltd.");
    assert_eq!(resolve_buyer("ACME", None, None), "Unknown");

    let ds = load();
    let buyers: Vec<&str> = ds.records().iter().map(|r| r.buyer.as_str()).collect();
    assert_eq!(
        buyers,
        vec![
            "Nexans Inc.",
            "Southwire Company",
            "Encore Wire",
            "Prysmian Group",
            "Unknown",
            "LS Cable",
            "Nexans Inc.",
            "Southwire Company",
        ]
    );
}

#[test]
fn query_outcome_agrees_with_the_parts() {
    let ds = load();
    let config = EngineConfig::default();
    let criteria = FilterCriteria::default().with(Facet::Seller, "Andes Copper S.A.");
    let outcome = run_query(&ds, &criteria, &config);

    assert_eq!(outcome.indices, vec![0, 1, 6]);
    assert_eq!(outcome.kpis.total_metric_tons, 67.5);
    assert_eq!(outcome.kpis.total_value, 604_000.0);
    assert_eq!(outcome.aggregation.buyers[0].label, "Southwire Company");
    assert_eq!(outcome.options.countries, vec!["Chile", "Peru"]);
}
