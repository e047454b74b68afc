use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Facet – a categorical column that can be filtered and ranked
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Category,
    Buyer,
    Seller,
    HsCode,
    Country,
}

impl Facet {
    /// The record's value for this facet.
    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            Facet::Category => &record.category_code,
            Facet::Buyer => &record.buyer,
            Facet::Seller => record.seller(),
            Facet::HsCode => record.hs_code.as_str(),
            Facet::Country => &record.country_of_origin,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facet::Category => "Category",
            Facet::Buyer => "Buyer",
            Facet::Seller => "Seller",
            Facet::HsCode => "HS Code",
            Facet::Country => "Country",
        }
    }

    pub fn all() -> &'static [Facet] {
        &[
            Facet::Category,
            Facet::Buyer,
            Facet::Seller,
            Facet::HsCode,
            Facet::Country,
        ]
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – one optional constraint per facet
// ---------------------------------------------------------------------------

/// Optional constraints. An unset field places no restriction on records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category_code: Option<String>,
    pub buyer: Option<String>,
    pub seller: Option<String>,
    pub hs_code: Option<String>,
    pub country_of_origin: Option<String>,
}

impl FilterCriteria {
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn with(mut self, facet: Facet, value: impl Into<String>) -> Self {
        *self.slot_mut(facet) = Some(value.into());
        self
    }

    /// The selected value for a categorical facet.
    pub fn get(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Category => self.category_code.as_deref(),
            Facet::Buyer => self.buyer.as_deref(),
            Facet::Seller => self.seller.as_deref(),
            Facet::HsCode => self.hs_code.as_deref(),
            Facet::Country => self.country_of_origin.as_deref(),
        }
    }

    pub fn set(&mut self, facet: Facet, value: Option<String>) {
        *self.slot_mut(facet) = value;
    }

    pub fn clear(&mut self, facet: Facet) {
        self.set(facet, None);
    }

    pub fn clear_dates(&mut self) {
        self.start_date = None;
        self.end_date = None;
    }

    pub fn clear_all(&mut self) {
        *self = FilterCriteria::default();
    }

    /// True when no facet is constrained.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && Facet::all().iter().all(|f| self.get(*f).is_none())
    }

    /// A record passes when it satisfies every constrained facet:
    /// * dates are inclusive bounds, each optional on its own
    /// * categorical facets use exact, case-sensitive equality
    pub fn matches(&self, record: &Record) -> bool {
        if self.start_date.is_some_and(|start| record.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| record.date > end) {
            return false;
        }
        Facet::all().iter().all(|facet| match self.get(*facet) {
            Some(wanted) => facet.value(record) == wanted,
            None => true,
        })
    }

    fn slot_mut(&mut self, facet: Facet) -> &mut Option<String> {
        match facet {
            Facet::Category => &mut self.category_code,
            Facet::Buyer => &mut self.buyer,
            Facet::Seller => &mut self.seller,
            Facet::HsCode => &mut self.hs_code,
            Facet::Country => &mut self.country_of_origin,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Keep the records that pass `criteria`, preserving their order.
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| criteria.matches(r)).collect()
}

/// Return indices of records that pass all active filters.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Sorted distinct values of `facet` among `records`.
pub fn facet_options(records: &[&Record], facet: Facet) -> Vec<String> {
    records
        .iter()
        .map(|r| facet.value(r))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Selectable values per facet for the current view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub categories: Vec<String>,
    pub buyers: Vec<String>,
    pub sellers: Vec<String>,
    pub hs_codes: Vec<String>,
    pub countries: Vec<String>,
}

impl FacetOptions {
    pub fn from_records(records: &[&Record]) -> Self {
        FacetOptions {
            categories: facet_options(records, Facet::Category),
            buyers: facet_options(records, Facet::Buyer),
            sellers: facet_options(records, Facet::Seller),
            hs_codes: facet_options(records, Facet::HsCode),
            countries: facet_options(records, Facet::Country),
        }
    }

    pub fn get(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Category => &self.categories,
            Facet::Buyer => &self.buyers,
            Facet::Seller => &self.sellers,
            Facet::HsCode => &self.hs_codes,
            Facet::Country => &self.countries,
        }
    }
}
