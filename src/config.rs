use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::model::CATHODE_CATEGORY;

/// Tunables for the aggregation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Size of the buyer, seller and country rankings.
    pub top_n: usize,
    /// Size of the HS-code ranking; `None` keeps every code.
    pub hs_top_n: Option<usize>,
    /// Number of slices in the category share view.
    pub category_share_k: usize,
    /// Category code left out of the share view.
    pub reserved_category: String,
    /// Divisor applied to value for the secondary time-series axis.
    pub value_axis_divisor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            top_n: 8,
            hs_top_n: None,
            category_share_k: 4,
            reserved_category: CATHODE_CATEGORY.to_string(),
            value_axis_divisor: 1_000_000.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// File loaded at start-up, if any.
    pub data_path: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key → value source. Unset keys keep their defaults;
    /// invalid values are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = EngineConfig::default();
        AppConfig {
            data_path: lookup("BOARD_DATA_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            engine: EngineConfig {
                top_n: parse_or(&lookup, "BOARD_TOP_N", defaults.top_n, |n| *n > 0),
                hs_top_n: lookup("BOARD_HS_TOP_N").and_then(|raw| {
                    match raw.trim().parse::<usize>() {
                        Ok(n) if n > 0 => Some(n),
                        _ => {
                            log::warn!("Ignoring invalid BOARD_HS_TOP_N={raw:?}");
                            None
                        }
                    }
                }),
                category_share_k: parse_or(
                    &lookup,
                    "BOARD_CATEGORY_SHARE_K",
                    defaults.category_share_k,
                    |k| *k > 0,
                ),
                reserved_category: lookup("BOARD_RESERVED_CATEGORY")
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .unwrap_or(defaults.reserved_category),
                value_axis_divisor: parse_or(
                    &lookup,
                    "BOARD_VALUE_AXIS_DIVISOR",
                    defaults.value_axis_divisor,
                    |d: &f64| d.is_finite() && *d > 0.0,
                ),
            },
        }
    }
}

fn parse_or<T, F, V>(lookup: &F, key: &str, default: T, valid: V) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
    V: Fn(&T) -> bool,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) if valid(&v) => v,
        _ => {
            log::warn!("Ignoring invalid {key}={raw:?}, using default");
            default
        }
    }
}
