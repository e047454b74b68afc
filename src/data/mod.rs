//! Data layer: typed records, loading, attribution, filtering, export.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<Shipment>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ attribution  │  shipper / competitors → buyer (once per record)
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌──────────┐      ┌──────────┐
//!   │ Dataset   │ ───▶ │ snapshot  │  Arc<Dataset>, swapped on reload
//!   └──────────┘      └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterCriteria → records in original order
//!   └──────────┘
//!        │
//!        ▼
//!   engine / export
//! ```

pub mod attribution;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod snapshot;
