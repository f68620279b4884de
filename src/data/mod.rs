/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmissionsTable (or LoadError)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ EmissionsTable │  Vec<EmissionsRecord>, distinct countries / years
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → rows for a year / a country
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
