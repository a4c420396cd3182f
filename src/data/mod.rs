/// Data layer: header matching, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   natality .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read rows, normalize headers
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ resolver  │  header → logical field (name, canonical key, aliases)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ NatalityTable │  renamed columns, coerced records
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────────────┐
///   │ filter / aggregate    │  selections → indices → totals
///   └──────────────────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod fields;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod resolver;
