/// Data layer: core types, loading, filtering, and summary statistics.
///
/// Architecture:
/// ```text
///   .csv (upload or bundled sample)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + project columns + drop incomplete rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, distinct makes, widget bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  predicates + optional IQR trim → FilteredView
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
