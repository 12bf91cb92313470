/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ListingDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ListingDataset │  Vec<Listing>, facet value lists
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search + facet + price predicates → view indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  metrics, histogram, describe over the view
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
