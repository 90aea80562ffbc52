/// Data layer: core types, loading, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///  data/premier_league_<year>.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  discover files, parse year, validate schema
///   └──────────┘  (normalize: clean team names, coerce points)
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  reload only when the files change
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SeasonDataset │  Vec<SeasonRecord>, team/year index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year window + team selection → record indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  per-team totals, recency weights, predicted winner
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
