/// Data layer: core types, loading, and time-window filtering.
///
/// Architecture:
/// ```text
///  tab-delimited text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  split rows → parse (time, value) → drop bad rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  closed time window + axis labels
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LoadedTrace   │  Series, title, LoadStats
///   └──────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
