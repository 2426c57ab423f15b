/// Analysis layer: baseline, floor, reversals and areas.
///
/// Architecture:
/// ```text
///   Series.values
///        │
///        ▼
///   ┌──────────┐
///   │  smooth   │  optional centered moving average
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ baseline  │  greedy lower envelope → anchor indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  floor    │  linear interpolation between anchors
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reversal  │  confirmed valleys/peaks (+ derivative overlay)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   area    │  trapezoids of series − floor, valley to valley
///   └──────────┘
/// ```

pub mod area;
pub mod baseline;
pub mod floor;
pub mod reversal;
pub mod smooth;

pub use area::{integrate_spans, mark_min_height, total_area, AreaSpan};
pub use baseline::estimate_anchors;
pub use floor::Floor;
pub use reversal::{DerivativeMarkers, Reversal, ReversalKind, Reversals};
pub use smooth::mean_filter;
