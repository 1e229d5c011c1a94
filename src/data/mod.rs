/// Data layer: result document types, loading, and sample generation.
///
/// Architecture:
/// ```text
///  baseline.json / test.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  check path, parse JSON → ResultDocument
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ResultDocument  │  curves: field → data type → values
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ compare   │  schema stages, then tolerance check
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod sample;
