/// Data layer: tabular model, loading, and numeric refinement.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → all-text Dataset, null markers applied
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ infer_types   │  uniformly numeric columns → Integer / Float
///   └──────────────┘   (best effort: failure keeps the loaded types)
///        │
///        ▼
///   ┌──────────┐
///   │  refine   │  promote mostly-numeric text columns
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod numeric;
pub mod refine;
