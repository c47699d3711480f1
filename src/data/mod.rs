/// Data layer: core types, loading, and boundary validation.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse descriptor → Dataset (InvalidInput at the boundary)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<EquipmentRecord>, column index
///   └──────────┘
///        │
///        ▼
///   analysis / chart / view (pure functions over the snapshot)
/// ```
pub mod loader;
pub mod model;
