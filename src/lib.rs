//! Statistical profiling for chemical equipment datasets.
//!
//! A dataset of equipment records (parsed upstream from an uploaded file)
//! goes through a pure, synchronous pipeline:
//!
//! 1. numeric-column discovery ([`analysis::classifier`])
//! 2. descriptive statistics per column ([`analysis::describe`])
//! 3. outlier fences and health labels ([`analysis::describe`])
//! 4. categorical type distribution ([`analysis::distribution`])
//! 5. chart-ready projections ([`chart`])
//!
//! Every derived structure is a function of an immutable [`data::model::Dataset`]
//! snapshot; nothing is cached or mutated incrementally, so the pipeline can be
//! re-run (or run from several threads) at will.

pub mod analysis;
pub mod chart;
pub mod data;
pub mod view;

pub use analysis::{profile_dataset, DatasetProfile};
pub use chart::ChartBundle;
pub use data::model::Dataset;
