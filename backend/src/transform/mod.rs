//! Tabular transformation stages.
//!
//! ```text
//! Cleaner → Normalizer → Binner → Grouper → Ranker → Aligner → Shaper
//! ```
//!
//! Every stage is a pure function from an input table to a new one; views
//! compose a fixed subset of them.

pub mod aligner;
pub mod binner;
pub mod cleaner;
pub mod grouper;
pub mod normalizer;
pub mod ranker;
pub mod shaper;

pub use aligner::{align, union_counts, union_sorted};
pub use binner::{bin_column, BinSpec};
pub use cleaner::{clean, needs_rescale, rescale_ratings};
pub use grouper::{group_by, group_by_pair, AggregateTable, Grid, GroupStats, Metric};
pub use normalizer::{explode, normalize_tokens, title_case};
pub use ranker::{rank, top_k, RankBy};
pub use shaper::{grid_series, round2, round_all, total_line, Axis, Render, Series};
