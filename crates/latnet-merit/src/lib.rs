#![deny(missing_docs)]

//! Merit functors and the combiners reducing multilevel merit values to one scalar.

/// Reduction of per-level merit values.
pub mod combiner;
/// Per-level merit evaluation of a net coordinate.
pub mod eval;
/// One-dimensional merit weight functions.
pub mod functor;
/// Parsing of combiner strings.
pub mod parser;

pub use combiner::LevelCombiner;
pub use eval::{combined_merit, level_merits, MAX_EVAL_LEVEL};
pub use functor::{Bidn, MeritFunctor};
pub use parser::{parse_combiner, parse_level_combiner};
