use std::fmt;

use latnet_core::{ErrorInfo, NetError, Real};
use serde::{Deserialize, Serialize};

/// Reduces the merit values of the embedded levels of a multilevel point set.
///
/// Index `i` of the value slice holds the merit of the first `2^i` points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "level")]
pub enum LevelCombiner {
    /// Sum of every level.
    #[default]
    Sum,
    /// Largest level value.
    Max,
    /// Value of a single level.
    LevelSelector(usize),
}

impl LevelCombiner {
    /// Combines `values` into one merit.
    pub fn combine(&self, values: &[Real]) -> Result<Real, NetError> {
        match *self {
            LevelCombiner::Sum => Ok(values.iter().sum()),
            LevelCombiner::Max => values.iter().copied().reduce(Real::max).ok_or_else(|| {
                NetError::InvalidArgument(ErrorInfo::new(
                    "empty-merit-levels",
                    "the maximum of zero levels is undefined",
                ))
            }),
            LevelCombiner::LevelSelector(level) => values.get(level).copied().ok_or_else(|| {
                let info = ErrorInfo::new("level-out-of-range", "no merit value for that level")
                    .with_context("level", level.to_string())
                    .with_context("levels", values.len().to_string());
                NetError::OutOfRange(info)
            }),
        }
    }
}

impl fmt::Display for LevelCombiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelCombiner::Sum => write!(f, "sum"),
            LevelCombiner::Max => write!(f, "max"),
            LevelCombiner::LevelSelector(level) => write!(f, "level:{level}"),
        }
    }
}
