use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, NetError};

/// Real numbers used by merit values and functors.
pub type Real = f64;

/// Verbosity of the textual representation of a net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact, construction specific listing of the generating values.
    #[default]
    Cli,
    /// Verbose form that appends a dump of every generating matrix.
    Gui,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Cli => write!(f, "cli"),
            OutputFormat::Gui => write!(f, "gui"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cli" => Ok(OutputFormat::Cli),
            "gui" => Ok(OutputFormat::Gui),
            _ => Err(NetError::Config(
                ErrorInfo::new("unknown-output-format", "cannot parse output format")
                    .with_context("input", s)
                    .with_hint("expected `cli` or `gui`"),
            )),
        }
    }
}

/// Compression policy a merit driver may apply to a functor's evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compress {
    /// Evaluate every point.
    None,
}

/// Whether merit values are reported for one level or for every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PointSetType {
    /// A single point set of `2^m` points.
    #[default]
    Unilevel,
    /// Embedded point sets of `2^1, .., 2^m` points.
    Multilevel,
}

/// Returns `2^exponent`, rejecting exponents that overflow `u64`.
pub fn pow2(exponent: usize) -> Result<u64, NetError> {
    if exponent >= 64 {
        let info = ErrorInfo::new("pow2-overflow", "2^exponent does not fit in 64 bits")
            .with_context("exponent", exponent.to_string());
        return Err(NetError::OutOfRange(info));
    }
    Ok(1u64 << exponent)
}
