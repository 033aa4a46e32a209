use std::fmt;

use latnet_core::{Compress, ErrorInfo, NetError, Real};

/// One-dimensional weight function evaluated at the coordinates of a point set.
pub trait MeritFunctor: fmt::Debug + Send + Sync {
    /// Evaluates the function at `x` in `[0, 1)` for a point set of `n` points.
    fn evaluate(&self, x: Real, n: u64) -> Real;

    /// Whether `evaluate(x) == evaluate(1 - x)`.
    fn symmetric(&self) -> bool;

    /// Compression a driver may apply to the evaluations.
    fn suggested_compression(&self) -> Compress;

    /// Display name.
    fn name(&self) -> String;
}

/// Largest interlacing factor accepted by [`Bidn::new`].
pub const MAX_INTERLACING: u32 = 63;

/// Weight function of the B-IDN criterion for interlaced digital nets.
///
/// With interlacing factor `d` and `s = 2^(d-1) / (2^(d-1) - 1)`, the value
/// is `s` at `x = 0` and `s * (1 - (2^d - 1) / 2^k)` elsewhere, where
/// `k = -(d - 1) * floor(log2(x))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bidn {
    interlacing_factor: u32,
    scale: Real,
}

impl Bidn {
    /// Creates the functor for interlacing factor `interlacing_factor`.
    ///
    /// The scale `2^(d-1) / (2^(d-1) - 1)` diverges at `d = 1`, so factors
    /// below 2 are rejected.
    pub fn new(interlacing_factor: u32) -> Result<Self, NetError> {
        if !(2..=MAX_INTERLACING).contains(&interlacing_factor) {
            let info = ErrorInfo::new(
                "bidn-interlacing-out-of-range",
                "the B-IDN interlacing factor must lie in 2..=63",
            )
            .with_context("interlacing_factor", interlacing_factor.to_string());
            return Err(NetError::InvalidArgument(info));
        }
        let half = (2.0 as Real).powi(interlacing_factor as i32 - 1);
        Ok(Self {
            interlacing_factor,
            scale: half / (half - 1.0),
        })
    }

    /// Returns the interlacing factor `d`.
    pub fn interlacing_factor(&self) -> u32 {
        self.interlacing_factor
    }

    /// Returns the value at the origin, `2^(d-1) / (2^(d-1) - 1)`.
    pub fn scale(&self) -> Real {
        self.scale
    }
}

impl MeritFunctor for Bidn {
    fn evaluate(&self, x: Real, _n: u64) -> Real {
        if x < Real::EPSILON {
            return self.scale;
        }
        let d = self.interlacing_factor as i32;
        let k = -(d - 1) * x.log2().floor() as i32;
        let numerator = (2.0 as Real).powi(d) - 1.0;
        self.scale * (1.0 - numerator / (2.0 as Real).powi(k))
    }

    fn symmetric(&self) -> bool {
        false
    }

    fn suggested_compression(&self) -> Compress {
        Compress::None
    }

    fn name(&self) -> String {
        format!("B-IDN-d{}", self.interlacing_factor)
    }
}

impl fmt::Display for Bidn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
