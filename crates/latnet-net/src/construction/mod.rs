//! Construction methods turning compact generating values into generating matrices.

use std::fmt::Debug;
use std::sync::Arc;

use latnet_core::{ErrorInfo, NetError, OutputFormat};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::matrix::GeneratingMatrix;

mod explicit;
mod polynomial;
mod sobol;

pub use explicit::{Explicit, ExplicitShape};
pub use polynomial::{PolynomialData, PolynomialLattice};
pub use sobol::{Sobol, SobolData, SobolGenValue, MAX_SOBOL_COORDINATE};

/// Largest number of digits (rows or columns) any construction accepts, so
/// that `2^columns` points are addressable with a `u64` index.
pub const MAX_DIGITS: usize = 63;

/// Strategy describing one family of digital net constructions.
///
/// Implementations are zero-sized markers; every operation is an associated
/// function so that [`DigitalNetConstruction`](crate::DigitalNetConstruction)
/// dispatches at compile time.
pub trait NetConstruction: Debug + Send + Sync + 'static {
    /// Compact value from which one coordinate's matrix is derived.
    type GenValue: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync;
    /// Parameter fixing the shape shared by every coordinate.
    type DesignParameter: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync;
    /// Opaque state kept per coordinate to resume a matrix computation.
    type ComputationData: Clone + Debug + Send + Sync;

    /// Display name of the construction.
    const NAME: &'static str;
    /// Whether [`NetConstruction::extend_generating_matrices`] is supported.
    const IS_SEQUENCE_VIEWABLE: bool;

    /// Design parameter used when none is supplied.
    fn default_design_parameter() -> Self::DesignParameter;

    /// Rejects design parameters the construction cannot handle.
    fn check_design_parameter(design: &Self::DesignParameter) -> Result<(), NetError>;

    /// Number of rows of every generating matrix.
    fn n_rows(design: &Self::DesignParameter) -> usize;

    /// Number of columns of every generating matrix.
    fn n_cols(design: &Self::DesignParameter) -> usize;

    /// Rejects generating values incompatible with the design parameter.
    fn check_gen_value(gen: &Self::GenValue, design: &Self::DesignParameter)
        -> Result<(), NetError>;

    /// Canonical generating values for coordinates `1..=dimension`.
    ///
    /// The result for `dimension` is a prefix of the result for any larger
    /// dimension.
    fn default_gen_values(
        dimension: usize,
        design: &Self::DesignParameter,
    ) -> Result<Vec<Self::GenValue>, NetError>;

    /// Draws a valid generating value for coordinate `coord` (1-indexed).
    fn random_gen_value<R: Rng + ?Sized>(
        coord: usize,
        design: &Self::DesignParameter,
        rng: &mut R,
    ) -> Result<Self::GenValue, NetError>;

    /// Builds the generating matrix for `gen` together with the data needed to extend it.
    fn create_generating_matrix(
        gen: &Self::GenValue,
        design: &Self::DesignParameter,
    ) -> Result<(GeneratingMatrix, Self::ComputationData), NetError>;

    /// Grows `matrices` to `new_rows x new_cols` using the stored computation data.
    ///
    /// Only sequence-viewable constructions override this. The default
    /// reports [`NetError::Unsupported`] for constructions that are not
    /// sequence viewable and [`NetError::Logic`] for those that claim to be.
    fn extend_generating_matrices(
        new_rows: usize,
        new_cols: usize,
        matrices: &mut [GeneratingMatrix],
        data: &mut [Self::ComputationData],
    ) -> Result<(), NetError> {
        let _ = (matrices, data);
        if Self::IS_SEQUENCE_VIEWABLE {
            let info = ErrorInfo::new(
                "missing-size-extension",
                "construction declares sequence viewability but does not extend matrices",
            )
            .with_context("construction", Self::NAME);
            Err(NetError::Logic(info))
        } else {
            Err(not_sequence_viewable(Self::NAME, new_rows, new_cols))
        }
    }

    /// Renders the generating values of a net.
    fn format(
        gen_values: &[Arc<Self::GenValue>],
        design: &Self::DesignParameter,
        output_format: OutputFormat,
    ) -> String;
}

pub(crate) fn not_sequence_viewable(name: &str, new_rows: usize, new_cols: usize) -> NetError {
    NetError::Unsupported(
        ErrorInfo::new(
            "not-sequence-viewable",
            "this net cannot be viewed as a digital sequence",
        )
        .with_context("construction", name)
        .with_context("requested", format!("{new_rows}x{new_cols}")),
    )
}

pub(crate) fn check_digits(what: &str, value: usize) -> Result<(), NetError> {
    if value == 0 || value > MAX_DIGITS {
        let info = ErrorInfo::new("digits-out-of-range", "number of digits must lie in 1..=63")
            .with_context(what, value.to_string());
        return Err(NetError::InvalidArgument(info));
    }
    Ok(())
}
