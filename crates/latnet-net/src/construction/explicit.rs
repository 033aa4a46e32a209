use std::sync::Arc;

use latnet_core::{ErrorInfo, NetError, OutputFormat};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{check_digits, NetConstruction};
use crate::matrix::GeneratingMatrix;

/// Construction whose generating values are the generating matrices themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explicit;

/// Shape shared by every matrix of an explicit net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExplicitShape {
    /// Number of output digits.
    pub rows: usize,
    /// Number of index digits.
    pub cols: usize,
}

impl ExplicitShape {
    /// Creates a shape descriptor.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

// binom(c, r) * (coord - 1)^(c - r) mod 2, i.e. the identity for odd
// coordinates and Pascal's matrix mod 2 for even ones.
fn binomial_matrix(coord: usize, shape: &ExplicitShape) -> GeneratingMatrix {
    let mut matrix = GeneratingMatrix::new(shape.rows, shape.cols);
    let odd_power = (coord - 1) % 2 == 1;
    for r in 0..shape.rows {
        for c in r..shape.cols {
            let binom_odd = r & c == r;
            if binom_odd && (c == r || odd_power) {
                matrix.set(r, c, true);
            }
        }
    }
    matrix
}

impl NetConstruction for Explicit {
    type GenValue = GeneratingMatrix;
    type DesignParameter = ExplicitShape;
    type ComputationData = ();

    const NAME: &'static str = "Explicit";
    const IS_SEQUENCE_VIEWABLE: bool = false;

    fn default_design_parameter() -> ExplicitShape {
        ExplicitShape::new(10, 10)
    }

    fn check_design_parameter(design: &ExplicitShape) -> Result<(), NetError> {
        check_digits("rows", design.rows)?;
        check_digits("cols", design.cols)
    }

    fn n_rows(design: &ExplicitShape) -> usize {
        design.rows
    }

    fn n_cols(design: &ExplicitShape) -> usize {
        design.cols
    }

    fn check_gen_value(gen: &GeneratingMatrix, design: &ExplicitShape) -> Result<(), NetError> {
        if gen.num_rows() != design.rows || gen.num_cols() != design.cols {
            let info = ErrorInfo::new(
                "explicit-shape-mismatch",
                "generating matrix shape differs from the design parameter",
            )
            .with_context("expected", format!("{}x{}", design.rows, design.cols))
            .with_context("found", format!("{}x{}", gen.num_rows(), gen.num_cols()));
            return Err(NetError::InvalidArgument(info));
        }
        Ok(())
    }

    fn default_gen_values(
        dimension: usize,
        design: &ExplicitShape,
    ) -> Result<Vec<GeneratingMatrix>, NetError> {
        Self::check_design_parameter(design)?;
        Ok((1..=dimension)
            .map(|coord| binomial_matrix(coord, design))
            .collect())
    }

    fn random_gen_value<R: Rng + ?Sized>(
        _coord: usize,
        design: &ExplicitShape,
        rng: &mut R,
    ) -> Result<GeneratingMatrix, NetError> {
        Self::check_design_parameter(design)?;
        let mut matrix = GeneratingMatrix::new(design.rows, design.cols);
        for r in 0..design.rows {
            for c in 0..design.cols {
                matrix.set(r, c, rng.gen::<bool>());
            }
        }
        Ok(matrix)
    }

    fn create_generating_matrix(
        gen: &GeneratingMatrix,
        design: &ExplicitShape,
    ) -> Result<(GeneratingMatrix, ()), NetError> {
        Self::check_gen_value(gen, design)?;
        Ok((gen.clone(), ()))
    }

    fn format(
        gen_values: &[Arc<GeneratingMatrix>],
        design: &ExplicitShape,
        output_format: OutputFormat,
    ) -> String {
        let mut out = format!(
            "# Explicit digital net\n# shape = {}x{}",
            design.rows, design.cols
        );
        // GUI output gets the matrices from `DigitalNet::format`.
        if output_format == OutputFormat::Cli {
            for (idx, gen) in gen_values.iter().enumerate() {
                out.push_str(&format!("\n# coordinate {}\n{gen}", idx + 1));
            }
        }
        out
    }
}
