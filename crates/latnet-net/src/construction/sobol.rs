use std::sync::Arc;

use latnet_core::{ErrorInfo, NetError, OutputFormat};
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{check_digits, NetConstruction};
use crate::matrix::GeneratingMatrix;

/// Primitive polynomial and initial direction numbers for one coordinate.
struct SobolEntry {
    degree: u32,
    coeffs: u32,
    initial: &'static [u64],
}

// Coordinates 2..=21, Joe-Kuo D6 parameters. Coordinate 1 is van der Corput.
const TABLE: [SobolEntry; 20] = [
    SobolEntry { degree: 1, coeffs: 0, initial: &[1] },
    SobolEntry { degree: 2, coeffs: 1, initial: &[1, 3] },
    SobolEntry { degree: 3, coeffs: 1, initial: &[1, 3, 1] },
    SobolEntry { degree: 3, coeffs: 2, initial: &[1, 1, 1] },
    SobolEntry { degree: 4, coeffs: 1, initial: &[1, 1, 3, 3] },
    SobolEntry { degree: 4, coeffs: 4, initial: &[1, 3, 5, 13] },
    SobolEntry { degree: 5, coeffs: 2, initial: &[1, 1, 5, 5, 17] },
    SobolEntry { degree: 5, coeffs: 4, initial: &[1, 1, 5, 5, 5] },
    SobolEntry { degree: 5, coeffs: 7, initial: &[1, 1, 7, 11, 19] },
    SobolEntry { degree: 5, coeffs: 11, initial: &[1, 1, 5, 1, 1] },
    SobolEntry { degree: 5, coeffs: 13, initial: &[1, 1, 1, 3, 11] },
    SobolEntry { degree: 5, coeffs: 14, initial: &[1, 3, 5, 5, 31] },
    SobolEntry { degree: 6, coeffs: 1, initial: &[1, 3, 3, 9, 7, 49] },
    SobolEntry { degree: 6, coeffs: 13, initial: &[1, 1, 1, 15, 21, 21] },
    SobolEntry { degree: 6, coeffs: 16, initial: &[1, 3, 1, 13, 27, 49] },
    SobolEntry { degree: 6, coeffs: 19, initial: &[1, 1, 1, 15, 7, 5] },
    SobolEntry { degree: 6, coeffs: 22, initial: &[1, 3, 1, 15, 13, 25] },
    SobolEntry { degree: 6, coeffs: 25, initial: &[1, 1, 5, 5, 19, 61] },
    SobolEntry { degree: 7, coeffs: 1, initial: &[1, 3, 7, 11, 23, 15, 103] },
    SobolEntry { degree: 7, coeffs: 4, initial: &[1, 3, 7, 13, 13, 15, 69] },
];

/// Highest coordinate covered by the built-in direction number table.
pub const MAX_SOBOL_COORDINATE: usize = TABLE.len() + 1;

/// Sobol construction: a digital sequence truncated to `m` digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sobol;

/// Generating value of one Sobol coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SobolGenValue {
    /// Coordinate index selecting the primitive polynomial (1 is van der Corput).
    pub coordinate: usize,
    /// Initial direction numbers `m_1, .., m_s`; `m_k` is odd and below `2^k`.
    pub direction_numbers: Vec<u64>,
}

impl SobolGenValue {
    /// Builds a generating value for `coordinate`.
    pub fn new(coordinate: usize, direction_numbers: Vec<u64>) -> Self {
        Self {
            coordinate,
            direction_numbers,
        }
    }
}

/// Direction numbers computed so far for one coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SobolData {
    degree: u32,
    coeffs: u32,
    direction_numbers: Vec<u64>,
}

impl SobolData {
    /// Returns `m_1, .., m_k` for the `k` columns computed so far.
    pub fn direction_numbers(&self) -> &[u64] {
        &self.direction_numbers
    }

    fn extend_to(&mut self, count: usize) {
        let s = self.degree as usize;
        while self.direction_numbers.len() < count {
            let k = self.direction_numbers.len() + 1;
            let next = if s == 0 {
                1
            } else {
                let dn = &self.direction_numbers;
                let base = dn[k - s - 1];
                let mut value = base ^ (base << s);
                for i in 1..s {
                    if (self.coeffs >> (s - 1 - i)) & 1 == 1 {
                        value ^= dn[k - i - 1] << i;
                    }
                }
                value
            };
            self.direction_numbers.push(next);
        }
    }
}

fn entry(coordinate: usize) -> Result<Option<&'static SobolEntry>, NetError> {
    match coordinate {
        0 => Err(NetError::OutOfRange(
            ErrorInfo::new("sobol-coordinate-out-of-range", "Sobol coordinates are 1-indexed")
                .with_context("coordinate", "0"),
        )),
        1 => Ok(None),
        c if c <= MAX_SOBOL_COORDINATE => Ok(Some(&TABLE[c - 2])),
        c => Err(NetError::OutOfRange(
            ErrorInfo::new(
                "sobol-coordinate-out-of-range",
                "no primitive polynomial available for this coordinate",
            )
            .with_context("coordinate", c.to_string())
            .with_context("max_coordinate", MAX_SOBOL_COORDINATE.to_string()),
        )),
    }
}

fn fill_columns(matrix: &mut GeneratingMatrix, data: &SobolData, from: usize, to: usize) {
    for c in from..to {
        let m = data.direction_numbers[c];
        for r in 0..=c.min(matrix.num_rows().saturating_sub(1)) {
            if (m >> (c - r)) & 1 == 1 {
                matrix.set(r, c, true);
            }
        }
    }
}

impl NetConstruction for Sobol {
    type GenValue = SobolGenValue;
    type DesignParameter = usize;
    type ComputationData = SobolData;

    const NAME: &'static str = "Sobol";
    const IS_SEQUENCE_VIEWABLE: bool = true;

    fn default_design_parameter() -> usize {
        10
    }

    fn check_design_parameter(design: &usize) -> Result<(), NetError> {
        check_digits("m", *design)
    }

    fn n_rows(design: &usize) -> usize {
        *design
    }

    fn n_cols(design: &usize) -> usize {
        *design
    }

    fn check_gen_value(gen: &SobolGenValue, _design: &usize) -> Result<(), NetError> {
        let expected = entry(gen.coordinate)?.map(|e| e.degree as usize).unwrap_or(0);
        if gen.direction_numbers.len() != expected {
            let info = ErrorInfo::new(
                "sobol-direction-count",
                "number of direction numbers must equal the polynomial degree",
            )
            .with_context("coordinate", gen.coordinate.to_string())
            .with_context("expected", expected.to_string())
            .with_context("found", gen.direction_numbers.len().to_string());
            return Err(NetError::InvalidArgument(info));
        }
        for (idx, &m) in gen.direction_numbers.iter().enumerate() {
            let k = idx + 1;
            if m % 2 == 0 || m >= (1u64 << k) {
                let info = ErrorInfo::new(
                    "sobol-direction-number",
                    "direction number m_k must be odd and smaller than 2^k",
                )
                .with_context("coordinate", gen.coordinate.to_string())
                .with_context("k", k.to_string())
                .with_context("m_k", m.to_string());
                return Err(NetError::InvalidArgument(info));
            }
        }
        Ok(())
    }

    fn default_gen_values(dimension: usize, _design: &usize) -> Result<Vec<SobolGenValue>, NetError> {
        (1..=dimension)
            .map(|coordinate| {
                let numbers = entry(coordinate)?
                    .map(|e| e.initial.to_vec())
                    .unwrap_or_default();
                Ok(SobolGenValue::new(coordinate, numbers))
            })
            .collect()
    }

    fn random_gen_value<R: Rng + ?Sized>(
        coord: usize,
        _design: &usize,
        rng: &mut R,
    ) -> Result<SobolGenValue, NetError> {
        let degree = entry(coord)?.map(|e| e.degree).unwrap_or(0);
        let numbers = (1..=degree)
            .map(|k| (rng.gen_range(0..(1u64 << (k - 1))) << 1) | 1)
            .collect();
        Ok(SobolGenValue::new(coord, numbers))
    }

    fn create_generating_matrix(
        gen: &SobolGenValue,
        design: &usize,
    ) -> Result<(GeneratingMatrix, SobolData), NetError> {
        Self::check_gen_value(gen, design)?;
        let (degree, coeffs) = entry(gen.coordinate)?
            .map(|e| (e.degree, e.coeffs))
            .unwrap_or((0, 0));
        let mut data = SobolData {
            degree,
            coeffs,
            direction_numbers: gen.direction_numbers.clone(),
        };
        let m = *design;
        data.extend_to(m);
        let mut matrix = GeneratingMatrix::new(m, m);
        fill_columns(&mut matrix, &data, 0, m);
        trace!("sobol coordinate {} built with {} digits", gen.coordinate, m);
        Ok((matrix, data))
    }

    fn extend_generating_matrices(
        new_rows: usize,
        new_cols: usize,
        matrices: &mut [GeneratingMatrix],
        data: &mut [SobolData],
    ) -> Result<(), NetError> {
        if new_rows != new_cols {
            let info = ErrorInfo::new(
                "sobol-non-square-extension",
                "Sobol matrices extend to square shapes only",
            )
            .with_context("requested", format!("{new_rows}x{new_cols}"));
            return Err(NetError::InvalidArgument(info));
        }
        check_digits("m", new_cols)?;
        if matrices.len() != data.len() {
            let info = ErrorInfo::new(
                "computation-data-mismatch",
                "one computation data entry is required per matrix",
            )
            .with_context("matrices", matrices.len().to_string())
            .with_context("data", data.len().to_string());
            return Err(NetError::Logic(info));
        }
        if let Some(current) = matrices.iter().map(GeneratingMatrix::num_cols).max() {
            if current > new_cols {
                let info = ErrorInfo::new("matrix-shrink", "matrices can only grow")
                    .with_context("current", current.to_string())
                    .with_context("requested", new_cols.to_string());
                return Err(NetError::InvalidArgument(info));
            }
        }
        for (matrix, coord_data) in matrices.iter_mut().zip(data.iter_mut()) {
            let from = matrix.num_cols();
            matrix.grow(new_rows, new_cols)?;
            coord_data.extend_to(new_cols);
            fill_columns(matrix, coord_data, from, new_cols);
        }
        Ok(())
    }

    fn format(
        gen_values: &[Arc<SobolGenValue>],
        design: &usize,
        _output_format: OutputFormat,
    ) -> String {
        let mut out = format!("# Sobol digital net\n# m = {design}\n# coordinate: direction numbers");
        for gen in gen_values {
            let numbers: Vec<String> = gen.direction_numbers.iter().map(u64::to_string).collect();
            out.push('\n');
            out.push_str(format!("{}: {}", gen.coordinate, numbers.join(" ")).trim_end());
        }
        out
    }
}
