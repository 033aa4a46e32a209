use std::sync::Arc;

use latnet_core::{ErrorInfo, NetError, OutputFormat};
use log::trace;
use rand::Rng;

use super::{check_digits, NetConstruction};
use crate::gf2::Polynomial;
use crate::matrix::GeneratingMatrix;

/// Polynomial lattice rule viewed as a digital net.
///
/// The design parameter is the modulus `P(z)` of degree `m`; a generating
/// value `q(z)` yields the `m x m` Hankel matrix of the Laurent expansion of
/// `q(z) / P(z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialLattice;

/// Expansion digits `u_1, .., u_{2m-1}` of `q(z) / P(z)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolynomialData {
    expansion: Vec<bool>,
}

impl PolynomialData {
    /// Returns the expansion digits, `expansion()[l - 1] == u_l`.
    pub fn expansion(&self) -> &[bool] {
        &self.expansion
    }
}

fn modulus_degree(design: &Polynomial) -> usize {
    design.degree().unwrap_or(0) as usize
}

/// Digits of the formal Laurent series `q(z) / P(z) = sum_{l>=1} u_l z^{-l}`.
fn laurent_expansion(gen: Polynomial, modulus: Polynomial, count: usize) -> Vec<bool> {
    let m = modulus_degree(&modulus);
    let mut u = vec![false; count + 1];
    for l in 1..=count {
        let mut digit = l <= m && gen.coeff((m - l) as u32);
        for k in 0..m {
            if modulus.coeff(k as u32) && l + k > m {
                digit ^= u[l + k - m];
            }
        }
        u[l] = digit;
    }
    u.remove(0);
    u
}

impl NetConstruction for PolynomialLattice {
    type GenValue = Polynomial;
    type DesignParameter = Polynomial;
    type ComputationData = PolynomialData;

    const NAME: &'static str = "Polynomial";
    const IS_SEQUENCE_VIEWABLE: bool = false;

    fn default_design_parameter() -> Polynomial {
        // z^10 + z^3 + 1
        Polynomial::from_bits(0x409)
    }

    fn check_design_parameter(design: &Polynomial) -> Result<(), NetError> {
        check_digits("modulus_degree", modulus_degree(design))?;
        if !design.coeff(0) {
            let info = ErrorInfo::new(
                "modulus-divisible-by-z",
                "the modulus must have a non-zero constant term",
            )
            .with_context("modulus", format!("[{design}]"));
            return Err(NetError::InvalidArgument(info));
        }
        Ok(())
    }

    fn n_rows(design: &Polynomial) -> usize {
        modulus_degree(design)
    }

    fn n_cols(design: &Polynomial) -> usize {
        modulus_degree(design)
    }

    fn check_gen_value(gen: &Polynomial, design: &Polynomial) -> Result<(), NetError> {
        let m = modulus_degree(design);
        match gen.degree() {
            Some(d) if (d as usize) < m => Ok(()),
            _ => {
                let info = ErrorInfo::new(
                    "invalid-generating-polynomial",
                    "generating polynomial must be non-zero with degree below the modulus degree",
                )
                .with_context("gen_value", format!("[{gen}]"))
                .with_context("modulus", format!("[{design}]"));
                Err(NetError::InvalidArgument(info))
            }
        }
    }

    fn default_gen_values(dimension: usize, design: &Polynomial) -> Result<Vec<Polynomial>, NetError> {
        Self::check_design_parameter(design)?;
        Ok((0..dimension as u64)
            .map(|j| Polynomial::z_pow_mod(j, *design))
            .collect())
    }

    fn random_gen_value<R: Rng + ?Sized>(
        _coord: usize,
        design: &Polynomial,
        rng: &mut R,
    ) -> Result<Polynomial, NetError> {
        Self::check_design_parameter(design)?;
        let bound = 1u64 << modulus_degree(design);
        Ok(Polynomial::from_bits(rng.gen_range(1..bound)))
    }

    fn create_generating_matrix(
        gen: &Polynomial,
        design: &Polynomial,
    ) -> Result<(GeneratingMatrix, PolynomialData), NetError> {
        Self::check_design_parameter(design)?;
        Self::check_gen_value(gen, design)?;
        let m = modulus_degree(design);
        let expansion = laurent_expansion(*gen, *design, 2 * m - 1);
        let mut matrix = GeneratingMatrix::new(m, m);
        for r in 0..m {
            for c in 0..m {
                if expansion[r + c] {
                    matrix.set(r, c, true);
                }
            }
        }
        trace!("polynomial net coordinate [{gen}] built modulo [{design}]");
        Ok((matrix, PolynomialData { expansion }))
    }

    fn format(
        gen_values: &[Arc<Polynomial>],
        design: &Polynomial,
        _output_format: OutputFormat,
    ) -> String {
        let mut out = format!("# Polynomial lattice rule\n# modulus = [{design}]\n# generating vector");
        for (idx, gen) in gen_values.iter().enumerate() {
            out.push_str(&format!("\n{}: [{gen}]", idx + 1));
        }
        out
    }
}
