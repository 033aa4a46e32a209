use std::fmt;
use std::str::FromStr;

use latnet_core::{ErrorInfo, NetError};
use serde::{Deserialize, Serialize};

/// Polynomial over GF(2) of degree at most 63; bit `k` is the coefficient of `z^k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polynomial(u64);

impl Polynomial {
    /// The zero polynomial.
    pub const ZERO: Polynomial = Polynomial(0);
    /// The constant polynomial `1`.
    pub const ONE: Polynomial = Polynomial(1);

    /// Creates a polynomial from its packed coefficients.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the packed coefficients.
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Returns `z^k`.
    pub fn monomial(k: u32) -> Self {
        Self(1u64 << k)
    }

    /// Returns the degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<u32> {
        if self.0 == 0 {
            None
        } else {
            Some(63 - self.0.leading_zeros())
        }
    }

    /// Returns the coefficient of `z^k`.
    pub fn coeff(&self, k: u32) -> bool {
        k < 64 && (self.0 >> k) & 1 == 1
    }

    /// Reduces `self` modulo `modulus`.
    pub fn rem(&self, modulus: Polynomial) -> Polynomial {
        let Some(dm) = modulus.degree() else {
            return *self;
        };
        let mut r = self.0;
        while r != 0 {
            let dr = 63 - r.leading_zeros();
            if dr < dm {
                break;
            }
            r ^= modulus.0 << (dr - dm);
        }
        Polynomial(r)
    }

    /// Multiplies `self` by `other` modulo `modulus`.
    ///
    /// Both operands must already be reduced, and `modulus` must have degree at most 63.
    pub fn mul_mod(&self, other: Polynomial, modulus: Polynomial) -> Polynomial {
        let dm = match modulus.degree() {
            None | Some(0) => return Polynomial::ZERO,
            Some(dm) => dm,
        };
        let mut acc = 0u64;
        let mut shifted = self.rem(modulus).0;
        let mut b = other.rem(modulus).0;
        while b != 0 {
            if b & 1 == 1 {
                acc ^= shifted;
            }
            b >>= 1;
            let carry = (shifted >> (dm - 1)) & 1 == 1;
            shifted = (shifted << 1) & low_mask(dm);
            if carry {
                shifted ^= modulus.0 & low_mask(dm);
            }
        }
        Polynomial(acc)
    }

    /// Returns `z^k mod modulus`.
    pub fn z_pow_mod(k: u64, modulus: Polynomial) -> Polynomial {
        let mut result = Polynomial::ONE.rem(modulus);
        let mut base = Polynomial::monomial(1).rem(modulus);
        let mut e = k;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul_mod(base, modulus);
            }
            base = base.mul_mod(base, modulus);
            e >>= 1;
        }
        result
    }
}

fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl fmt::Display for Polynomial {
    /// Coefficients from the constant term upwards, separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = self.degree().unwrap_or(0);
        for k in 0..=top {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", u8::from(self.coeff(k)))?;
        }
        Ok(())
    }
}

impl FromStr for Polynomial {
    type Err = NetError;

    /// Parses coefficients from the constant term upwards, e.g. `"1 0 1 1"`,
    /// `"1011"` or `"[1 0 1 1]"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<char> = s
            .chars()
            .filter(|ch| !ch.is_whitespace() && !matches!(ch, '[' | ']' | ','))
            .collect();
        if digits.is_empty() || digits.len() > 64 {
            let info = ErrorInfo::new("invalid-polynomial", "expected between 1 and 64 coefficients")
                .with_context("input", s);
            return Err(NetError::InvalidArgument(info));
        }
        let mut bits = 0u64;
        for (k, ch) in digits.iter().enumerate() {
            match ch {
                '0' => {}
                '1' => bits |= 1u64 << k,
                _ => {
                    let info = ErrorInfo::new("invalid-polynomial", "coefficients must be 0 or 1")
                        .with_context("input", s);
                    return Err(NetError::InvalidArgument(info));
                }
            }
        }
        Ok(Polynomial(bits))
    }
}
