//! Dense univariate polynomials over ℚ

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::sampling::Sample;

/// Name of the indeterminate (the field order) in rendered output.
pub const INDETERMINATE: &str = "q";

/// Polynomial in q with exact rational coefficients.
///
/// Coefficients are stored lowest degree first with trailing zeros removed,
/// so structural equality is polynomial equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EPolynomial {
    coefficients: Vec<BigRational>,
}

impl EPolynomial {
    /// Build from coefficients `[c_0, c_1, ...]`.
    pub fn new(mut coefficients: Vec<BigRational>) -> Self {
        while coefficients.last().is_some_and(Zero::is_zero) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    /// Build from integer coefficients `[c_0, c_1, ...]`.
    pub fn from_integers(coefficients: &[i64]) -> Self {
        Self::new(
            coefficients
                .iter()
                .map(|&c| BigRational::from_integer(BigInt::from(c)))
                .collect(),
        )
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    /// True for the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Coefficients lowest degree first, without trailing zeros.
    pub fn coefficients(&self) -> &[BigRational] {
        &self.coefficients
    }

    /// Coefficient of q^power (zero past the degree).
    pub fn coefficient(&self, power: usize) -> BigRational {
        self.coefficients
            .get(power)
            .cloned()
            .unwrap_or_else(BigRational::zero)
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    /// True when every coefficient is an integer.
    pub fn is_integral(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_integer())
    }

    /// Evaluate using Horner's method
    pub fn evaluate(&self, x: &BigRational) -> BigRational {
        self.coefficients
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, c| acc * x + c)
    }

    /// Evaluate at an integer field order.
    pub fn evaluate_at(&self, q: u64) -> BigRational {
        self.evaluate(&BigRational::from_integer(BigInt::from(q)))
    }

    /// True when the polynomial reproduces the sample's count at its field order.
    pub fn agrees_with(&self, sample: &Sample) -> bool {
        self.evaluate_at(sample.field_order) == BigRational::from_integer(BigInt::from(sample.count))
    }

    /// Multiply by (q - root).
    pub(crate) fn mul_linear(&self, root: &BigRational) -> Self {
        let mut out = vec![BigRational::zero(); self.coefficients.len() + 1];
        for (k, c) in self.coefficients.iter().enumerate() {
            out[k + 1] += c;
            out[k] -= c * root;
        }
        Self::new(out)
    }

    /// Render with LaTeX exponents and fractions, e.g. `q^{3} - \frac{1}{2} q`.
    pub fn to_latex(&self) -> String {
        self.render(
            |c| format!("\\frac{{{}}}{{{}}}", c.numer(), c.denom()),
            |k| format!("{INDETERMINATE}^{{{k}}}"),
            " ",
        )
    }

    fn render(
        &self,
        fraction: impl Fn(&BigRational) -> String,
        power: impl Fn(usize) -> String,
        joiner: &str,
    ) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let mut out = String::new();
        for (k, c) in self.coefficients.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }

            let negative = c.is_negative();
            if out.is_empty() {
                if negative {
                    out.push('-');
                }
            } else {
                out.push_str(if negative { " - " } else { " + " });
            }

            let magnitude = c.abs();
            let scalar = if magnitude.is_integer() {
                magnitude.numer().to_string()
            } else {
                fraction(&magnitude)
            };

            match k {
                0 => out.push_str(&scalar),
                _ => {
                    if !magnitude.is_one() {
                        out.push_str(&scalar);
                        if !magnitude.is_integer() {
                            out.push_str(joiner);
                        }
                    }
                    if k == 1 {
                        out.push_str(INDETERMINATE);
                    } else {
                        out.push_str(&power(k));
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for EPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render(
            |c| format!("({}/{})", c.numer(), c.denom()),
            |k| format!("{INDETERMINATE}^{k}"),
            "",
        );
        f.write_str(&rendered)
    }
}
