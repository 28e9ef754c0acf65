//! Exact Lagrange interpolation over ℚ
//!
//! P(q) = Σ_j y_j Π_{m≠j} (q - x_m) / (x_j - x_m)

use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{EPolynomial, InterpolationError};

/// Unique polynomial of degree < m through m points with distinct abscissae.
///
/// Input order does not affect the result.
pub fn lagrange_interpolate(
    points: &[(BigRational, BigRational)],
) -> Result<EPolynomial, InterpolationError> {
    if points.is_empty() {
        return Err(InterpolationError::NoSamples);
    }
    for (i, (x, _)) in points.iter().enumerate() {
        if points[..i].iter().any(|(earlier, _)| earlier == x) {
            return Err(InterpolationError::DuplicateAbscissa(x.to_string()));
        }
    }

    let mut sum = vec![BigRational::zero(); points.len()];
    for (j, (xj, yj)) in points.iter().enumerate() {
        if yj.is_zero() {
            continue;
        }

        let mut basis = EPolynomial::new(vec![BigRational::one()]);
        let mut denominator = BigRational::one();
        for (m, (xm, _)) in points.iter().enumerate() {
            if m == j {
                continue;
            }
            basis = basis.mul_linear(xm);
            denominator *= xj - xm;
        }

        let scale = yj / denominator;
        for (k, c) in basis.coefficients().iter().enumerate() {
            sum[k] += c * &scale;
        }
    }

    Ok(EPolynomial::new(sum))
}
