//! Polynomial reconstruction from point counts
//!
//! Counts are exact integers, so the interpolating polynomial is computed in
//! exact rational arithmetic; a single rounding would corrupt the invariant.

mod lagrange;
mod polynomial;

pub use lagrange::lagrange_interpolate;
pub use polynomial::{EPolynomial, INDETERMINATE};

use num_bigint::BigInt;
use num_rational::BigRational;
use thiserror::Error;
use tracing::debug;

use crate::sampling::Sample;

/// Errors from polynomial reconstruction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    /// Nothing to interpolate.
    #[error("cannot interpolate through an empty sample set")]
    NoSamples,

    /// Two points share an abscissa.
    #[error("duplicate abscissa {0}")]
    DuplicateAbscissa(String),

    /// Two samples share a field order.
    #[error("duplicate sample for field order {0}")]
    DuplicateFieldOrder(u64),
}

/// Polynomial of degree < samples.len() through every (q, count) sample.
pub fn interpolate(samples: &[Sample]) -> Result<EPolynomial, InterpolationError> {
    for (i, sample) in samples.iter().enumerate() {
        if samples[..i]
            .iter()
            .any(|earlier| earlier.field_order == sample.field_order)
        {
            return Err(InterpolationError::DuplicateFieldOrder(sample.field_order));
        }
    }

    let points: Vec<(BigRational, BigRational)> = samples
        .iter()
        .map(|s| {
            (
                BigRational::from_integer(BigInt::from(s.field_order)),
                BigRational::from_integer(BigInt::from(s.count)),
            )
        })
        .collect();

    let polynomial = lagrange_interpolate(&points)?;
    debug!(samples = samples.len(), %polynomial, "interpolated");
    Ok(polynomial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genus_one_samples() {
        let samples = [
            Sample::new(2, 4),
            Sample::new(3, 18),
            Sample::new(4, 48),
            Sample::new(5, 100),
        ];
        let poly = interpolate(&samples).unwrap();
        assert_eq!(poly, EPolynomial::from_integers(&[0, 0, -1, 1]));
    }

    #[test]
    fn test_order_independent() {
        let forward = [Sample::new(2, 4), Sample::new(3, 18), Sample::new(4, 48)];
        let mut reversed = forward;
        reversed.reverse();
        assert_eq!(interpolate(&forward).unwrap(), interpolate(&reversed).unwrap());
    }

    #[test]
    fn test_duplicate_field_order() {
        let samples = [Sample::new(3, 18), Sample::new(3, 18)];
        assert_eq!(
            interpolate(&samples),
            Err(InterpolationError::DuplicateFieldOrder(3))
        );
    }
}
