//! Parameter tuples over GF(q)
//!
//! A [`TupleSet`] stores every length-s vector over the field (optionally
//! avoiding one value per coordinate) in a single flat buffer. The set for
//! length s is built from the set for length s - 1 by appending each allowed
//! value to each row, so the result is lexicographic with the first
//! coordinate most significant.

use crate::field::{FieldError, FieldElement, GaloisField};
use crate::{EPolyError, Result};

/// Upper bound on stored field elements across all rows of one set.
pub const MAX_TUPLE_ELEMENTS: u64 = 1 << 28;

/// Flat arena holding `len` rows of `width` field elements each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleSet {
    width: usize,
    len: usize,
    data: Vec<FieldElement>,
}

impl TupleSet {
    /// Number of tuples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True only for sets with an empty alphabet and positive width.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of every tuple.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&[FieldElement]> {
        (index < self.len).then(|| &self.data[index * self.width..(index + 1) * self.width])
    }

    /// Rows in construction order. Restartable: each call starts over.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[FieldElement]> + Clone + '_ {
        let width = self.width;
        (0..self.len).map(move |i| &self.data[i * width..(i + 1) * width])
    }

    /// Row `index`; panics past the end like slice indexing.
    pub(crate) fn row(&self, index: usize) -> &[FieldElement] {
        assert!(index < self.len, "row {} out of {}", index, self.len);
        &self.data[index * self.width..(index + 1) * self.width]
    }
}

/// Every length-`length` tuple over `field`, skipping `forbidden` in each
/// coordinate when given.
///
/// Length 0 yields a single empty tuple. Cardinality is q^s, or (q-1)^s with
/// a forbidden value.
pub fn generate_tuples(
    length: usize,
    field: &GaloisField,
    forbidden: Option<FieldElement>,
) -> Result<TupleSet> {
    if let Some(value) = forbidden {
        if !field.contains(value) {
            return Err(FieldError::ElementOutOfRange {
                value: value.value(),
                order: field.order(),
            }
            .into());
        }
    }

    let alphabet: Vec<FieldElement> = field
        .elements()
        .filter(|&v| Some(v) != forbidden)
        .collect();
    checked_cardinality(alphabet.len() as u64, length)?;

    let mut current = TupleSet {
        width: 0,
        len: 1,
        data: Vec::new(),
    };
    for _ in 0..length {
        let width = current.width + 1;
        let len = current.len * alphabet.len();
        let mut next = Vec::new();
        next.try_reserve_exact(len * width)
            .map_err(|_| EPolyError::ResourceExhausted {
                what: "tuple buffer",
                requested: len as u128 * width as u128,
            })?;

        for row in current.iter() {
            for &value in &alphabet {
                next.extend_from_slice(row);
                next.push(value);
            }
        }
        current = TupleSet {
            width,
            len,
            data: next,
        };
    }

    Ok(current)
}

/// [`generate_tuples`] for a field given only by its order.
pub fn generate_tuples_for_order(
    length: usize,
    field_order: u64,
    forbidden: Option<u32>,
) -> Result<TupleSet> {
    let field = GaloisField::new(field_order)?;
    let forbidden = forbidden.map(|v| field.element(v)).transpose()?;
    generate_tuples(length, &field, forbidden)
}

/// Rotation parameters: no coordinate may equal -1.
pub fn generate_alpha(length: usize, field: &GaloisField) -> Result<TupleSet> {
    generate_tuples(length, field, Some(field.minus_one()))
}

/// Translation parameters: unrestricted.
pub fn generate_beta(length: usize, field: &GaloisField) -> Result<TupleSet> {
    generate_tuples(length, field, None)
}

fn checked_cardinality(alphabet: u64, length: usize) -> Result<usize> {
    let exhausted = || EPolyError::ResourceExhausted {
        what: "tuple set",
        requested: (alphabet as u128).saturating_pow(length.min(u32::MAX as usize) as u32),
    };

    let exponent = u32::try_from(length).map_err(|_| exhausted())?;
    let rows = alphabet.checked_pow(exponent).ok_or_else(exhausted)?;
    let elements = rows.checked_mul(length as u64).ok_or_else(exhausted)?;
    if elements > MAX_TUPLE_ELEMENTS {
        return Err(exhausted());
    }
    usize::try_from(rows).map_err(|_| exhausted())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(set: &TupleSet) -> Vec<Vec<u32>> {
        set.iter()
            .map(|row| row.iter().map(|e| e.value()).collect())
            .collect()
    }

    #[test]
    fn test_empty_length() {
        let field = GaloisField::new(5).unwrap();
        let set = generate_beta(0, &field).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0), Some(&[][..]));
        assert_eq!(set.get(1), None);
    }

    #[test]
    fn test_lexicographic_order() {
        let field = GaloisField::new(2).unwrap();
        let set = generate_beta(2, &field).unwrap();
        assert_eq!(values(&set), vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn test_alpha_over_gf3() {
        let field = GaloisField::new(3).unwrap();
        let set = generate_alpha(1, &field).unwrap();
        assert_eq!(values(&set), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_forbidden_zero() {
        let field = GaloisField::new(3).unwrap();
        let set = generate_tuples(2, &field, Some(field.zero())).unwrap();
        assert_eq!(values(&set), vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
    }

    #[test]
    fn test_forbidden_out_of_range() {
        let gf3 = GaloisField::new(3).unwrap();
        let foreign = GaloisField::new(5).unwrap().element(4).unwrap();
        assert!(matches!(
            generate_tuples(2, &gf3, Some(foreign)),
            Err(EPolyError::Field(FieldError::ElementOutOfRange { value: 4, order: 3 }))
        ));
        assert!(generate_tuples_for_order(2, 3, Some(7)).is_err());
    }

    #[test]
    fn test_resource_limit() {
        let field = GaloisField::new(16).unwrap();
        assert!(matches!(
            generate_beta(40, &field),
            Err(EPolyError::ResourceExhausted { .. })
        ));
    }

    #[test]
    fn test_invalid_order() {
        assert!(matches!(
            generate_tuples_for_order(1, 0, None),
            Err(EPolyError::Field(FieldError::NotPrimePower(0)))
        ));
    }
}
