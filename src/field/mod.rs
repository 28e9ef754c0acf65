//! Finite fields GF(q) for prime-power q
//!
//! Prime fields use direct modular arithmetic. Extension fields GF(p^n)
//! multiply through log/antilog tables built from a primitive polynomial
//! and add digit-wise in base p.

mod primitive;
mod sieve;

pub use sieve::{is_prime_power, prime_power, PrimePowerSieve};

use std::fmt;

use primitive::{digits, PrimitivePoly};
use thiserror::Error;

/// Largest field order for which tables are built.
pub const MAX_FIELD_ORDER: u64 = 1 << 20;

/// Errors raised while constructing a field or naming its elements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// No field has this many elements.
    #[error("field order {0} is not a prime power")]
    NotPrimePower(u64),

    /// Order is a prime power but too large to tabulate.
    #[error("field order {order} exceeds the supported maximum {limit}")]
    OrderTooLarge {
        /// Requested order
        order: u64,
        /// Largest supported order
        limit: u64,
    },

    /// Encoded value does not name an element of the field.
    #[error("value {value} is not an element of GF({order})")]
    ElementOutOfRange {
        /// Offending encoding
        value: u32,
        /// Field order
        order: u32,
    },

    /// Primitive polynomial search came up empty.
    #[error("no primitive polynomial of degree {degree} over GF({characteristic})")]
    NoPrimitivePolynomial {
        /// Prime characteristic
        characteristic: u64,
        /// Extension degree
        degree: u32,
    },
}

/// Element of some GF(q), encoded as an integer in `[0, q)`.
///
/// The encoding of c_0 + c_1 x + ... is Σ c_i p^i; for prime fields this is
/// the usual residue. Zero is always encoding 0 and one is encoding 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldElement(u32);

impl FieldElement {
    /// Integer encoding of this element.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finite field of prime-power order
#[derive(Clone)]
pub struct GaloisField {
    order: u32,
    characteristic: u32,
    degree: u32,
    /// Lower coefficients of the defining modulus (empty for prime fields).
    modulus: Vec<u64>,
    /// exp[k] = encoding of g^k, k in [0, q-1)
    exp: Vec<u32>,
    /// log[e] = k with g^k = e; log[0] is unused
    log: Vec<u32>,
}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaloisField")
            .field("order", &self.order)
            .field("characteristic", &self.characteristic)
            .field("degree", &self.degree)
            .field("modulus", &self.modulus)
            .finish()
    }
}

impl GaloisField {
    /// Build GF(order).
    ///
    /// Fails fast for orders below 2, orders with two distinct prime factors,
    /// and orders above [`MAX_FIELD_ORDER`].
    pub fn new(order: u64) -> Result<Self, FieldError> {
        let (characteristic, degree) =
            prime_power(order).ok_or(FieldError::NotPrimePower(order))?;
        if order > MAX_FIELD_ORDER {
            return Err(FieldError::OrderTooLarge {
                order,
                limit: MAX_FIELD_ORDER,
            });
        }

        let (poly, exp) = PrimitivePoly::search(characteristic, degree).ok_or(
            FieldError::NoPrimitivePolynomial {
                characteristic,
                degree,
            },
        )?;

        let mut log = vec![0u32; order as usize];
        for (k, &e) in exp.iter().enumerate() {
            log[e as usize] = k as u32;
        }

        let modulus = if degree == 1 {
            Vec::new()
        } else {
            poly.lower_coefficients().to_vec()
        };

        Ok(Self {
            order: order as u32,
            characteristic: characteristic as u32,
            degree,
            modulus,
            exp,
            log,
        })
    }

    /// Number of elements q.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Prime p with q = p^n.
    pub fn characteristic(&self) -> u32 {
        self.characteristic
    }

    /// Extension degree n with q = p^n.
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Coefficients [c_0, ..., c_{n-1}] of the monic modulus of an extension
    /// field; empty for prime fields.
    pub fn modulus(&self) -> &[u64] {
        &self.modulus
    }

    /// Additive identity.
    pub fn zero(&self) -> FieldElement {
        FieldElement(0)
    }

    /// Multiplicative identity.
    pub fn one(&self) -> FieldElement {
        FieldElement(1)
    }

    /// Additive inverse of one. Equals one in characteristic 2.
    pub fn minus_one(&self) -> FieldElement {
        self.neg(self.one())
    }

    /// Validate an integer encoding.
    pub fn element(&self, value: u32) -> Result<FieldElement, FieldError> {
        if value < self.order {
            Ok(FieldElement(value))
        } else {
            Err(FieldError::ElementOutOfRange {
                value,
                order: self.order,
            })
        }
    }

    /// True when `value` names an element of this field.
    pub fn contains(&self, value: FieldElement) -> bool {
        value.0 < self.order
    }

    /// All elements in encoding order, zero first.
    pub fn elements(&self) -> impl Iterator<Item = FieldElement> + Clone {
        (0..self.order).map(FieldElement)
    }

    /// Test against the additive identity.
    pub fn is_zero(&self, a: FieldElement) -> bool {
        a.0 == 0
    }

    /// Field addition
    pub fn add(&self, a: FieldElement, b: FieldElement) -> FieldElement {
        let p = self.characteristic;
        if self.degree == 1 {
            return FieldElement((a.0 + b.0) % p);
        }
        if p == 2 {
            return FieldElement(a.0 ^ b.0);
        }

        let (mut x, mut y) = (a.0, b.0);
        let mut place = 1;
        let mut out = 0;
        for _ in 0..self.degree {
            out += ((x % p + y % p) % p) * place;
            x /= p;
            y /= p;
            place *= p;
        }
        FieldElement(out)
    }

    /// Additive inverse
    pub fn neg(&self, a: FieldElement) -> FieldElement {
        let p = self.characteristic as u64;
        let out = digits(a.0 as u64, p, self.degree)
            .into_iter()
            .rev()
            .fold(0u64, |acc, d| acc * p + (p - d) % p);
        FieldElement(out as u32)
    }

    /// Field multiplication
    pub fn mul(&self, a: FieldElement, b: FieldElement) -> FieldElement {
        if a.0 == 0 || b.0 == 0 {
            return FieldElement(0);
        }
        if self.degree == 1 {
            let product = (a.0 as u64 * b.0 as u64) % self.characteristic as u64;
            return FieldElement(product as u32);
        }

        let group_order = self.order - 1;
        let k = (self.log[a.0 as usize] + self.log[b.0 as usize]) % group_order;
        FieldElement(self.exp[k as usize])
    }

    /// Multiplicative inverse; `None` for zero.
    pub fn inv(&self, a: FieldElement) -> Option<FieldElement> {
        if a.0 == 0 {
            return None;
        }
        let group_order = self.order - 1;
        let k = (group_order - self.log[a.0 as usize]) % group_order;
        Some(FieldElement(self.exp[k as usize]))
    }

    /// Bilinear pairing Σ a_i b_i over equal-length slices.
    pub fn dot(&self, a: &[FieldElement], b: &[FieldElement]) -> FieldElement {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .fold(self.zero(), |acc, (&x, &y)| self.add(acc, self.mul(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_prime_powers() {
        assert_eq!(GaloisField::new(0).unwrap_err(), FieldError::NotPrimePower(0));
        assert_eq!(GaloisField::new(1).unwrap_err(), FieldError::NotPrimePower(1));
        assert_eq!(GaloisField::new(6).unwrap_err(), FieldError::NotPrimePower(6));
        assert!(matches!(
            GaloisField::new(1 << 21),
            Err(FieldError::OrderTooLarge { .. })
        ));
    }

    #[test]
    fn test_minus_one() {
        assert_eq!(GaloisField::new(2).unwrap().minus_one().value(), 1);
        assert_eq!(GaloisField::new(3).unwrap().minus_one().value(), 2);
        assert_eq!(GaloisField::new(4).unwrap().minus_one().value(), 1);
        // -1 in GF(9) is the constant residue 2
        assert_eq!(GaloisField::new(9).unwrap().minus_one().value(), 2);
    }

    #[test]
    fn test_gf4_tables() {
        let field = GaloisField::new(4).unwrap();
        let e = |v| field.element(v).unwrap();
        // x * x = x + 1, x * (x + 1) = 1
        assert_eq!(field.mul(e(2), e(2)), e(3));
        assert_eq!(field.mul(e(2), e(3)), e(1));
        assert_eq!(field.add(e(2), e(3)), e(1));
        assert_eq!(field.inv(e(2)), Some(e(3)));
        assert_eq!(field.inv(field.zero()), None);
    }

    #[test]
    fn test_modulus() {
        // GF(4) = GF(2)[x]/(x^2 + x + 1); prime fields carry no modulus
        assert_eq!(GaloisField::new(4).unwrap().modulus(), &[1, 1]);
        assert!(GaloisField::new(5).unwrap().modulus().is_empty());
        assert_eq!(GaloisField::new(9).unwrap().modulus().len(), 2);
    }

    #[test]
    fn test_element_range() {
        let field = GaloisField::new(5).unwrap();
        assert!(field.element(4).is_ok());
        assert_eq!(
            field.element(5).unwrap_err(),
            FieldError::ElementOutOfRange { value: 5, order: 5 }
        );
    }

    #[test]
    fn test_dot_product() {
        let field = GaloisField::new(5).unwrap();
        let e = |v| field.element(v).unwrap();
        // 2*3 + 4*4 = 22 ≡ 2 (mod 5)
        assert_eq!(field.dot(&[e(2), e(4)], &[e(3), e(4)]), e(2));
        assert_eq!(field.dot(&[], &[]), field.zero());
    }
}
