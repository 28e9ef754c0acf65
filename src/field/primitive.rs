//! Primitive polynomials over GF(p)
//!
//! GF(p^n) is realised as GF(p)[x]/(f) for a monic primitive f of degree n.
//! Elements are encoded as integers Σ c_i p^i from their residue
//! c_0 + c_1 x + ... + c_{n-1} x^{n-1}.

/// Monic primitive polynomial x^n + c_{n-1} x^{n-1} + ... + c_0 over GF(p)
/// together with the powers of x it generates.
#[derive(Debug, Clone)]
pub(crate) struct PrimitivePoly {
    characteristic: u64,
    /// Lower coefficients [c_0, ..., c_{n-1}]; the leading 1 is implicit.
    coeffs: Vec<u64>,
    /// p^(n-1), the place value of the top digit.
    top_place: u64,
}

impl PrimitivePoly {
    /// Search monic degree-n candidates in encoding order and return the
    /// first whose root x has multiplicative order p^n - 1, along with the
    /// antilog table [x^0, x^1, ..., x^(q-2)].
    ///
    /// x having order q - 1 forces every nonzero residue to be a unit, so
    /// the quotient ring is a field and f is irreducible.
    pub(crate) fn search(characteristic: u64, degree: u32) -> Option<(Self, Vec<u32>)> {
        let order = characteristic.pow(degree);
        let top_place = characteristic.pow(degree - 1);

        for lower in 0..order {
            let coeffs = digits(lower, characteristic, degree);
            if coeffs[0] == 0 {
                continue;
            }

            let candidate = Self {
                characteristic,
                coeffs,
                top_place,
            };
            if let Some(exp) = candidate.powers_of_x(order) {
                return Some((candidate, exp));
            }
        }

        None
    }

    /// Coefficients [c_0, ..., c_{n-1}] of the modulus below the leading term.
    pub(crate) fn lower_coefficients(&self) -> &[u64] {
        &self.coeffs
    }

    fn powers_of_x(&self, order: u64) -> Option<Vec<u32>> {
        let group_order = order - 1;
        let mut exp = Vec::with_capacity(group_order as usize);
        let mut current = 1u64;

        for step in 1..=group_order {
            exp.push(current as u32);
            current = self.times_x(current);
            if current == 1 && step < group_order {
                return None;
            }
        }

        (current == 1).then_some(exp)
    }

    /// Multiply an encoded residue by x and reduce modulo f.
    fn times_x(&self, encoded: u64) -> u64 {
        let p = self.characteristic;
        let top = encoded / self.top_place;
        let shifted = (encoded % self.top_place) * p;
        if top == 0 {
            return shifted;
        }

        // x^n ≡ -(c_{n-1} x^{n-1} + ... + c_0)
        let mut rest = shifted;
        let mut place = 1;
        let mut out = 0;
        for &c in &self.coeffs {
            let digit = rest % p;
            rest /= p;
            let reduced = (digit + p - (top * c) % p) % p;
            out += reduced * place;
            place *= p;
        }
        out
    }
}

/// Base-p digits of `value`, least significant first, padded to `len`.
pub(crate) fn digits(mut value: u64, base: u64, len: u32) -> Vec<u64> {
    let mut out = Vec::with_capacity(len as usize);
    for _ in 0..len {
        out.push(value % base);
        value /= base;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gf4_modulus() {
        // x^2 + x + 1 is the only irreducible quadratic over GF(2)
        let (poly, exp) = PrimitivePoly::search(2, 2).expect("GF(4) exists");
        assert_eq!(poly.lower_coefficients(), &[1, 1]);
        assert_eq!(exp, vec![1, 2, 3]);
    }

    #[test]
    fn test_prime_field_primitive_root() {
        // x + 1 has root 6 of order 2; x + 2 has root 5, a primitive root
        let (_, exp) = PrimitivePoly::search(7, 1).expect("GF(7) exists");
        let mut sorted = exp.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(exp[1], 5);
    }

    #[test]
    fn test_powers_cover_all_units() {
        for (p, n) in [(2, 3), (2, 4), (3, 2), (3, 3), (5, 2)] {
            let (_, exp) = PrimitivePoly::search(p, n).expect("field exists");
            let q = p.pow(n);
            let mut seen = vec![false; q as usize];
            for &e in &exp {
                assert!(e != 0 && !seen[e as usize], "repeat in GF({})", q);
                seen[e as usize] = true;
            }
            assert_eq!(exp.len() as u64, q - 1);
        }
    }

    #[test]
    fn test_digits_padding() {
        assert_eq!(digits(5, 2, 4), vec![1, 0, 1, 0]);
        assert_eq!(digits(0, 3, 2), vec![0, 0]);
    }
}
