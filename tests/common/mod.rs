//! Shared helpers for integration tests

#![allow(dead_code)]

use surface_epoly::EPolynomial;

/// Reference count: α = 0 pairs with every β, any other admissible α with
/// a hyperplane of β's.
pub fn expected_count(genus: u32, q: u64) -> u64 {
    let s = 2 * genus;
    q.pow(s) + ((q - 1).pow(s) - 1) * q.pow(s - 1)
}

/// q^3 - q^2
pub fn genus_one_polynomial() -> EPolynomial {
    EPolynomial::from_integers(&[0, 0, -1, 1])
}

/// q^7 - 4q^6 + 6q^5 - 3q^4
pub fn genus_two_polynomial() -> EPolynomial {
    EPolynomial::from_integers(&[0, 0, 0, 0, -3, 6, -4, 1])
}
