use std::collections::BTreeSet;

use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;
use surface_epoly::{lagrange_interpolate, EPolynomial};

fn rational() -> impl Strategy<Value = BigRational> {
    (-50i64..50, 1i64..12).prop_map(|(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
}

fn distinct_abscissae(count: usize) -> impl Strategy<Value = Vec<BigRational>> {
    proptest::collection::btree_set((-40i64..40, 1i64..6), count).prop_filter_map(
        "abscissae must be distinct as rationals",
        move |pairs| {
            let values: BTreeSet<BigRational> = pairs
                .into_iter()
                .map(|(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
                .collect();
            (values.len() == count).then(|| values.into_iter().collect())
        },
    )
}

proptest! {
    #[test]
    fn interpolation_reproduces_polynomial(
        (coefficients, xs) in (1usize..7).prop_flat_map(|m| {
            (proptest::collection::vec(rational(), 0..m), distinct_abscissae(m))
        })
    ) {
        let poly = EPolynomial::new(coefficients);
        let points: Vec<_> = xs.iter().map(|x| (x.clone(), poly.evaluate(x))).collect();

        let recovered = lagrange_interpolate(&points).expect("distinct abscissae");
        prop_assert_eq!(recovered, poly);
    }

    #[test]
    fn interpolation_ignores_point_order(
        (values, xs) in (1usize..6).prop_flat_map(|m| {
            (proptest::collection::vec(rational(), m), distinct_abscissae(m))
        })
    ) {
        let points: Vec<_> = xs.into_iter().zip(values).collect();
        let mut reversed = points.clone();
        reversed.reverse();

        prop_assert_eq!(
            lagrange_interpolate(&points).expect("distinct abscissae"),
            lagrange_interpolate(&reversed).expect("distinct abscissae")
        );
    }
}
