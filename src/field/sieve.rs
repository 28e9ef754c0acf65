//! Prime-power recognition
//!
//! GF(q) exists exactly when q = p^k. The sample collector scans field
//! orders in increasing order, so it sieves the whole scan range once.

use bitvec::prelude::*;

/// Decompose `q` as `p^k` with `p` prime and `k ≥ 1`.
///
/// Returns `None` for `q < 2` and for integers with two distinct prime factors.
pub fn prime_power(q: u64) -> Option<(u64, u32)> {
    if q < 2 {
        return None;
    }

    let p = smallest_prime_factor(q);
    let mut rest = q;
    let mut exponent = 0;
    while rest % p == 0 {
        rest /= p;
        exponent += 1;
    }

    (rest == 1).then_some((p, exponent))
}

/// True when `q` is the order of some finite field.
pub fn is_prime_power(q: u64) -> bool {
    prime_power(q).is_some()
}

fn smallest_prime_factor(n: u64) -> u64 {
    if n % 2 == 0 {
        return 2;
    }
    let mut d = 3;
    while d <= n / d {
        if n % d == 0 {
            return d;
        }
        d += 2;
    }
    n
}

/// Bit-per-integer table of prime powers in `[0, limit]`.
#[derive(Debug, Clone)]
pub struct PrimePowerSieve {
    flags: BitVec,
    limit: u64,
}

impl PrimePowerSieve {
    /// Sieve every prime power up to and including `limit`.
    pub fn up_to(limit: u64) -> Self {
        let size = limit as usize + 1;
        let mut composite = bitvec![0; size];
        let mut flags = bitvec![0; size];

        for n in 2..size {
            if composite[n] {
                continue;
            }

            // n is prime: cross out its multiples, flag its powers
            if let Some(start) = n.checked_mul(n) {
                let mut m = start;
                while m < size {
                    composite.set(m, true);
                    m += n;
                }
            }

            let mut power = n;
            loop {
                flags.set(power, true);
                match power.checked_mul(n) {
                    Some(next) if next < size => power = next,
                    _ => break,
                }
            }
        }

        Self { flags, limit }
    }

    /// Largest integer covered by the sieve.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Membership test; integers beyond the limit are reported as absent.
    pub fn contains(&self, q: u64) -> bool {
        q <= self.limit && self.flags[q as usize]
    }

    /// Prime powers in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.flags.iter_ones().map(|q| q as u64)
    }
}
