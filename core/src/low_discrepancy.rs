//! Low Discrepancy Sequences

use crate::pbrt::*;
use crate::rng::ONE_MINUS_EPSILON;

/// Prime bases used by `radical_inverse()`.
pub const PRIMES: [u64; 8] = [2, 3, 5, 7, 11, 13, 17, 19];

/// Returns the radical inverse of `a` in the prime base selected by
/// `base_index`: the base-b digits of `a` are mirrored about the decimal
/// point.
///
/// * `base_index` - Index into `PRIMES`.
/// * `a`          - The value to mirror.
pub fn radical_inverse(base_index: usize, a: u64) -> Float {
    match base_index {
        // Base 2 is a bit reversal.
        0 => min(
            (a.reverse_bits() as f64 * hexf64!("0x1.0p-64")) as Float,
            ONE_MINUS_EPSILON,
        ),
        _ => {
            let base = PRIMES[base_index];
            let inv_base = 1.0 / base as f64;
            let mut reversed_digits: u64 = 0;
            let mut inv_base_n = 1.0_f64;
            let mut a = a;
            while a > 0 {
                let next = a / base;
                let digit = a - next * base;
                reversed_digits = reversed_digits * base + digit;
                inv_base_n *= inv_base;
                a = next;
            }
            min(
                (reversed_digits as f64 * inv_base_n) as Float,
                ONE_MINUS_EPSILON,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_two() {
        assert_eq!(radical_inverse(0, 0), 0.0);
        assert_eq!(radical_inverse(0, 1), 0.5);
        assert_eq!(radical_inverse(0, 2), 0.25);
        assert_eq!(radical_inverse(0, 3), 0.75);
    }

    #[test]
    fn base_three() {
        assert!((radical_inverse(1, 1) - 1.0 / 3.0).abs() < 1e-6);
        assert!((radical_inverse(1, 2) - 2.0 / 3.0).abs() < 1e-6);
        assert!((radical_inverse(1, 3) - 1.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn stays_below_one() {
        for i in 0..1000 {
            let v = radical_inverse(1, i);
            assert!((0.0..1.0).contains(&v));
        }
    }
}
