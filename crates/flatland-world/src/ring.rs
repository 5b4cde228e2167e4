//! Position arithmetic on a fixed-size 1-D ring.
//!
//! All functions take the ring length explicitly so that layouts of
//! different sizes share one implementation. Positions handed to the
//! rest of the workspace are always normalized to `[0, len)`.

/// Normalize any integer position into `[0, len)`.
///
/// Idempotent: `wrap(wrap(p, len), len) == wrap(p, len)`.
pub fn wrap(p: i32, len: i32) -> i32 {
    debug_assert!(len > 0);
    p.rem_euclid(len)
}

/// Shortest signed delta from `from` to `to`, in `[-len/2, len/2]`.
///
/// Positive means the nearest path steps in the +1 direction. At the
/// exact antipode of an even-length ring both directions measure
/// `len/2`; the positive delta is returned for either argument order,
/// so antisymmetry does not hold at that single point. Callers treat
/// the antipode tie as a don't-care.
pub fn signed_distance(from: i32, to: i32, len: i32) -> i32 {
    let d = wrap(to - from, len);
    if d > len / 2 {
        d - len
    } else {
        d
    }
}

/// Absolute shortest ring distance between `a` and `b`.
pub fn distance(a: i32, b: i32, len: i32) -> i32 {
    signed_distance(a, b, len).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wrap_worked() {
        assert_eq!(wrap(0, 10), 0);
        assert_eq!(wrap(10, 10), 0);
        assert_eq!(wrap(-1, 10), 9);
        assert_eq!(wrap(-11, 10), 9);
        assert_eq!(wrap(25, 10), 5);
    }

    #[test]
    fn signed_distance_worked() {
        assert_eq!(signed_distance(0, 3, 10), 3);
        assert_eq!(signed_distance(3, 0, 10), -3);
        assert_eq!(signed_distance(0, 9, 10), -1);
        assert_eq!(signed_distance(9, 0, 10), 1);
        assert_eq!(signed_distance(2, 2, 10), 0);
    }

    #[test]
    fn antipode_is_positive_for_both_orders() {
        assert_eq!(signed_distance(0, 5, 10), 5);
        assert_eq!(signed_distance(5, 0, 10), 5);
    }

    #[test]
    fn distance_is_shortest_path() {
        assert_eq!(distance(0, 9, 10), 1);
        assert_eq!(distance(2, 7, 10), 5);
        assert_eq!(distance(4, 4, 10), 0);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn wrap_is_idempotent_and_in_range(p in -10_000i32..10_000, len in 1i32..512) {
            let w = wrap(p, len);
            prop_assert!((0..len).contains(&w));
            prop_assert_eq!(wrap(w, len), w);
        }

        #[test]
        fn signed_distance_antisymmetric_off_antipode(
            a in 0i32..512,
            b in 0i32..512,
            len in 2i32..512,
        ) {
            let a = a % len;
            let b = b % len;
            let d = signed_distance(a, b, len);
            prop_assert!(d.abs() <= len / 2);
            // Antipode of an even ring is the documented exception.
            if !(len % 2 == 0 && d.abs() == len / 2) {
                prop_assert_eq!(d, -signed_distance(b, a, len));
            }
        }

        #[test]
        fn distance_symmetric_and_bounded(
            a in 0i32..512,
            b in 0i32..512,
            len in 1i32..512,
        ) {
            let a = a % len;
            let b = b % len;
            prop_assert_eq!(distance(a, b, len), distance(b, a, len));
            prop_assert!(distance(a, b, len) <= len / 2);
        }
    }
}
