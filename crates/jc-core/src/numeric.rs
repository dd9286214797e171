use crate::JcError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, JcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(JcError::NonFinite { what, value: v })
    }
}

/// Accept a component efficiency in the half-open interval (0, 1].
pub fn ensure_efficiency(v: Real, what: &'static str) -> Result<Real, JcError> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 || v > 1.0 {
        return Err(JcError::OutOfBounds {
            what,
            value: v,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(v)
}

/// Accept a strictly positive, finite value.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, JcError> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(JcError::InvalidArg { what });
    }
    Ok(v)
}

/// Linear interpolation between `a` and `b`, clamped to the segment.
///
/// `t` outside `[0, 1]` is clamped; rounding never escapes `[min(a,b), max(a,b)]`.
pub fn lerp_clamped(a: Real, b: Real, t: Real) -> Real {
    let t = t.clamp(0.0, 1.0);
    let v = a + t * (b - a);
    v.clamp(a.min(b), a.max(b))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lerp_stays_in_segment(a in -1e4_f64..1e4, b in -1e4_f64..1e4, t in 0.0_f64..=1.0) {
            let v = lerp_clamped(a, b, t);
            prop_assert!(v >= a.min(b) && v <= a.max(b));
        }

        #[test]
        fn lerp_monotonic_in_t(a in -1e4_f64..1e4, d in 0.0_f64..1e4, t1 in 0.0_f64..=1.0, t2 in 0.0_f64..=1.0) {
            let b = a + d;
            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            prop_assert!(lerp_clamped(a, b, lo) <= lerp_clamped(a, b, hi));
        }
    }
}
