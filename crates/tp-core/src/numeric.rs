use crate::TpError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
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

/// `a <= b`, treating values within tolerance of `b` as equal.
///
/// Used for capacity checks, where a volume computed through the ideal gas
/// law may land a few ulps above the exact capacity it was sized for.
pub fn le_within(a: Real, b: Real, tol: Tolerances) -> bool {
    a <= b || nearly_equal(a, b, tol)
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TpError::NonFinite { what, value: v })
    }
}

/// Ensure a value is finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, TpError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(TpError::InvalidArg { what })
    }
}
