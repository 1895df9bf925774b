use crate::RlError;

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

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RlError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, RlError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(RlError::InvalidArg { what })
    }
}

/// Finite and >= 0.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, RlError> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(RlError::InvalidArg { what })
    }
}

/// Clamp a value to zero from below, returning the clamped value and the
/// amount that had to be added to reach zero.
pub fn clamp_non_negative(v: Real) -> (Real, Real) {
    if v < 0.0 { (0.0, -v) } else { (v, 0.0) }
}
