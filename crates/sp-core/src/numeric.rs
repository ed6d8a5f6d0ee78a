use crate::SpError;

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

/// Reject NaN and infinities, naming the offending quantity.
pub fn ensure_finite(v: Real, what: impl Into<String>) -> Result<Real, SpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SpError::NonFinite {
            what: what.into(),
            value: v,
        })
    }
}

/// Bounds-checked lookup used when an index comes from configuration.
pub fn checked_index<'a, T>(
    items: &'a [T],
    index: usize,
    what: &'static str,
) -> Result<&'a T, SpError> {
    items.get(index).ok_or(SpError::IndexOob {
        what,
        index,
        len: items.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "NC10H22_rho").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
        assert!(msg.contains("NC10H22_rho"));
    }

    #[test]
    fn checked_index_reports_length() {
        let v = [1.0, 2.0];
        assert_eq!(*checked_index(&v, 1, "enthalpy").unwrap(), 2.0);
        let err = checked_index(&v, 2, "enthalpy").unwrap_err();
        assert_eq!(
            err,
            SpError::IndexOob {
                what: "enthalpy",
                index: 2,
                len: 2
            }
        );
    }

    #[test]
    fn checked_index_borrow_outlives_label() {
        let v = vec![3.0, 4.0];
        let found = {
            let label = String::from("enthalpy");
            let what: &'static str = if label.is_empty() { "" } else { "enthalpy" };
            checked_index(&v, 0, what).unwrap()
        };
        assert_eq!(*found, 3.0);
    }
}
