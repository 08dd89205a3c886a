use super::checked;
use crate::error::EvalError;

pub fn sinh(x: f64) -> Result<f64, EvalError> {
    checked("sinh", x, x.sinh())
}

pub fn cosh(x: f64) -> Result<f64, EvalError> {
    checked("cosh", x, x.cosh())
}

pub fn acosh(x: f64) -> Result<f64, EvalError> {
    checked("acosh", x, x.acosh())
}

/// The poles at ±1 are domain errors, not infinities.
pub fn atanh(x: f64) -> Result<f64, EvalError> {
    if x.abs() >= 1.0 {
        return Err(EvalError::Domain {
            function: "atanh",
            argument: x,
        });
    }
    checked("atanh", x, x.atanh())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acosh_lower_bound() {
        assert_eq!(acosh(1.0), Ok(0.0));
        assert!(acosh(0.999).is_err());
    }

    #[test]
    fn test_atanh_inside_interval() {
        assert_eq!(atanh(0.0), Ok(0.0));
        assert!((atanh(0.5).unwrap() - 0.549_306_144_334_054_8).abs() < 1e-15);
    }
}
