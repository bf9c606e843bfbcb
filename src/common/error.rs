//! Error types for Reeds-Shepp curve computation

use std::fmt;

/// Main error type for curve computation
#[derive(Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Turning radius must be strictly positive
    InvalidRadius(f64),
    /// Sampling step must be strictly positive
    InvalidStepSize(f64),
    /// A pose coordinate is NaN or infinite
    NonFinitePose,
    /// All 48 candidate words were rejected by their domain checks.
    /// Unreachable for finite poses; raised instead of silently defaulting
    /// because it indicates a numeric-tolerance defect.
    NoFeasiblePath,
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveError::InvalidRadius(r) => {
                write!(f, "Invalid turning radius: {} (must be > 0)", r)
            }
            CurveError::InvalidStepSize(d) => {
                write!(f, "Invalid step size: {} (must be > 0)", d)
            }
            CurveError::NonFinitePose => write!(f, "Pose contains a non-finite coordinate"),
            CurveError::NoFeasiblePath => {
                write!(f, "No feasible Reeds-Shepp word for the given poses")
            }
        }
    }
}

impl std::error::Error for CurveError {}

/// Result type alias for curve operations
pub type CurveResult<T> = Result<T, CurveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::InvalidRadius(-1.0);
        assert_eq!(format!("{}", err), "Invalid turning radius: -1 (must be > 0)");
        let err = CurveError::NoFeasiblePath;
        assert!(format!("{}", err).contains("No feasible"));
    }
}
