use std::collections::TryReserveError;

/// Failures of the contraction layer.
///
/// Integral and amplitude evaluation never returns NaN for malformed input;
/// the violated precondition is reported here instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CgtoError {
    #[error("contracted orbital has no primitives")]
    EmptyContraction,

    #[error("contracted orbital used before normalization")]
    NotNormalized,

    #[error("self-overlap must be positive to normalize, got {0}")]
    NonPositiveSelfOverlap(f64),

    #[error("coefficient count mismatch: {primitives} primitives, {coefficients} coefficients")]
    CoefficientCountMismatch { primitives: usize, coefficients: usize },

    #[error("unable to grow primitive storage: {0}")]
    Allocation(#[from] TryReserveError),
}
