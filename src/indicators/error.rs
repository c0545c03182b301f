use thiserror::Error;

/// Failures of the indicator layer.
///
/// An insufficient window is an expected per-instrument condition, surfaced
/// to the caller as "no recommendation" and never as a fatal fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: {have} bars, need at least {need}")]
    InsufficientData { have: usize, need: usize },
}
