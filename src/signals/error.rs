use crate::indicators::IndicatorError;
use thiserror::Error;

/// Failures of a single evaluation.
///
/// None of these abort a batch: the scan layer logs the instrument/timeframe
/// pair and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}
