//! Signal scoring: the decision core that turns indicators, trend context
//! and discretionary input into a recommendation.

pub mod engine;
pub mod error;
pub mod levels;
pub mod trend_context;
pub mod volatility;

pub use engine::{Evaluation, ScoringEngine};
pub use error::EvalError;
