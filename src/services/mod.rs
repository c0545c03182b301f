//! External collaborators: market data retrieval and price selection.

pub mod market_data;
pub mod yahoo;
