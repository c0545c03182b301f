//! Tactrix - multi-timeframe signal scoring and risk-sizing engine.
//!
//! The core (`indicators`, `signals`, `risk`) is a pure library: one
//! evaluation turns a price window, a higher-timeframe trend context, an
//! optional operator annotation, and an account balance into a single
//! [`models::Recommendation`]. Everything else (market data retrieval, the
//! scan loop, the HTTP surface) is plumbing around that function.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod risk;
pub mod services;
pub mod signals;
