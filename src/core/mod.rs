//! Service layer: shared state, the scan loop, and the HTTP surface.

pub mod http;
pub mod scan;
pub mod state;
