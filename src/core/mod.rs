pub mod error;
pub mod state;
pub mod sync_impl;
pub mod telemetry;
