//! Synchronous workflow engine.
//!
//! - [`node::Node`] and [`node::NodeLogic`] define individual workflow steps
//! - [`flow::Flow`] walks nodes along the action labels they return
//!
//! Everything here blocks; a step fully completes before the next one starts.

pub mod flow;
pub mod node;
