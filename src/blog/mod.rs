//! Blog generation: prompts, steps, their workflow nodes and the prebuilt flows.

pub mod graph;
pub mod nodes;
pub mod prompts;
pub mod steps;
