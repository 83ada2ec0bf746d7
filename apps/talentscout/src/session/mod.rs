// Session lifecycle and per-action state transitions.
// All session data lives in memory for the lifetime of the process.

pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod store;
