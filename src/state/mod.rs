//! State module for tracking search-run progress
//!
//! # Components
//!
//! - `RunState`: the phases of a full search run and their legal transitions
//! - `RunTracker`: holds the current phase and rejects illegal transitions

mod run_state;

// Re-export main types
pub use run_state::{RunState, RunTracker};
