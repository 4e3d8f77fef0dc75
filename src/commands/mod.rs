//! CLI command implementations.
//!
//! - **analyze**: compute implementation edges and lens labels
//! - **check**: report every problem in the input without matching

pub mod analyze;
pub mod check;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use check::{handle_check, write_problems};
