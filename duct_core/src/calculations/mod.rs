//! # Duct Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, canonical units)
//! - `*Result` - Calculation results (JSON-serializable, canonical units)
//! - `compute_*(input) -> *Result` - Pure calculation function
//!
//! Duct sizing is total: invalid inputs clamp to zero instead of returning an
//! error, so the pipeline returns a plain result rather than `CalcResult`.
//!
//! ## Available Calculations
//!
//! - [`sizing`] - Round and rectangular duct sizing with aspect-ratio check

pub mod sizing;

// Re-export commonly used types
pub use sizing::{compute_sizing, compute_sizing_with, SizingInput, SizingMode, SizingResult};
