//! # duct_core - HVAC Duct Sizing Engine
//!
//! `duct_core` is the computational heart of Ductwise. It sizes air-handling
//! ductwork from airflow and one performance target (friction rate or
//! velocity) using the ASHRAE/SMACNA empirical formulas, finds a matching
//! rectangular section, and checks its aspect ratio.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Total**: Invalid inputs produce `0`, never NaN, infinity, or a panic
//! - **Canonical units**: Solvers only see IP units; SI is converted at the edge
//! - **JSON-First**: Inputs, results, and settings implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use duct_core::{compute_sizing, SizingInput, SizingMode};
//!
//! let input = SizingInput {
//!     airflow_cfm: 1000.0,
//!     mode: SizingMode::VelocityTarget,
//!     friction_target: 0.08,
//!     velocity_target_fpm: 1200.0,
//!     constraint_side_in: 12.0,
//! };
//!
//! let result = compute_sizing(&input);
//! assert!((result.diameter_in - 12.36).abs() < 0.01);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("diameter_in"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The sizing pipeline and its input/result types
//! - [`equations`] - Round and rectangular duct formulas
//! - [`units`] - IP/SI conversion
//! - [`report`] - Display-rounded view of a result
//! - [`advisory`] - Prompt text for an external advisory service
//! - [`settings`] - User defaults stored as JSON
//! - [`errors`] - Structured error types

pub mod advisory;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod report;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute_sizing, compute_sizing_with, SizingInput, SizingMode, SizingResult};
pub use errors::{CalcError, CalcResult};
pub use settings::{load_settings, SizingSettings};
pub use units::{to_canonical, to_display, Quantity, UnitSystem};
