//! # Duct Sizing Equations
//!
//! All empirical duct formulas live here so they can be checked against the
//! published references in one place. Every function takes and returns
//! canonical IP values (see [`crate::units`]) and is total: degenerate inputs
//! produce `0.0`.
//!
//! ## Modules
//!
//! - [`round`] - Round duct diameter solvers and the velocity/friction complements
//! - [`rectangular`] - Huebscher equivalent diameter, rectangular side search, aspect ratio
//!
//! ## References
//!
//! - ASHRAE Handbook - Fundamentals, Duct Design
//! - SMACNA HVAC Duct Construction Standards (aspect ratio guidance)
//! - Huebscher, R.G., "Friction Equivalents for Round, Square and Rectangular Ducts" (1948)

pub mod rectangular;
pub mod round;

pub use rectangular::{
    equivalent_diameter,
    evaluate_aspect,
    solve_rect_dimension,
    solve_rect_dimension_with,
    AspectCheck,
    RectSearch,
    MAX_ASPECT_RATIO,
};

pub use round::{
    calc_friction,
    calc_velocity,
    solve_dia_by_friction,
    solve_dia_by_velocity,
    FRICTION_COEFFICIENT,
};
