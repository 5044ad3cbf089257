//! # Round Duct Formulas
//!
//! Diameter solvers and their complements for round galvanized duct.
//!
//! ## Notation
//!
//! - `Q` = Airflow (CFM)
//! - `f` = Friction rate (in.wg per 100 ft)
//! - `V` = Velocity (FPM)
//! - `D` = Inside diameter (in)
//!
//! ## Friction Relation
//!
//! ```text
//! f = k1 · Q^1.9 / D^5.02        k1 = 0.109136
//! D = (k1 · Q^1.9 / f)^(1/5.02)
//! ```
//!
//! The exponents are curve-fit coefficients, so they stay real-valued
//! (`powf`, never `powi`).
//!
//! ## Guards
//!
//! Every function returns exactly `0.0` when an input is non-positive or
//! non-finite, and never returns NaN, infinity, or a negative value.
//!
//! ## References
//!
//! - ASHRAE Handbook - Fundamentals, Duct Design chapter
//! - SMACNA HVAC Systems Duct Design

use std::f64::consts::PI;

/// Empirical friction-loss coefficient for round galvanized duct
pub const FRICTION_COEFFICIENT: f64 = 0.109136;

/// Airflow exponent in the friction relation
pub const AIRFLOW_EXPONENT: f64 = 1.9;

/// Diameter exponent in the friction relation
pub const DIAMETER_EXPONENT: f64 = 5.02;

/// True for strictly positive, finite values.
#[inline]
pub(crate) fn is_positive(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

/// Collapse anything that is not a finite, non-negative number to zero.
#[inline]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Solve round duct diameter for a target friction rate.
///
/// # Formula
/// D = (k1 · Q^1.9 / f)^(1/5.02)
///
/// # Arguments
/// * `cfm` - Airflow (CFM)
/// * `friction_rate` - Target friction rate (in.wg/100ft)
///
/// # Returns
/// Diameter in inches, or `0.0` if either input is non-positive
///
/// # Example
/// ```rust
/// use duct_core::equations::round::solve_dia_by_friction;
///
/// let d = solve_dia_by_friction(1000.0, 0.1);
/// assert!((d - 13.9).abs() < 0.05);
/// assert_eq!(solve_dia_by_friction(1000.0, 0.0), 0.0);
/// ```
pub fn solve_dia_by_friction(cfm: f64, friction_rate: f64) -> f64 {
    if !is_positive(cfm) || !is_positive(friction_rate) {
        return 0.0;
    }
    let numerator = FRICTION_COEFFICIENT * cfm.powf(AIRFLOW_EXPONENT);
    finite_or_zero((numerator / friction_rate).powf(1.0 / DIAMETER_EXPONENT))
}

/// Solve round duct diameter for a target velocity.
///
/// # Formula
/// A = Q / V (ft²), D = 2 · √(A / π) · 12
///
/// # Example
/// ```rust
/// use duct_core::equations::round::solve_dia_by_velocity;
///
/// let d = solve_dia_by_velocity(1000.0, 1200.0);
/// assert!((d - 12.36).abs() < 0.01);
/// ```
pub fn solve_dia_by_velocity(cfm: f64, velocity: f64) -> f64 {
    if !is_positive(cfm) || !is_positive(velocity) {
        return 0.0;
    }
    let area_sqft = cfm / velocity;
    finite_or_zero(2.0 * (area_sqft / PI).sqrt() * 12.0)
}

/// Velocity through a round duct of the given diameter.
///
/// # Formula
/// A = π · (D / 24)² (ft²), V = Q / A
///
/// Dividing by 24 halves the diameter to a radius and converts inches to
/// feet in one step.
pub fn calc_velocity(cfm: f64, diameter_in: f64) -> f64 {
    if !is_positive(cfm) || !is_positive(diameter_in) {
        return 0.0;
    }
    let area_sqft = PI * (diameter_in / 24.0).powi(2);
    finite_or_zero(cfm / area_sqft)
}

/// Friction rate through a round duct of the given diameter.
///
/// # Formula
/// f = k1 · Q^1.9 / D^5.02
///
/// # Example
/// ```rust
/// use duct_core::equations::round::{calc_friction, solve_dia_by_velocity};
///
/// let d = solve_dia_by_velocity(1000.0, 1200.0);
/// let f = calc_friction(1000.0, d);
/// assert!((f - 0.18).abs() < 0.005);
/// ```
pub fn calc_friction(cfm: f64, diameter_in: f64) -> f64 {
    if !is_positive(cfm) || !is_positive(diameter_in) {
        return 0.0;
    }
    let numerator = FRICTION_COEFFICIENT * cfm.powf(AIRFLOW_EXPONENT);
    finite_or_zero(numerator / diameter_in.powf(DIAMETER_EXPONENT))
}
