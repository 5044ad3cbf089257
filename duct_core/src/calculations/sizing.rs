//! # Duct Sizing Pipeline
//!
//! Sizes a supply/return duct from airflow and one design target.
//!
//! ## Order of Operations
//!
//! 1. Round diameter from airflow + the active target (friction or velocity)
//! 2. The complementary quantity from airflow + diameter
//! 3. Rectangular side matching the diameter for a fixed constraint side
//! 4. Aspect ratio of the constraint side and the matched side
//!
//! Every step is recomputed from scratch; nothing is cached between calls.
//!
//! ## Example
//!
//! ```rust
//! use duct_core::calculations::sizing::{compute_sizing, SizingInput, SizingMode};
//!
//! let input = SizingInput {
//!     airflow_cfm: 1000.0,
//!     mode: SizingMode::FrictionTarget,
//!     friction_target: 0.1,
//!     velocity_target_fpm: 800.0,
//!     constraint_side_in: 12.0,
//! };
//!
//! let result = compute_sizing(&input);
//! assert!((result.diameter_in - 13.9).abs() < 0.05);
//! assert_eq!(result.required_side_in, 13.5);
//! assert!(result.aspect.compliant);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::equations::rectangular::{
    evaluate_aspect, solve_rect_dimension_with, AspectCheck, RectSearch,
};
use crate::equations::round::{
    calc_friction, calc_velocity, is_positive, solve_dia_by_friction, solve_dia_by_velocity,
};
use crate::errors::{CalcError, CalcResult};
use crate::report::ceil_nominal;
use crate::units::{to_canonical, Quantity, UnitSystem};

/// Which design target drives the diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizingMode {
    /// Size for a friction rate; velocity is derived
    #[default]
    FrictionTarget,
    /// Size for a velocity; friction rate is derived
    VelocityTarget,
}

impl SizingMode {
    /// The quantity computed from the diameter rather than taken from input.
    pub fn derived_quantity(&self) -> Quantity {
        match self {
            SizingMode::FrictionTarget => Quantity::Velocity,
            SizingMode::VelocityTarget => Quantity::FrictionRate,
        }
    }
}

impl fmt::Display for SizingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingMode::FrictionTarget => f.write_str("friction"),
            SizingMode::VelocityTarget => f.write_str("velocity"),
        }
    }
}

impl FromStr for SizingMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friction" | "friction_target" | "frictiontarget" => Ok(SizingMode::FrictionTarget),
            "velocity" | "velocity_target" | "velocitytarget" => Ok(SizingMode::VelocityTarget),
            other => Err(CalcError::invalid_input(
                "mode",
                other,
                "Expected 'friction' or 'velocity'",
            )),
        }
    }
}

/// Inputs for one sizing pass, in canonical IP units.
///
/// Only the target matching `mode` is used; the other is carried along so a
/// caller can switch modes without losing it.
///
/// ## JSON Example
///
/// ```json
/// {
///   "airflow_cfm": 1000.0,
///   "mode": "VelocityTarget",
///   "friction_target": 0.08,
///   "velocity_target_fpm": 1200.0,
///   "constraint_side_in": 12.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingInput {
    /// Design airflow (CFM)
    pub airflow_cfm: f64,

    /// Active design driver
    pub mode: SizingMode,

    /// Target friction rate (in.wg/100ft)
    pub friction_target: f64,

    /// Target velocity (FPM)
    pub velocity_target_fpm: f64,

    /// Fixed rectangular side, e.g. a ceiling-space depth limit (in)
    pub constraint_side_in: f64,
}

impl SizingInput {
    /// Build a canonical input from values entered in `system` units.
    ///
    /// ```rust
    /// use duct_core::calculations::sizing::{SizingInput, SizingMode};
    /// use duct_core::units::UnitSystem;
    ///
    /// // 471.95 L/s, 6.096 m/s, 304.8 mm
    /// let input = SizingInput::from_display(
    ///     UnitSystem::Metric,
    ///     471.947_443_2,
    ///     SizingMode::VelocityTarget,
    ///     0.8172,
    ///     6.096,
    ///     304.8,
    /// );
    /// assert!((input.airflow_cfm - 1000.0).abs() < 1e-6);
    /// assert!((input.velocity_target_fpm - 1200.0).abs() < 1e-6);
    /// assert!((input.constraint_side_in - 12.0).abs() < 1e-9);
    /// ```
    pub fn from_display(
        system: UnitSystem,
        airflow: f64,
        mode: SizingMode,
        friction_target: f64,
        velocity_target: f64,
        constraint_side: f64,
    ) -> Self {
        SizingInput {
            airflow_cfm: to_canonical(airflow, Quantity::Airflow, system),
            mode,
            friction_target: to_canonical(friction_target, Quantity::FrictionRate, system),
            velocity_target_fpm: to_canonical(velocity_target, Quantity::Velocity, system),
            constraint_side_in: to_canonical(constraint_side, Quantity::Length, system),
        }
    }

    /// The target value for the active mode.
    pub fn active_target(&self) -> f64 {
        match self.mode {
            SizingMode::FrictionTarget => self.friction_target,
            SizingMode::VelocityTarget => self.velocity_target_fpm,
        }
    }

    /// Report the first input that will make the pipeline clamp to zero.
    ///
    /// The pipeline itself never needs this; it exists so a front end can
    /// tell the user why a result is zero.
    pub fn validate(&self) -> CalcResult<()> {
        if !is_positive(self.airflow_cfm) {
            return Err(CalcError::invalid_input(
                "airflow_cfm",
                self.airflow_cfm.to_string(),
                "Airflow must be positive",
            ));
        }
        match self.mode {
            SizingMode::FrictionTarget if !is_positive(self.friction_target) => {
                return Err(CalcError::invalid_input(
                    "friction_target",
                    self.friction_target.to_string(),
                    "Friction target must be positive",
                ));
            }
            SizingMode::VelocityTarget if !is_positive(self.velocity_target_fpm) => {
                return Err(CalcError::invalid_input(
                    "velocity_target_fpm",
                    self.velocity_target_fpm.to_string(),
                    "Velocity target must be positive",
                ));
            }
            _ => {}
        }
        if !is_positive(self.constraint_side_in) {
            return Err(CalcError::invalid_input(
                "constraint_side_in",
                self.constraint_side_in.to_string(),
                "Constraint side must be positive",
            ));
        }
        Ok(())
    }
}

/// Results of one sizing pass, in canonical IP units.
///
/// One of `velocity_fpm` / `friction_rate` echoes the input target and the
/// other is derived from the diameter; [`SizingMode::derived_quantity`] says
/// which.
///
/// ## JSON Example
///
/// ```json
/// {
///   "mode": "FrictionTarget",
///   "diameter_in": 13.9,
///   "velocity_fpm": 948.8,
///   "friction_rate": 0.1,
///   "required_side_in": 13.5,
///   "aspect": { "ratio": 1.125, "compliant": true }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Mode the result was solved in
    pub mode: SizingMode,

    /// Round duct diameter (in)
    pub diameter_in: f64,

    /// Air velocity (FPM)
    pub velocity_fpm: f64,

    /// Friction rate (in.wg/100ft)
    pub friction_rate: f64,

    /// Rectangular side paired with the constraint side (in)
    pub required_side_in: f64,

    /// Aspect check of constraint side vs. required side
    pub aspect: AspectCheck,
}

impl SizingResult {
    /// True when a diameter could be computed from the inputs.
    pub fn is_sized(&self) -> bool {
        self.diameter_in > 0.0
    }

    /// Diameter rounded up to the next whole inch for a nominal call-out.
    pub fn nominal_diameter_in(&self) -> f64 {
        ceil_nominal(self.diameter_in)
    }
}

/// Run the full sizing pipeline with the default rectangular search window.
pub fn compute_sizing(input: &SizingInput) -> SizingResult {
    compute_sizing_with(input, &RectSearch::DEFAULT)
}

/// Run the full sizing pipeline with an explicit rectangular search window.
pub fn compute_sizing_with(input: &SizingInput, search: &RectSearch) -> SizingResult {
    let cfm = input.airflow_cfm;

    let (diameter_in, velocity_fpm, friction_rate) = match input.mode {
        SizingMode::FrictionTarget => {
            let d = solve_dia_by_friction(cfm, input.friction_target);
            let solved = if d > 0.0 { input.friction_target } else { 0.0 };
            (d, calc_velocity(cfm, d), solved)
        }
        SizingMode::VelocityTarget => {
            let d = solve_dia_by_velocity(cfm, input.velocity_target_fpm);
            let solved = if d > 0.0 { input.velocity_target_fpm } else { 0.0 };
            (d, solved, calc_friction(cfm, d))
        }
    };
    trace!(mode = %input.mode, diameter_in, velocity_fpm, friction_rate, "round duct solved");

    if diameter_in == 0.0 {
        debug!(
            mode = %input.mode,
            airflow_cfm = cfm,
            target = input.active_target(),
            "inputs outside solvable domain, diameter clamped to zero"
        );
    }

    let required_side_in = if diameter_in > 0.0 && is_positive(input.constraint_side_in) {
        solve_rect_dimension_with(diameter_in, input.constraint_side_in, search)
    } else {
        0.0
    };
    let aspect = evaluate_aspect(input.constraint_side_in, required_side_in);

    debug!(
        mode = %input.mode,
        diameter_in,
        required_side_in,
        aspect_ratio = aspect.ratio,
        compliant = aspect.compliant,
        "sizing complete"
    );

    SizingResult {
        mode: input.mode,
        diameter_in,
        velocity_fpm,
        friction_rate,
        required_side_in,
        aspect,
    }
}
