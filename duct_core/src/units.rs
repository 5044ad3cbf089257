//! # Units
//!
//! Conversion between the canonical Inch-Pound (IP) system and the Metric (SI)
//! display system for the four quantities the sizing engine works with.
//!
//! ## Canonical Units (IP)
//!
//! Every solver in this crate accepts and returns IP values only:
//! - Airflow: cubic feet per minute (CFM)
//! - Friction rate: inches of water column per 100 ft of duct (in.wg/100ft)
//! - Velocity: feet per minute (FPM)
//! - Length: inches (in)
//!
//! Metric is a display concern. Values typed in SI are canonicalized with
//! [`to_canonical`] before reaching a solver, and results are shown with
//! [`to_display`]. Neither function rounds or rejects anything.
//!
//! ## Example
//!
//! ```rust
//! use duct_core::units::{to_canonical, to_display, Quantity, UnitSystem};
//!
//! let mm = to_display(12.0, Quantity::Length, UnitSystem::Metric);
//! assert!((mm - 304.8).abs() < 1e-9);
//!
//! let inches = to_canonical(mm, Quantity::Length, UnitSystem::Metric);
//! assert!((inches - 12.0).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

// ============================================================================
// Conversion Factors (multiply IP by factor to get SI)
// ============================================================================

/// CFM to liters per second
pub const CFM_TO_LPS: f64 = 0.471_947_443_2;

/// in.wg/100ft to pascals per meter (249.0889 Pa per in.wg over 30.48 m)
pub const IN_WG_PER_100FT_TO_PA_PER_M: f64 = 249.088_908_333 / 30.48;

/// FPM to meters per second
pub const FPM_TO_MPS: f64 = 0.005_08;

/// Inches to millimeters
pub const IN_TO_MM: f64 = 25.4;

/// Unit system a value is entered or displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Inch-Pound, the canonical system
    #[default]
    #[serde(alias = "IP")]
    Imperial,
    /// SI display system
    #[serde(alias = "SI")]
    Metric,
}

impl UnitSystem {
    /// Short code used in reports ("IP" or "SI")
    pub fn code(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "IP",
            UnitSystem::Metric => "SI",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UnitSystem {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ip" | "imperial" | "us" => Ok(UnitSystem::Imperial),
            "si" | "metric" => Ok(UnitSystem::Metric),
            other => Err(CalcError::invalid_input(
                "unit_system",
                other,
                "Expected 'imperial' (IP) or 'metric' (SI)",
            )),
        }
    }
}

/// Physical quantity handled by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Airflow,
    FrictionRate,
    Velocity,
    Length,
}

impl Quantity {
    /// All quantities in pipeline order
    pub const ALL: [Quantity; 4] = [
        Quantity::Airflow,
        Quantity::FrictionRate,
        Quantity::Velocity,
        Quantity::Length,
    ];

    /// Multiply an IP value by this factor to get the SI value.
    pub fn si_factor(&self) -> f64 {
        match self {
            Quantity::Airflow => CFM_TO_LPS,
            Quantity::FrictionRate => IN_WG_PER_100FT_TO_PA_PER_M,
            Quantity::Velocity => FPM_TO_MPS,
            Quantity::Length => IN_TO_MM,
        }
    }

    /// Display unit label for this quantity in the given system.
    pub fn unit_label(&self, system: UnitSystem) -> &'static str {
        match (self, system) {
            (Quantity::Airflow, UnitSystem::Imperial) => "CFM",
            (Quantity::Airflow, UnitSystem::Metric) => "L/s",
            (Quantity::FrictionRate, UnitSystem::Imperial) => "in.wg/100ft",
            (Quantity::FrictionRate, UnitSystem::Metric) => "Pa/m",
            (Quantity::Velocity, UnitSystem::Imperial) => "FPM",
            (Quantity::Velocity, UnitSystem::Metric) => "m/s",
            (Quantity::Length, UnitSystem::Imperial) => "in",
            (Quantity::Length, UnitSystem::Metric) => "mm",
        }
    }
}

/// Convert a value entered in `source` units to canonical IP units.
#[inline]
pub fn to_canonical(value: f64, quantity: Quantity, source: UnitSystem) -> f64 {
    match source {
        UnitSystem::Imperial => value,
        UnitSystem::Metric => value / quantity.si_factor(),
    }
}

/// Convert a canonical IP value to `display` units.
#[inline]
pub fn to_display(value: f64, quantity: Quantity, display: UnitSystem) -> f64 {
    match display {
        UnitSystem::Imperial => value,
        UnitSystem::Metric => value * quantity.si_factor(),
    }
}
