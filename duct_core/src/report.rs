//! # Sizing Report
//!
//! Presentation view of a sizing pass: canonical results converted to the
//! chosen unit system and rounded for display. Nothing here feeds back into
//! the engine.
//!
//! ## Rounding
//!
//! | Field              | IP            | SI            |
//! |--------------------|---------------|---------------|
//! | Airflow            | whole CFM     | whole L/s     |
//! | Friction rate      | 2 decimals    | 2 decimals    |
//! | Velocity           | whole FPM     | 2 decimals    |
//! | Diameter           | 1 decimal     | 1 decimal     |
//! | Nominal diameter   | ceiling       | ceiling       |
//! | Rectangular sides  | whole inches  | whole mm      |
//! | Aspect ratio       | 2 decimals    | 2 decimals    |

use serde::{Deserialize, Serialize};

use crate::calculations::sizing::{SizingInput, SizingMode, SizingResult};
use crate::units::{to_display, Quantity, UnitSystem};

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Round up to the next whole unit, ignoring float noise below 1e-6.
pub fn ceil_nominal(value: f64) -> f64 {
    round_to(value, 6).ceil()
}

fn velocity_decimals(system: UnitSystem) -> i32 {
    match system {
        UnitSystem::Imperial => 0,
        UnitSystem::Metric => 2,
    }
}

/// A displayed value with its unit label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub value: f64,
    pub unit: String,
}

impl Measure {
    fn new(canonical: f64, quantity: Quantity, system: UnitSystem, decimals: i32) -> Self {
        Measure {
            value: round_to(to_display(canonical, quantity, system), decimals),
            unit: quantity.unit_label(system).to_string(),
        }
    }

    /// Format as "value unit" with the given number of decimals.
    pub fn format(&self, decimals: usize) -> String {
        format!("{:.*} {}", decimals, self.value, self.unit)
    }
}

/// Display-ready sizing results.
///
/// ## JSON Example
///
/// ```json
/// {
///   "unit_system": "Imperial",
///   "mode": "FrictionTarget",
///   "airflow": { "value": 1000.0, "unit": "CFM" },
///   "velocity": { "value": 949.0, "unit": "FPM" },
///   "friction_rate": { "value": 0.1, "unit": "in.wg/100ft" },
///   "diameter": { "value": 13.9, "unit": "in" },
///   "nominal_diameter": { "value": 14.0, "unit": "in" },
///   "constraint_side": { "value": 12.0, "unit": "in" },
///   "required_side": { "value": 14.0, "unit": "in" },
///   "aspect_ratio": 1.13,
///   "compliant": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingReport {
    pub unit_system: UnitSystem,
    pub mode: SizingMode,
    pub airflow: Measure,
    pub velocity: Measure,
    pub friction_rate: Measure,
    pub diameter: Measure,
    pub nominal_diameter: Measure,
    pub constraint_side: Measure,
    pub required_side: Measure,
    pub aspect_ratio: f64,
    pub compliant: bool,
}

impl SizingReport {
    /// Build the display view of `result` for `input` in `system` units.
    ///
    /// ```rust
    /// use duct_core::calculations::sizing::{compute_sizing, SizingInput, SizingMode};
    /// use duct_core::report::SizingReport;
    /// use duct_core::units::UnitSystem;
    ///
    /// let input = SizingInput {
    ///     airflow_cfm: 1000.0,
    ///     mode: SizingMode::VelocityTarget,
    ///     friction_target: 0.08,
    ///     velocity_target_fpm: 1200.0,
    ///     constraint_side_in: 12.0,
    /// };
    /// let report = SizingReport::new(&input, &compute_sizing(&input), UnitSystem::Imperial);
    /// assert_eq!(report.diameter.value, 12.4);
    /// assert_eq!(report.nominal_diameter.value, 13.0);
    /// assert_eq!(report.friction_rate.value, 0.18);
    /// ```
    pub fn new(input: &SizingInput, result: &SizingResult, system: UnitSystem) -> Self {
        let diameter_display = to_display(result.diameter_in, Quantity::Length, system);
        SizingReport {
            unit_system: system,
            mode: result.mode,
            airflow: Measure::new(input.airflow_cfm.max(0.0), Quantity::Airflow, system, 0),
            velocity: Measure::new(
                result.velocity_fpm,
                Quantity::Velocity,
                system,
                velocity_decimals(system),
            ),
            friction_rate: Measure::new(result.friction_rate, Quantity::FrictionRate, system, 2),
            diameter: Measure::new(result.diameter_in, Quantity::Length, system, 1),
            nominal_diameter: Measure {
                value: ceil_nominal(diameter_display),
                unit: Quantity::Length.unit_label(system).to_string(),
            },
            constraint_side: Measure::new(
                input.constraint_side_in.max(0.0),
                Quantity::Length,
                system,
                0,
            ),
            required_side: Measure::new(result.required_side_in, Quantity::Length, system, 0),
            aspect_ratio: round_to(result.aspect.ratio, 2),
            compliant: result.aspect.compliant,
        }
    }

    /// Rectangular size call-out, e.g. `12 x 14 in`.
    pub fn rectangular_callout(&self) -> String {
        format!(
            "{:.0} x {:.0} {}",
            self.constraint_side.value, self.required_side.value, self.required_side.unit
        )
    }

    /// Number of decimals to print for velocity in this report's system.
    pub fn velocity_decimals(&self) -> usize {
        velocity_decimals(self.unit_system) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::sizing::compute_sizing;

    fn input() -> SizingInput {
        SizingInput {
            airflow_cfm: 1000.0,
            mode: SizingMode::FrictionTarget,
            friction_target: 0.1,
            velocity_target_fpm: 1200.0,
            constraint_side_in: 12.0,
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(13.9012, 1), 13.9);
        assert_eq!(round_to(0.18026, 2), 0.18);
        assert_eq!(round_to(948.8, 0), 949.0);
    }

    #[test]
    fn test_ceil_nominal_ignores_float_noise() {
        assert_eq!(ceil_nominal(14.000000000001), 14.0);
        assert_eq!(ceil_nominal(13.999999999999), 14.0);
        assert_eq!(ceil_nominal(13.9004), 14.0);
        assert_eq!(ceil_nominal(14.01), 15.0);
        assert_eq!(ceil_nominal(0.0), 0.0);
    }

    #[test]
    fn test_nominal_of_exact_metric_size() {
        // 14 in is exactly 355.6 mm; a 355.0 mm duct must not call out 356
        let input = input();
        let mut result = compute_sizing(&input);
        result.diameter_in = 355.0 / 25.4;
        let report = SizingReport::new(&input, &result, UnitSystem::Metric);
        assert_eq!(report.nominal_diameter.value, 355.0);
    }

    #[test]
    fn test_imperial_report() {
        let input = input();
        let report = SizingReport::new(&input, &compute_sizing(&input), UnitSystem::Imperial);
        assert_eq!(report.airflow.value, 1000.0);
        assert_eq!(report.airflow.unit, "CFM");
        assert_eq!(report.diameter.value, 13.9);
        assert_eq!(report.nominal_diameter.value, 14.0);
        assert_eq!(report.friction_rate.value, 0.1);
        assert_eq!(report.aspect_ratio, 1.13);
        assert!(report.compliant);
        assert_eq!(report.rectangular_callout(), "12 x 14 in");
    }

    #[test]
    fn test_metric_report() {
        let input = input();
        let report = SizingReport::new(&input, &compute_sizing(&input), UnitSystem::Metric);
        assert_eq!(report.airflow.value, 472.0);
        assert_eq!(report.airflow.unit, "L/s");
        assert_eq!(report.constraint_side.value, 305.0);
        assert_eq!(report.required_side.value, 343.0);
        assert_eq!(report.velocity.unit, "m/s");
        assert_eq!(report.friction_rate.value, 0.82);
        // 13.9 in = 353.1 mm, nominal rounds up in display units
        assert_eq!(report.nominal_diameter.value, 354.0);
    }

    #[test]
    fn test_measure_format() {
        let m = Measure {
            value: 0.1,
            unit: "in.wg/100ft".to_string(),
        };
        assert_eq!(m.format(2), "0.10 in.wg/100ft");
    }
}
