//! # Advisory Prompt
//!
//! Builds the read-only snapshot handed to an external text-generation
//! service, and the prompt text that embeds it. Calling the service is the
//! front end's job; nothing in this crate performs network I/O, and the
//! service's answer never flows back into a sizing pass.

use serde::{Deserialize, Serialize};

use crate::report::SizingReport;

/// What the caller wants the advisory service to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdvisoryKind {
    /// Engineering review of the selected size
    #[default]
    DesignReview,
    /// Step-by-step field installation notes
    InstallationGuide,
}

/// Formatted sizing fields, each already carrying its display unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorySnapshot {
    pub airflow: String,
    pub velocity: String,
    pub friction: String,
    pub round_size: String,
    pub rectangular_size: String,
    pub aspect_ratio: String,
}

impl AdvisorySnapshot {
    /// Capture the formatted fields of a report.
    pub fn from_report(report: &SizingReport) -> Self {
        AdvisorySnapshot {
            airflow: report.airflow.format(0),
            velocity: report.velocity.format(report.velocity_decimals()),
            friction: report.friction_rate.format(2),
            round_size: format!(
                "{} (nominal {})",
                report.diameter.format(1),
                report.nominal_diameter.format(0)
            ),
            rectangular_size: report.rectangular_callout(),
            aspect_ratio: format!(
                "{:.2}{}",
                report.aspect_ratio,
                if report.compliant { "" } else { " (exceeds 4:1)" }
            ),
        }
    }

    /// Render the natural-language prompt for the advisory service.
    ///
    /// ```rust
    /// use duct_core::advisory::{AdvisoryKind, AdvisorySnapshot};
    ///
    /// let snapshot = AdvisorySnapshot {
    ///     airflow: "1000 CFM".into(),
    ///     velocity: "949 FPM".into(),
    ///     friction: "0.10 in.wg/100ft".into(),
    ///     round_size: "13.9 in (nominal 14 in)".into(),
    ///     rectangular_size: "12 x 14 in".into(),
    ///     aspect_ratio: "1.13".into(),
    /// };
    /// let prompt = snapshot.prompt(AdvisoryKind::DesignReview);
    /// assert!(prompt.contains("1000 CFM"));
    /// assert!(prompt.contains("12 x 14 in"));
    /// ```
    pub fn prompt(&self, kind: AdvisoryKind) -> String {
        let task = match kind {
            AdvisoryKind::DesignReview => {
                "Review this duct selection as an HVAC design engineer. Comment on \
                 noise risk at this velocity, whether the friction rate suits a \
                 low-pressure system, and any fitting or layout concerns."
            }
            AdvisoryKind::InstallationGuide => {
                "Write concise field installation notes for this duct run: \
                 support spacing, sealing, insulation, and transitions between \
                 the round and rectangular sections."
            }
        };

        format!(
            "Duct sizing results:\n\
             - Airflow: {}\n\
             - Velocity: {}\n\
             - Friction rate: {}\n\
             - Round duct: {}\n\
             - Rectangular equivalent: {}\n\
             - Aspect ratio: {}\n\
             \n\
             {}",
            self.airflow,
            self.velocity,
            self.friction,
            self.round_size,
            self.rectangular_size,
            self.aspect_ratio,
            task
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::sizing::{compute_sizing, SizingInput, SizingMode};
    use crate::units::UnitSystem;

    fn report(system: UnitSystem) -> SizingReport {
        let input = SizingInput {
            airflow_cfm: 1000.0,
            mode: SizingMode::FrictionTarget,
            friction_target: 0.1,
            velocity_target_fpm: 1200.0,
            constraint_side_in: 12.0,
        };
        SizingReport::new(&input, &compute_sizing(&input), system)
    }

    #[test]
    fn test_snapshot_fields() {
        let snapshot = AdvisorySnapshot::from_report(&report(UnitSystem::Imperial));
        assert_eq!(snapshot.airflow, "1000 CFM");
        assert_eq!(snapshot.friction, "0.10 in.wg/100ft");
        assert_eq!(snapshot.round_size, "13.9 in (nominal 14 in)");
        assert_eq!(snapshot.rectangular_size, "12 x 14 in");
        assert_eq!(snapshot.aspect_ratio, "1.13");
    }

    #[test]
    fn test_snapshot_metric_units() {
        let snapshot = AdvisorySnapshot::from_report(&report(UnitSystem::Metric));
        assert!(snapshot.airflow.ends_with("L/s"));
        assert!(snapshot.velocity.ends_with("m/s"));
        assert!(snapshot.rectangular_size.ends_with("mm"));
    }

    #[test]
    fn test_prompt_kinds_differ() {
        let snapshot = AdvisorySnapshot::from_report(&report(UnitSystem::Imperial));
        let review = snapshot.prompt(AdvisoryKind::DesignReview);
        let install = snapshot.prompt(AdvisoryKind::InstallationGuide);
        assert_ne!(review, install);
        assert!(review.contains("Velocity: 949 FPM"));
        assert!(install.contains("installation"));
    }

    #[test]
    fn test_non_compliant_flagged() {
        let mut r = report(UnitSystem::Imperial);
        r.aspect_ratio = 5.0;
        r.compliant = false;
        let snapshot = AdvisorySnapshot::from_report(&r);
        assert_eq!(snapshot.aspect_ratio, "5.00 (exceeds 4:1)");
    }
}
