//! # Sizing Settings
//!
//! User defaults for a sizing session, read from a human-readable JSON file.
//! All values are canonical IP; `unit_system` only controls how the front
//! end reads inputs and shows results.
//!
//! ## Example
//!
//! ```rust
//! use duct_core::settings::SizingSettings;
//! use duct_core::units::UnitSystem;
//!
//! let settings = SizingSettings::from_json(r#"{ "unit_system": "Metric" }"#).unwrap();
//! assert_eq!(settings.unit_system, UnitSystem::Metric);
//! assert_eq!(settings.velocity_target_fpm, 800.0);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::sizing::{SizingInput, SizingMode};
use crate::equations::rectangular::RectSearch;
use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSystem;

/// Defaults applied when the front end does not supply a value.
///
/// ## JSON Example
///
/// ```json
/// {
///   "unit_system": "Imperial",
///   "mode": "FrictionTarget",
///   "friction_target": 0.08,
///   "velocity_target_fpm": 800.0,
///   "constraint_side_in": 12.0,
///   "rect_search": { "min_in": 2.0, "max_in": 150.0, "step_in": 0.5 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingSettings {
    /// Display/input unit system
    pub unit_system: UnitSystem,

    /// Default design driver
    pub mode: SizingMode,

    /// Default friction target (in.wg/100ft)
    pub friction_target: f64,

    /// Default velocity target (FPM)
    pub velocity_target_fpm: f64,

    /// Default constraint side (in)
    pub constraint_side_in: f64,

    /// Search window for the rectangular side
    pub rect_search: RectSearch,
}

impl Default for SizingSettings {
    fn default() -> Self {
        SizingSettings {
            unit_system: UnitSystem::Imperial,
            mode: SizingMode::FrictionTarget,
            friction_target: 0.08,
            velocity_target_fpm: 800.0,
            constraint_side_in: 12.0,
            rect_search: RectSearch::DEFAULT,
        }
    }
}

impl SizingSettings {
    /// Parse settings from JSON text and validate them.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: SizingSettings =
            serde_json::from_str(json).map_err(|e| CalcError::serialization(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the search window is usable.
    ///
    /// Targets may be any value; the engine clamps them.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.rect_search.is_valid() {
            return Err(CalcError::invalid_input(
                "rect_search",
                format!(
                    "[{}, {}] step {}",
                    self.rect_search.min_in, self.rect_search.max_in, self.rect_search.step_in
                ),
                "Search window needs 2 <= min < max <= 150 and a step of at least 0.001",
            ));
        }
        Ok(())
    }

    /// Seed a canonical input for the given airflow from these defaults.
    pub fn input_for(&self, airflow_cfm: f64) -> SizingInput {
        SizingInput {
            airflow_cfm,
            mode: self.mode,
            friction_target: self.friction_target,
            velocity_target_fpm: self.velocity_target_fpm,
            constraint_side_in: self.constraint_side_in,
        }
    }
}

/// Load settings from a JSON file.
///
/// # Returns
///
/// * `Ok(SizingSettings)` - Parsed and validated settings
/// * `Err(CalcError::FileError)` - I/O error
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::InvalidInput)` - Unusable search window
pub fn load_settings(path: &Path) -> CalcResult<SizingSettings> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings: SizingSettings = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;
    settings.validate()?;

    debug!(path = %path.display(), "loaded sizing settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn test_path(name: &str) -> std::path::PathBuf {
        temp_dir().join(format!("ductwise_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = SizingSettings::from_json("{}").unwrap();
        assert_eq!(settings, SizingSettings::default());
    }

    #[test]
    fn test_partial_search_window() {
        let json = r#"{ "rect_search": { "step_in": 0.25 } }"#;
        let settings = SizingSettings::from_json(json).unwrap();
        assert_eq!(settings.rect_search.step_in, 0.25);
        assert_eq!(settings.rect_search.min_in, 2.0);
        assert_eq!(settings.rect_search.max_in, 150.0);
    }

    #[test]
    fn test_invalid_search_window_rejected() {
        for json in [
            r#"{ "rect_search": { "step_in": 0.0 } }"#,
            r#"{ "rect_search": { "step_in": 1e-12 } }"#,
            r#"{ "rect_search": { "min_in": 0.1, "max_in": 1e6 } }"#,
        ] {
            let err = SizingSettings::from_json(json).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_bad_json_rejected() {
        let err = SizingSettings::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_input_for_uses_defaults() {
        let settings = SizingSettings {
            mode: SizingMode::VelocityTarget,
            ..SizingSettings::default()
        };
        let input = settings.input_for(1500.0);
        assert_eq!(input.airflow_cfm, 1500.0);
        assert_eq!(input.mode, SizingMode::VelocityTarget);
        assert_eq!(input.active_target(), 800.0);
    }

    #[test]
    fn test_load_from_file() {
        let path = test_path("load");
        fs::write(&path, r#"{ "unit_system": "SI", "constraint_side_in": 10.0 }"#).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.unit_system, UnitSystem::Metric);
        assert_eq!(loaded.constraint_side_in, 10.0);
        assert_eq!(loaded.rect_search, RectSearch::DEFAULT);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_unbounded_window() {
        let path = test_path("unbounded");
        fs::write(&path, r#"{ "rect_search": { "max_in": 1e300 } }"#).unwrap();

        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_settings(&test_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
