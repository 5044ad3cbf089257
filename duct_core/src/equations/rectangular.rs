//! # Rectangular Duct Formulas
//!
//! Equivalent-diameter matching between round and rectangular duct, and the
//! aspect-ratio check applied to the resulting rectangle.
//!
//! ## Huebscher Equivalent Diameter
//!
//! ```text
//!        ┌───────────┐
//!      b │           │      De = 1.30 · (a·b)^0.625 / (a+b)^0.25
//!        └───────────┘
//!              a
//! ```
//!
//! The relation has no closed-form inverse for one side, so
//! [`solve_rect_dimension`] scans the unknown side over a bounded window and
//! keeps the closest match.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::round::{finite_or_zero, is_positive};

/// Largest aspect ratio accepted by SMACNA guidance (inclusive)
pub const MAX_ASPECT_RATIO: f64 = 4.0;

/// Search window for the unknown rectangular side (inches).
///
/// The defaults (2 to 150 in, 0.5 in step) are the compatibility values.
/// A window may be narrowed inside those bounds and the step refined down
/// to [`RectSearch::MIN_STEP_IN`]; a finer step trades speed for resolution.
///
/// ## JSON Example
///
/// ```json
/// { "min_in": 2.0, "max_in": 150.0, "step_in": 0.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectSearch {
    /// Smallest side evaluated
    pub min_in: f64,
    /// Largest side evaluated
    pub max_in: f64,
    /// Scan increment
    pub step_in: f64,
}

impl RectSearch {
    /// Compatibility search window: [2, 150] in steps of 0.5
    pub const DEFAULT: RectSearch = RectSearch {
        min_in: 2.0,
        max_in: 150.0,
        step_in: 0.5,
    };

    /// Lower bound of any search window
    pub const BOUND_MIN_IN: f64 = 2.0;

    /// Upper bound of any search window
    pub const BOUND_MAX_IN: f64 = 150.0;

    /// Finest scan increment accepted (at most 148,001 points)
    pub const MIN_STEP_IN: f64 = 0.001;

    /// A window is usable when 2 <= min < max <= 150 and step >= 0.001.
    pub fn is_valid(&self) -> bool {
        self.min_in >= Self::BOUND_MIN_IN
            && self.max_in <= Self::BOUND_MAX_IN
            && self.max_in > self.min_in
            && is_positive(self.step_in)
            && self.step_in >= Self::MIN_STEP_IN
    }

    /// Number of scan points, counting both ends of the window.
    ///
    /// Returns 0 for an invalid window.
    pub fn point_count(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        // Small slack so a max that lands exactly on a step is included
        let spans = ((self.max_in - self.min_in) / self.step_in + 1e-9).floor();
        (spans as usize).checked_add(1).unwrap_or(0)
    }
}

impl Default for RectSearch {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Huebscher equivalent round diameter of an `a` × `b` rectangle.
///
/// Returns `0.0` if either side is non-positive.
///
/// # Example
/// ```rust
/// use duct_core::equations::rectangular::equivalent_diameter;
///
/// let de = equivalent_diameter(12.0, 13.5);
/// assert!((de - 13.9).abs() < 0.05);
/// ```
pub fn equivalent_diameter(a: f64, b: f64) -> f64 {
    if !is_positive(a) || !is_positive(b) {
        return 0.0;
    }
    finite_or_zero(1.30 * (a * b).powf(0.625) / (a + b).powf(0.25))
}

/// Find the rectangular side that, paired with `known_side`, best matches
/// `target_diameter`, using the default search window.
///
/// Returns `0.0` without scanning if either input is non-positive.
pub fn solve_rect_dimension(target_diameter: f64, known_side: f64) -> f64 {
    solve_rect_dimension_with(target_diameter, known_side, &RectSearch::DEFAULT)
}

/// Same as [`solve_rect_dimension`] with an explicit search window.
///
/// The scan runs from `min_in` upward and only replaces the current best on a
/// strictly smaller error, so ties go to the smaller side.
pub fn solve_rect_dimension_with(
    target_diameter: f64,
    known_side: f64,
    search: &RectSearch,
) -> f64 {
    if !is_positive(target_diameter) || !is_positive(known_side) {
        return 0.0;
    }
    if !search.is_valid() {
        debug!(?search, "rectangular search window is invalid, skipping scan");
        return 0.0;
    }

    let mut best_side = 0.0;
    let mut best_diff = f64::INFINITY;
    for i in 0..search.point_count() {
        let side = search.min_in + i as f64 * search.step_in;
        let diff = (equivalent_diameter(known_side, side) - target_diameter).abs();
        if diff < best_diff {
            best_diff = diff;
            best_side = side;
        }
    }
    best_side
}

/// Aspect-ratio verdict for a rectangular section.
///
/// ## JSON Example
///
/// ```json
/// { "ratio": 1.125, "compliant": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectCheck {
    /// Long side over short side (always ≥ 1)
    pub ratio: f64,
    /// `ratio ≤ 4`
    pub compliant: bool,
}

impl Default for AspectCheck {
    fn default() -> Self {
        AspectCheck {
            ratio: 1.0,
            compliant: true,
        }
    }
}

/// Compute the aspect ratio of two sides and check it against the limit.
///
/// A side that is zero (or otherwise not positive) is taken as 1 so a ratio
/// is still reported.
///
/// # Example
/// ```rust
/// use duct_core::equations::rectangular::evaluate_aspect;
///
/// let check = evaluate_aspect(4.0, 20.0);
/// assert_eq!(check.ratio, 5.0);
/// assert!(!check.compliant);
/// ```
pub fn evaluate_aspect(side_a: f64, side_b: f64) -> AspectCheck {
    let a = if is_positive(side_a) { side_a } else { 1.0 };
    let b = if is_positive(side_b) { side_b } else { 1.0 };
    let ratio = a.max(b) / a.min(b);
    AspectCheck {
        ratio,
        compliant: ratio <= MAX_ASPECT_RATIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::round::solve_dia_by_friction;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_equivalent_diameter_square() {
        // De of a square is about 1.093 times its side
        let de = equivalent_diameter(10.0, 10.0);
        assert_abs_diff_eq!(de, 10.93, epsilon = 0.01);
    }

    #[test]
    fn test_rectangular_scenario() {
        let target = solve_dia_by_friction(1000.0, 0.1);
        let side = solve_rect_dimension(target, 12.0);
        assert_eq!(side, 13.5);

        let check = evaluate_aspect(12.0, side);
        assert_abs_diff_eq!(check.ratio, 1.125, epsilon = 1e-12);
        assert!(check.compliant);
    }

    #[test]
    fn test_result_stays_on_scan_grid() {
        let side = solve_rect_dimension(20.0, 8.0);
        assert!((2.0..=150.0).contains(&side));
        assert_eq!((side * 2.0).fract(), 0.0);
    }

    #[test]
    fn test_target_beyond_window_clamps_to_edge() {
        assert_eq!(solve_rect_dimension(500.0, 10.0), 150.0);
        assert_eq!(solve_rect_dimension(0.5, 10.0), 2.0);
    }

    #[test]
    fn test_scan_picks_nearest_from_low_end() {
        // De grows with the unknown side, so for a target below the window
        // every later candidate is strictly worse and the first one stays.
        let window = RectSearch {
            min_in: 5.0,
            max_in: 6.0,
            step_in: 0.5,
        };
        assert_eq!(solve_rect_dimension_with(0.001, 1.0, &window), 5.0);

        // A single-step window whose target sits between both candidates
        let pair = RectSearch {
            min_in: 10.0,
            max_in: 11.0,
            step_in: 1.0,
        };
        let lo = equivalent_diameter(10.0, 10.0);
        let hi = equivalent_diameter(10.0, 11.0);
        let nearer_lo = lo + (hi - lo) * 0.25;
        assert_eq!(solve_rect_dimension_with(nearer_lo, 10.0, &pair), 10.0);
    }

    #[test]
    fn test_guards() {
        assert_eq!(solve_rect_dimension(0.0, 12.0), 0.0);
        assert_eq!(solve_rect_dimension(13.9, 0.0), 0.0);
        assert_eq!(solve_rect_dimension(13.9, -4.0), 0.0);
        assert_eq!(equivalent_diameter(0.0, 12.0), 0.0);
    }

    #[test]
    fn test_invalid_window_returns_zero() {
        let backwards = RectSearch {
            min_in: 150.0,
            max_in: 2.0,
            step_in: 0.5,
        };
        assert!(!backwards.is_valid());
        assert_eq!(solve_rect_dimension_with(13.9, 12.0, &backwards), 0.0);

        let no_step = RectSearch {
            step_in: 0.0,
            ..RectSearch::DEFAULT
        };
        assert_eq!(no_step.point_count(), 0);
    }

    #[test]
    fn test_window_outside_bounds_rejected() {
        let huge_max = RectSearch {
            max_in: 1e300,
            ..RectSearch::DEFAULT
        };
        assert!(!huge_max.is_valid());
        assert_eq!(huge_max.point_count(), 0);
        assert_eq!(solve_rect_dimension_with(13.9, 12.0, &huge_max), 0.0);

        let wide = RectSearch {
            min_in: 0.1,
            max_in: 1e6,
            step_in: 0.5,
        };
        assert!(!wide.is_valid());
        assert_eq!(solve_rect_dimension_with(500.0, 10.0, &wide), 0.0);

        let infinite = RectSearch {
            max_in: f64::INFINITY,
            ..RectSearch::DEFAULT
        };
        assert_eq!(infinite.point_count(), 0);
    }

    #[test]
    fn test_tiny_step_rejected() {
        let tiny = RectSearch {
            step_in: 1e-12,
            ..RectSearch::DEFAULT
        };
        assert!(!tiny.is_valid());
        assert_eq!(tiny.point_count(), 0);

        let finest = RectSearch {
            step_in: RectSearch::MIN_STEP_IN,
            ..RectSearch::DEFAULT
        };
        assert!(finest.is_valid());
        assert_eq!(finest.point_count(), 148_001);
    }

    #[test]
    fn test_narrowed_window_stays_in_bounds() {
        let narrow = RectSearch {
            min_in: 10.0,
            max_in: 20.0,
            step_in: 0.25,
        };
        let side = solve_rect_dimension_with(500.0, 10.0, &narrow);
        assert_eq!(side, 20.0);
    }

    #[test]
    fn test_default_window_point_count() {
        // 2.0, 2.5, ..., 150.0
        assert_eq!(RectSearch::DEFAULT.point_count(), 297);
    }

    #[test]
    fn test_finer_step_improves_match() {
        let target = solve_dia_by_friction(1000.0, 0.1);
        let fine = RectSearch {
            step_in: 0.01,
            ..RectSearch::DEFAULT
        };
        let coarse_side = solve_rect_dimension(target, 12.0);
        let fine_side = solve_rect_dimension_with(target, 12.0, &fine);
        let coarse_err = (equivalent_diameter(12.0, coarse_side) - target).abs();
        let fine_err = (equivalent_diameter(12.0, fine_side) - target).abs();
        assert!(fine_err <= coarse_err);
    }

    #[test]
    fn test_aspect_boundary() {
        let over = evaluate_aspect(4.0, 20.0);
        assert_eq!(over.ratio, 5.0);
        assert!(!over.compliant);

        let at_limit = evaluate_aspect(4.0, 16.0);
        assert_eq!(at_limit.ratio, 4.0);
        assert!(at_limit.compliant);
    }

    #[test]
    fn test_aspect_zero_side_substitutes_one() {
        let check = evaluate_aspect(0.0, 6.0);
        assert_eq!(check.ratio, 6.0);
        assert!(!check.compliant);
        assert_eq!(evaluate_aspect(0.0, 0.0), AspectCheck::default());
    }

    proptest! {
        #[test]
        fn prop_aspect_symmetric(a in 0.0f64..500.0, b in 0.0f64..500.0) {
            let ab = evaluate_aspect(a, b);
            let ba = evaluate_aspect(b, a);
            prop_assert_eq!(ab.ratio, ba.ratio);
            prop_assert!(ab.ratio >= 1.0);
        }

        #[test]
        fn prop_non_positive_side_yields_zero(bad in -100.0f64..=0.0, target in 1.0f64..100.0) {
            prop_assert_eq!(solve_rect_dimension(target, bad), 0.0);
            prop_assert_eq!(solve_rect_dimension(bad, target), 0.0);
        }
    }
}
