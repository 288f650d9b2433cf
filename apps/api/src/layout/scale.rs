//! Fits a fixed-design-width render into an arbitrary host width.
//!
//! The transform is a uniform, top-left anchored scale. It never reflows: the
//! layout box keeps its natural size and only the painted output shrinks or
//! grows.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum ScaleError {
    #[error("natural width unavailable; layout not measured yet")]
    MeasurementUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOrigin {
    #[default]
    TopLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleTransform {
    pub scale: f32,
    pub origin: TransformOrigin,
    /// Natural layout box, unaffected by `scale`.
    pub layout_width: f32,
    pub layout_height: f32,
}

impl ScaleTransform {
    pub fn identity(layout_width: f32, layout_height: f32) -> Self {
        Self {
            scale: 1.0,
            origin: TransformOrigin::TopLeft,
            layout_width,
            layout_height,
        }
    }

    /// Painted size after the transform.
    pub fn visual_size(&self) -> (f32, f32) {
        (self.layout_width * self.scale, self.layout_height * self.scale)
    }
}

/// `target / natural`, or `1` when the host reports no usable width.
pub fn compute_scale(target_width: f32, natural_width: f32) -> Result<f32, ScaleError> {
    if target_width <= 0.0 || !target_width.is_finite() {
        return Ok(1.0);
    }
    if natural_width <= 0.0 || !natural_width.is_finite() {
        return Err(ScaleError::MeasurementUnavailable);
    }
    Ok(target_width / natural_width)
}

/// Per-instance scale state. The scale is recomputed only when the target
/// width changes, or when the previous measurement was unavailable. The layout
/// box always reflects the latest measurement.
#[derive(Debug, Clone, Default)]
pub struct ScaleCoordinator {
    last_target: Option<f32>,
    pending_measure: bool,
    scale: Option<f32>,
}

impl ScaleCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a (possibly unchanged) target width and the current natural size.
    /// Returns the transform to apply.
    pub fn update(
        &mut self,
        target_width: f32,
        natural_width: f32,
        natural_height: f32,
    ) -> ScaleTransform {
        let unchanged = self.last_target == Some(target_width);
        let scale = match (unchanged, self.pending_measure, self.scale) {
            (true, false, Some(cached)) => cached,
            _ => self.measure(target_width, natural_width),
        };

        ScaleTransform {
            scale,
            origin: TransformOrigin::TopLeft,
            layout_width: natural_width,
            layout_height: natural_height,
        }
    }

    fn measure(&mut self, target_width: f32, natural_width: f32) -> f32 {
        self.last_target = Some(target_width);
        let scale = match compute_scale(target_width, natural_width) {
            Ok(scale) => {
                self.pending_measure = false;
                scale
            }
            Err(e) => {
                debug!(target_width, "{e}; using scale 1 and retrying on next update");
                self.pending_measure = true;
                1.0
            }
        };
        self.scale = Some(scale);
        scale
    }

    #[allow(dead_code)]
    pub fn is_pending(&self) -> bool {
        self.pending_measure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_scale_ratio() {
        assert_eq!(compute_scale(400.0, 800.0), Ok(0.5));
        assert_eq!(compute_scale(1200.0, 800.0), Ok(1.5));
    }

    #[test]
    fn test_compute_scale_non_positive_target_is_one() {
        assert_eq!(compute_scale(0.0, 800.0), Ok(1.0));
        assert_eq!(compute_scale(-20.0, 800.0), Ok(1.0));
        assert_eq!(compute_scale(0.0, 0.0), Ok(1.0));
    }

    #[test]
    fn test_compute_scale_zero_natural_width_errors() {
        assert_eq!(
            compute_scale(400.0, 0.0),
            Err(ScaleError::MeasurementUnavailable)
        );
    }

    #[test]
    fn test_container_resize_rescales_without_reflow() {
        let mut coordinator = ScaleCoordinator::new();

        let first = coordinator.update(400.0, 800.0, 1100.0);
        assert_eq!(first.scale, 0.5);
        assert_eq!(first.layout_width, 800.0);
        assert_eq!(first.visual_size(), (400.0, 550.0));

        let second = coordinator.update(800.0, 800.0, 1100.0);
        assert_eq!(second.scale, 1.0);
        assert_eq!(second.layout_width, 800.0);
        assert_eq!(second.origin, TransformOrigin::TopLeft);
    }

    #[test]
    fn test_unchanged_target_is_not_recomputed() {
        let mut coordinator = ScaleCoordinator::new();
        let first = coordinator.update(400.0, 800.0, 1000.0);
        // A different natural width with the same target keeps the cached scale.
        let again = coordinator.update(400.0, 1600.0, 1000.0);
        assert_eq!(first.scale, again.scale);
        assert_eq!(again.layout_width, 1600.0);
    }

    #[test]
    fn test_layout_box_follows_latest_measurement() {
        let mut coordinator = ScaleCoordinator::new();
        let short = coordinator.update(400.0, 800.0, 1000.0);
        let tall = coordinator.update(400.0, 800.0, 3200.0);
        assert_eq!(short.scale, tall.scale);
        assert_eq!(tall.layout_height, 3200.0);
        assert_eq!(tall.visual_size(), (400.0, 1600.0));
    }

    #[test]
    fn test_unavailable_measurement_retries_on_same_target() {
        let mut coordinator = ScaleCoordinator::new();
        let deferred = coordinator.update(400.0, 0.0, 0.0);
        assert_eq!(deferred.scale, 1.0);
        assert!(coordinator.is_pending());

        let measured = coordinator.update(400.0, 800.0, 1000.0);
        assert_eq!(measured.scale, 0.5);
        assert!(!coordinator.is_pending());
    }
}
