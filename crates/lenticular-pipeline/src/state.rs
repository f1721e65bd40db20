//! Frame-to-frame owner of the calibration.
//!
//! Every model in `lenticular-core` is a pure function; this module decides
//! *when* to call them and what to keep when a new configuration is invalid.
//! The very first computation must succeed. Afterwards, an invalid
//! configuration is logged once and the last valid values stay in place.

use anyhow::{Context, Result};
use lenticular_core::{
    CalibrationConfig, ConfigurationError, LenticularSheet, LightfieldResolution, Mat4,
    OffAxisProjection, ScreenGeometry, ViewMap, ViewMapper,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::report::DiagnosticReport;
use crate::types::{LogEntry, RefreshOutcome, Stage, TickOutcome};
use crate::uniforms::ShaderUniforms;

/// Everything derived from one configuration, computed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSnapshot {
    pub screen: ScreenGeometry,
    pub sheet: LenticularSheet,
    pub lightfield: LightfieldResolution,
    pub view_map: ViewMap,
}

impl CalibrationSnapshot {
    pub fn compute(config: &CalibrationConfig) -> Result<Self, ConfigurationError> {
        let screen = config.screen()?;
        let sheet = config.sheet()?;
        let lightfield = LightfieldResolution::compute(&screen, &sheet);
        let view_map = ViewMapper::new(&screen, &sheet, &lightfield, config.upscale)?
            .with_policy(config.view_index_policy)
            .build();

        Ok(Self {
            screen,
            sheet,
            lightfield,
            view_map,
        })
    }

    /// Serialize the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compute the off-axis projection for `config` against the snapshot's screen.
pub fn compute_projection(
    config: &CalibrationConfig,
    snapshot: &CalibrationSnapshot,
) -> Result<OffAxisProjection, ConfigurationError> {
    let clip = config.clip_planes()?;
    OffAxisProjection::compute(
        &snapshot.screen.corners,
        &config.effective_viewpoint(),
        clip,
    )
}

/// Calibration state owned by the host for the lifetime of a display session.
///
/// # Example
///
/// ```
/// use lenticular_core::CalibrationConfig;
/// use lenticular_pipeline::CalibrationState;
/// # fn main() -> anyhow::Result<()> {
/// let mut config = CalibrationConfig::default();
/// let mut state = CalibrationState::new(config)?;
///
/// // Once per frame:
/// config.lines_per_inch = 40.0;
/// state.tick(&config);
/// assert_eq!(state.snapshot().sheet.lines_per_inch, 40.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CalibrationState {
    /// Configuration the current snapshot was built from.
    config: CalibrationConfig,
    snapshot: CalibrationSnapshot,
    projection: Option<OffAxisProjection>,
    calibration_error: Option<ConfigurationError>,
    projection_error: Option<ConfigurationError>,
    log: Vec<LogEntry>,
}

impl CalibrationState {
    /// Build the baseline calibration.
    ///
    /// # Errors
    ///
    /// Any [`ConfigurationError`] here is fatal: without a valid baseline
    /// there is nothing to fall back to.
    pub fn new(config: CalibrationConfig) -> Result<Self> {
        let snapshot =
            CalibrationSnapshot::compute(&config).context("initial calibration failed")?;
        let projection = if config.test_projection {
            Some(
                compute_projection(&config, &snapshot)
                    .context("initial off-axis projection failed")?,
            )
        } else {
            None
        };

        let state = Self {
            config,
            snapshot,
            projection,
            calibration_error: None,
            projection_error: None,
            log: vec![LogEntry::ready(Stage::Init)],
        };
        info!(
            "calibration ready: {} lenses x {} views",
            state.snapshot.lightfield.spatial_res, state.snapshot.lightfield.angular_res
        );
        if config.debug_print {
            state.report().log();
        }
        Ok(state)
    }

    /// Per-frame entry point.
    ///
    /// Recomputes the calibration unless `lock_params` is set, then the
    /// projection when `test_projection` is set.
    pub fn tick(&mut self, config: &CalibrationConfig) -> TickOutcome {
        let calibration = if config.lock_params {
            RefreshOutcome::Locked
        } else {
            self.refresh(config)
        };
        let projection = if config.test_projection {
            self.refresh_projection(config)
        } else {
            RefreshOutcome::Skipped
        };
        TickOutcome {
            calibration,
            projection,
        }
    }

    /// Recompute the snapshot from `config`, ignoring the lock flag.
    pub fn refresh(&mut self, config: &CalibrationConfig) -> RefreshOutcome {
        match CalibrationSnapshot::compute(config) {
            Ok(snapshot) => {
                if let Some(previous) = self.calibration_error.take() {
                    info!("calibration recovered after: {previous}");
                    self.log
                        .push(LogEntry::recovered(Stage::Calibration, &previous));
                }
                self.snapshot = snapshot;
                self.config = *config;
                if config.debug_print {
                    self.report().log();
                }
                RefreshOutcome::Updated
            }
            Err(err) => {
                if self.calibration_error.as_ref() != Some(&err) {
                    warn!("keeping previous calibration: {err}");
                    self.log.push(LogEntry::rejected(Stage::Calibration, &err));
                }
                self.calibration_error = Some(err);
                RefreshOutcome::Retained
            }
        }
    }

    /// Recompute the off-axis projection against the current snapshot.
    pub fn refresh_projection(&mut self, config: &CalibrationConfig) -> RefreshOutcome {
        match compute_projection(config, &self.snapshot) {
            Ok(projection) => {
                if let Some(previous) = self.projection_error.take() {
                    info!("projection recovered after: {previous}");
                    self.log
                        .push(LogEntry::recovered(Stage::Projection, &previous));
                }
                debug!(
                    "projection: eye={:?} distance={:.4}",
                    projection.eye, projection.distance
                );
                self.projection = Some(projection);
                RefreshOutcome::Updated
            }
            Err(err) => {
                if self.projection_error.as_ref() != Some(&err) {
                    warn!("keeping previous projection: {err}");
                    self.log.push(LogEntry::rejected(Stage::Projection, &err));
                }
                self.projection_error = Some(err);
                RefreshOutcome::Retained
            }
        }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &CalibrationSnapshot {
        &self.snapshot
    }

    /// Latest valid projection, `None` until one has been computed.
    pub fn projection(&self) -> Option<&OffAxisProjection> {
        self.projection.as_ref()
    }

    /// Combined projection matrix, identity while no projection exists.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
            .as_ref()
            .map_or_else(Mat4::identity, |p| p.matrix)
    }

    /// Error that caused the most recent [`refresh`](Self::refresh) to retain the snapshot.
    pub fn calibration_error(&self) -> Option<&ConfigurationError> {
        self.calibration_error.as_ref()
    }

    pub fn projection_error(&self) -> Option<&ConfigurationError> {
        self.projection_error.as_ref()
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn report(&self) -> DiagnosticReport {
        DiagnosticReport::new(&self.snapshot)
    }

    /// Uniform values for the interlacing shaders.
    ///
    /// Viewer flags (`fake_placement`, `spread_x`) come from `config`; the
    /// geometry comes from the current snapshot.
    pub fn uniforms(&self, config: &CalibrationConfig, model_view: &Mat4) -> ShaderUniforms {
        ShaderUniforms::new(
            &self.snapshot,
            config,
            &(self.projection_matrix() * model_view),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogEvent;

    #[test]
    fn invalid_baseline_is_fatal() {
        let config = CalibrationConfig {
            screen_diagonal: -1.0,
            ..Default::default()
        };
        let err = CalibrationState::new(config).unwrap_err();
        assert!(err.to_string().contains("initial calibration failed"));
        assert!(matches!(
            err.downcast_ref::<ConfigurationError>(),
            Some(ConfigurationError::NonPositiveDiagonal(_))
        ));
    }

    #[test]
    fn projection_only_with_test_projection() {
        let state = CalibrationState::new(CalibrationConfig::default()).unwrap();
        assert!(state.projection().is_none());
        assert_eq!(state.projection_matrix(), Mat4::identity());

        let config = CalibrationConfig {
            test_projection: true,
            ..Default::default()
        };
        let state = CalibrationState::new(config).unwrap();
        assert!(state.projection().is_some());
    }

    #[test]
    fn repeated_failure_is_logged_once() {
        let mut state = CalibrationState::new(CalibrationConfig::default()).unwrap();
        let bad = CalibrationConfig {
            lines_per_inch: 0.0,
            ..Default::default()
        };
        for _ in 0..5 {
            assert_eq!(state.refresh(&bad), RefreshOutcome::Retained);
        }
        let failures = state.log().iter().filter(|e| e.is_rejection()).count();
        assert_eq!(failures, 1);
        assert!(state.calibration_error().is_some());

        assert_eq!(
            state.refresh(&CalibrationConfig::default()),
            RefreshOutcome::Updated
        );
        assert!(state.calibration_error().is_none());
        assert!(matches!(
            state.log().last().map(|e| &e.event),
            Some(LogEvent::Recovered { .. })
        ));
    }

    #[test]
    fn snapshot_json_roundtrip() {
        let snapshot = CalibrationSnapshot::compute(&CalibrationConfig::default()).unwrap();
        let json = snapshot.to_json().unwrap();
        let back: CalibrationSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lightfield, snapshot.lightfield);
        assert_eq!(back.view_map.len(), snapshot.view_map.len());
    }
}
