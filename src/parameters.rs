// SPDX-License-Identifier: GPL-3.0-only

//! Hardware capabilities and concrete camera parameters
//!
//! [`Capabilities`] describes what one camera unit can do; [`CameraParameters`]
//! is the concrete, driver-ready result of resolving a saved configuration
//! against those capabilities. The resolution step itself lives behind the
//! [`ParametersProvider`] boundary.

use crate::config::{CameraConfiguration, FlashMode, FocusMode, FpsRange, Resolution};
use crate::errors::HardwareError;
use std::collections::HashSet;

/// Resolved hardware limits and options for one camera unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Flash modes the driver accepts
    pub flash_modes: HashSet<FlashMode>,
    /// Focus modes the driver accepts
    pub focus_modes: HashSet<FocusMode>,
    /// Supported preview resolutions
    pub preview_resolutions: Vec<Resolution>,
    /// Supported still-picture resolutions
    pub picture_resolutions: Vec<Resolution>,
    /// Supported preview fps ranges
    pub preview_fps_ranges: Vec<FpsRange>,
    /// Inclusive exposure compensation range in driver steps
    pub exposure_compensation_range: (i32, i32),
    /// Supported ISO values; empty means the sensor is always automatic
    pub sensor_sensitivities: Vec<u32>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            flash_modes: HashSet::from([FlashMode::Off]),
            focus_modes: HashSet::from([FocusMode::Auto, FocusMode::Fixed]),
            preview_resolutions: vec![Resolution::new(640, 480)],
            picture_resolutions: vec![Resolution::new(640, 480)],
            preview_fps_ranges: vec![FpsRange::default()],
            exposure_compensation_range: (0, 0),
            sensor_sensitivities: Vec::new(),
        }
    }
}

/// Concrete driver parameters produced by parameter resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraParameters {
    pub flash_mode: FlashMode,
    pub focus_mode: FocusMode,
    pub exposure_compensation: i32,
    pub preview_fps_range: FpsRange,
    pub sensor_sensitivity: Option<u32>,
    pub preview_resolution: Resolution,
    pub picture_resolution: Resolution,
}

/// Resolves a saved configuration against a unit's capabilities
///
/// External collaborator boundary. The device calls `resolve` on every
/// configuration application and wraps any failure into the hardware error
/// kind; implementations are free to fail with any error shape.
pub trait ParametersProvider: Send + Sync {
    /// Turn the desired configuration into concrete parameters the given
    /// capabilities can satisfy
    fn resolve(
        &self,
        configuration: &CameraConfiguration,
        capabilities: &Capabilities,
    ) -> Result<CameraParameters, HardwareError>;
}

/// Capability-bounding provider used when the embedder does not supply one
///
/// Rejects flash and focus modes the capabilities do not list, clamps
/// exposure compensation into the supported range, falls back to the highest
/// supported resolutions and the widest fps range when the configuration does
/// not pin one, and drops a requested ISO the sensor does not support back to
/// automatic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedParametersProvider;

impl ParametersProvider for BoundedParametersProvider {
    fn resolve(
        &self,
        configuration: &CameraConfiguration,
        capabilities: &Capabilities,
    ) -> Result<CameraParameters, HardwareError> {
        if !capabilities.flash_modes.contains(&configuration.flash_mode) {
            return Err(format!(
                "flash mode {:?} is not supported by this camera",
                configuration.flash_mode
            )
            .into());
        }
        if !capabilities.focus_modes.contains(&configuration.focus_mode) {
            return Err(format!(
                "focus mode {:?} is not supported by this camera",
                configuration.focus_mode
            )
            .into());
        }

        let (min_ev, max_ev) = capabilities.exposure_compensation_range;
        let exposure_compensation = configuration.exposure_compensation.clamp(min_ev, max_ev);

        let preview_resolution = pick_resolution(
            configuration.preview_resolution,
            &capabilities.preview_resolutions,
        )
        .ok_or("camera reports no preview resolutions")?;
        let picture_resolution = pick_resolution(
            configuration.picture_resolution,
            &capabilities.picture_resolutions,
        )
        .ok_or("camera reports no picture resolutions")?;

        let preview_fps_range = if capabilities
            .preview_fps_ranges
            .contains(&configuration.preview_fps_range)
        {
            configuration.preview_fps_range
        } else {
            widest_range(&capabilities.preview_fps_ranges)
                .ok_or("camera reports no preview fps ranges")?
        };

        let sensor_sensitivity = configuration
            .sensor_sensitivity
            .filter(|iso| capabilities.sensor_sensitivities.contains(iso));

        Ok(CameraParameters {
            flash_mode: configuration.flash_mode,
            focus_mode: configuration.focus_mode,
            exposure_compensation,
            preview_fps_range,
            sensor_sensitivity,
            preview_resolution,
            picture_resolution,
        })
    }
}

/// The requested resolution if the camera supports it, else the largest one
fn pick_resolution(requested: Option<Resolution>, supported: &[Resolution]) -> Option<Resolution> {
    requested
        .filter(|resolution| supported.contains(resolution))
        .or_else(|| supported.iter().copied().max_by_key(Resolution::area))
}

fn widest_range(ranges: &[FpsRange]) -> Option<FpsRange> {
    ranges.iter().copied().max_by_key(FpsRange::span)
}
