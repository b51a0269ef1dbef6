// SPDX-License-Identifier: GPL-3.0-only

//! Camera configuration model
//!
//! [`CameraConfiguration`] is the durable, fully-populated desired state of
//! the device: every field always carries a value, possibly a default.
//! [`UpdateConfiguration`] is the sparse counterpart callers hand in when
//! they want to change only some fields; it is consumed by
//! [`CameraConfiguration::merge`] and discarded.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Flash mode requested for capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlashMode {
    /// Flash disabled
    #[default]
    Off,
    /// Flash fires on every capture
    On,
    /// Flash fires when the scene is dark
    Auto,
    /// Flash stays lit continuously
    Torch,
}

/// Focus mode requested for the preview and capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FocusMode {
    /// Single autofocus pass on demand
    #[default]
    Auto,
    /// Continuous autofocus while previewing
    ContinuousFocus,
    /// Focus fixed by the driver
    Fixed,
    /// Focus at infinity
    Infinity,
    /// Close-up focus
    Macro,
}

/// Resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count, used to rank resolutions
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Preview frames-per-second range, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FpsRange {
    pub min: u32,
    pub max: u32,
}

impl FpsRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Width of the range, used to pick the most permissive one
    pub fn span(&self) -> u32 {
        self.max.saturating_sub(self.min)
    }
}

impl Default for FpsRange {
    fn default() -> Self {
        Self { min: 30, max: 30 }
    }
}

impl std::fmt::Display for FpsRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}fps", self.min, self.max)
    }
}

/// One frame handed to the frame-processing hook
#[derive(Debug, Clone)]
pub struct Frame {
    /// Dimensions of the image buffer
    pub resolution: Resolution,
    /// Raw image bytes in the driver's preview format
    pub image: Vec<u8>,
    /// Clockwise rotation to apply before the frame is upright
    pub rotation_degrees: i32,
}

/// Opaque frame-processing hook attached to the active camera
///
/// Absence means frames are dropped without processing.
pub type FrameProcessor = Arc<dyn Fn(Frame) + Send + Sync>;

/// The durable, fully-populated camera configuration
///
/// Mutated only through [`CameraConfiguration::merge`]; partial state never
/// exists here.
#[derive(Clone, Default)]
pub struct CameraConfiguration {
    pub flash_mode: FlashMode,
    pub focus_mode: FocusMode,
    /// Exposure compensation in driver steps around 0
    pub exposure_compensation: i32,
    pub preview_fps_range: FpsRange,
    /// Requested ISO; `None` leaves the sensor in automatic mode
    pub sensor_sensitivity: Option<u32>,
    /// `None` picks the highest preview resolution the camera supports
    pub preview_resolution: Option<Resolution>,
    /// `None` picks the highest picture resolution the camera supports
    pub picture_resolution: Option<Resolution>,
    /// `None` means no frame-processing hook is attached
    pub frame_processor: Option<FrameProcessor>,
}

impl CameraConfiguration {
    /// Merge a sparse update into this configuration.
    ///
    /// Field by field: the update's value wins where present, the saved value
    /// survives where absent. The result is always fully populated; merging
    /// an all-absent update returns the configuration unchanged.
    pub fn merge(&self, update: &UpdateConfiguration) -> CameraConfiguration {
        CameraConfiguration {
            flash_mode: update.flash_mode.unwrap_or(self.flash_mode),
            focus_mode: update.focus_mode.unwrap_or(self.focus_mode),
            exposure_compensation: update
                .exposure_compensation
                .unwrap_or(self.exposure_compensation),
            preview_fps_range: update.preview_fps_range.unwrap_or(self.preview_fps_range),
            sensor_sensitivity: update.sensor_sensitivity.or(self.sensor_sensitivity),
            preview_resolution: update.preview_resolution.or(self.preview_resolution),
            picture_resolution: update.picture_resolution.or(self.picture_resolution),
            frame_processor: update
                .frame_processor
                .clone()
                .or_else(|| self.frame_processor.clone()),
        }
    }
}

impl std::fmt::Debug for CameraConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraConfiguration")
            .field("flash_mode", &self.flash_mode)
            .field("focus_mode", &self.focus_mode)
            .field("exposure_compensation", &self.exposure_compensation)
            .field("preview_fps_range", &self.preview_fps_range)
            .field("sensor_sensitivity", &self.sensor_sensitivity)
            .field("preview_resolution", &self.preview_resolution)
            .field("picture_resolution", &self.picture_resolution)
            .field(
                "frame_processor",
                &self.frame_processor.as_ref().map(|_| "<attached>"),
            )
            .finish()
    }
}

/// A sparse configuration update: only present fields change
#[derive(Clone, Default)]
pub struct UpdateConfiguration {
    pub flash_mode: Option<FlashMode>,
    pub focus_mode: Option<FocusMode>,
    pub exposure_compensation: Option<i32>,
    pub preview_fps_range: Option<FpsRange>,
    pub sensor_sensitivity: Option<u32>,
    pub preview_resolution: Option<Resolution>,
    pub picture_resolution: Option<Resolution>,
    pub frame_processor: Option<FrameProcessor>,
}

impl UpdateConfiguration {
    pub fn with_flash_mode(mut self, flash_mode: FlashMode) -> Self {
        self.flash_mode = Some(flash_mode);
        self
    }

    pub fn with_focus_mode(mut self, focus_mode: FocusMode) -> Self {
        self.focus_mode = Some(focus_mode);
        self
    }

    pub fn with_exposure_compensation(mut self, exposure_compensation: i32) -> Self {
        self.exposure_compensation = Some(exposure_compensation);
        self
    }

    pub fn with_preview_fps_range(mut self, preview_fps_range: FpsRange) -> Self {
        self.preview_fps_range = Some(preview_fps_range);
        self
    }

    pub fn with_sensor_sensitivity(mut self, sensor_sensitivity: u32) -> Self {
        self.sensor_sensitivity = Some(sensor_sensitivity);
        self
    }

    pub fn with_preview_resolution(mut self, preview_resolution: Resolution) -> Self {
        self.preview_resolution = Some(preview_resolution);
        self
    }

    pub fn with_picture_resolution(mut self, picture_resolution: Resolution) -> Self {
        self.picture_resolution = Some(picture_resolution);
        self
    }

    pub fn with_frame_processor(mut self, frame_processor: FrameProcessor) -> Self {
        self.frame_processor = Some(frame_processor);
        self
    }
}

impl std::fmt::Debug for UpdateConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateConfiguration")
            .field("flash_mode", &self.flash_mode)
            .field("focus_mode", &self.focus_mode)
            .field("exposure_compensation", &self.exposure_compensation)
            .field("preview_fps_range", &self.preview_fps_range)
            .field("sensor_sensitivity", &self.sensor_sensitivity)
            .field("preview_resolution", &self.preview_resolution)
            .field("picture_resolution", &self.picture_resolution)
            .field(
                "frame_processor",
                &self.frame_processor.as_ref().map(|_| "<present>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_identity() {
        let saved = CameraConfiguration {
            flash_mode: FlashMode::Torch,
            focus_mode: FocusMode::Macro,
            exposure_compensation: -2,
            preview_fps_range: FpsRange::new(15, 30),
            sensor_sensitivity: Some(800),
            preview_resolution: Some(Resolution::new(1280, 720)),
            picture_resolution: Some(Resolution::new(1920, 1080)),
            frame_processor: None,
        };

        let merged = saved.merge(&UpdateConfiguration::default());

        assert_eq!(merged.flash_mode, saved.flash_mode);
        assert_eq!(merged.focus_mode, saved.focus_mode);
        assert_eq!(merged.exposure_compensation, saved.exposure_compensation);
        assert_eq!(merged.preview_fps_range, saved.preview_fps_range);
        assert_eq!(merged.sensor_sensitivity, saved.sensor_sensitivity);
        assert_eq!(merged.preview_resolution, saved.preview_resolution);
        assert_eq!(merged.picture_resolution, saved.picture_resolution);
        assert!(merged.frame_processor.is_none());
    }

    #[test]
    fn test_merge_prefers_present_fields() {
        let saved = CameraConfiguration::default();
        let update = UpdateConfiguration::default()
            .with_flash_mode(FlashMode::On)
            .with_exposure_compensation(3);

        let merged = saved.merge(&update);

        assert_eq!(merged.flash_mode, FlashMode::On);
        assert_eq!(merged.exposure_compensation, 3);
        // untouched fields keep their saved values
        assert_eq!(merged.focus_mode, saved.focus_mode);
        assert_eq!(merged.preview_fps_range, saved.preview_fps_range);
    }

    #[test]
    fn test_merge_never_clears_a_field() {
        let processor: FrameProcessor = Arc::new(|_frame| {});
        let saved = CameraConfiguration::default().merge(
            &UpdateConfiguration::default()
                .with_frame_processor(processor)
                .with_sensor_sensitivity(400),
        );

        let merged = saved.merge(&UpdateConfiguration::default());

        assert!(merged.frame_processor.is_some());
        assert_eq!(merged.sensor_sensitivity, Some(400));
    }

    #[test]
    fn test_merge_accumulates_across_updates() {
        let saved = CameraConfiguration::default();
        let saved = saved.merge(&UpdateConfiguration::default().with_flash_mode(FlashMode::On));
        let saved = saved.merge(&UpdateConfiguration::default().with_focus_mode(FocusMode::Auto));

        assert_eq!(saved.flash_mode, FlashMode::On);
        assert_eq!(saved.focus_mode, FocusMode::Auto);
    }
}
