// SPDX-License-Identifier: GPL-3.0-only

//! Camera unit modeling
//!
//! A [`CameraUnit`] pairs the normalized characteristics of one physical
//! camera with exclusive access to its hardware resource. Units are
//! enumerated once at device construction and the list never changes
//! afterwards, so characteristics reads need no synchronization; hardware
//! access goes through an internal mutex so a unit can be shared behind an
//! `Arc`.

use crate::characteristics::Characteristics;
use crate::config::FrameProcessor;
use crate::errors::HardwareError;
use crate::parameters::{CameraParameters, Capabilities};
use std::sync::Mutex;
use tracing::debug;

/// Driver-level access to one camera, supplied by the discovery provider
///
/// Implementations may fail with any error shape; the device layer wraps
/// every failure into its hardware error kind and keeps the cause.
pub trait CameraHardware: Send {
    /// Resolved hardware limits and options for this camera
    fn capabilities(&self) -> Capabilities;

    /// Apply concrete parameters to the driver
    fn apply_parameters(&mut self, parameters: &CameraParameters) -> Result<(), HardwareError>;

    /// Attach the frame-processing hook, or detach it with `None`
    fn attach_frame_processor(
        &mut self,
        processor: Option<FrameProcessor>,
    ) -> Result<(), HardwareError>;
}

/// One physical camera: identity, characteristics, and hardware access
pub struct CameraUnit {
    camera_id: usize,
    characteristics: Characteristics,
    hardware: Mutex<Box<dyn CameraHardware>>,
}

impl CameraUnit {
    pub(crate) fn new(
        camera_id: usize,
        characteristics: Characteristics,
        hardware: Box<dyn CameraHardware>,
    ) -> Self {
        Self {
            camera_id,
            characteristics,
            hardware: Mutex::new(hardware),
        }
    }

    /// Unique id within the device's enumeration pass
    pub fn camera_id(&self) -> usize {
        self.camera_id
    }

    /// Normalized characteristics of this unit
    pub fn characteristics(&self) -> &Characteristics {
        &self.characteristics
    }

    /// Query the driver for this unit's capabilities
    pub fn capabilities(&self) -> Capabilities {
        self.hardware.lock().unwrap().capabilities()
    }

    /// Apply concrete parameters to the driver
    pub fn apply_parameters(&self, parameters: &CameraParameters) -> Result<(), HardwareError> {
        debug!(camera_id = self.camera_id, "applying camera parameters");
        self.hardware.lock().unwrap().apply_parameters(parameters)
    }

    /// Attach (or with `None`, detach) the frame-processing hook
    pub fn attach_frame_processor(
        &self,
        processor: Option<FrameProcessor>,
    ) -> Result<(), HardwareError> {
        debug!(
            camera_id = self.camera_id,
            attached = processor.is_some(),
            "attaching frame processor"
        );
        self.hardware.lock().unwrap().attach_frame_processor(processor)
    }
}

impl std::fmt::Debug for CameraUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraUnit")
            .field("camera_id", &self.camera_id)
            .field("characteristics", &self.characteristics)
            .finish()
    }
}
