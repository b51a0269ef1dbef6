// SPDX-License-Identifier: GPL-3.0-only

//! Shared test doubles for the device integration tests
#![allow(dead_code)]

use camera_hal::{
    BoundedParametersProvider, CameraConfiguration, CameraDiscovery, CameraHardware,
    CameraParameters, Capabilities, Device, DiscoveredCamera, DiscoveryGeneration, FlashMode,
    FocusMode, FpsRange, FrameProcessor, HardwareError, HostDisplay, LensPositionSelector,
    Orientation, RawMetadata, Resolution,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Shared operation log used to assert hardware call ordering
pub type OpLog = Arc<Mutex<Vec<String>>>;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Capabilities wide enough for every configuration the tests request
pub fn test_capabilities() -> Capabilities {
    Capabilities {
        flash_modes: HashSet::from([FlashMode::Off, FlashMode::On, FlashMode::Auto]),
        focus_modes: HashSet::from([
            FocusMode::Auto,
            FocusMode::ContinuousFocus,
            FocusMode::Fixed,
        ]),
        preview_resolutions: vec![Resolution::new(640, 480), Resolution::new(1280, 720)],
        picture_resolutions: vec![Resolution::new(1920, 1080)],
        preview_fps_ranges: vec![FpsRange::new(15, 30), FpsRange::new(30, 30)],
        exposure_compensation_range: (-6, 6),
        sensor_sensitivities: vec![100, 200, 400, 800],
    }
}

/// Hardware double recording the order of driver calls
pub struct FakeHardware {
    log: OpLog,
    fail_parameters: bool,
}

impl FakeHardware {
    pub fn new(log: OpLog) -> Self {
        Self {
            log,
            fail_parameters: false,
        }
    }

    pub fn failing(log: OpLog) -> Self {
        Self {
            log,
            fail_parameters: true,
        }
    }
}

impl CameraHardware for FakeHardware {
    fn capabilities(&self) -> Capabilities {
        test_capabilities()
    }

    fn apply_parameters(&mut self, _parameters: &CameraParameters) -> Result<(), HardwareError> {
        if self.fail_parameters {
            return Err("parameters rejected by driver".into());
        }
        self.log.lock().unwrap().push("apply_parameters".into());
        Ok(())
    }

    fn attach_frame_processor(
        &mut self,
        _processor: Option<FrameProcessor>,
    ) -> Result<(), HardwareError> {
        self.log
            .lock()
            .unwrap()
            .push("attach_frame_processor".into());
        Ok(())
    }
}

/// Discovery double serving a fixed list of raw metadata records
pub struct StubDiscovery {
    pub generation: DiscoveryGeneration,
    pub cameras: Vec<(usize, RawMetadata)>,
    pub log: OpLog,
    pub fail_parameters: bool,
}

impl StubDiscovery {
    pub fn new(cameras: Vec<(usize, RawMetadata)>, log: OpLog) -> Self {
        Self {
            generation: DiscoveryGeneration::Modern,
            cameras,
            log,
            fail_parameters: false,
        }
    }
}

impl CameraDiscovery for StubDiscovery {
    fn generation(&self) -> DiscoveryGeneration {
        self.generation
    }

    fn is_available(&self) -> bool {
        true
    }

    fn discover(&self) -> Vec<DiscoveredCamera> {
        self.cameras
            .iter()
            .map(|&(camera_id, metadata)| DiscoveredCamera {
                camera_id,
                metadata,
                hardware: if self.fail_parameters {
                    Box::new(FakeHardware::failing(self.log.clone()))
                } else {
                    Box::new(FakeHardware::new(self.log.clone()))
                },
            })
            .collect()
    }
}

/// Display double pinned to one orientation
pub struct FixedDisplay(pub Orientation);

impl HostDisplay for FixedDisplay {
    fn orientation(&self) -> Orientation {
        self.0
    }
}

/// Modern-generation front camera metadata
pub fn front_camera(camera_id: usize) -> (usize, RawMetadata) {
    (
        camera_id,
        RawMetadata::Modern {
            lens_facing: Some(0),
            sensor_orientation: Some(270),
        },
    )
}

/// Modern-generation back camera metadata
pub fn back_camera(camera_id: usize) -> (usize, RawMetadata) {
    (
        camera_id,
        RawMetadata::Modern {
            lens_facing: Some(1),
            sensor_orientation: Some(90),
        },
    )
}

/// Build a device over the given metadata records, returning the shared
/// hardware operation log alongside it
pub fn device_with(
    cameras: Vec<(usize, RawMetadata)>,
    selector: LensPositionSelector,
) -> (Device, OpLog) {
    let log: OpLog = Arc::new(Mutex::new(Vec::new()));
    let device = Device::new(
        Box::new(StubDiscovery::new(cameras, log.clone())),
        Box::new(FixedDisplay(Orientation::Deg0)),
        Box::new(BoundedParametersProvider),
        CameraConfiguration::default(),
        selector,
    )
    .expect("enumeration should succeed");
    (device, log)
}

/// Same as [`device_with`] but every unit's hardware rejects parameters
pub fn failing_device_with(
    cameras: Vec<(usize, RawMetadata)>,
    selector: LensPositionSelector,
) -> (Device, OpLog) {
    let log: OpLog = Arc::new(Mutex::new(Vec::new()));
    let mut discovery = StubDiscovery::new(cameras, log.clone());
    discovery.fail_parameters = true;
    let device = Device::new(
        Box::new(discovery),
        Box::new(FixedDisplay(Orientation::Deg0)),
        Box::new(BoundedParametersProvider),
        CameraConfiguration::default(),
        selector,
    )
    .expect("enumeration should succeed");
    (device, log)
}
