// SPDX-License-Identifier: GPL-3.0-only

//! Modern-generation discovery adapter
//!
//! The modern API enumerates cameras through a host service and describes
//! each one with a property bag. Properties are individually optional at the
//! wire level; the characteristics mapper treats missing mandatory ones as
//! fatal.

use super::{CameraDiscovery, DiscoveredCamera, DiscoveryGeneration};
use crate::characteristics::RawMetadata;
use crate::unit::CameraHardware;
use tracing::debug;

/// Narrow contract over the modern host camera service
pub trait ModernCameraApi: Send + Sync {
    /// Whether the modern camera service is present on this host
    fn is_available(&self) -> bool;

    /// Identifiers of every camera known to the service, in service order
    fn camera_ids(&self) -> Vec<usize>;

    /// Lens-facing attribute, if the property bag carries one.
    /// See [`crate::characteristics::modern_facing`] for the codes.
    fn lens_facing(&self, camera_id: usize) -> Option<i32>;

    /// Signed sensor-orientation attribute, if the property bag carries one
    fn sensor_orientation(&self, camera_id: usize) -> Option<i32>;

    /// Open hardware access for the given camera id
    fn open(&self, camera_id: usize) -> Box<dyn CameraHardware>;
}

/// [`CameraDiscovery`] implementation backed by the modern host service
pub struct ModernDiscovery<A> {
    api: A,
}

impl<A: ModernCameraApi> ModernDiscovery<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: ModernCameraApi> CameraDiscovery for ModernDiscovery<A> {
    fn generation(&self) -> DiscoveryGeneration {
        DiscoveryGeneration::Modern
    }

    fn is_available(&self) -> bool {
        self.api.is_available()
    }

    fn discover(&self) -> Vec<DiscoveredCamera> {
        self.api
            .camera_ids()
            .into_iter()
            .map(|camera_id| {
                debug!(camera_id, "discovered modern camera");
                DiscoveredCamera {
                    camera_id,
                    metadata: RawMetadata::Modern {
                        lens_facing: self.api.lens_facing(camera_id),
                        sensor_orientation: self.api.sensor_orientation(camera_id),
                    },
                    hardware: self.api.open(camera_id),
                }
            })
            .collect()
    }
}
