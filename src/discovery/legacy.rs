// SPDX-License-Identifier: GPL-3.0-only

//! Legacy-generation discovery adapter
//!
//! The legacy API identifies cameras by a dense integer range
//! `0..number_of_cameras()` and reports facing and mount orientation as plain
//! integers per camera.

use super::{CameraDiscovery, DiscoveredCamera, DiscoveryGeneration};
use crate::characteristics::RawMetadata;
use crate::unit::CameraHardware;
use tracing::debug;

/// Raw info record the legacy API returns for one camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyCameraInfo {
    /// Facing code, see [`crate::characteristics::legacy_facing`]
    pub facing: i32,
    /// Mount orientation in degrees
    pub orientation: i32,
}

/// Narrow contract over the legacy host camera API
pub trait LegacyCameraApi: Send + Sync {
    /// Number of cameras the host exposes through the legacy API
    fn number_of_cameras(&self) -> usize;

    /// Raw info for the given camera id
    fn camera_info(&self, camera_id: usize) -> LegacyCameraInfo;

    /// Open hardware access for the given camera id
    fn open(&self, camera_id: usize) -> Box<dyn CameraHardware>;
}

/// [`CameraDiscovery`] implementation backed by the legacy host API
pub struct LegacyDiscovery<A> {
    api: A,
}

impl<A: LegacyCameraApi> LegacyDiscovery<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: LegacyCameraApi> CameraDiscovery for LegacyDiscovery<A> {
    fn generation(&self) -> DiscoveryGeneration {
        DiscoveryGeneration::Legacy
    }

    fn is_available(&self) -> bool {
        // the legacy API exists on every supported host
        true
    }

    fn discover(&self) -> Vec<DiscoveredCamera> {
        (0..self.api.number_of_cameras())
            .map(|camera_id| {
                let info = self.api.camera_info(camera_id);
                debug!(camera_id, facing = info.facing, "discovered legacy camera");
                DiscoveredCamera {
                    camera_id,
                    metadata: RawMetadata::Legacy {
                        facing: info.facing,
                        orientation: info.orientation,
                    },
                    hardware: self.api.open(camera_id),
                }
            })
            .collect()
    }
}
