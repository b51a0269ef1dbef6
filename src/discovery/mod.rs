// SPDX-License-Identifier: GPL-3.0-only

//! Discovery abstraction over the two camera API generations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │       Device        │  ← selection + configuration orchestration
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraDiscovery     │  ← common interface, one generation per device
//! └─────┬─────────┬─────┘
//!       │         │
//!       ▼         ▼
//!  ┌────────┐ ┌────────┐
//!  │ Legacy │ │ Modern │  ← host-API adapters
//!  └────────┘ └────────┘
//! ```
//!
//! The generation is chosen exactly once, at device construction, via
//! [`discovery_for_host`]; the rest of the crate depends only on the trait
//! and never mixes generations within one device.

pub mod legacy;
pub mod modern;

pub use legacy::{LegacyCameraApi, LegacyCameraInfo, LegacyDiscovery};
pub use modern::{ModernCameraApi, ModernDiscovery};

use crate::characteristics::RawMetadata;
use crate::unit::CameraHardware;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Camera discovery generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DiscoveryGeneration {
    /// Original integer-id camera API
    Legacy,
    /// Property-bag camera API available on newer hosts
    #[default]
    Modern,
}

impl std::fmt::Display for DiscoveryGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryGeneration::Legacy => write!(f, "legacy"),
            DiscoveryGeneration::Modern => write!(f, "modern"),
        }
    }
}

/// One camera as reported by a discovery provider, before characteristics
/// normalization
pub struct DiscoveredCamera {
    /// Identity within this enumeration pass
    pub camera_id: usize,
    /// Raw metadata in the reporting generation's shape
    pub metadata: RawMetadata,
    /// Exclusive hardware access for this camera
    pub hardware: Box<dyn CameraHardware>,
}

impl std::fmt::Debug for DiscoveredCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveredCamera")
            .field("camera_id", &self.camera_id)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// A source of camera units for one API generation
pub trait CameraDiscovery: Send + Sync {
    /// Which generation this provider speaks
    fn generation(&self) -> DiscoveryGeneration;

    /// Check whether this generation is usable on the current host
    fn is_available(&self) -> bool;

    /// Enumerate every camera this generation exposes, in stable host order
    fn discover(&self) -> Vec<DiscoveredCamera>;
}

/// Pick the discovery provider for this host.
///
/// The modern generation wins when the host supports it; otherwise the
/// legacy generation is used. Exactly one provider serves a device for its
/// whole lifetime.
pub fn discovery_for_host(
    modern: Box<dyn CameraDiscovery>,
    legacy: Box<dyn CameraDiscovery>,
) -> Box<dyn CameraDiscovery> {
    let provider = if modern.is_available() { modern } else { legacy };
    info!(generation = %provider.generation(), "selected camera discovery generation");
    provider
}
