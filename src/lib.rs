// SPDX-License-Identifier: GPL-3.0-only

//! Camera HAL - a hardware-abstraction layer unifying two generations of a
//! host's camera discovery and control APIs behind one device model.
//!
//! The crate enumerates camera units through whichever discovery generation
//! the host supports, applies a caller-supplied lens-position policy to pick
//! one, publishes that choice through a single-assignment asynchronous
//! handle, and reconciles sparse configuration updates into concrete,
//! capability-bounded camera parameters.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │            Device            │  ← selection + configuration lifecycle
//! └──────┬────────────────┬──────┘
//!        │                │
//!        ▼                ▼
//! ┌─────────────┐  ┌─────────────────┐
//! │  selector   │  │ CameraDiscovery │  ← one generation per host
//! └─────────────┘  └───┬─────────┬───┘
//!                      ▼         ▼
//!                 ┌────────┐ ┌────────┐
//!                 │ Legacy │ │ Modern │
//!                 └────────┘ └────────┘
//! ```
//!
//! # Modules
//!
//! - [`device`]: the [`Device`] orchestrator and selected-camera handle
//! - [`discovery`]: discovery generations and host-API adapters
//! - [`characteristics`]: raw-metadata normalization
//! - [`selector`]: lens-position selection policies
//! - [`config`]: saved and sparse-update configuration, merge
//! - [`parameters`]: capabilities and the parameter-resolution boundary
//! - [`unit`]: camera units and the driver-access boundary
//! - [`orientation`]: degree normalization and the display collaborator
//! - [`errors`]: error taxonomy
//!
//! # Example
//!
//! ```ignore
//! let device = Device::new(
//!     discovery_for_host(modern, legacy),
//!     display,
//!     Box::new(BoundedParametersProvider),
//!     CameraConfiguration::default(),
//!     selector::back(),
//! )?;
//! device.select_camera();
//! let camera = device.await_selected_camera().await?;
//! device.update_camera_configuration(&camera)?;
//! ```

pub mod characteristics;
pub mod config;
pub mod device;
pub mod discovery;
pub mod errors;
pub mod orientation;
pub mod parameters;
pub mod selector;
pub mod unit;

// Re-export commonly used types
pub use characteristics::{Characteristics, LensPosition, RawMetadata};
pub use config::{
    CameraConfiguration, FlashMode, FocusMode, FpsRange, Frame, FrameProcessor, Resolution,
    UpdateConfiguration,
};
pub use device::Device;
pub use discovery::{
    CameraDiscovery, DiscoveredCamera, DiscoveryGeneration, LegacyCameraApi, LegacyCameraInfo,
    LegacyDiscovery, ModernCameraApi, ModernDiscovery, discovery_for_host,
};
pub use errors::{CameraError, CameraResult, HardwareError, MappingError};
pub use orientation::{HostDisplay, Orientation};
pub use parameters::{BoundedParametersProvider, CameraParameters, Capabilities, ParametersProvider};
pub use selector::{LensPositionSelector, select_unit};
pub use unit::{CameraHardware, CameraUnit};
