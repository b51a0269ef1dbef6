// SPDX-License-Identifier: GPL-3.0-only

//! Normalized camera unit characteristics
//!
//! The two discovery generations report lens facing and sensor orientation in
//! incompatible encodings. This module collapses raw metadata from either
//! generation into one immutable [`Characteristics`] record.

use crate::errors::MappingError;
use crate::orientation::Orientation;
use serde::{Deserialize, Serialize};

/// Logical facing of a camera unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LensPosition {
    /// User-facing camera (selfie side)
    Front,
    /// World-facing camera
    Back,
    /// Detachable or otherwise external camera
    External,
}

impl std::fmt::Display for LensPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LensPosition::Front => write!(f, "front"),
            LensPosition::Back => write!(f, "back"),
            LensPosition::External => write!(f, "external"),
        }
    }
}

/// Facing codes reported by the legacy discovery generation
pub mod legacy_facing {
    pub const BACK: i32 = 0;
    pub const FRONT: i32 = 1;
    /// Some hosts with dual cameras report external units through the legacy
    /// API with the modern generation's code.
    pub const EXTERNAL: i32 = 2;
}

/// Facing codes reported by the modern discovery generation
pub mod modern_facing {
    pub const FRONT: i32 = 0;
    pub const BACK: i32 = 1;
    pub const EXTERNAL: i32 = 2;
}

/// Raw per-unit metadata as reported by a discovery generation
///
/// Tagged by generation; [`Characteristics::from_raw`] normalizes both
/// variants into the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawMetadata {
    /// Legacy generation: plain integer facing code and mount orientation
    Legacy { facing: i32, orientation: i32 },
    /// Modern generation: attributes read from the camera's property bag.
    /// Both are mandatory; a missing attribute is a mapping error.
    Modern {
        lens_facing: Option<i32>,
        sensor_orientation: Option<i32>,
    },
}

/// Normalized, immutable identity and orientation record for one camera unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristics {
    /// Unique id within one enumeration pass
    pub camera_id: usize,
    /// Logical facing of the unit
    pub lens_position: LensPosition,
    /// Mount orientation of the sensor
    pub camera_orientation: Orientation,
    /// Whether frames arrive mirrored. Always derived from the lens
    /// position; front-facing units mirror, everything else does not.
    pub is_mirrored: bool,
}

impl Characteristics {
    /// Build a record with the mirroring flag derived from the lens position
    pub fn new(
        camera_id: usize,
        lens_position: LensPosition,
        camera_orientation: Orientation,
    ) -> Self {
        Self {
            camera_id,
            lens_position,
            camera_orientation,
            is_mirrored: lens_position == LensPosition::Front,
        }
    }

    /// Normalize raw metadata from either discovery generation.
    ///
    /// # Errors
    ///
    /// * `MappingError::UnsupportedLensPosition` - legacy facing code outside
    ///   the known set
    /// * `MappingError::LensPositionNotFound` - modern lens-facing attribute
    ///   missing or unrecognized
    /// * `MappingError::CameraOrientationNotFound` - modern sensor-orientation
    ///   attribute missing
    pub fn from_raw(camera_id: usize, metadata: &RawMetadata) -> Result<Self, MappingError> {
        match *metadata {
            RawMetadata::Legacy {
                facing,
                orientation,
            } => {
                let lens_position = match facing {
                    legacy_facing::BACK => LensPosition::Back,
                    legacy_facing::FRONT => LensPosition::Front,
                    legacy_facing::EXTERNAL => LensPosition::External,
                    code => return Err(MappingError::UnsupportedLensPosition(code)),
                };
                Ok(Self::new(
                    camera_id,
                    lens_position,
                    Orientation::from_degrees(orientation),
                ))
            }
            RawMetadata::Modern {
                lens_facing,
                sensor_orientation,
            } => {
                let lens_position = match lens_facing {
                    Some(modern_facing::FRONT) => LensPosition::Front,
                    Some(modern_facing::BACK) => LensPosition::Back,
                    Some(modern_facing::EXTERNAL) => LensPosition::External,
                    _ => return Err(MappingError::LensPositionNotFound),
                };
                let degrees =
                    sensor_orientation.ok_or(MappingError::CameraOrientationNotFound)?;
                Ok(Self::new(
                    camera_id,
                    lens_position,
                    Orientation::from_degrees(degrees),
                ))
            }
        }
    }
}
