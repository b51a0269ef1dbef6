// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera hardware-abstraction layer

use std::fmt;
use std::sync::Arc;

/// Result type alias using CameraError
pub type CameraResult<T> = Result<T, CameraError>;

/// Opaque error shape produced by driver-level collaborators
pub type HardwareError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while normalizing raw discovery metadata
///
/// All of these are fatal: a camera whose metadata cannot be mapped aborts
/// device construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingError {
    /// The legacy generation reported a facing code outside the known set
    UnsupportedLensPosition(i32),
    /// The modern generation reported no usable lens-facing attribute
    LensPositionNotFound,
    /// The modern generation reported no sensor-orientation attribute
    CameraOrientationNotFound,
}

/// Errors surfaced by the device's selection and configuration operations
#[derive(Debug, Clone)]
pub enum CameraError {
    /// No enumerated camera matches the desired lens position
    UnsupportedLens,
    /// The selected-camera handle was read before any selection attempt
    NotStarted,
    /// Raw metadata from a discovery generation could not be normalized
    Mapping(MappingError),
    /// Parameter resolution or hardware application failed; the original
    /// cause is preserved as the error source
    Hardware(Arc<dyn std::error::Error + Send + Sync>),
}

impl CameraError {
    /// Wrap a driver-level failure, keeping it available via `source()`
    pub fn hardware(cause: HardwareError) -> Self {
        CameraError::Hardware(Arc::from(cause))
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::UnsupportedLensPosition(code) => {
                write!(f, "Lens position {} is not supported", code)
            }
            MappingError::LensPositionNotFound => write!(f, "Lens position not found"),
            MappingError::CameraOrientationNotFound => write!(f, "Camera orientation not found"),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::UnsupportedLens => {
                write!(f, "No camera with the desired lens position is available")
            }
            CameraError::NotStarted => write!(f, "Camera has not started"),
            CameraError::Mapping(e) => write!(f, "Metadata mapping failed: {}", e),
            CameraError::Hardware(cause) => write!(f, "Camera device failure: {}", cause),
        }
    }
}

impl std::error::Error for MappingError {}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CameraError::Mapping(e) => Some(e),
            CameraError::Hardware(cause) => {
                let cause: &(dyn std::error::Error + 'static) = cause.as_ref();
                Some(cause)
            }
            _ => None,
        }
    }
}

impl From<MappingError> for CameraError {
    fn from(err: MappingError) -> Self {
        CameraError::Mapping(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_hardware_error_keeps_cause() {
        let cause: HardwareError = "driver rejected parameters".into();
        let err = CameraError::hardware(cause);
        let source = err.source().expect("cause should be preserved");
        assert_eq!(source.to_string(), "driver rejected parameters");
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            CameraError::NotStarted.to_string(),
            "Camera has not started"
        );
        assert_eq!(
            MappingError::UnsupportedLensPosition(7).to_string(),
            "Lens position 7 is not supported"
        );
    }
}
