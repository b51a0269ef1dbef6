// SPDX-License-Identifier: GPL-3.0-only

//! Orientation handling for camera sensors and the host display
//!
//! Camera sensors may be physically mounted at various angles relative to the
//! device. Discovery metadata reports the mount angle as an arbitrary signed
//! integer; this module collapses it into the four angles sensors are
//! actually mounted at.

use serde::{Deserialize, Serialize};

/// Orientation in degrees, clockwise, normalized to multiples of 90
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// 0 degrees
    #[default]
    Deg0,
    /// 90 degrees clockwise
    Deg90,
    /// 180 degrees (upside down)
    Deg180,
    /// 270 degrees clockwise
    Deg270,
}

impl Orientation {
    /// Normalize an arbitrary degree value.
    ///
    /// The value is reduced modulo 360 (negative values wrap: -90 becomes
    /// 270), then rounded to the nearest multiple of 90 with ties rounding
    /// up, so 44 maps to 0 and 45 maps to 90. 315 and above wrap back to 0.
    pub fn from_degrees(degrees: i32) -> Self {
        let reduced = degrees.rem_euclid(360);
        match ((reduced + 45) / 90) % 4 {
            1 => Orientation::Deg90,
            2 => Orientation::Deg180,
            3 => Orientation::Deg270,
            _ => Orientation::Deg0,
        }
    }

    /// Degree value of this orientation
    pub fn degrees(&self) -> i32 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }

    /// Check if this orientation swaps width and height
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, Orientation::Deg90 | Orientation::Deg270)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Read-only access to the orientation of the host display
///
/// External collaborator: the device consults it to relate sensor mount
/// orientation to what the user currently sees. Implementations must not
/// block.
pub trait HostDisplay: Send + Sync {
    /// Current orientation of the display
    fn orientation(&self) -> Orientation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_values() {
        assert_eq!(Orientation::from_degrees(0), Orientation::Deg0);
        assert_eq!(Orientation::from_degrees(90), Orientation::Deg90);
        assert_eq!(Orientation::from_degrees(180), Orientation::Deg180);
        assert_eq!(Orientation::from_degrees(270), Orientation::Deg270);
    }

    #[test]
    fn test_wrapping() {
        assert_eq!(Orientation::from_degrees(360), Orientation::Deg0);
        assert_eq!(Orientation::from_degrees(450), Orientation::Deg90);
        assert_eq!(Orientation::from_degrees(-90), Orientation::Deg270);
        assert_eq!(Orientation::from_degrees(-360), Orientation::Deg0);
    }

    #[test]
    fn test_rounding_ties_up() {
        assert_eq!(Orientation::from_degrees(44), Orientation::Deg0);
        assert_eq!(Orientation::from_degrees(45), Orientation::Deg90);
        assert_eq!(Orientation::from_degrees(46), Orientation::Deg90);
        assert_eq!(Orientation::from_degrees(134), Orientation::Deg90);
        assert_eq!(Orientation::from_degrees(135), Orientation::Deg180);
        // 315 rounds up past 270 and wraps to 0
        assert_eq!(Orientation::from_degrees(315), Orientation::Deg0);
        assert_eq!(Orientation::from_degrees(314), Orientation::Deg270);
    }

    #[test]
    fn test_swaps_dimensions() {
        assert!(Orientation::Deg90.swaps_dimensions());
        assert!(Orientation::Deg270.swaps_dimensions());
        assert!(!Orientation::Deg0.swaps_dimensions());
        assert!(!Orientation::Deg180.swaps_dimensions());
    }
}
