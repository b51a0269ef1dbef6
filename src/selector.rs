// SPDX-License-Identifier: GPL-3.0-only

//! Lens-position selection policy
//!
//! A selector is a pure policy over the *set* of lens positions present on
//! the host: given the available positions it names the one it wants, or
//! none. Evaluating a selector against the enumerated units is
//! [`select_unit`]; the combinators below cover the common policies.

use crate::characteristics::LensPosition;
use crate::unit::CameraUnit;
use std::collections::HashSet;
use std::sync::Arc;

/// Policy choosing one lens position from the set available on the host
pub type LensPositionSelector =
    Arc<dyn Fn(&HashSet<LensPosition>) -> Option<LensPosition> + Send + Sync>;

/// Selector matching exactly the given lens position
pub fn lens_position(desired: LensPosition) -> LensPositionSelector {
    Arc::new(move |available| available.contains(&desired).then_some(desired))
}

/// Selector for the front-facing camera
pub fn front() -> LensPositionSelector {
    lens_position(LensPosition::Front)
}

/// Selector for the back-facing camera
pub fn back() -> LensPositionSelector {
    lens_position(LensPosition::Back)
}

/// Selector for an external camera
pub fn external() -> LensPositionSelector {
    lens_position(LensPosition::External)
}

/// First selector in the list that produces a position wins
pub fn first_available<I>(selectors: I) -> LensPositionSelector
where
    I: IntoIterator<Item = LensPositionSelector>,
{
    let selectors: Vec<LensPositionSelector> = selectors.into_iter().collect();
    Arc::new(move |available| {
        selectors
            .iter()
            .find_map(|selector| selector(available))
    })
}

/// Evaluate a selector over the enumerated units.
///
/// The distinct lens positions are collected into a set and handed to the
/// selector. If it names a position, the first unit in enumeration order
/// carrying that position wins, which keeps selection deterministic when
/// several units share a position.
pub fn select_unit(
    units: &[Arc<CameraUnit>],
    selector: &LensPositionSelector,
) -> Option<Arc<CameraUnit>> {
    let available: HashSet<LensPosition> = units
        .iter()
        .map(|unit| unit.characteristics().lens_position)
        .collect();
    let desired = selector(&available)?;

    units
        .iter()
        .find(|unit| unit.characteristics().lens_position == desired)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristics::Characteristics;
    use crate::config::FrameProcessor;
    use crate::errors::HardwareError;
    use crate::orientation::Orientation;
    use crate::parameters::{CameraParameters, Capabilities};
    use crate::unit::CameraHardware;

    struct NullHardware;

    impl CameraHardware for NullHardware {
        fn capabilities(&self) -> Capabilities {
            Capabilities::default()
        }

        fn apply_parameters(&mut self, _: &CameraParameters) -> Result<(), HardwareError> {
            Ok(())
        }

        fn attach_frame_processor(
            &mut self,
            _: Option<FrameProcessor>,
        ) -> Result<(), HardwareError> {
            Ok(())
        }
    }

    fn unit(camera_id: usize, lens_position: LensPosition) -> Arc<CameraUnit> {
        Arc::new(CameraUnit::new(
            camera_id,
            Characteristics::new(camera_id, lens_position, Orientation::Deg0),
            Box::new(NullHardware),
        ))
    }

    #[test]
    fn test_select_unit_matches_position() {
        let units = vec![unit(0, LensPosition::Front), unit(1, LensPosition::Back)];

        let selected = select_unit(&units, &back()).unwrap();
        assert_eq!(selected.camera_id(), 1);
    }

    #[test]
    fn test_select_unit_no_match() {
        let units = vec![unit(0, LensPosition::Front)];
        assert!(select_unit(&units, &back()).is_none());
    }

    #[test]
    fn test_select_unit_first_match_wins() {
        // two back cameras: enumeration order breaks the tie
        let units = vec![
            unit(0, LensPosition::Front),
            unit(1, LensPosition::Back),
            unit(2, LensPosition::Back),
        ];

        let selected = select_unit(&units, &back()).unwrap();
        assert_eq!(selected.camera_id(), 1);
    }

    #[test]
    fn test_select_unit_empty_list() {
        assert!(select_unit(&[], &front()).is_none());
    }

    #[test]
    fn test_first_available_falls_back() {
        let units = vec![unit(0, LensPosition::Back)];
        let selector = first_available([external(), front(), back()]);

        let selected = select_unit(&units, &selector).unwrap();
        assert_eq!(selected.camera_id(), 0);
    }

    #[test]
    fn test_first_available_prefers_earlier_selector() {
        let units = vec![unit(0, LensPosition::Back), unit(1, LensPosition::Front)];
        let selector = first_available([front(), back()]);

        let selected = select_unit(&units, &selector).unwrap();
        assert_eq!(selected.camera_id(), 1);
    }
}
