// SPDX-License-Identifier: GPL-3.0-only

//! Device orchestration
//!
//! [`Device`] owns the camera units enumerated at construction, the
//! single-assignment selected-camera handle, and the saved configuration. It
//! is the whole external contract of this crate: selection lifecycle,
//! configuration merge, and configuration application all go through it.
//!
//! Mutating operations (`select_camera`, `update_camera_configuration`) must
//! be serialized by the caller per device instance; pure queries are always
//! safe to call concurrently.

use crate::characteristics::Characteristics;
use crate::config::{CameraConfiguration, FrameProcessor, UpdateConfiguration};
use crate::discovery::{CameraDiscovery, DiscoveryGeneration};
use crate::errors::{CameraError, CameraResult};
use crate::orientation::{HostDisplay, Orientation};
use crate::parameters::{CameraParameters, ParametersProvider};
use crate::selector::{LensPositionSelector, select_unit};
use crate::unit::CameraUnit;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// State of the selected-camera handle
#[derive(Debug, Clone, Default)]
enum SelectionState {
    /// No selection attempt since construction or the last clear
    #[default]
    Empty,
    /// A selection attempt matched this unit
    Resolved(Arc<CameraUnit>),
    /// A selection attempt found no matching unit
    Failed(CameraError),
}

/// Single-assignment cell publishing the selection outcome to any number of
/// waiters
///
/// Empty transitions at most once to Resolved or Failed and stays there until
/// an explicit clear. The cell is built on a watch channel, so waiters
/// suspend on the one transition instead of polling, and a waiter abandoned
/// mid-await leaves the stored state untouched. A waiter that entered before
/// a clear keeps waiting and observes the next epoch's resolution.
struct SelectedCamera {
    state: watch::Sender<SelectionState>,
}

impl SelectedCamera {
    fn new() -> Self {
        let (state, _) = watch::channel(SelectionState::Empty);
        Self { state }
    }

    /// Transition out of Empty. A second terminal transition is not part of
    /// the protocol; it is ignored with a warning so late callers cannot
    /// overwrite what waiters already observed.
    fn transition(&self, next: SelectionState) {
        self.state.send_modify(|state| {
            if matches!(state, SelectionState::Empty) {
                *state = next;
            } else {
                warn!("selection already completed, ignoring new result");
            }
        });
    }

    fn resolve(&self, unit: Arc<CameraUnit>) {
        self.transition(SelectionState::Resolved(unit));
    }

    fn fail(&self, error: CameraError) {
        self.transition(SelectionState::Failed(error));
    }

    fn clear(&self) {
        self.state.send_replace(SelectionState::Empty);
    }

    fn get(&self) -> CameraResult<Arc<CameraUnit>> {
        match &*self.state.borrow() {
            SelectionState::Empty => Err(CameraError::NotStarted),
            SelectionState::Resolved(unit) => Ok(Arc::clone(unit)),
            SelectionState::Failed(error) => Err(error.clone()),
        }
    }

    fn is_resolved(&self) -> bool {
        matches!(&*self.state.borrow(), SelectionState::Resolved(_))
    }

    async fn wait(&self) -> CameraResult<Arc<CameraUnit>> {
        let mut rx = self.state.subscribe();
        loop {
            match &*rx.borrow_and_update() {
                SelectionState::Resolved(unit) => return Ok(Arc::clone(unit)),
                SelectionState::Failed(error) => return Err(error.clone()),
                SelectionState::Empty => {}
            }
            if rx.changed().await.is_err() {
                // device dropped with the cell still empty
                return Err(CameraError::NotStarted);
            }
        }
    }
}

/// The unified camera device
///
/// Enumerates units once through the discovery provider handed to
/// [`Device::new`], then serves selection and configuration operations over
/// that fixed list.
pub struct Device {
    generation: DiscoveryGeneration,
    cameras: Vec<Arc<CameraUnit>>,
    lens_position_selector: Mutex<LensPositionSelector>,
    selected_camera: SelectedCamera,
    saved_configuration: Mutex<CameraConfiguration>,
    parameters_provider: Box<dyn ParametersProvider>,
    display: Box<dyn HostDisplay>,
}

impl Device {
    /// Enumerate cameras through the given discovery provider and build the
    /// device.
    ///
    /// Enumeration happens exactly once, synchronously; the unit list is
    /// fixed for the device's lifetime (no hot-plug).
    ///
    /// # Errors
    ///
    /// `CameraError::Mapping` if any camera's raw metadata cannot be
    /// normalized; construction aborts rather than yielding a partial list.
    pub fn new(
        discovery: Box<dyn CameraDiscovery>,
        display: Box<dyn HostDisplay>,
        parameters_provider: Box<dyn ParametersProvider>,
        initial_configuration: CameraConfiguration,
        initial_selector: LensPositionSelector,
    ) -> CameraResult<Self> {
        let generation = discovery.generation();
        info!(generation = %generation, "enumerating cameras");

        let mut cameras = Vec::new();
        for discovered in discovery.discover() {
            let characteristics =
                Characteristics::from_raw(discovered.camera_id, &discovered.metadata)?;
            cameras.push(Arc::new(CameraUnit::new(
                discovered.camera_id,
                characteristics,
                discovered.hardware,
            )));
        }
        info!(count = cameras.len(), "camera enumeration complete");

        Ok(Self {
            generation,
            cameras,
            lens_position_selector: Mutex::new(initial_selector),
            selected_camera: SelectedCamera::new(),
            saved_configuration: Mutex::new(initial_configuration),
            parameters_provider,
            display,
        })
    }

    /// Discovery generation this device was built from
    pub fn generation(&self) -> DiscoveryGeneration {
        self.generation
    }

    /// Units enumerated at construction, in host order
    pub fn cameras(&self) -> &[Arc<CameraUnit>] {
        &self.cameras
    }

    /// `true` iff the given selector would match one of the enumerated
    /// units. Pure query; the selected-camera handle is untouched.
    pub fn can_select(&self, selector: &LensPositionSelector) -> bool {
        select_unit(&self.cameras, selector).is_some()
    }

    /// Run the stored selector over the enumerated units and publish the
    /// outcome into the selected-camera handle.
    ///
    /// On a match the handle resolves to that unit; otherwise it fails with
    /// [`CameraError::UnsupportedLens`]. Exactly one handle transition per
    /// call; call [`Device::clear_selected_camera`] before selecting again.
    pub fn select_camera(&self) {
        debug!("select_camera");

        let selector = self.lens_position_selector.lock().unwrap().clone();
        match select_unit(&self.cameras, &selector) {
            Some(unit) => {
                info!(
                    camera_id = unit.camera_id(),
                    lens_position = %unit.characteristics().lens_position,
                    "camera selected"
                );
                self.selected_camera.resolve(unit);
            }
            None => {
                warn!("no camera matches the desired lens position");
                self.selected_camera.fail(CameraError::UnsupportedLens);
            }
        }
    }

    /// Reset the selected-camera handle to its empty state, discarding any
    /// prior resolution or failure. Safe to call at any time.
    pub fn clear_selected_camera(&self) {
        debug!("clear_selected_camera");
        self.selected_camera.clear();
    }

    /// Suspend until a selection attempt completes, then return its outcome.
    ///
    /// Any number of waiters may wait concurrently; all observe the same
    /// single transition. No timeout is applied here; cancellation is the
    /// caller's concern and never corrupts the handle for other waiters.
    pub async fn await_selected_camera(&self) -> CameraResult<Arc<CameraUnit>> {
        self.selected_camera.wait().await
    }

    /// Non-suspending read of the selected camera.
    ///
    /// # Errors
    ///
    /// * [`CameraError::NotStarted`] - no selection attempt has run yet
    /// * [`CameraError::UnsupportedLens`] - the last attempt found no match
    pub fn get_selected_camera(&self) -> CameraResult<Arc<CameraUnit>> {
        self.selected_camera.get()
    }

    /// `true` iff the handle currently holds a resolved unit
    pub fn has_selected_camera(&self) -> bool {
        self.selected_camera.is_resolved()
    }

    /// Replace the stored lens-position selector.
    ///
    /// Takes effect on the next [`Device::select_camera`] call; an already
    /// resolved handle is not re-evaluated.
    pub fn update_lens_position_selector(&self, selector: LensPositionSelector) {
        debug!("update_lens_position_selector");
        *self.lens_position_selector.lock().unwrap() = selector;
    }

    /// The currently stored lens-position selector
    pub fn get_lens_position_selector(&self) -> LensPositionSelector {
        self.lens_position_selector.lock().unwrap().clone()
    }

    /// Merge a sparse update into the saved configuration.
    ///
    /// The replacement is a single assignment; readers never observe a
    /// partially merged configuration.
    pub fn update_configuration(&self, update: &UpdateConfiguration) {
        debug!("update_configuration");
        let mut saved = self.saved_configuration.lock().unwrap();
        *saved = saved.merge(update);
    }

    /// Snapshot of the saved configuration
    pub fn get_configuration(&self) -> CameraConfiguration {
        self.saved_configuration.lock().unwrap().clone()
    }

    /// Frame-processing hook of the saved configuration, if any
    pub fn frame_processor(&self) -> Option<FrameProcessor> {
        self.saved_configuration.lock().unwrap().frame_processor.clone()
    }

    /// Resolve the saved configuration against a unit's capabilities.
    ///
    /// Resolution failures surface as [`CameraError::Hardware`] with the
    /// provider's error preserved as the cause.
    pub fn camera_parameters(&self, unit: &CameraUnit) -> CameraResult<CameraParameters> {
        let configuration = self.get_configuration();
        self.parameters_provider
            .resolve(&configuration, &unit.capabilities())
            .map_err(CameraError::hardware)
    }

    /// Apply the saved configuration to a camera unit.
    ///
    /// Strictly ordered: concrete parameters are resolved and applied first,
    /// the frame-processing hook is attached second. Any failure along the
    /// way is re-signaled as [`CameraError::Hardware`], keeping the original
    /// cause for diagnostics.
    pub fn update_camera_configuration(&self, unit: &CameraUnit) -> CameraResult<()> {
        debug!(camera_id = unit.camera_id(), "update_camera_configuration");

        let parameters = self.camera_parameters(unit)?;
        unit.apply_parameters(&parameters)
            .map_err(CameraError::hardware)?;
        unit.attach_frame_processor(self.frame_processor())
            .map_err(CameraError::hardware)?;
        Ok(())
    }

    /// Merge a sparse update into the saved configuration, then apply the
    /// result to the currently selected camera.
    ///
    /// # Errors
    ///
    /// Selection errors from [`Device::get_selected_camera`] plus any
    /// [`CameraError::Hardware`] from the application step.
    pub fn update_device_configuration(&self, update: &UpdateConfiguration) -> CameraResult<()> {
        debug!("update_device_configuration");

        self.update_configuration(update);
        let unit = self.get_selected_camera()?;
        self.update_camera_configuration(&unit)
    }

    /// Current orientation of the host display
    pub fn screen_orientation(&self) -> Orientation {
        self.display.orientation()
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("generation", &self.generation)
            .field("cameras", &self.cameras.len())
            .field("has_selected_camera", &self.has_selected_camera())
            .finish()
    }
}
