//! The sliding panel.
//!
//! The panel is a bottom sheet hosting the photo grid, layered over the media preview. Between
//! interactions it rests in one discrete [`PanelState`]; during a drag its offset follows the
//! finger continuously and the discrete state is only resolved once the finger lifts.
//!
//! [`PanelStateMachine`] is the single owner of the offset and the state. Everything else
//! (the rendered panel, the preview effects, the host) receives copies through [`PanelEvent`]s
//! and never writes back.
//!
//! Malformed input never surfaces as an error: a gesture sample that arrives out of sequence, or
//! before the container has a size, is logged and dropped, and the panel simply does not move
//! for that frame.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::input::LayoutMetrics;

pub mod effects;
pub mod events;
pub mod gesture;
pub mod options;
pub mod position;
pub mod scroll_linkage;
pub mod view;

#[cfg(test)]
mod tests;

pub use self::events::{DismissSink, PanelEvent, PanelListener};
pub use self::gesture::resolve_release;
pub use self::options::{ConfigError, PanelOptions};
pub use self::position::PanelMetrics;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelState {
    /// Fully raised, right below the safe area.
    Expanded,
    /// Default resting position with the preview visible above.
    #[default]
    Partial,
    /// Deprecated lowered state.
    ///
    /// Only reachable through [`PanelStateMachine::request_state`] when re-enabled in the
    /// options. It rests at the partial anchor.
    Collapsed,
    /// Terminal. The panel is gone for the rest of the session.
    Dismissed,
}

/// In-progress drag.
#[derive(Debug, Clone, Copy)]
struct PanelDrag {
    /// Anchor offset of the state the drag started from.
    start_offset: f64,
    last_timestamp: std::time::Duration,
}

#[derive(Debug)]
pub struct PanelStateMachine {
    options: PanelOptions,
    layout: LayoutMetrics,
    /// Anchors for the current layout, `None` while the container has no height.
    metrics: Option<PanelMetrics>,
    /// Last resolved discrete state.
    state: PanelState,
    /// Current offset: the live drag offset during a drag, the state anchor otherwise.
    ///
    /// `None` until the first valid layout.
    offset: Option<f64>,
    progress: f64,
    drag: Option<PanelDrag>,
    events: Vec<PanelEvent>,
}

impl PanelStateMachine {
    pub fn new(options: PanelOptions) -> Result<Self, ConfigError> {
        options.validate()?;

        Ok(Self {
            options,
            layout: LayoutMetrics::default(),
            metrics: None,
            state: PanelState::Partial,
            offset: None,
            progress: 0.,
            drag: None,
            events: Vec::new(),
        })
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn layout(&self) -> LayoutMetrics {
        self.layout
    }

    pub fn metrics(&self) -> Option<PanelMetrics> {
        self.metrics
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_gesture_active(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_dismissed(&self) -> bool {
        self.state == PanelState::Dismissed
    }

    /// Returns the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the resting offset for `state` in the current layout.
    pub fn anchor_offset(&self, state: PanelState) -> Option<f64> {
        let metrics = self.metrics?;
        match state {
            PanelState::Expanded => Some(metrics.expanded),
            PanelState::Partial | PanelState::Collapsed => Some(metrics.partial),
            PanelState::Dismissed => None,
        }
    }

    /// Updates the container geometry.
    ///
    /// A zero height suspends gesture processing until a valid height arrives. An active drag
    /// is cancelled first, settling the panel on the anchor of the old layout.
    pub fn set_layout(&mut self, layout: LayoutMetrics) {
        let metrics = PanelMetrics::compute(layout, &self.options);
        if metrics.is_none() && self.cancel_drag() {
            debug!("container lost its height, cancelled the active drag");
        }

        self.layout = layout;
        self.metrics = metrics;

        let Some(metrics) = metrics else {
            return;
        };

        if self.is_dismissed() {
            return;
        }

        if self.drag.is_some() {
            // Keep following the finger, but inside the new band.
            let live = self.offset.map_or(metrics.partial, |offset| metrics.clamp(offset));
            self.set_offset(live, false);
        } else if let Some(anchor) = self.anchor_offset(self.state) {
            self.set_offset(anchor, false);
        }
    }

    /// Moves the panel to `target` outside of any gesture.
    ///
    /// Ignored during a drag, after dismissal, when already in `target`, and for targets other
    /// than the resting states. Returns whether the state changed.
    pub fn request_state(&mut self, target: PanelState) -> bool {
        if self.is_dismissed() {
            trace!("ignoring state request after dismissal");
            return false;
        }

        if self.drag.is_some() {
            trace!("ignoring state request during an active drag");
            return false;
        }

        match target {
            PanelState::Expanded | PanelState::Partial => (),
            PanelState::Collapsed if self.options.panel.allow_collapsed => (),
            PanelState::Collapsed | PanelState::Dismissed => {
                debug!("ignoring request for {target:?}");
                return false;
            }
        }

        if self.state == target {
            return false;
        }

        self.set_state(target);
        if let Some(anchor) = self.anchor_offset(target) {
            self.set_offset(anchor, true);
        }

        true
    }

    /// Dismisses the panel, for example from the picker's cancel button.
    ///
    /// Returns `false` if it was already dismissed.
    pub fn dismiss(&mut self) -> bool {
        if self.is_dismissed() {
            return false;
        }

        self.enter_dismissed();
        true
    }

    /// Drops the active drag and animates back to the anchor of the last resolved state.
    ///
    /// Returns `false` if no drag was active.
    fn cancel_drag(&mut self) -> bool {
        if self.drag.take().is_none() {
            return false;
        }

        if let Some(anchor) = self.anchor_offset(self.state) {
            self.set_offset(anchor, true);
        }

        true
    }

    fn enter_dismissed(&mut self) {
        self.drag = None;
        self.set_state(PanelState::Dismissed);
        self.events.push(PanelEvent::Dismissed);
    }

    fn set_state(&mut self, state: PanelState) {
        if self.state == state {
            return;
        }

        debug!("panel state {:?} -> {state:?}", self.state);
        self.events.push(PanelEvent::StateChanged {
            from: self.state,
            to: state,
        });
        self.state = state;
    }

    /// Moves the panel and recomputes dismiss progress.
    fn set_offset(&mut self, offset: f64, animated: bool) {
        if self.offset != Some(offset) {
            self.offset = Some(offset);
            self.events
                .push(PanelEvent::OffsetChanged { offset, animated });
        }

        let progress = self.metrics.map_or(0., |metrics| metrics.progress(offset));
        if self.progress != progress {
            self.progress = progress;
            self.events.push(PanelEvent::ProgressChanged { progress });
        }
    }
}
