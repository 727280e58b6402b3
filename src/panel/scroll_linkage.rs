//! Coupling between the hosted grid's scrolling and the panel state.
//!
//! Scrolling the grid up while the panel rests in the partial state raises the panel, giving the
//! grid more room. Pulling the grid down while it is already at its top, with the panel
//! expanded, lowers the panel back to partial.

use tracing::trace;

use super::options::ScrollLinkageOptions;
use super::{PanelState, PanelStateMachine};
use crate::input::ScrollSignal;

#[derive(Debug, Clone)]
pub struct ScrollLinkage {
    options: ScrollLinkageOptions,
    enabled: bool,
}

impl ScrollLinkage {
    pub fn new(options: ScrollLinkageOptions) -> Self {
        Self {
            options,
            enabled: options.enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The transition a scroll frame asks for, if any, given the current panel state.
    pub fn target_for(&self, signal: &ScrollSignal, state: PanelState) -> Option<PanelState> {
        if !self.enabled || !signal.has_scrollable_content {
            return None;
        }

        let ScrollLinkageOptions {
            min_delta,
            min_velocity,
            top_zone,
            ..
        } = self.options;

        if signal.delta > min_delta
            && signal.velocity > min_velocity
            && state == PanelState::Partial
        {
            return Some(PanelState::Expanded);
        }

        if signal.content_offset <= top_zone
            && signal.delta < -min_delta
            && signal.velocity < -min_velocity
            && state == PanelState::Expanded
        {
            return Some(PanelState::Partial);
        }

        None
    }

    /// Handles one scroll frame. Returns whether the panel state changed.
    ///
    /// Never interferes with a manual drag: frames arriving while the finger holds the panel
    /// are dropped.
    pub fn on_scroll(&self, signal: &ScrollSignal, panel: &mut PanelStateMachine) -> bool {
        if panel.is_gesture_active() {
            return false;
        }

        let Some(target) = self.target_for(signal, panel.state()) else {
            return false;
        };

        trace!("scroll linkage requests {target:?}");
        panel.request_state(target)
    }
}
