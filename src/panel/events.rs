//! What the panel tells the rest of the screen.
//!
//! The state machine queues [`PanelEvent`]s while it processes input; the session drains the
//! queue right after each input and hands every event to the view, the preview effects and the
//! registered listeners, in order.

use serde::Serialize;

use super::PanelState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum PanelEvent {
    /// The panel's top edge moved.
    ///
    /// `animated` is set when the panel settles on an anchor, as opposed to tracking a finger.
    OffsetChanged { offset: f64, animated: bool },
    /// Dismiss progress changed.
    ProgressChanged { progress: f64 },
    StateChanged { from: PanelState, to: PanelState },
    /// The panel entered the terminal state. Emitted once per session.
    Dismissed,
}

pub trait PanelListener {
    fn on_panel_event(&mut self, event: &PanelEvent);
}

impl<F: FnMut(&PanelEvent)> PanelListener for F {
    fn on_panel_event(&mut self, event: &PanelEvent) {
        self(event)
    }
}

/// Closes the picker once the panel is dismissed.
pub trait DismissSink {
    fn on_dismiss(&mut self);
}

impl<F: FnMut()> DismissSink for F {
    fn on_dismiss(&mut self) {
        self()
    }
}
