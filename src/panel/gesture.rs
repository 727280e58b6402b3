//! Drag gesture handling.
//!
//! While the finger is down the offset tracks the accumulated translation, clamped to the drag
//! band. On release the panel resolves to a discrete state from the release velocity and the
//! final offset.

use tracing::{debug, trace};

use super::options::ReleaseThresholds;
use super::position::PanelMetrics;
use super::{PanelDrag, PanelState, PanelStateMachine};
use crate::input::{GesturePhase, GestureSample};

/// Picks the state a released drag settles in.
///
/// Checked in order, first match wins:
///
/// 1. Far enough below the resting position, or flung down hard enough: dismiss.
/// 2. Flung up: expand.
/// 3. Flung down: back to partial.
/// 4. Slow release: whichever side of the expanded/partial midpoint the panel is on. The
///    midpoint itself goes to partial.
///
/// Dismissal is checked first so that a long drag past the threshold dismisses even if the
/// finger flicks up at the very end.
pub fn resolve_release(
    offset: f64,
    velocity: f64,
    metrics: &PanelMetrics,
    thresholds: &ReleaseThresholds,
) -> PanelState {
    if offset >= metrics.partial + thresholds.dismiss_distance
        || velocity > thresholds.dismiss_velocity
    {
        return PanelState::Dismissed;
    }

    if velocity < -thresholds.expand_velocity {
        return PanelState::Expanded;
    }

    if velocity > thresholds.collapse_velocity {
        return PanelState::Partial;
    }

    if offset < metrics.midpoint() {
        PanelState::Expanded
    } else {
        PanelState::Partial
    }
}

impl PanelStateMachine {
    /// Feeds one gesture sample. Returns whether it was accepted.
    pub fn handle_gesture(&mut self, sample: GestureSample) -> bool {
        match sample.phase {
            GesturePhase::Began => self.gesture_begin(sample),
            GesturePhase::Changed => self.gesture_update(sample),
            GesturePhase::Ended => self.gesture_end(sample).is_some(),
            GesturePhase::Cancelled => self.gesture_cancel(),
        }
    }

    /// Starts a drag from the resting offset of the current state.
    pub fn gesture_begin(&mut self, sample: GestureSample) -> bool {
        if self.is_dismissed() {
            trace!("ignoring gesture begin after dismissal");
            return false;
        }

        if self.drag.is_some() {
            debug!("ignoring gesture begin during an active drag");
            return false;
        }

        let Some(start_offset) = self.anchor_offset(self.state) else {
            debug!("ignoring gesture begin before the container is laid out");
            return false;
        };

        self.drag = Some(PanelDrag {
            start_offset,
            last_timestamp: sample.timestamp,
        });
        self.set_offset(start_offset, false);

        true
    }

    /// Moves the panel by the sample's delta.
    ///
    /// The discrete state does not change until the gesture ends.
    pub fn gesture_update(&mut self, sample: GestureSample) -> bool {
        let Some(drag) = &mut self.drag else {
            debug!("ignoring gesture update without a preceding begin");
            return false;
        };

        if sample.timestamp < drag.last_timestamp {
            debug!("ignoring out-of-order gesture update");
            return false;
        }

        if !sample.translation_delta.is_finite() {
            debug!("ignoring gesture update with a non-finite delta");
            return false;
        }

        drag.last_timestamp = sample.timestamp;
        let start_offset = drag.start_offset;

        let Some(metrics) = self.metrics else {
            return false;
        };

        let live = self.offset.unwrap_or(start_offset);
        let offset = metrics.clamp(live + sample.translation_delta);
        self.set_offset(offset, false);

        true
    }

    /// Releases the drag and settles the panel.
    ///
    /// Returns the resolved state, or `None` if no drag was active.
    pub fn gesture_end(&mut self, sample: GestureSample) -> Option<PanelState> {
        let Some(drag) = self.drag else {
            debug!("ignoring gesture end without a preceding begin");
            return None;
        };

        let Some(metrics) = self.metrics else {
            self.drag = None;
            return None;
        };

        let mut live = self.offset.unwrap_or(drag.start_offset);

        // A stale end sample still releases the panel, it just doesn't move it further.
        if sample.timestamp >= drag.last_timestamp && sample.translation_delta.is_finite() {
            live = metrics.clamp(live + sample.translation_delta);
            self.set_offset(live, false);
        } else {
            debug!("ignoring movement of a stale or malformed gesture end");
        }

        let velocity = if sample.velocity.is_finite() {
            sample.velocity
        } else {
            0.
        };

        self.drag = None;

        let target = resolve_release(live, velocity, &metrics, &self.options.release);
        trace!("released at {live} with velocity {velocity}, settling in {target:?}");

        if target == PanelState::Dismissed {
            self.enter_dismissed();
        } else {
            self.set_state(target);
            if let Some(anchor) = self.anchor_offset(target) {
                self.set_offset(anchor, true);
            }
        }

        Some(target)
    }

    /// Aborts the drag and returns the panel exactly to its last resolved anchor.
    pub fn gesture_cancel(&mut self) -> bool {
        self.cancel_drag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelOptions;

    fn metrics() -> PanelMetrics {
        PanelMetrics {
            expanded: 0.,
            partial: 300.,
            dismiss_threshold: 450.,
            dismiss_margin: 150.,
        }
    }

    fn resolve(offset: f64, velocity: f64) -> PanelState {
        resolve_release(
            offset,
            velocity,
            &metrics(),
            &PanelOptions::default().release,
        )
    }

    #[test]
    fn dismiss_by_distance() {
        assert_eq!(resolve(400., 0.), PanelState::Dismissed);
        assert_eq!(resolve(399., 0.), PanelState::Partial);
    }

    #[test]
    fn dismiss_by_velocity() {
        assert_eq!(resolve(0., 801.), PanelState::Dismissed);
        assert_eq!(resolve(0., 800.), PanelState::Partial);
    }

    #[test]
    fn dismiss_beats_upward_fling() {
        assert_eq!(resolve(420., -600.), PanelState::Dismissed);
    }

    #[test]
    fn upward_fling_expands() {
        assert_eq!(resolve(290., -501.), PanelState::Expanded);
        assert_eq!(resolve(290., -500.), PanelState::Partial);
    }

    #[test]
    fn downward_fling_beats_position() {
        assert_eq!(resolve(0., 600.), PanelState::Partial);
    }

    #[test]
    fn slow_release_uses_midpoint() {
        assert_eq!(resolve(149., 0.), PanelState::Expanded);
        assert_eq!(resolve(150., 0.), PanelState::Partial);
        assert_eq!(resolve(151., 0.), PanelState::Partial);
        assert_eq!(resolve(10., 499.), PanelState::Expanded);
    }
}
