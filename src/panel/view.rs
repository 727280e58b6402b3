//! The rendered panel surface.
//!
//! A pure consumer: it keeps a copy of whatever the state machine last pushed and derives the
//! panel's own drag feedback from it. It never computes positions itself.

use super::events::PanelEvent;
use super::PanelState;

/// Feedback on the panel itself while it is dragged toward dismissal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFeedback {
    /// Horizontal stretch of the grabber handle.
    pub handle_width_scale: f64,
    /// How far the handle color has moved toward its highlighted color, in `[0, 1]`.
    pub handle_highlight: f64,
    pub content_scale: f64,
    pub content_alpha: f64,
    pub toolbar_alpha: f64,
}

impl PanelFeedback {
    pub const IDENTITY: Self = Self {
        handle_width_scale: 1.,
        handle_highlight: 0.,
        content_scale: 1.,
        content_alpha: 1.,
        toolbar_alpha: 1.,
    };

    pub fn from_progress(progress: f64) -> Self {
        let progress = if progress.is_nan() {
            0.
        } else {
            progress.clamp(0., 1.)
        };

        if progress == 0. {
            return Self::IDENTITY;
        }

        Self {
            handle_width_scale: 1. + progress * 0.3,
            // The color change is doubled to read clearly on the small handle.
            handle_highlight: f64::min(1., progress * 2.),
            content_scale: 1. - progress * 0.02,
            content_alpha: 1. - progress * 0.1,
            toolbar_alpha: 1. - progress * 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    /// Top edge of the panel, `None` before the first layout.
    offset: Option<f64>,
    /// Whether the last offset change should be animated into place.
    animating: bool,
    state: PanelState,
    feedback: PanelFeedback,
    visible: bool,
}

impl Default for PanelView {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelView {
    pub fn new() -> Self {
        Self {
            offset: None,
            animating: false,
            state: PanelState::Partial,
            feedback: PanelFeedback::IDENTITY,
            visible: true,
        }
    }

    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn feedback(&self) -> PanelFeedback {
        self.feedback
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn apply(&mut self, event: &PanelEvent) {
        match *event {
            PanelEvent::OffsetChanged { offset, animated } => {
                self.offset = Some(offset);
                self.animating = animated;
            }
            PanelEvent::ProgressChanged { progress } => {
                self.feedback = PanelFeedback::from_progress(progress);
            }
            PanelEvent::StateChanged { to, .. } => self.state = to,
            PanelEvent::Dismissed => {
                self.visible = false;
                self.feedback = PanelFeedback::IDENTITY;
            }
        }
    }
}
