use serde::{Deserialize, Serialize};

/// One scroll frame of the grid hosted inside the panel.
///
/// Offsets grow as the content scrolls up (revealing items further down).
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSignal {
    pub content_offset: f64,
    /// Change of `content_offset` since the previous frame.
    pub delta: f64,
    /// Points per second, positive while the content moves up.
    pub velocity: f64,
    /// Informational; the panel linkage uses `content_offset` against its top zone.
    #[serde(default)]
    pub is_at_top: bool,
    /// Whether the content is longer than its viewport.
    pub has_scrollable_content: bool,
}

/// Derives [`ScrollSignal`]s from raw scroll view metrics.
///
/// Scroll views report absolute offsets; the frame-to-frame delta has to be tracked here.
#[derive(Debug, Default, Clone)]
pub struct ScrollTracker {
    last_content_offset: Option<f64>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(
        &mut self,
        content_offset: f64,
        content_length: f64,
        viewport_length: f64,
        velocity: f64,
    ) -> ScrollSignal {
        // The first frame has nothing to compare against.
        let last = self.last_content_offset.replace(content_offset);
        let delta = last.map_or(0., |last| content_offset - last);

        ScrollSignal {
            content_offset,
            delta,
            velocity,
            is_at_top: content_offset <= 0.,
            has_scrollable_content: content_length > viewport_length,
        }
    }

    /// Forgets the previous offset, for example after the grid content was replaced.
    pub fn reset(&mut self) {
        self.last_content_offset = None;
    }
}
