//! Panel anchor offsets and the drag band.
//!
//! Offsets are distances from the top edge of the panel's container. Smaller offsets mean the
//! panel is raised higher.

use super::options::PanelOptions;
use crate::input::LayoutMetrics;

/// The fully raised position: right below the safe area.
pub fn expanded_offset(safe_top_inset: f64, padding: f64) -> f64 {
    f64::max(0., safe_top_inset) + padding
}

/// The default resting position.
pub fn partial_offset(container_height: f64, top_ratio: f64) -> f64 {
    container_height * top_ratio
}

pub fn dismiss_threshold(partial_offset: f64, margin: f64) -> f64 {
    partial_offset + margin
}

/// Constrains a live drag offset to the legal band.
pub fn clamp(offset: f64, expanded_offset: f64, dismiss_threshold: f64) -> f64 {
    offset.clamp(expanded_offset, dismiss_threshold)
}

/// How far the panel has been dragged past its resting position toward dismissal, in `[0, 1]`.
pub fn dismiss_progress(offset: f64, partial_offset: f64, margin: f64) -> f64 {
    if offset <= partial_offset {
        return 0.;
    }

    f64::min(1., (offset - partial_offset) / margin)
}

/// All anchors for one container layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMetrics {
    pub expanded: f64,
    pub partial: f64,
    pub dismiss_threshold: f64,
    pub dismiss_margin: f64,
}

impl PanelMetrics {
    /// Returns `None` until the container has a usable height.
    pub fn compute(layout: LayoutMetrics, options: &PanelOptions) -> Option<Self> {
        if !layout.is_laid_out() {
            return None;
        }

        let geometry = &options.panel;
        let expanded = expanded_offset(layout.safe_top_inset, geometry.expanded_padding);

        // On very short containers the safe area can reach below the partial position.
        let partial = f64::max(
            expanded,
            partial_offset(layout.container_height, geometry.top_height_ratio),
        );

        Some(Self {
            expanded,
            partial,
            dismiss_threshold: dismiss_threshold(partial, geometry.dismiss_margin),
            dismiss_margin: geometry.dismiss_margin,
        })
    }

    pub fn clamp(&self, offset: f64) -> f64 {
        clamp(offset, self.expanded, self.dismiss_threshold)
    }

    pub fn progress(&self, offset: f64) -> f64 {
        dismiss_progress(offset, self.partial, self.dismiss_margin)
    }

    /// The position below which a slow release settles in the expanded state.
    pub fn midpoint(&self) -> f64 {
        (self.expanded + self.partial) / 2.
    }
}
