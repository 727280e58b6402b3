//! Visual effects on the media preview driven by dismiss progress.
//!
//! As the panel is dragged below its resting position the preview above it shrinks, dims, lifts
//! and rounds its corners, as if the whole picker were being pushed off screen.

use serde::Serialize;

use super::options::PreviewEffectOptions;

/// Effect parameters for the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewEffect {
    pub scale: f64,
    pub alpha: f64,
    pub vertical_offset: f64,
    pub corner_radius: f64,
    /// Alpha for the animated media inside the preview, which fades further than its container.
    pub media_alpha: f64,
}

impl PreviewEffect {
    /// The preview at rest.
    pub const IDENTITY: Self = Self {
        scale: 1.,
        alpha: 1.,
        vertical_offset: 0.,
        corner_radius: 0.,
        media_alpha: 1.,
    };

    pub fn from_progress(progress: f64, options: &PreviewEffectOptions) -> Self {
        let progress = if progress.is_nan() {
            0.
        } else {
            progress.clamp(0., 1.)
        };

        // Exactly the rest appearance, with no -0.0 or rounding residue.
        if progress == 0. {
            return Self::IDENTITY;
        }

        let alpha = 1. - progress * options.alpha_factor;
        Self {
            scale: 1. - progress * options.scale_factor,
            alpha,
            vertical_offset: -progress * options.max_lift,
            corner_radius: progress * options.max_corner_radius,
            media_alpha: alpha * options.media_alpha_factor,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

pub trait EffectSink {
    fn apply_effect(&mut self, effect: PreviewEffect);
}

impl<F: FnMut(PreviewEffect)> EffectSink for F {
    fn apply_effect(&mut self, effect: PreviewEffect) {
        self(effect)
    }
}

/// Publishes [`PreviewEffect`]s to every subscribed sink whenever progress changes.
pub struct EffectBroadcaster {
    options: PreviewEffectOptions,
    sinks: Vec<Box<dyn EffectSink>>,
    progress: f64,
    current: PreviewEffect,
}

impl std::fmt::Debug for EffectBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectBroadcaster")
            .field("options", &self.options)
            .field("sinks", &self.sinks.len())
            .field("progress", &self.progress)
            .field("current", &self.current)
            .finish()
    }
}

impl EffectBroadcaster {
    pub fn new(options: PreviewEffectOptions) -> Self {
        Self {
            options,
            sinks: Vec::new(),
            progress: 0.,
            current: PreviewEffect::IDENTITY,
        }
    }

    /// Adds a sink and brings it up to date with the current effect.
    pub fn subscribe(&mut self, mut sink: Box<dyn EffectSink>) {
        sink.apply_effect(self.current);
        self.sinks.push(sink);
    }

    pub fn current(&self) -> PreviewEffect {
        self.current
    }

    /// Recomputes the effect for `progress` and pushes it to all sinks.
    ///
    /// Returns `false` without notifying anyone when progress is unchanged.
    pub fn publish(&mut self, progress: f64) -> bool {
        if self.progress == progress {
            return false;
        }

        self.progress = progress;
        self.current = PreviewEffect::from_progress(progress, &self.options);
        for sink in &mut self.sinks {
            sink.apply_effect(self.current);
        }

        true
    }
}
