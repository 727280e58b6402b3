//! Input consumed by the panel: drag gesture samples, grid scroll signals and container layout.
//!
//! None of these are produced here. Platform gesture recognition, the hosted scroll view and the
//! layout pass feed them in, in arrival order, through [`crate::session::PanelSession::process`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod scroll;

pub use scroll::{ScrollSignal, ScrollTracker};

/// Phase of a drag gesture sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One sample of a vertical drag over the panel.
///
/// All distances are in the coordinate space of the panel's container, projected onto the
/// vertical axis. Positive values point down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub phase: GesturePhase,
    /// Movement since the previous sample.
    #[serde(default)]
    pub translation_delta: f64,
    /// Movement since the gesture began.
    #[serde(default)]
    pub cumulative_translation: f64,
    /// Points per second.
    #[serde(default)]
    pub velocity: f64,
    #[serde(default, rename = "timestamp_ms", with = "duration_ms")]
    pub timestamp: Duration,
}

impl GestureSample {
    pub fn new(
        phase: GesturePhase,
        translation_delta: f64,
        velocity: f64,
        timestamp: Duration,
    ) -> Self {
        Self {
            phase,
            translation_delta,
            cumulative_translation: 0.,
            velocity,
            timestamp,
        }
    }

    pub fn began(timestamp: Duration) -> Self {
        Self::new(GesturePhase::Began, 0., 0., timestamp)
    }

    pub fn changed(translation_delta: f64, timestamp: Duration) -> Self {
        Self::new(GesturePhase::Changed, translation_delta, 0., timestamp)
    }

    pub fn ended(velocity: f64, timestamp: Duration) -> Self {
        Self::new(GesturePhase::Ended, 0., velocity, timestamp)
    }

    pub fn cancelled(timestamp: Duration) -> Self {
        Self::new(GesturePhase::Cancelled, 0., 0., timestamp)
    }
}

/// Size of the panel's container as of the last layout pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub container_height: f64,
    #[serde(default)]
    pub safe_top_inset: f64,
}

impl LayoutMetrics {
    pub fn new(container_height: f64, safe_top_inset: f64) -> Self {
        Self {
            container_height,
            safe_top_inset,
        }
    }

    /// Whether the container has been laid out yet.
    pub fn is_laid_out(&self) -> bool {
        self.container_height.is_finite() && self.container_height > 0.
    }
}

/// Supplies the container geometry.
///
/// May report a zero height before the first layout pass.
pub trait LayoutProvider {
    fn container_height(&self) -> f64;
    fn safe_top_inset(&self) -> f64;

    fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics::new(self.container_height(), self.safe_top_inset())
    }
}

impl LayoutProvider for LayoutMetrics {
    fn container_height(&self) -> f64 {
        self.container_height
    }

    fn safe_top_inset(&self) -> f64 {
        self.safe_top_inset
    }
}

/// Everything the panel reacts to, in one stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    Layout(LayoutMetrics),
    Gesture(GestureSample),
    Scroll(ScrollSignal),
}

mod duration_ms {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64() * 1000.)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(ms / 1000.).map_err(D::Error::custom)
    }
}
