//! Configuration file for the picker panel.
//!
//! The file is KDL. Every section and every field is optional; missing values fall back to the
//! reference tuning of the sliding panel. Range checks that depend on more than one field (for
//! example, the dismiss distance fitting inside the dismiss margin) happen when the parsed
//! config is turned into runtime options, not here.

use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};
use tracing::debug;

pub mod utils;

pub use crate::utils::FloatOrInt;

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub panel: Panel,
    #[knuffel(child, default)]
    pub scroll_linkage: ScrollLinkage,
    #[knuffel(child, default)]
    pub preview_effect: PreviewEffect,
}

/// Panel geometry and release thresholds.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    /// Fraction of the container height occupied by the preview above the panel at rest.
    #[knuffel(child, unwrap(argument), default = Self::default().top_height_ratio)]
    pub top_height_ratio: FloatOrInt<0, 1>,
    /// Extra gap below the safe area when the panel is fully expanded.
    #[knuffel(child, unwrap(argument), default = Self::default().expanded_padding)]
    pub expanded_padding: FloatOrInt<0, 65535>,
    /// How far below the resting position the panel can be dragged.
    #[knuffel(child, unwrap(argument), default = Self::default().dismiss_margin)]
    pub dismiss_margin: FloatOrInt<0, 65535>,
    /// Drag distance below the resting position that dismisses on release.
    #[knuffel(child, unwrap(argument), default = Self::default().dismiss_distance)]
    pub dismiss_distance: FloatOrInt<0, 65535>,
    #[knuffel(child, unwrap(argument), default = Self::default().dismiss_velocity)]
    pub dismiss_velocity: FloatOrInt<0, 1000000>,
    #[knuffel(child, unwrap(argument), default = Self::default().expand_velocity)]
    pub expand_velocity: FloatOrInt<0, 1000000>,
    #[knuffel(child, unwrap(argument), default = Self::default().collapse_velocity)]
    pub collapse_velocity: FloatOrInt<0, 1000000>,
    /// Re-enables the deprecated collapsed state.
    #[knuffel(child)]
    pub allow_collapsed: bool,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            top_height_ratio: FloatOrInt(0.33),
            expanded_padding: FloatOrInt(0.),
            dismiss_margin: FloatOrInt(150.),
            dismiss_distance: FloatOrInt(100.),
            dismiss_velocity: FloatOrInt(800.),
            expand_velocity: FloatOrInt(500.),
            collapse_velocity: FloatOrInt(500.),
            allow_collapsed: false,
        }
    }
}

/// Coupling between the photo grid scroll and the panel state.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct ScrollLinkage {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument), default = Self::default().min_delta)]
    pub min_delta: FloatOrInt<0, 65535>,
    #[knuffel(child, unwrap(argument), default = Self::default().min_velocity)]
    pub min_velocity: FloatOrInt<0, 1000000>,
    /// Content offsets up to this count as being at the top of the grid.
    #[knuffel(child, unwrap(argument), default = Self::default().top_zone)]
    pub top_zone: FloatOrInt<0, 65535>,
}

impl Default for ScrollLinkage {
    fn default() -> Self {
        Self {
            off: false,
            min_delta: FloatOrInt(5.),
            min_velocity: FloatOrInt(50.),
            top_zone: FloatOrInt(20.),
        }
    }
}

/// Effects applied to the media preview while the panel is dragged toward dismissal.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct PreviewEffect {
    #[knuffel(child, unwrap(argument), default = Self::default().scale_factor)]
    pub scale_factor: FloatOrInt<0, 1>,
    #[knuffel(child, unwrap(argument), default = Self::default().alpha_factor)]
    pub alpha_factor: FloatOrInt<0, 1>,
    #[knuffel(child, unwrap(argument), default = Self::default().max_lift)]
    pub max_lift: FloatOrInt<0, 65535>,
    #[knuffel(child, unwrap(argument), default = Self::default().max_corner_radius)]
    pub max_corner_radius: FloatOrInt<0, 65535>,
    #[knuffel(child, unwrap(argument), default = Self::default().media_alpha_factor)]
    pub media_alpha_factor: FloatOrInt<0, 1>,
}

impl Default for PreviewEffect {
    fn default() -> Self {
        Self {
            scale_factor: FloatOrInt(0.08),
            alpha_factor: FloatOrInt(0.4),
            max_lift: FloatOrInt(30.),
            max_corner_radius: FloatOrInt(12.),
            media_alpha_factor: FloatOrInt(0.7),
        }
    }
}

impl Config {
    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }

    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }
}
