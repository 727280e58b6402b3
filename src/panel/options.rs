//! Runtime tuning for the panel, resolved and validated from the config file.

use picker_panel_config::Config;

/// Rejected configuration.
///
/// Only surfaces when a session is set up; nothing at runtime produces it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelOptions {
    pub panel: PanelGeometry,
    pub release: ReleaseThresholds,
    pub scroll_linkage: ScrollLinkageOptions,
    pub preview_effect: PreviewEffectOptions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    /// Fraction of the container above the panel in the partial state, in `(0, 1)`.
    pub top_height_ratio: f64,
    pub expanded_padding: f64,
    /// Extent of the drag band below the partial offset; also the dismiss progress span.
    pub dismiss_margin: f64,
    pub allow_collapsed: bool,
}

/// Gesture release thresholds, in container points and points per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseThresholds {
    pub dismiss_distance: f64,
    pub dismiss_velocity: f64,
    pub expand_velocity: f64,
    pub collapse_velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLinkageOptions {
    pub enabled: bool,
    pub min_delta: f64,
    pub min_velocity: f64,
    pub top_zone: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewEffectOptions {
    pub scale_factor: f64,
    pub alpha_factor: f64,
    pub max_lift: f64,
    pub max_corner_radius: f64,
    pub media_alpha_factor: f64,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self::from_config_unchecked(&Config::default())
    }
}

impl PanelOptions {
    /// Resolves and validates options from a parsed config.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let options = Self::from_config_unchecked(config);
        options.validate()?;
        Ok(options)
    }

    fn from_config_unchecked(config: &Config) -> Self {
        let panel = &config.panel;
        let linkage = &config.scroll_linkage;
        let effect = &config.preview_effect;

        Self {
            panel: PanelGeometry {
                top_height_ratio: panel.top_height_ratio.get(),
                expanded_padding: panel.expanded_padding.get(),
                dismiss_margin: panel.dismiss_margin.get(),
                allow_collapsed: panel.allow_collapsed,
            },
            release: ReleaseThresholds {
                dismiss_distance: panel.dismiss_distance.get(),
                dismiss_velocity: panel.dismiss_velocity.get(),
                expand_velocity: panel.expand_velocity.get(),
                collapse_velocity: panel.collapse_velocity.get(),
            },
            scroll_linkage: ScrollLinkageOptions {
                enabled: !linkage.off,
                min_delta: linkage.min_delta.get(),
                min_velocity: linkage.min_velocity.get(),
                top_zone: linkage.top_zone.get(),
            },
            preview_effect: PreviewEffectOptions {
                scale_factor: effect.scale_factor.get(),
                alpha_factor: effect.alpha_factor.get(),
                max_lift: effect.max_lift.get(),
                max_corner_radius: effect.max_corner_radius.get(),
                media_alpha_factor: effect.media_alpha_factor.get(),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let panel = &self.panel;
        let release = &self.release;
        let linkage = &self.scroll_linkage;
        let effect = &self.preview_effect;

        check(
            "top-height-ratio",
            panel.top_height_ratio,
            "between 0 and 1 exclusive",
            |x| x > 0. && x < 1.,
        )?;
        check_non_negative("expanded-padding", panel.expanded_padding)?;
        check_positive("dismiss-margin", panel.dismiss_margin)?;

        // Position-based dismissal must be reachable inside the drag band.
        check(
            "dismiss-distance",
            release.dismiss_distance,
            "positive and at most dismiss-margin",
            |x| x > 0. && x <= panel.dismiss_margin,
        )?;
        check_non_negative("dismiss-velocity", release.dismiss_velocity)?;
        check_non_negative("expand-velocity", release.expand_velocity)?;
        check_non_negative("collapse-velocity", release.collapse_velocity)?;

        check_non_negative("min-delta", linkage.min_delta)?;
        check_non_negative("min-velocity", linkage.min_velocity)?;
        check_non_negative("top-zone", linkage.top_zone)?;

        check_fraction("scale-factor", effect.scale_factor)?;
        check_fraction("alpha-factor", effect.alpha_factor)?;
        check_non_negative("max-lift", effect.max_lift)?;
        check_non_negative("max-corner-radius", effect.max_corner_radius)?;
        check_fraction("media-alpha-factor", effect.media_alpha_factor)?;

        Ok(())
    }
}

fn check(
    name: &'static str,
    value: f64,
    expected: &'static str,
    valid: impl FnOnce(f64) -> bool,
) -> Result<(), ConfigError> {
    // NaN fails every comparison, so it is rejected by all predicates below.
    if value.is_finite() && valid(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected,
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check(name, value, "positive", |x| x > 0.)
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check(name, value, "non-negative", |x| x >= 0.)
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check(name, value, "between 0 and 1", |x| (0. ..=1.).contains(&x))
}
