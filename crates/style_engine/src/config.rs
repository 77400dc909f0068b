//! Engine configuration.

use std::env;

use css_values_units::{LengthContext, Viewport};
use log::warn;

const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Font and viewport metrics plus the hot-reload switch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleConfig {
    /// Font size of root panels, in pixels.
    pub default_font_size: f32,
    /// What `rem` refers to, in pixels.
    pub root_font_size: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Whether [`crate::StyleEngine::reload_changed`] re-reads sheets.
    pub hot_reload: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_SIZE, DEFAULT_FONT_SIZE, 0.0, 0.0, false)
    }
}

impl StyleConfig {
    /// Non-positive font sizes fall back to 16px; negative viewport sizes
    /// clamp to zero.
    pub fn new(
        default_font_size: f32,
        root_font_size: f32,
        viewport_width: f32,
        viewport_height: f32,
        hot_reload: bool,
    ) -> Self {
        let font = |size: f32| {
            if size > 0.0 {
                size
            } else {
                DEFAULT_FONT_SIZE
            }
        };
        Self {
            default_font_size: font(default_font_size),
            root_font_size: font(root_font_size),
            viewport_width: viewport_width.max(0.0),
            viewport_height: viewport_height.max(0.0),
            hot_reload,
        }
    }

    /// Read `PANEL_STYLE_FONT_SIZE`, `PANEL_STYLE_ROOT_FONT_SIZE`,
    /// `PANEL_STYLE_VIEWPORT` (`WIDTHxHEIGHT`) and `PANEL_STYLE_HOT_RELOAD`.
    /// Unset or malformed variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// [`StyleConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |name: &str, fallback: f32| {
            lookup(name).map_or(fallback, |text| {
                text.trim().parse::<f32>().unwrap_or_else(|_| {
                    warn!(target: "style_engine", "ignoring {name}={text}: not a number");
                    fallback
                })
            })
        };
        let default_font_size = number("PANEL_STYLE_FONT_SIZE", defaults.default_font_size);
        let root_font_size = number("PANEL_STYLE_ROOT_FONT_SIZE", default_font_size);
        let (viewport_width, viewport_height) = lookup("PANEL_STYLE_VIEWPORT")
            .and_then(|text| {
                let parsed = parse_viewport(&text);
                if parsed.is_none() {
                    warn!(target: "style_engine", "ignoring PANEL_STYLE_VIEWPORT={text}: expected WIDTHxHEIGHT");
                }
                parsed
            })
            .unwrap_or((defaults.viewport_width, defaults.viewport_height));
        let hot_reload = lookup("PANEL_STYLE_HOT_RELOAD").is_some_and(|text| {
            matches!(text.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        });
        Self::new(
            default_font_size,
            root_font_size,
            viewport_width,
            viewport_height,
            hot_reload,
        )
    }

    #[inline]
    pub const fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    /// Length context for a panel whose font size is `font_size`.
    #[inline]
    pub const fn length_context(&self, font_size: f32) -> LengthContext {
        LengthContext {
            font_size,
            root_font_size: self.root_font_size,
            viewport: self.viewport(),
        }
    }
}

fn parse_viewport(text: &str) -> Option<(f32, f32)> {
    let (width, height) = text.trim().split_once(['x', 'X'])?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}
