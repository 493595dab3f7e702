//! Core data models for the loop carousel.
//! Items are supplied by the host; the config mirrors the component's optional props.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ratio used when the configured aspect ratio cannot be parsed.
pub const DEFAULT_ASPECT_RATIO: f64 = 430.0 / 224.0;
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u32 = 5000;
/// Gap between slides on the main strip, in CSS pixels.
pub const DEFAULT_SLIDE_SPACING: f64 = 16.0;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    /// Image URL (or data URI) rendered for this slide.
    #[serde(rename = "imageRef")]
    pub image_ref: String,
}

impl Item {
    pub fn new(id: i64, image_ref: impl Into<String>) -> Self {
        Self {
            id,
            image_ref: image_ref.into(),
        }
    }
}

/// Width over height of the rendered image box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectRatio(pub f64);

impl AspectRatio {
    /// Parses a `width / height` (or `width:height`) string.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let err = || ConfigError::AspectRatio {
            raw: raw.to_string(),
        };
        let (w, h) = raw.split_once(['/', ':']).ok_or_else(err)?;
        let w: f64 = w.trim().parse().map_err(|_| err())?;
        let h: f64 = h.trim().parse().map_err(|_| err())?;
        let ratio = w / h;
        if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 || !ratio.is_finite() {
            return Err(err());
        }
        Ok(Self(ratio))
    }

    /// Like [`AspectRatio::parse`] but never fails; malformed input yields the default ratio.
    pub fn parse_or_default(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("{e}; falling back to {DEFAULT_ASPECT_RATIO:.4}");
                Self::default()
            }
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Height of a box of the given width at this ratio.
    pub fn height_for(self, width: f64) -> f64 {
        width / self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self(DEFAULT_ASPECT_RATIO)
    }
}

/// Host-supplied options. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    pub autoplay: bool,
    pub autoplay_interval_ms: u32,
    pub dot_pagination: bool,
    pub number_pagination: bool,
    pub arrows: bool,
    pub index_counter: bool,
    /// `width / height`, e.g. `"430 / 224"`.
    pub aspect_ratio: String,
    /// Tapping a slide opens the full-screen zoom viewer.
    pub tap_to_zoom: bool,
    pub slide_spacing: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            dot_pagination: false,
            number_pagination: false,
            arrows: false,
            index_counter: false,
            aspect_ratio: "430 / 224".to_string(),
            tap_to_zoom: false,
            slide_spacing: DEFAULT_SLIDE_SPACING,
        }
    }
}

impl CarouselConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        AspectRatio::parse_or_default(&self.aspect_ratio)
    }

    /// Autoplay period as a browser timer delay: at least 1ms, saturating at `i32::MAX`.
    pub fn autoplay_delay_ms(&self) -> i32 {
        i32::try_from(self.autoplay_interval_ms.max(1)).unwrap_or(i32::MAX)
    }

    /// Spacing with negative or non-finite values treated as zero.
    pub fn spacing(&self) -> f64 {
        if self.slide_spacing.is_finite() {
            self.slide_spacing.max(0.0)
        } else {
            0.0
        }
    }
}

/// Placeholder gallery used by the demo host.
pub fn demo_items() -> Vec<Item> {
    (1..=5)
        .map(|i| Item::new(i, format!("https://picsum.photos/id/{}/860/448", 10 + i * 7)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_ratio_string() {
        let r = AspectRatio::parse("430/224").unwrap();
        assert!((r.value() - 1.919_642_857).abs() < 1e-6);
        let spaced = AspectRatio::parse("430 / 224").unwrap();
        assert_eq!(r, spaced);
    }

    #[test]
    fn accepts_colon_and_decimals() {
        let r = AspectRatio::parse("16:9").unwrap();
        assert!((r.value() - 16.0 / 9.0).abs() < 1e-12);
        let r = AspectRatio::parse("1.5/1").unwrap();
        assert_eq!(r.value(), 1.5);
    }

    #[test]
    fn malformed_ratio_falls_back() {
        for raw in ["abc/224", "430", "430/0", "-1/2", "", "/"] {
            assert!(AspectRatio::parse(raw).is_err(), "{raw} should fail");
            assert_eq!(AspectRatio::parse_or_default(raw), AspectRatio::default());
        }
    }

    #[test]
    fn height_follows_ratio() {
        let r = AspectRatio(2.0);
        assert_eq!(r.height_for(400.0), 200.0);
    }

    #[test]
    fn config_json_fills_defaults() {
        let cfg = CarouselConfig::from_json(r#"{"autoplay":false,"dotPagination":true}"#).unwrap();
        assert!(!cfg.autoplay);
        assert!(cfg.dot_pagination);
        assert_eq!(cfg.autoplay_interval_ms, DEFAULT_AUTOPLAY_INTERVAL_MS);
        assert_eq!(cfg.aspect_ratio, "430 / 224");
        assert!(!cfg.tap_to_zoom);
    }

    #[test]
    fn config_json_rejects_garbage() {
        assert!(matches!(
            CarouselConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn spacing_is_sanitized() {
        let mut cfg = CarouselConfig::default();
        cfg.slide_spacing = -3.0;
        assert_eq!(cfg.spacing(), 0.0);
        cfg.slide_spacing = f64::NAN;
        assert_eq!(cfg.spacing(), 0.0);
    }

    #[test]
    fn autoplay_delay_saturates() {
        let mut cfg = CarouselConfig::default();
        assert_eq!(cfg.autoplay_delay_ms(), 5000);
        cfg.autoplay_interval_ms = 0;
        assert_eq!(cfg.autoplay_delay_ms(), 1);
        cfg.autoplay_interval_ms = 3_000_000_000;
        assert_eq!(cfg.autoplay_delay_ms(), i32::MAX);
    }

    #[test]
    fn item_serializes_image_ref() {
        let json = serde_json::to_string(&Item::new(3, "a.png")).unwrap();
        assert_eq!(json, r#"{"id":3,"imageRef":"a.png"}"#);
    }
}
