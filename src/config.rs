use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "interactions-config";

/// Tunables for every widget. Any field left out of the page's JSON keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub nav_breakpoint_px: f64,
    pub reveal_threshold: f64,
    pub stat_threshold: f64,
    pub stat_duration_ms: f64,
    pub magnetic_strength_px: f64,
    pub carousel_interval_ms: u32,
    /// Header height the active-section tracker triggers ahead of.
    pub section_offset_px: f64,
    pub parallax_strength_px: f64,
    pub parallax_scroll_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nav_breakpoint_px: 768.0,
            reveal_threshold: 0.18,
            stat_threshold: 0.3,
            stat_duration_ms: 1200.0,
            magnetic_strength_px: 12.0,
            carousel_interval_ms: 3500,
            section_offset_px: 100.0,
            parallax_strength_px: 10.0,
            parallax_scroll_factor: -0.02,
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str::<Self>(raw).map(Self::sanitized)
    }

    /// Pulls out-of-range overrides back to values the browser accepts.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for (name, value) in [
            ("reveal_threshold", &mut self.reveal_threshold),
            ("stat_threshold", &mut self.stat_threshold),
        ] {
            let raw = *value;
            if !(0.0..=1.0).contains(&raw) {
                *value = raw.clamp(0.0, 1.0);
                log::warn!("{} {} outside [0, 1], using {}", name, raw, *value);
            }
        }
        if self.carousel_interval_ms == 0 {
            log::warn!(
                "carousel_interval_ms must be positive, using {}",
                defaults.carousel_interval_ms
            );
            self.carousel_interval_ms = defaults.carousel_interval_ms;
        }
        self
    }

    pub fn from_document(document: &Document) -> Self {
        let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let raw = element.text_content().unwrap_or_default();
        match Self::from_json(&raw) {
            Ok(config) => {
                log::debug!("Loaded interaction config overrides: {:?}", config);
                config
            }
            Err(e) => {
                log::warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_uses_defaults() {
        assert_eq!(Config::from_json("  \n").unwrap(), Config::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let raw = r#"{ "section_offset_px": 64, "carousel_interval_ms": 5000 }"#;
        let config = Config::from_json(raw).unwrap();
        assert_eq!(config.section_offset_px, 64.0);
        assert_eq!(config.carousel_interval_ms, 5000);
        assert_eq!(config.nav_breakpoint_px, 768.0);
        assert_eq!(config.stat_duration_ms, 1200.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json("{ section_offset_px: }").is_err());
    }

    #[test]
    fn thresholds_are_clamped_into_range() {
        let config =
            Config::from_json(r#"{ "reveal_threshold": 1.5, "stat_threshold": -0.2 }"#).unwrap();
        assert_eq!(config.reveal_threshold, 1.0);
        assert_eq!(config.stat_threshold, 0.0);

        let config = Config::from_json(r#"{ "reveal_threshold": 0.4 }"#).unwrap();
        assert_eq!(config.reveal_threshold, 0.4);
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let config = Config::from_json(r#"{ "carousel_interval_ms": 0 }"#).unwrap();
        assert_eq!(config.carousel_interval_ms, 3500);
    }
}
