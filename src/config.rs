use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::placeholder;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Time an image stays visible before the next auto-advance, in seconds.
    pub default_duration_secs: u64,
    /// Lower bound accepted for duration changes at runtime.
    pub min_duration_secs: u64,
    /// Fade-out (and fade-in) duration in milliseconds.
    pub fade_ms: u64,
    /// Whether a fresh session starts with shuffled ordering.
    pub default_randomize: bool,
    /// How many images to warm when a session starts.
    pub preload_on_enter: usize,
    /// How many upcoming images to warm after advancing.
    pub preload_ahead: usize,
    /// How many prior images to warm after stepping back.
    pub preload_behind: usize,
    /// Six-hex-digit background color for generated placeholders.
    pub placeholder_bg_color: String,
    /// URL template for the "image failed to load" placeholder.
    pub error_placeholder: String,
    /// URL template for the "no images available" placeholder.
    pub empty_placeholder: String,
    /// Optional deterministic seed for shuffled display orders.
    pub shuffle_seed: Option<u64>,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&s).context("parsing configuration YAML")
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.min_duration_secs >= 1,
            "min-duration-secs must be at least one second"
        );
        ensure!(
            self.default_duration_secs >= self.min_duration_secs,
            "default-duration-secs must not be below min-duration-secs"
        );
        ensure!(self.fade_ms > 0, "fade-ms must be greater than zero");
        ensure!(
            self.preload_on_enter > 0,
            "preload-on-enter must be greater than zero"
        );
        ensure!(
            self.preload_ahead > 0,
            "preload-ahead must be greater than zero"
        );
        ensure!(
            self.preload_behind > 0,
            "preload-behind must be greater than zero"
        );
        placeholder::validate_bg_color(&self.placeholder_bg_color)
            .context("invalid placeholder-bg-color")?;
        Ok(self)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.default_duration_secs)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let templates = placeholder::PlaceholderTemplates::default();
        Self {
            default_duration_secs: 6,
            min_duration_secs: 1,
            fade_ms: 250,
            default_randomize: false,
            preload_on_enter: 5,
            preload_ahead: 3,
            preload_behind: 2,
            placeholder_bg_color: "222222".to_string(),
            error_placeholder: templates.error,
            empty_placeholder: templates.empty,
            shuffle_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Configuration::default().validated().unwrap();
        assert_eq!(cfg.default_duration_secs, 6);
        assert_eq!(cfg.fade_ms, 250);
        assert_eq!(cfg.preload_on_enter, 5);
        assert_eq!(cfg.preload_ahead, 3);
        assert_eq!(cfg.preload_behind, 2);
        assert!(!cfg.default_randomize);
    }

    #[test]
    fn rejects_duration_below_minimum() {
        let cfg = Configuration {
            default_duration_secs: 1,
            min_duration_secs: 2,
            ..Configuration::default()
        };
        assert!(cfg.validated().is_err());
    }

    #[test]
    fn rejects_zero_fade() {
        let cfg = Configuration {
            fade_ms: 0,
            ..Configuration::default()
        };
        assert!(cfg.validated().is_err());
    }

    #[test]
    fn rejects_bad_background_color() {
        let cfg = Configuration {
            placeholder_bg_color: "red".to_string(),
            ..Configuration::default()
        };
        assert!(cfg.validated().is_err());
    }
}
