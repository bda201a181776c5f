use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub gps: GpsConfig,
    #[serde(default)]
    pub music: MusicConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base path of the vehicle assistant HTTP API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// When true, ring channels ramp locally instead of polling `/motor`.
    #[serde(default)]
    pub simulate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_motor_ms")]
    pub motor_ms: u64,
    #[serde(default = "default_spectrum_ms")]
    pub spectrum_ms: u64,
    #[serde(default = "default_gps_ms")]
    pub gps_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpsConfig {
    #[serde(default = "default_latitude")]
    pub start_latitude: f64,
    #[serde(default = "default_longitude")]
    pub start_longitude: f64,
}

/// Placeholder now-playing metadata — there is no real player behind this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    #[serde(default = "default_track_title")]
    pub title: String,
    #[serde(default = "default_track_artist")]
    pub artist: String,
    #[serde(default = "default_track_duration")]
    pub duration_secs: u32,
    #[serde(default = "default_next_title")]
    pub next_title: String,
    #[serde(default = "default_next_artist")]
    pub next_artist: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            simulate: false,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            motor_ms: default_motor_ms(),
            spectrum_ms: default_spectrum_ms(),
            gps_ms: default_gps_ms(),
        }
    }
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            start_latitude: default_latitude(),
            start_longitude: default_longitude(),
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            title: default_track_title(),
            artist: default_track_artist(),
            duration_secs: default_track_duration(),
            next_title: default_next_title(),
            next_artist: default_next_artist(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_motor_ms() -> u64 {
    500
}

fn default_spectrum_ms() -> u64 {
    80
}

fn default_gps_ms() -> u64 {
    5000
}

fn default_latitude() -> f64 {
    -23.55052
}

fn default_longitude() -> f64 {
    -46.633309
}

fn default_track_title() -> String {
    "Synthwave Dream".to_string()
}

fn default_track_artist() -> String {
    "Neon Rider".to_string()
}

fn default_track_duration() -> u32 {
    240
}

fn default_next_title() -> String {
    "Electric Night".to_string()
}

fn default_next_artist() -> String {
    "Cyber Runner".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:5000/api");
        assert!(!config.backend.simulate);
        assert_eq!(config.polling.motor_ms, 500);
        assert_eq!(config.polling.spectrum_ms, 80);
        assert_eq!(config.music.duration_secs, 240);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            simulate = true
            "#,
        )
        .unwrap();
        assert!(config.backend.simulate);
        assert_eq!(config.backend.base_url, "http://localhost:5000/api");
        assert_eq!(config.polling.gps_ms, 5000);
    }
}
