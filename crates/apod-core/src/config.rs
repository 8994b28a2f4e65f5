use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default APOD metadata endpoint.
pub const DEFAULT_API_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Global configuration loaded from `~/.config/apod/config.toml`.
///
/// The API key is configuration, not a constant in the source: `DEMO_KEY`
/// works out of the box but is heavily rate-limited, so users are expected
/// to put their own key here (or pass `--api-key`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApodConfig {
    /// Endpoint of the APOD metadata service.
    pub api_url: String,
    /// API key sent with every metadata request.
    pub api_key: String,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds, applied to both the metadata
    /// request and the image download.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    15
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for ApodConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: "DEMO_KEY".to_string(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("apod")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ApodConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ApodConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ApodConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ApodConfig::default();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.api_key, "DEMO_KEY");
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ApodConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ApodConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.api_url, cfg.api_url);
        assert_eq!(parsed.api_key, cfg.api_key);
        assert_eq!(parsed.connect_timeout_secs, cfg.connect_timeout_secs);
        assert_eq!(parsed.request_timeout_secs, cfg.request_timeout_secs);
    }

    #[test]
    fn config_toml_timeouts_optional() {
        let toml = r#"
            api_url = "https://apod.example.test/v1"
            api_key = "abc123"
        "#;
        let cfg: ApodConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.api_url, "https://apod.example.test/v1");
        assert_eq!(cfg.api_key, "abc123");
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.request_timeout_secs, 60);
    }
}
