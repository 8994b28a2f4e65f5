//! APOD metadata client.
//!
//! Resolves a calendar date to that day's APOD entry via the metadata
//! service, and exposes the [`ApodSource`] trait so the pipeline never
//! depends on the network directly.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::config::ApodConfig;
use crate::date::ApodDate;
use crate::fetch::{self, FetchError, HttpOptions};

/// One day's APOD entry as returned by the metadata service.
#[derive(Debug, Clone, Deserialize)]
pub struct ApodInfo {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    pub media_type: String,
    /// Standard-resolution media URL. Always present.
    pub url: String,
    /// High-resolution image URL. Absent for video entries.
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl ApodInfo {
    /// The URL to download: high-resolution when the service provides one,
    /// standard-resolution otherwise. Some dates carry a video instead of
    /// an image; there is nothing to download for those, so they are
    /// rejected here with a real error rather than a missing-field panic.
    pub fn image_url(&self) -> Result<&str> {
        if self.media_type != "image" {
            bail!(
                "APOD for {} is a {} entry ({:?}), not an image",
                self.date,
                self.media_type,
                self.title
            );
        }
        Ok(self.hdurl.as_deref().unwrap_or(&self.url))
    }
}

/// Source of APOD metadata and image bytes.
///
/// The pipeline depends on this trait only; tests substitute a stub with
/// canned responses and no network.
pub trait ApodSource {
    fn info(&self, date: ApodDate) -> Result<ApodInfo>;
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// HTTP-backed source talking to the real metadata service.
pub struct ApodClient {
    api_url: String,
    api_key: String,
    http: HttpOptions,
}

impl ApodClient {
    pub fn new(cfg: &ApodConfig) -> Self {
        Self {
            api_url: cfg.api_url.clone(),
            api_key: cfg.api_key.clone(),
            http: HttpOptions {
                connect_timeout: std::time::Duration::from_secs(cfg.connect_timeout_secs),
                request_timeout: std::time::Duration::from_secs(cfg.request_timeout_secs),
            },
        }
    }

    /// Endpoint URL with `api_key` and `date` query parameters attached.
    fn metadata_url(&self, date: ApodDate) -> Result<url::Url> {
        let date = date.to_string();
        url::Url::parse_with_params(
            &self.api_url,
            &[("api_key", self.api_key.as_str()), ("date", date.as_str())],
        )
        .with_context(|| format!("invalid metadata endpoint URL: {}", self.api_url))
    }
}

impl ApodSource for ApodClient {
    fn info(&self, date: ApodDate) -> Result<ApodInfo> {
        let query = self.metadata_url(date)?;
        let body = fetch::get_bytes(query.as_str(), &self.http)
            .with_context(|| format!("fetch APOD metadata for {}", date))?;
        let info: ApodInfo = serde_json::from_slice(&body)
            .with_context(|| format!("decode APOD metadata for {}", date))?;
        Ok(info)
    }

    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        fetch::get_bytes(url, &self.http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApodConfig;

    fn client() -> ApodClient {
        let cfg = ApodConfig {
            api_key: "testkey".into(),
            ..ApodConfig::default()
        };
        ApodClient::new(&cfg)
    }

    #[test]
    fn metadata_url_carries_key_and_date() {
        let date: ApodDate = "2022-01-01".parse().unwrap();
        let url = client().metadata_url(date).unwrap();
        assert_eq!(url.domain(), Some("api.nasa.gov"));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("api_key".into(), "testkey".into())));
        assert!(pairs.contains(&("date".into(), "2022-01-01".into())));
    }

    #[test]
    fn decodes_image_entry() {
        let body = r#"{
            "date": "2022-01-01",
            "title": "The Largest Rock in our Solar System",
            "explanation": "...",
            "media_type": "image",
            "url": "https://example.com/img/sample_small.jpg",
            "hdurl": "https://example.com/img/sample.jpg",
            "service_version": "v1"
        }"#;
        let info: ApodInfo = serde_json::from_str(body).unwrap();
        assert_eq!(
            info.image_url().unwrap(),
            "https://example.com/img/sample.jpg"
        );
    }

    #[test]
    fn image_url_falls_back_when_hdurl_absent() {
        let info = ApodInfo {
            date: "2022-01-01".into(),
            title: "t".into(),
            explanation: String::new(),
            media_type: "image".into(),
            url: "https://example.com/img/only.jpg".into(),
            hdurl: None,
            copyright: None,
        };
        assert_eq!(info.image_url().unwrap(), "https://example.com/img/only.jpg");
    }

    #[test]
    fn video_entry_is_rejected() {
        let info = ApodInfo {
            date: "2022-01-05".into(),
            title: "Comet Timelapse".into(),
            explanation: String::new(),
            media_type: "video".into(),
            url: "https://example.com/v/clip".into(),
            hdurl: None,
            copyright: None,
        };
        let err = info.image_url().unwrap_err();
        assert!(err.to_string().contains("not an image"));
    }
}
