use std::path::PathBuf;
use std::time::Duration;

use folio_core::resume::ResumeLinkMode;

use crate::error::ClientError;

/// CMS base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Public site origin used to build preview links.
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";

/// Base URL baked in at build time, if the build environment set one.
const BUILD_API_URL: Option<&str> = option_env!("FOLIO_CMS_API_URL");

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// CMS base URL, without a trailing slash.
    pub api_url: String,
    /// Public site origin, without a trailing slash.
    pub site_url: String,
    /// Where the admin token is persisted between runs.
    pub token_file: PathBuf,
    /// How resume links are produced.
    pub resume_mode: ResumeLinkMode,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for a given CMS URL with every other field defaulted.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: trim_base(api_url.into()),
            site_url: DEFAULT_SITE_URL.to_string(),
            token_file: default_token_file(),
            resume_mode: ResumeLinkMode::default(),
            request_timeout_secs: 30,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                                 |
    /// |------------------------------|-----------------------------------------|
    /// | `FOLIO_API_URL`              | `FOLIO_CMS_API_URL`, see below          |
    /// | `FOLIO_CMS_API_URL`          | build-time value, then localhost:8000   |
    /// | `FOLIO_SITE_URL`             | `http://localhost:3000`                 |
    /// | `FOLIO_TOKEN_FILE`           | `<config dir>/folio/admin_token`        |
    /// | `FOLIO_RESUME_MODE`          | `direct`                                |
    /// | `FOLIO_REQUEST_TIMEOUT_SECS` | `30`                                    |
    pub fn from_env() -> Result<Self, ClientError> {
        let api_url = resolve_api_url(
            std::env::var("FOLIO_API_URL").ok(),
            std::env::var("FOLIO_CMS_API_URL").ok(),
            BUILD_API_URL,
        );

        let site_url = trim_base(
            std::env::var("FOLIO_SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.into()),
        );

        let token_file = std::env::var("FOLIO_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_file());

        let resume_mode: ResumeLinkMode = std::env::var("FOLIO_RESUME_MODE")
            .unwrap_or_else(|_| "direct".into())
            .parse()
            .map_err(|_| {
                ClientError::Config("FOLIO_RESUME_MODE must be 'direct' or 'presigned'".into())
            })?;

        let request_timeout_secs: u64 = std::env::var("FOLIO_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .map_err(|_| {
                ClientError::Config("FOLIO_REQUEST_TIMEOUT_SECS must be a valid u64".into())
            })?;

        Ok(Self {
            api_url,
            site_url,
            token_file,
            resume_mode,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Pick the CMS base URL: runtime override, then `FOLIO_CMS_API_URL` from the
/// environment, then the value baked in at build time, then the local
/// default. Blank values count as unset.
pub fn resolve_api_url(
    runtime: Option<String>,
    cms_env: Option<String>,
    build_time: Option<&str>,
) -> String {
    let chosen = runtime
        .filter(|url| !url.trim().is_empty())
        .or_else(|| cms_env.filter(|url| !url.trim().is_empty()))
        .or_else(|| {
            build_time
                .filter(|url| !url.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    trim_base(chosen)
}

fn trim_base(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// `<config dir>/folio/admin_token`. Platforms without a config dir use the
/// temp dir, never the working directory.
fn default_token_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("folio")
        .join("admin_token")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_override_wins() {
        let url = resolve_api_url(
            Some("https://rt.example.com/".into()),
            Some("https://env.example.com".into()),
            Some("https://build.example.com"),
        );
        assert_eq!(url, "https://rt.example.com");
    }

    #[test]
    fn cms_env_value_beats_build_time_value() {
        let url = resolve_api_url(
            None,
            Some("https://env.example.com/".into()),
            Some("https://build.example.com"),
        );
        assert_eq!(url, "https://env.example.com");
    }

    #[test]
    fn build_time_value_used_when_no_override() {
        let url = resolve_api_url(None, None, Some("https://build.example.com"));
        assert_eq!(url, "https://build.example.com");
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        assert_eq!(
            resolve_api_url(Some("  ".into()), Some(String::new()), Some("")),
            DEFAULT_API_URL
        );
        assert_eq!(resolve_api_url(None, None, None), DEFAULT_API_URL);
    }

    #[test]
    fn default_token_file_is_absolute() {
        let path = default_token_file();
        assert!(path.is_absolute(), "{}", path.display());
        assert!(path.ends_with("folio/admin_token"));
    }

    #[test]
    fn new_trims_trailing_slash() {
        let config = ClientConfig::new("http://cms.local:8000//");
        assert_eq!(config.api_url, "http://cms.local:8000");
        assert_eq!(config.resume_mode, ResumeLinkMode::Direct);
    }
}
