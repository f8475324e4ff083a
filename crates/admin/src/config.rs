//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREDESK_API_BASE` - REST API base URL (default: `https://api.sartree.com/api/v1`)
//! - `STOREDESK_STORAGE_BASE` - Public storage URL for avatars (default: `https://api.sartree.com/storage`)
//! - `STOREDESK_SESSION_FILE` - Session document path (default: `~/.storedesk/session.json`)
//! - `STOREDESK_LOG_JSON` - Emit JSON logs when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! ## Optional (sign-in)
//! - `STOREDESK_CLIENT_ID` - OAuth password-grant client ID
//! - `STOREDESK_CLIENT_SECRET` - OAuth password-grant client secret
//!
//! Both sign-in variables must be set together. Without them every command
//! except sign-in works against an existing session.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE: &str = "https://api.sartree.com/api/v1";
const DEFAULT_STORAGE_BASE: &str = "https://api.sartree.com/storage";
const DEFAULT_SESSION_DIR: &str = ".storedesk";
const DEFAULT_SESSION_FILE: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Sign-in is not configured: set STOREDESK_CLIENT_ID and STOREDESK_CLIENT_SECRET")]
    SignInNotConfigured,
}

/// Console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// REST API base URL, without trailing slash
    pub api_base: Url,
    /// Base URL under which profile photos are served
    pub storage_base: Url,
    /// Where the session document lives
    pub session_file: PathBuf,
    /// OAuth client used for the password grant (optional)
    pub oauth: Option<OAuthClientConfig>,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

/// OAuth client credentials for the password grant.
///
/// Implements `Debug` manually to redact the secret.
#[derive(Clone)]
pub struct OAuthClientConfig {
    /// Client identifier
    pub client_id: String,
    /// Client secret
    pub client_secret: SecretString,
}

impl std::fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl OAuthClientConfig {
    /// Create client credentials.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    fn from_env() -> Result<Option<Self>, ConfigError> {
        let client_id = get_optional_env("STOREDESK_CLIENT_ID");
        let client_secret = get_optional_env("STOREDESK_CLIENT_SECRET");

        match (client_id, client_secret) {
            (Some(id), Some(secret)) => Ok(Some(Self::new(id, secret))),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "STOREDESK_CLIENT_*".to_string(),
                "Both STOREDESK_CLIENT_ID and STOREDESK_CLIENT_SECRET must be set together"
                    .to_string(),
            )),
        }
    }

    /// The secret, for building the sign-in form.
    pub(crate) fn secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL is malformed, the home directory cannot
    /// be determined for the default session path, or the sign-in variables
    /// are only partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base = get_url("STOREDESK_API_BASE", DEFAULT_API_BASE)?;
        let storage_base = get_url("STOREDESK_STORAGE_BASE", DEFAULT_STORAGE_BASE)?;
        let session_file = match get_optional_env("STOREDESK_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_session_file()?,
        };
        let oauth = OAuthClientConfig::from_env()?;
        let log_json = get_optional_env("STOREDESK_LOG_JSON")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        Ok(Self {
            api_base,
            storage_base,
            session_file,
            oauth,
            log_json,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Build a configuration for an explicit API base URL, with defaults for
    /// everything else. Used by embedders and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL cannot be parsed.
    pub fn for_api_base(api_base: &str) -> Result<Self, ConfigError> {
        let api_base = parse_url("api_base", api_base)?;
        let storage_base = parse_url("storage_base", DEFAULT_STORAGE_BASE)?;
        Ok(Self {
            api_base,
            storage_base,
            session_file: std::env::temp_dir()
                .join(DEFAULT_SESSION_DIR)
                .join(DEFAULT_SESSION_FILE),
            oauth: None,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        })
    }

    /// Attach OAuth client credentials.
    #[must_use]
    pub fn with_oauth(mut self, oauth: OAuthClientConfig) -> Self {
        self.oauth = Some(oauth);
        self
    }

    /// Override the session document path.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// Returns the OAuth client configuration, required for sign-in.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SignInNotConfigured` when absent.
    pub fn oauth(&self) -> Result<&OAuthClientConfig, ConfigError> {
        self.oauth.as_ref().ok_or(ConfigError::SignInNotConfigured)
    }

    /// Absolute URL for a profile photo path reported by the API.
    #[must_use]
    pub fn storage_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.storage_base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_url(key: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = get_optional_env(key).unwrap_or_else(|| default.to_string());
    parse_url(key, &raw)
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }
    Ok(url)
}

fn default_session_file() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .ok_or_else(|| ConfigError::MissingEnvVar("HOME".to_string()))?;
    Ok(PathBuf::from(home)
        .join(DEFAULT_SESSION_DIR)
        .join(DEFAULT_SESSION_FILE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_for_api_base_trims_trailing_slash() {
        let config = ConsoleConfig::for_api_base("http://127.0.0.1:9000/api/v1/").unwrap();
        assert_eq!(config.api_base.as_str(), "http://127.0.0.1:9000/api/v1");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(matches!(
            ConsoleConfig::for_api_base("ftp://example.com"),
            Err(ConfigError::InvalidEnvVar(..))
        ));
    }

    #[test]
    fn test_oauth_required_for_sign_in() {
        let config = ConsoleConfig::for_api_base("http://localhost:1").unwrap();
        assert!(matches!(
            config.oauth(),
            Err(ConfigError::SignInNotConfigured)
        ));
        let config = config.with_oauth(OAuthClientConfig::new("2", "s3cret"));
        assert_eq!(config.oauth().unwrap().client_id, "2");
    }

    #[test]
    fn test_oauth_debug_redacts_secret() {
        let oauth = OAuthClientConfig::new("2", "do-not-print");
        let debug = format!("{oauth:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("do-not-print"));
    }

    #[test]
    fn test_storage_url_joins_paths() {
        let config = ConsoleConfig::for_api_base("http://localhost:1").unwrap();
        assert_eq!(
            config.storage_url("/avatars/a.png"),
            "https://api.sartree.com/storage/avatars/a.png"
        );
    }
}
