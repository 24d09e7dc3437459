//! Endpoint and credential configuration.
//!
//! The configuration is built once at startup and handed to the transport
//! client. Nothing here carries a default credential: a missing URL or key is
//! an error.

use std::fmt;

use crate::error::{ErrorKind, Result};

pub const ENDPOINT_VAR: &str = "SHEET_API_URL";
pub const KEY_VAR: &str = "SHEET_API_KEY";
pub const SCHEME_VAR: &str = "SHEET_AUTH_SCHEME";
pub const HEADER_VAR: &str = "SHEET_API_KEY_HEADER";
pub const DEMO_VAR: &str = "SHEET_DEMO_MODE";

pub const DEFAULT_KEY_HEADER: &str = "X-Api-Key";

/// How the credential is attached to each request.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// Custom header carrying the raw key, e.g. `X-Api-Key: <key>`.
    ApiKeyHeader { header: String, key: String },
    /// `Authorization: Bearer <token>`.
    Bearer { token: String },
}

impl AuthScheme {
    pub fn api_key(key: impl Into<String>) -> Self {
        AuthScheme::ApiKeyHeader {
            header: DEFAULT_KEY_HEADER.to_string(),
            key: key.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        AuthScheme::Bearer {
            token: token.into(),
        }
    }

    /// Header name and value to send.
    pub fn header(&self) -> (&str, String) {
        match self {
            AuthScheme::ApiKeyHeader { header, key } => (header.as_str(), key.clone()),
            AuthScheme::Bearer { token } => ("Authorization", format!("Bearer {token}")),
        }
    }

    fn secret(&self) -> &str {
        match self {
            AuthScheme::ApiKeyHeader { key, .. } => key,
            AuthScheme::Bearer { token } => token,
        }
    }
}

impl fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::ApiKeyHeader { header, .. } => f
                .debug_struct("ApiKeyHeader")
                .field("header", header)
                .field("key", &"<redacted>")
                .finish(),
            AuthScheme::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub endpoint: String,
    pub auth: AuthScheme,
}

impl ApiConfig {
    pub fn new(endpoint: impl Into<String>, auth: AuthScheme) -> Result<Self> {
        let config = ApiConfig {
            endpoint: endpoint.into(),
            auth,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let endpoint = get(ENDPOINT_VAR)
            .ok_or_else(|| ErrorKind::ConfigError(format!("{ENDPOINT_VAR} is not set")))?;
        let key =
            get(KEY_VAR).ok_or_else(|| ErrorKind::ConfigError(format!("{KEY_VAR} is not set")))?;

        let auth = match get(SCHEME_VAR).as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("api-key") | Some("x-api-key") | Some("header") => {
                AuthScheme::ApiKeyHeader {
                    header: get(HEADER_VAR).unwrap_or_else(|| DEFAULT_KEY_HEADER.to_string()),
                    key,
                }
            }
            Some("bearer") => AuthScheme::Bearer { token: key },
            Some(other) => {
                return Err(ErrorKind::ConfigError(format!(
                    "{SCHEME_VAR} must be `api-key` or `bearer`, got `{other}`"
                ))
                .into())
            }
        };

        Self::new(endpoint, auth)
    }

    fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ErrorKind::ConfigError(format!(
                "endpoint must be an http(s) URL, got `{}`",
                self.endpoint
            ))
            .into());
        }
        if self.auth.secret().trim().is_empty() {
            return Err(ErrorKind::ConfigError("credential is empty".to_string()).into());
        }
        if let AuthScheme::ApiKeyHeader { header, .. } = &self.auth {
            let valid = !header.is_empty()
                && header
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));
            if !valid {
                return Err(ErrorKind::ConfigError(format!("invalid header name `{header}`")).into());
            }
        }
        Ok(())
    }
}

/// Whether the demo client should stand in for the remote API.
pub fn demo_mode_from_env() -> bool {
    parse_flag(std::env::var(DEMO_VAR).ok().as_deref())
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_to_api_key_header() {
        let config = ApiConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "https://api.example.com/sheets/abc"),
            (KEY_VAR, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "https://api.example.com/sheets/abc");
        assert_eq!(config.auth.header(), ("X-Api-Key", "secret".to_string()));
    }

    #[test]
    fn bearer_scheme_uses_authorization_header() {
        let config = ApiConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "https://api.example.com/v1/rows"),
            (KEY_VAR, "tok"),
            (SCHEME_VAR, "Bearer"),
        ]))
        .unwrap();
        assert_eq!(config.auth.header(), ("Authorization", "Bearer tok".to_string()));
    }

    #[test]
    fn custom_header_name_is_honoured() {
        let config = ApiConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "http://localhost:8080"),
            (KEY_VAR, "k"),
            (HEADER_VAR, "X-Sheet-Token"),
        ]))
        .unwrap();
        assert_eq!(config.auth.header().0, "X-Sheet-Token");
    }

    #[test]
    fn missing_values_are_errors_not_defaults() {
        let err = ApiConfig::from_lookup(lookup(&[(KEY_VAR, "k")])).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ConfigError(_)));

        let err =
            ApiConfig::from_lookup(lookup(&[(ENDPOINT_VAR, "https://x.test"), (KEY_VAR, "  ")]))
                .unwrap_err();
        assert!(err.to_string().contains(KEY_VAR));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ApiConfig::new("ftp://x.test", AuthScheme::api_key("k")).is_err());
        assert!(ApiConfig::new("https://x.test", AuthScheme::bearer("")).is_err());
        let bad_header = AuthScheme::ApiKeyHeader {
            header: "X Api Key".into(),
            key: "k".into(),
        };
        assert!(ApiConfig::new("https://x.test", bad_header).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "https://x.test"),
            (KEY_VAR, "k"),
            (SCHEME_VAR, "basic"),
        ]))
        .is_err());
    }

    #[test]
    fn debug_output_hides_the_credential() {
        let config = ApiConfig::new("https://x.test", AuthScheme::api_key("top-secret")).unwrap();
        let shown = format!("{config:?}");
        assert!(!shown.contains("top-secret"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn demo_flag_values() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some(" 1 ")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(None));
    }
}
