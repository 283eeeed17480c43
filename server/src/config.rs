//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ASSET_FOLDER: &str = "uploads";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// REST backend the proxy forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeouts: Timeouts,
}

/// Image host account. Destroy calls are signed only when a secret is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub default_folder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub backend: BackendConfig,
    /// `None` disables the upload routes.
    pub assets: Option<AssetConfig>,
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `BACKEND_URL`
    /// - `BACKEND_TOKEN`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BACKEND_REQUEST_TIMEOUT_SECS` / `BACKEND_CONNECT_TIMEOUT_SECS`: 30 / 10
    /// - `ASSET_CLOUD_NAME` + `ASSET_UPLOAD_PRESET`: enable uploads
    /// - `ASSET_API_KEY`, `ASSET_API_SECRET`, `ASSET_FOLDER`
    /// - `COOKIE_SECURE`: inferred from an `https://` `PUBLIC_URL` when unset
    ///
    /// # Errors
    ///
    /// `ConfigError::Missing` for an absent required variable and
    /// `ConfigError::Invalid` for an unparsable number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let required = |var: &'static str| get(var).ok_or(ConfigError::Missing { var });

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let backend = BackendConfig {
            base_url: required("BACKEND_URL")?.trim_end_matches('/').to_owned(),
            api_key: required("BACKEND_TOKEN")?,
            timeouts: Timeouts {
                request_secs: parse_or(
                    get("BACKEND_REQUEST_TIMEOUT_SECS"),
                    "BACKEND_REQUEST_TIMEOUT_SECS",
                    DEFAULT_REQUEST_TIMEOUT_SECS,
                )?,
                connect_secs: parse_or(
                    get("BACKEND_CONNECT_TIMEOUT_SECS"),
                    "BACKEND_CONNECT_TIMEOUT_SECS",
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                )?,
            },
        };

        let assets = match (get("ASSET_CLOUD_NAME"), get("ASSET_UPLOAD_PRESET")) {
            (Some(cloud_name), Some(upload_preset)) => Some(AssetConfig {
                cloud_name,
                upload_preset,
                api_key: get("ASSET_API_KEY"),
                api_secret: get("ASSET_API_SECRET"),
                default_folder: get("ASSET_FOLDER").unwrap_or_else(|| DEFAULT_ASSET_FOLDER.to_owned()),
            }),
            _ => None,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => get("PUBLIC_URL").is_some_and(|url| url.starts_with("https://")),
        };

        Ok(Self { port, backend, assets, cookie_secure })
    }
}

/// Accepts 1/true/yes/on and 0/false/no/off, case-insensitively.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value }),
    }
}
