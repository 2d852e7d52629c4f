//! Server configuration from the environment.
//!
//! `.env` is loaded by `main` before this runs. Every variable is optional;
//! a present but malformed value is an error rather than a silent default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_COOKIE: &str = "accessToken";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),
    #[error("invalid boolean for {key}: {value:?}")]
    InvalidBool { key: &'static str, value: String },
    #[error("SESSION_COOKIE must not be empty")]
    EmptyCookieName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Cookie whose presence marks a signed-in request.
    pub session_cookie: String,
    /// When false the route gate lets every request through.
    pub guard_enabled: bool,
}

impl ServerConfig {
    /// Read `PORT`, `SESSION_COOKIE`, and `GUARD_ENABLED`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let session_cookie = match lookup("SESSION_COOKIE") {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyCookieName),
            Some(raw) => raw.trim().to_owned(),
            None => DEFAULT_SESSION_COOKIE.to_owned(),
        };
        let guard_enabled = match lookup("GUARD_ENABLED") {
            Some(raw) => {
                parse_bool(&raw).ok_or(ConfigError::InvalidBool { key: "GUARD_ENABLED", value: raw })?
            }
            None => true,
        };
        Ok(Self { port, session_cookie, guard_enabled })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
