//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle has no process environment, so backend origins are
//! baked in at compile time from `MARKET_API_ORIGIN` / `MARKET_WS_ORIGIN`
//! and fall back to the local development backend.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Cookie holding the bearer access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Where the browser lands after an unrecoverable session refresh failure.
pub const SESSION_EXPIRED_PATH: &str = "/?session=expired";

/// STOMP handshake endpoint path under the WebSocket origin.
pub const STOMP_ENDPOINT: &str = "/ws-stomp";

const DEFAULT_API_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_WS_ORIGIN: &str = "ws://localhost:8080";

/// Backend origins used by the REST and STOMP clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_origin: String,
    pub ws_origin: String,
}

impl ClientConfig {
    /// Build from optional overrides, trimming trailing slashes.
    #[must_use]
    pub fn from_values(api_origin: Option<&str>, ws_origin: Option<&str>) -> Self {
        let api_origin = normalize_origin(api_origin, DEFAULT_API_ORIGIN);
        let ws_origin = match ws_origin.map(str::trim).filter(|v| !v.is_empty()) {
            Some(ws) => ws.trim_end_matches('/').to_owned(),
            None => derive_ws_origin(&api_origin),
        };
        Self { api_origin, ws_origin }
    }

    /// Configuration compiled into this build.
    #[must_use]
    pub fn current() -> Self {
        Self::from_values(option_env!("MARKET_API_ORIGIN"), option_env!("MARKET_WS_ORIGIN"))
    }

    /// Absolute URL for an API path such as `/api/products`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        join(&self.api_origin, path)
    }

    /// Absolute URL of the STOMP endpoint.
    #[must_use]
    pub fn stomp_url(&self) -> String {
        join(&self.ws_origin, STOMP_ENDPOINT)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

fn normalize_origin(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_owned()
}

fn derive_ws_origin(api_origin: &str) -> String {
    if let Some(rest) = api_origin.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = api_origin.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        DEFAULT_WS_ORIGIN.to_owned()
    }
}

fn join(origin: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}
