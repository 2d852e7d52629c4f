//! Authenticated JSON HTTP client for the marketplace backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every REST helper in `api` goes through [`ApiClient::request`]. The
//! client attaches the bearer token, unwraps the backend's response
//! envelope, and on a 401 waits on the shared [`RefreshGate`] before
//! replaying the request once.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as [`ApiError`] values; nothing here panics. An
//! unrecoverable refresh clears local credentials through the transport,
//! which in the browser also sends the user home with a query marker.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::future::Future;
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::refresh::RefreshGate;

/// Error returned by every backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status or envelope.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The request was still unauthorized after a successful refresh.
    #[error("not authenticated")]
    Unauthorized,
    /// The access token could not be reissued.
    #[error("session refresh failed")]
    RefreshFailed,
    /// HTTP is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Message suitable for a user-visible alert.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            Self::Unauthorized | Self::RefreshFailed => "로그인이 필요해요.".to_owned(),
            _ => "요청을 처리하지 못했어요. 잠시 후 다시 시도해 주세요.".to_owned(),
        }
    }
}

/// HTTP method subset used by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A backend request: method, origin-relative path, optional JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), body: None }
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self { method: Method::Post, path: path.into(), body }
    }

    #[must_use]
    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self { method: Method::Put, path: path.into(), body: Some(body) }
    }

    #[must_use]
    pub fn patch(path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self { method: Method::Patch, path: path.into(), body }
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::Delete, path: path.into(), body: None }
    }
}

/// Status and body text of a completed response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The I/O seam under [`ApiClient`]: request execution and credential storage.
pub trait HttpTransport: Clone + 'static {
    /// Execute one request, attaching `token` as a bearer credential.
    fn send(&self, req: &ApiRequest, token: Option<&str>) -> impl Future<Output = Result<RawResponse, ApiError>>;

    /// Ask the backend for a new access token using the refresh credential.
    fn reissue(&self) -> impl Future<Output = Result<String, ApiError>>;

    /// Current access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Persist a freshly issued access token.
    fn store_access_token(&self, token: &str);

    /// Drop local credentials after an unrecoverable refresh failure.
    fn clear_credentials(&self);
}

/// Backend client shared by every page through Leptos context.
#[derive(Clone)]
pub struct ApiClient<T: HttpTransport = BrowserHttp> {
    transport: T,
    gate: Rc<RefreshGate>,
}

impl<T: HttpTransport> ApiClient<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport, gate: Rc::new(RefreshGate::default()) }
    }

    /// Current access token from the transport's credential store.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.transport.access_token()
    }

    /// Send `req` and decode the (envelope-unwrapped) body as `R`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn request<R: DeserializeOwned>(&self, req: ApiRequest) -> Result<R, ApiError> {
        let raw = self.send_with_refresh(&req).await?;
        decode_body(&raw)
    }

    /// Send `req`, ignoring any response body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn request_empty(&self, req: ApiRequest) -> Result<(), ApiError> {
        self.send_with_refresh(&req).await.map(|_| ())
    }

    async fn send_with_refresh(&self, req: &ApiRequest) -> Result<RawResponse, ApiError> {
        let token = self.transport.access_token();
        let resp = self.transport.send(req, token.as_deref()).await?;
        if resp.status != 401 {
            return check_status(resp);
        }

        let transport = self.transport.clone();
        let refreshed = self
            .gate
            .run(move || async move {
                let token = transport.reissue().await?;
                transport.store_access_token(&token);
                Ok(token)
            })
            .await;
        let Ok(token) = refreshed else {
            self.transport.clear_credentials();
            return Err(ApiError::RefreshFailed);
        };

        let retry = self.transport.send(req, Some(&token)).await?;
        if retry.status == 401 {
            self.transport.clear_credentials();
            return Err(ApiError::Unauthorized);
        }
        check_status(retry)
    }
}

fn check_status(resp: RawResponse) -> Result<RawResponse, ApiError> {
    if resp.is_success() {
        return Ok(resp);
    }
    Err(ApiError::Status { status: resp.status, message: error_message(&resp.body) })
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(ToOwned::to_owned)
        })
        .unwrap_or_default()
}

/// Decode a response body, unwrapping `{ success, data, message }` when present.
pub(crate) fn decode_body<R: DeserializeOwned>(raw: &RawResponse) -> Result<R, ApiError> {
    let text = if raw.body.trim().is_empty() { "null" } else { raw.body.as_str() };
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))?;

    let payload = match value {
        serde_json::Value::Object(mut map) if map.contains_key("success") => {
            let success = map.get("success").and_then(serde_json::Value::as_bool).unwrap_or(false);
            if !success {
                let message = map
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or_default()
                    .to_owned();
                return Err(ApiError::Status { status: raw.status, message });
            }
            map.remove("data").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };

    serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReissueResponse {
    access_token: String,
}

/// Browser transport: `gloo-net` fetch with cookie credentials.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHttp;

impl HttpTransport for BrowserHttp {
    async fn send(&self, req: &ApiRequest, token: Option<&str>) -> Result<RawResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let url = crate::config::ClientConfig::current().api_url(&req.path);
            let mut builder = match req.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            }
            .credentials(web_sys::RequestCredentials::Include);
            if let Some(token) = token {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let request = match &req.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(RawResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (req, token);
            Err(ApiError::Unavailable)
        }
    }

    async fn reissue(&self) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let req = ApiRequest::post("/api/auth/reissue", None);
            let raw = self.send(&req, None).await?;
            let raw = check_status(raw)?;
            let body: ReissueResponse = decode_body(&raw)?;
            Ok(body.access_token)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    fn access_token(&self) -> Option<String> {
        crate::util::cookie::read_cookie(crate::config::ACCESS_TOKEN_COOKIE)
    }

    fn store_access_token(&self, token: &str) {
        crate::util::cookie::write_cookie(crate::config::ACCESS_TOKEN_COOKIE, token);
    }

    fn clear_credentials(&self) {
        crate::util::cookie::clear_cookie(crate::config::ACCESS_TOKEN_COOKIE);
        #[cfg(feature = "hydrate")]
        {
            leptos::logging::warn!("session expired; redirecting home");
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(crate::config::SESSION_EXPIRED_PATH);
            }
        }
    }
}
