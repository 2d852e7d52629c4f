//! `document.cookie` helpers for the access-token cookie.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend issues the access token as a readable cookie so both the SSR
//! route gate and the browser client can see it. Parsing is pure and shared
//! with the server; reads and writes are hydrate-only.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Find `name` in a `Cookie` header / `document.cookie` string.
///
/// Empty values are treated as absent.
#[must_use]
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Attribute string for writing `name=value`; an empty value expires it.
#[must_use]
pub fn cookie_assignment(name: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{name}=; Path=/; Max-Age=0; SameSite=Lax")
    } else {
        format!("{name}={value}; Path=/; SameSite=Lax")
    }
}

/// Read a cookie from the current document.
pub fn read_cookie(name: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let html = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
        let raw = html.cookie().ok()?;
        cookie_value(&raw, name)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        None
    }
}

/// Write a session cookie on the current document.
pub fn write_cookie(name: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(html) = document.dyn_into::<web_sys::HtmlDocument>() else {
            return;
        };
        let _ = html.set_cookie(&cookie_assignment(name, value));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, value);
    }
}

/// Expire a cookie on the current document.
pub fn clear_cookie(name: &str) {
    write_cookie(name, "");
}
