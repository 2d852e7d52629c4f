use super::*;

#[test]
fn defaults_point_at_local_backend() {
    let config = ClientConfig::from_values(None, None);
    assert_eq!(config.api_origin, "http://localhost:8080");
    assert_eq!(config.ws_origin, "ws://localhost:8080");
    assert_eq!(config.stomp_url(), "ws://localhost:8080/ws-stomp");
}

#[test]
fn ws_origin_follows_api_scheme_when_unset() {
    let config = ClientConfig::from_values(Some("https://api.market.example/"), None);
    assert_eq!(config.api_origin, "https://api.market.example");
    assert_eq!(config.ws_origin, "wss://api.market.example");
}

#[test]
fn explicit_ws_origin_wins() {
    let config = ClientConfig::from_values(Some("https://api.example"), Some("wss://rt.example/"));
    assert_eq!(config.ws_origin, "wss://rt.example");
}

#[test]
fn blank_overrides_fall_back_to_defaults() {
    let config = ClientConfig::from_values(Some("  "), Some(""));
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn api_url_joins_with_single_slash() {
    let config = ClientConfig::default();
    assert_eq!(config.api_url("/api/products"), "http://localhost:8080/api/products");
    assert_eq!(config.api_url("api/products"), "http://localhost:8080/api/products");
}
