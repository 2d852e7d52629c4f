use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;

use super::*;

enum Reissue {
    Issue(&'static str),
    Fail,
    Pending(oneshot::Receiver<String>),
}

struct FakeState {
    token: RefCell<Option<String>>,
    valid: &'static str,
    body: &'static str,
    reissue: RefCell<Option<Reissue>>,
    reissue_calls: Cell<u32>,
    cleared: Cell<bool>,
    sent: RefCell<Vec<Option<String>>>,
}

#[derive(Clone)]
struct FakeHttp(Rc<FakeState>);

impl FakeHttp {
    fn new(token: &str, valid: &'static str, body: &'static str, reissue: Reissue) -> Self {
        Self(Rc::new(FakeState {
            token: RefCell::new(Some(token.to_owned())),
            valid,
            body,
            reissue: RefCell::new(Some(reissue)),
            reissue_calls: Cell::new(0),
            cleared: Cell::new(false),
            sent: RefCell::new(Vec::new()),
        }))
    }
}

impl HttpTransport for FakeHttp {
    async fn send(&self, _req: &ApiRequest, token: Option<&str>) -> Result<RawResponse, ApiError> {
        self.0.sent.borrow_mut().push(token.map(ToOwned::to_owned));
        if token == Some(self.0.valid) {
            Ok(RawResponse { status: 200, body: self.0.body.to_owned() })
        } else {
            Ok(RawResponse { status: 401, body: String::new() })
        }
    }

    async fn reissue(&self) -> Result<String, ApiError> {
        self.0.reissue_calls.set(self.0.reissue_calls.get() + 1);
        let plan = self.0.reissue.borrow_mut().take().expect("reissue called twice");
        match plan {
            Reissue::Issue(token) => Ok(token.to_owned()),
            Reissue::Fail => Err(ApiError::Status { status: 401, message: "expired".to_owned() }),
            Reissue::Pending(rx) => rx.await.map_err(|_| ApiError::RefreshFailed),
        }
    }

    fn access_token(&self) -> Option<String> {
        self.0.token.borrow().clone()
    }

    fn store_access_token(&self, token: &str) {
        *self.0.token.borrow_mut() = Some(token.to_owned());
    }

    fn clear_credentials(&self) {
        *self.0.token.borrow_mut() = None;
        self.0.cleared.set(true);
    }
}

#[derive(Debug, PartialEq, serde::Deserialize)]
struct Item {
    id: i64,
}

// =============================================================
// Envelope decoding
// =============================================================

#[test]
fn decode_body_unwraps_success_envelope() {
    let raw = RawResponse { status: 200, body: r#"{"success":true,"data":{"id":7},"message":null}"#.to_owned() };
    let item: Item = decode_body(&raw).expect("decode");
    assert_eq!(item, Item { id: 7 });
}

#[test]
fn decode_body_accepts_bare_json() {
    let raw = RawResponse { status: 200, body: r#"[{"id":1},{"id":2}]"#.to_owned() };
    let items: Vec<Item> = decode_body(&raw).expect("decode");
    assert_eq!(items.len(), 2);
}

#[test]
fn decode_body_reports_failed_envelope_message() {
    let raw = RawResponse { status: 200, body: r#"{"success":false,"message":"품절된 상품이에요"}"#.to_owned() };
    let err = decode_body::<Item>(&raw).expect_err("failed envelope");
    assert_eq!(err, ApiError::Status { status: 200, message: "품절된 상품이에요".to_owned() });
    assert_eq!(err.user_message(), "품절된 상품이에요");
}

#[test]
fn decode_body_treats_empty_body_as_null() {
    let raw = RawResponse { status: 204, body: String::new() };
    let unit: Option<Item> = decode_body(&raw).expect("decode");
    assert!(unit.is_none());
}

#[test]
fn decode_body_rejects_shape_mismatch() {
    let raw = RawResponse { status: 200, body: r#"{"success":true,"data":{"name":"x"}}"#.to_owned() };
    assert!(matches!(decode_body::<Item>(&raw), Err(ApiError::Decode(_))));
}

#[test]
fn check_status_extracts_error_message() {
    let raw = RawResponse { status: 409, body: r#"{"message":"이미 예약된 상품이에요"}"#.to_owned() };
    let err = check_status(raw).expect_err("conflict");
    assert_eq!(err, ApiError::Status { status: 409, message: "이미 예약된 상품이에요".to_owned() });
}

// =============================================================
// Refresh & replay
// =============================================================

#[test]
fn valid_token_skips_refresh() {
    let http = FakeHttp::new("good", "good", r#"{"success":true,"data":{"id":1}}"#, Reissue::Fail);
    let client = ApiClient::new(http.clone());

    let item: Item = block_on(client.request(ApiRequest::get("/api/x"))).expect("ok");
    assert_eq!(item.id, 1);
    assert_eq!(http.0.reissue_calls.get(), 0);
}

#[test]
fn unauthorized_request_refreshes_and_replays_once() {
    let http = FakeHttp::new("stale", "fresh", r#"{"id":3}"#, Reissue::Issue("fresh"));
    let client = ApiClient::new(http.clone());

    let item: Item = block_on(client.request(ApiRequest::get("/api/x"))).expect("replayed");
    assert_eq!(item.id, 3);
    assert_eq!(http.0.reissue_calls.get(), 1);
    assert_eq!(*http.0.sent.borrow(), vec![Some("stale".to_owned()), Some("fresh".to_owned())]);
    assert_eq!(client.access_token().as_deref(), Some("fresh"));
}

#[test]
fn refresh_failure_clears_credentials() {
    let http = FakeHttp::new("stale", "fresh", "{}", Reissue::Fail);
    let client = ApiClient::new(http.clone());

    let err = block_on(client.request_empty(ApiRequest::get("/api/x"))).expect_err("refresh failed");
    assert_eq!(err, ApiError::RefreshFailed);
    assert!(http.0.cleared.get());
    assert!(client.access_token().is_none());
}

#[test]
fn second_unauthorized_after_refresh_gives_up() {
    let http = FakeHttp::new("stale", "never", "{}", Reissue::Issue("fresh"));
    let client = ApiClient::new(http.clone());

    let err = block_on(client.request_empty(ApiRequest::get("/api/x"))).expect_err("still 401");
    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(http.0.sent.borrow().len(), 2);
    assert!(http.0.cleared.get());
}

#[test]
fn concurrent_unauthorized_requests_share_one_reissue() {
    let (tx, rx) = oneshot::channel::<String>();
    let http = FakeHttp::new("stale", "fresh", r#"{"id":9}"#, Reissue::Pending(rx));
    let client = ApiClient::new(http.clone());
    let results = Rc::new(RefCell::new(Vec::new()));

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for path in ["/api/a", "/api/b", "/api/c"] {
        let client = client.clone();
        let results = results.clone();
        spawner
            .spawn_local(async move {
                let result: Result<Item, ApiError> = client.request(ApiRequest::get(path)).await;
                results.borrow_mut().push(result);
            })
            .expect("spawn");
    }

    pool.run_until_stalled();
    assert_eq!(http.0.reissue_calls.get(), 1);
    tx.send("fresh".to_owned()).expect("send token");
    pool.run_until_stalled();

    let results = results.borrow();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.as_ref().is_ok_and(|item| item.id == 9)));
    assert_eq!(http.0.reissue_calls.get(), 1);
}

#[test]
fn request_builders_set_method_and_body() {
    let req = ApiRequest::patch("/api/chat/rooms/1/read", None);
    assert_eq!(req.method, Method::Patch);
    assert!(req.body.is_none());
    let req = ApiRequest::put("/api/addresses/2", serde_json::json!({ "zipCode": "12345" }));
    assert_eq!(req.method, Method::Put);
    assert!(req.body.is_some());
}
