use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::net::http::{Method, RawResponse};

/// Transport that records requests and answers each with a canned body.
#[derive(Clone, Default)]
struct Recorder {
    requests: Rc<RefCell<Vec<ApiRequest>>>,
    status: u16,
    body: &'static str,
}

impl Recorder {
    fn answering(status: u16, body: &'static str) -> Self {
        Self { requests: Rc::default(), status, body }
    }

    fn last(&self) -> ApiRequest {
        self.requests.borrow().last().cloned().expect("a request was sent")
    }
}

impl HttpTransport for Recorder {
    async fn send(&self, req: &ApiRequest, _token: Option<&str>) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(req.clone());
        Ok(RawResponse { status: self.status, body: self.body.to_owned() })
    }

    async fn reissue(&self) -> Result<String, ApiError> {
        Err(ApiError::RefreshFailed)
    }

    fn access_token(&self) -> Option<String> {
        Some("token".to_owned())
    }

    fn store_access_token(&self, _token: &str) {}

    fn clear_credentials(&self) {}
}

// =============================================================
// Paths
// =============================================================

#[test]
fn products_path_includes_optional_category() {
    assert_eq!(products_path(0, 20, None), "/api/products?page=0&size=20");
    assert_eq!(products_path(2, 10, Some(5)), "/api/products?page=2&size=10&categoryId=5");
}

#[test]
fn room_paths_format_expected_endpoints() {
    assert_eq!(room_path(3), "/api/chat/rooms/3");
    assert_eq!(room_messages_path(3), "/api/chat/rooms/3/messages");
    assert_eq!(room_read_path(3), "/api/chat/rooms/3/read");
    assert_eq!(room_action_path(3, RoomAction::Reservation), "/api/chat/rooms/3/reservations");
    assert_eq!(room_action_path(3, RoomAction::DepositRequest), "/api/chat/rooms/3/deposit-request");
    assert_eq!(room_action_path(3, RoomAction::DeliveryAddress), "/api/chat/rooms/3/delivery-address");
    assert_eq!(room_action_path(3, RoomAction::Tracking), "/api/chat/rooms/3/tracking");
    assert_eq!(room_action_path(3, RoomAction::PurchaseConfirm), "/api/chat/rooms/3/purchase-confirm");
}

#[test]
fn account_paths_format_expected_endpoints() {
    assert_eq!(wish_path(8), "/api/products/8/wish");
    assert_eq!(address_path(4), "/api/addresses/4");
    assert_eq!(address_default_path(4), "/api/addresses/4/default");
    assert_eq!(report_path(6), "/api/admin/reports/6");
}

// =============================================================
// Calls
// =============================================================

#[test]
fn get_room_list_accepts_bare_array_envelope() {
    let http = Recorder::answering(
        200,
        r#"{"success":true,"data":[{"chatRoomId":1,"buyerId":2,"sellerId":3,"productId":4}]}"#,
    );
    let client = ApiClient::new(http.clone());

    let rooms = block_on(get_room_list(&client)).expect("rooms");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].room_id, 1);
    assert_eq!(http.last().path, "/api/chat/rooms");
}

#[test]
fn get_room_fetches_detail_shape() {
    let http = Recorder::answering(
        200,
        r#"{"success":true,"data":{"chatRoomId":7,"buyerId":2,"sellerId":3,"productId":4}}"#,
    );
    let client = ApiClient::new(http.clone());

    let room = block_on(get_room(&client, 7)).expect("room");
    assert_eq!(room.room_id, 7);
    assert_eq!(room.seller.user_id, 3);
    assert_eq!(http.last().path, "/api/chat/rooms/7");
}

#[test]
fn get_room_messages_accepts_page_wrapper() {
    let http = Recorder::answering(
        200,
        r#"{"content":[{"roomId":1,"content":"hi","createdAt":"2025-01-01T00:00:00","senderId":2}],"hasNext":false}"#,
    );
    let client = ApiClient::new(http);

    let messages = block_on(get_room_messages(&client, 1)).expect("messages");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "hi");
}

#[test]
fn mark_chat_as_read_swallows_failures() {
    let http = Recorder::answering(500, r#"{"message":"boom"}"#);
    let client = ApiClient::new(http.clone());

    block_on(mark_chat_as_read(&client, 9));
    let req = http.last();
    assert_eq!(req.method, Method::Patch);
    assert_eq!(req.path, "/api/chat/rooms/9/read");
}

#[test]
fn set_wished_maps_to_post_and_delete() {
    let http = Recorder::answering(200, "");
    let client = ApiClient::new(http.clone());

    block_on(set_wished(&client, 5, true)).expect("wish");
    assert_eq!(http.last().method, Method::Post);
    block_on(set_wished(&client, 5, false)).expect("unwish");
    assert_eq!(http.last().method, Method::Delete);
    assert_eq!(http.last().path, "/api/products/5/wish");
}

#[test]
fn submit_tracking_sends_camel_case_body() {
    let http = Recorder::answering(200, "");
    let client = ApiClient::new(http.clone());

    block_on(submit_tracking(&client, 2, "CJ", "1234")).expect("tracking");
    assert_eq!(
        http.last().body,
        Some(serde_json::json!({ "courier": "CJ", "trackingNumber": "1234" }))
    );
}

#[test]
fn update_report_status_serializes_enum_tag() {
    let http = Recorder::answering(200, "");
    let client = ApiClient::new(http.clone());

    block_on(update_report_status(&client, 6, ReportStatus::Resolved)).expect("update");
    assert_eq!(http.last().body, Some(serde_json::json!({ "status": "RESOLVED" })));
}

#[test]
fn create_room_posts_product_id() {
    let http = Recorder::answering(
        200,
        r#"{"success":true,"data":{"chatRoomId":11,"buyerId":2,"sellerId":3,"productId":4}}"#,
    );
    let client = ApiClient::new(http.clone());

    let room = block_on(create_room(&client, 4)).expect("room");
    assert_eq!(room.room_id, 11);
    assert_eq!(http.last().body, Some(serde_json::json!({ "productId": 4 })));
}
