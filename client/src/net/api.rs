//! REST API helpers for the marketplace backend.
//!
//! Every helper takes the shared [`ApiClient`] so token refresh and envelope
//! unwrapping happen in one place. Path construction lives in small pure
//! functions so the wire contract is testable without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Helpers return `Result<_, ApiError>` and leave presentation to callers,
//! except [`mark_chat_as_read`], whose failures are logged and dropped.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;

use super::http::{ApiClient, ApiError, ApiRequest, HttpTransport};
use super::types::{
    Address, AddressRequest, Category, ChatMessage, ChatRoom, Id, Page, PaymentConfirmRequest, PaymentConfirmation,
    ProductDetail, ProductListItem, Report, ReportStatus, User,
};

/// Default product page size.
pub const PRODUCT_PAGE_SIZE: u32 = 20;

/// Listing endpoints return either a bare array or a page wrapper.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    List(Vec<T>),
    Page(Page<T>),
}

impl<T> ListPayload<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::List(items) => items,
            Self::Page(page) => page.content,
        }
    }
}

// =============================================================================
// PATHS
// =============================================================================

fn products_path(page: u32, size: u32, category_id: Option<Id>) -> String {
    let mut path = format!("/api/products?page={page}&size={size}");
    if let Some(category_id) = category_id {
        path.push_str(&format!("&categoryId={category_id}"));
    }
    path
}

fn product_path(product_id: Id) -> String {
    format!("/api/products/{product_id}")
}

fn wish_path(product_id: Id) -> String {
    format!("/api/products/{product_id}/wish")
}

fn room_path(room_id: Id) -> String {
    format!("/api/chat/rooms/{room_id}")
}

fn room_messages_path(room_id: Id) -> String {
    format!("/api/chat/rooms/{room_id}/messages")
}

fn room_read_path(room_id: Id) -> String {
    format!("/api/chat/rooms/{room_id}/read")
}

fn room_action_path(room_id: Id, action: RoomAction) -> String {
    format!("/api/chat/rooms/{room_id}/{}", action.segment())
}

fn address_path(address_id: Id) -> String {
    format!("/api/addresses/{address_id}")
}

fn address_default_path(address_id: Id) -> String {
    format!("/api/addresses/{address_id}/default")
}

fn report_path(report_id: Id) -> String {
    format!("/api/admin/reports/{report_id}")
}

/// Transaction step endpoints under a chat room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomAction {
    Reservation,
    DepositRequest,
    DeliveryAddress,
    Tracking,
    PurchaseConfirm,
}

impl RoomAction {
    fn segment(self) -> &'static str {
        match self {
            Self::Reservation => "reservations",
            Self::DepositRequest => "deposit-request",
            Self::DeliveryAddress => "delivery-address",
            Self::Tracking => "tracking",
            Self::PurchaseConfirm => "purchase-confirm",
        }
    }
}

fn json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

// =============================================================================
// CATALOG
// =============================================================================

/// Fetch one page of products, optionally filtered by category.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn list_products<T: HttpTransport>(
    client: &ApiClient<T>,
    page: u32,
    category_id: Option<Id>,
) -> Result<Page<ProductListItem>, ApiError> {
    client
        .request(ApiRequest::get(products_path(page, PRODUCT_PAGE_SIZE, category_id)))
        .await
}

/// Fetch product detail.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn get_product<T: HttpTransport>(client: &ApiClient<T>, product_id: Id) -> Result<ProductDetail, ApiError> {
    client.request(ApiRequest::get(product_path(product_id))).await
}

/// Fetch all categories.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn list_categories<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Category>, ApiError> {
    let payload: ListPayload<Category> = client.request(ApiRequest::get("/api/categories")).await?;
    Ok(payload.into_vec())
}

/// Add or remove a product from the wishlist.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn set_wished<T: HttpTransport>(client: &ApiClient<T>, product_id: Id, wished: bool) -> Result<(), ApiError> {
    let path = wish_path(product_id);
    let req = if wished { ApiRequest::post(path, None) } else { ApiRequest::delete(path) };
    client.request_empty(req).await
}

// =============================================================================
// CHAT
// =============================================================================

/// Fetch the caller's full room list.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn get_room_list<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<ChatRoom>, ApiError> {
    let payload: ListPayload<ChatRoom> = client.request(ApiRequest::get("/api/chat/rooms")).await?;
    Ok(payload.into_vec())
}

/// Fetch one room in detail shape.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn get_room<T: HttpTransport>(client: &ApiClient<T>, room_id: Id) -> Result<ChatRoom, ApiError> {
    client.request(ApiRequest::get(room_path(room_id))).await
}

/// Fetch a room's message history.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn get_room_messages<T: HttpTransport>(client: &ApiClient<T>, room_id: Id) -> Result<Vec<ChatMessage>, ApiError> {
    let payload: ListPayload<ChatMessage> = client.request(ApiRequest::get(room_messages_path(room_id))).await?;
    Ok(payload.into_vec())
}

/// Open (or reuse) a room with the seller of `product_id`.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn create_room<T: HttpTransport>(client: &ApiClient<T>, product_id: Id) -> Result<ChatRoom, ApiError> {
    let body = serde_json::json!({ "productId": product_id });
    client.request(ApiRequest::post("/api/chat/rooms", Some(body))).await
}

/// Send a read receipt for `room_id`.
///
/// Failures are logged and swallowed; callers update local unread state
/// themselves.
pub async fn mark_chat_as_read<T: HttpTransport>(client: &ApiClient<T>, room_id: Id) {
    if let Err(e) = client.request_empty(ApiRequest::patch(room_read_path(room_id), None)).await {
        leptos::logging::warn!("mark read failed for room {room_id}: {e}");
    }
}

/// Reserve a video call at `reserved_at` (ISO date-time).
///
/// # Errors
///
/// See [`ApiError`].
pub async fn reserve_video_call<T: HttpTransport>(client: &ApiClient<T>, room_id: Id, reserved_at: &str) -> Result<(), ApiError> {
    let body = serde_json::json!({ "reservedAt": reserved_at });
    client
        .request_empty(ApiRequest::post(room_action_path(room_id, RoomAction::Reservation), Some(body)))
        .await
}

/// Cancel the room's video-call reservation.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn cancel_video_call<T: HttpTransport>(client: &ApiClient<T>, room_id: Id) -> Result<(), ApiError> {
    client
        .request_empty(ApiRequest::delete(room_action_path(room_id, RoomAction::Reservation)))
        .await
}

/// Seller asks the buyer to pay.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn request_deposit<T: HttpTransport>(client: &ApiClient<T>, room_id: Id) -> Result<(), ApiError> {
    client
        .request_empty(ApiRequest::post(room_action_path(room_id, RoomAction::DepositRequest), None))
        .await
}

/// Buyer picks a saved address for delivery.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn submit_delivery_address<T: HttpTransport>(client: &ApiClient<T>, room_id: Id, address_id: Id) -> Result<(), ApiError> {
    let body = serde_json::json!({ "addressId": address_id });
    client
        .request_empty(ApiRequest::post(room_action_path(room_id, RoomAction::DeliveryAddress), Some(body)))
        .await
}

/// Seller enters the courier and tracking number.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn submit_tracking<T: HttpTransport>(
    client: &ApiClient<T>,
    room_id: Id,
    courier: &str,
    tracking_number: &str,
) -> Result<(), ApiError> {
    let body = serde_json::json!({ "courier": courier, "trackingNumber": tracking_number });
    client
        .request_empty(ApiRequest::post(room_action_path(room_id, RoomAction::Tracking), Some(body)))
        .await
}

/// Buyer confirms the purchase, ending the trade.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn confirm_purchase<T: HttpTransport>(client: &ApiClient<T>, room_id: Id) -> Result<(), ApiError> {
    client
        .request_empty(ApiRequest::post(room_action_path(room_id, RoomAction::PurchaseConfirm), None))
        .await
}

// =============================================================================
// ACCOUNT
// =============================================================================

/// Fetch the signed-in user.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn fetch_current_user<T: HttpTransport>(client: &ApiClient<T>) -> Result<User, ApiError> {
    client.request(ApiRequest::get("/api/users/me")).await
}

/// End the session server-side.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn logout<T: HttpTransport>(client: &ApiClient<T>) -> Result<(), ApiError> {
    client.request_empty(ApiRequest::post("/api/auth/logout", None)).await
}

/// Fetch saved addresses.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn list_addresses<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Address>, ApiError> {
    let payload: ListPayload<Address> = client.request(ApiRequest::get("/api/addresses")).await?;
    Ok(payload.into_vec())
}

/// Create a new address.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn create_address<T: HttpTransport>(client: &ApiClient<T>, req: &AddressRequest) -> Result<Address, ApiError> {
    client.request(ApiRequest::post("/api/addresses", Some(json(req)?))).await
}

/// Replace an existing address.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn update_address<T: HttpTransport>(client: &ApiClient<T>, address_id: Id, req: &AddressRequest) -> Result<Address, ApiError> {
    client.request(ApiRequest::put(address_path(address_id), json(req)?)).await
}

/// Delete an address.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn delete_address<T: HttpTransport>(client: &ApiClient<T>, address_id: Id) -> Result<(), ApiError> {
    client.request_empty(ApiRequest::delete(address_path(address_id))).await
}

/// Mark an address as the default.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn set_default_address<T: HttpTransport>(client: &ApiClient<T>, address_id: Id) -> Result<(), ApiError> {
    client.request_empty(ApiRequest::patch(address_default_path(address_id), None)).await
}

// =============================================================================
// PAYMENTS & ADMIN
// =============================================================================

/// Forward the payment provider's redirect parameters for confirmation.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn confirm_payment<T: HttpTransport>(
    client: &ApiClient<T>,
    req: &PaymentConfirmRequest,
) -> Result<PaymentConfirmation, ApiError> {
    client.request(ApiRequest::post("/api/payments/confirm", Some(json(req)?))).await
}

/// Fetch user reports for moderation.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn list_reports<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Report>, ApiError> {
    let payload: ListPayload<Report> = client.request(ApiRequest::get("/api/admin/reports")).await?;
    Ok(payload.into_vec())
}

/// Change a report's moderation status.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn update_report_status<T: HttpTransport>(client: &ApiClient<T>, report_id: Id, status: ReportStatus) -> Result<(), ApiError> {
    let body = serde_json::json!({ "status": status });
    client.request_empty(ApiRequest::patch(report_path(report_id), Some(body))).await
}
