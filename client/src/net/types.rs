//! Shared wire-protocol DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror the backend's camelCase JSON so serde round-trips stay
//! lossless. Chat rooms arrive in two shapes (nested from the room list,
//! flat from room detail/creation and realtime deltas); both are normalized
//! into the canonical [`ChatRoom`] here so rendering never branches on shape.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Backend identifier type for rooms, users, products, and addresses.
pub type Id = i64;

// =============================================================================
// MESSAGES
// =============================================================================

/// Chat message type tag.
///
/// Eleven system tags mark transaction-lifecycle milestones; unknown tags
/// are preserved verbatim in [`MessageKind::Other`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    RoomCreated,
    VideoCallReserved,
    VideoCallCancelled,
    VideoCallStarted,
    TradeStarted,
    DepositRequested,
    DeliveryAddressInput,
    DeliveryTrackingInput,
    DeliveryStarted,
    PurchaseConfirmRequested,
    TradeEnded,
    Other(String),
}

impl MessageKind {
    /// Parse a wire tag. Unknown tags become [`MessageKind::Other`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TEXT" => Self::Text,
            "IMAGE" => Self::Image,
            "ROOM_CREATED" => Self::RoomCreated,
            "VIDEO_CALL_RESERVED" => Self::VideoCallReserved,
            "VIDEO_CALL_CANCELLED" => Self::VideoCallCancelled,
            "VIDEO_CALL_STARTED" => Self::VideoCallStarted,
            "TRADE_STARTED" => Self::TradeStarted,
            "DEPOSIT_REQUESTED" => Self::DepositRequested,
            "DELIVERY_ADDRESS_INPUT" => Self::DeliveryAddressInput,
            "DELIVERY_TRACKING_INPUT" => Self::DeliveryTrackingInput,
            "DELIVERY_STARTED" => Self::DeliveryStarted,
            "PURCHASE_CONFIRM_REQUESTED" => Self::PurchaseConfirmRequested,
            "TRADE_ENDED" => Self::TradeEnded,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire tag for this kind.
    #[must_use]
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
            Self::RoomCreated => "ROOM_CREATED",
            Self::VideoCallReserved => "VIDEO_CALL_RESERVED",
            Self::VideoCallCancelled => "VIDEO_CALL_CANCELLED",
            Self::VideoCallStarted => "VIDEO_CALL_STARTED",
            Self::TradeStarted => "TRADE_STARTED",
            Self::DepositRequested => "DEPOSIT_REQUESTED",
            Self::DeliveryAddressInput => "DELIVERY_ADDRESS_INPUT",
            Self::DeliveryTrackingInput => "DELIVERY_TRACKING_INPUT",
            Self::DeliveryStarted => "DELIVERY_STARTED",
            Self::PurchaseConfirmRequested => "PURCHASE_CONFIRM_REQUESTED",
            Self::TradeEnded => "TRADE_ENDED",
            Self::Other(tag) => tag,
        }
    }

    /// True for the eleven transaction-lifecycle tags.
    #[must_use]
    pub fn is_system(&self) -> bool {
        !matches!(self, Self::Text | Self::Image | Self::Other(_))
    }
}

impl Serialize for MessageKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for MessageKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(tag.map_or(Self::Text, |t| Self::from_tag(&t)))
    }
}

/// A chat message as delivered by history fetches and realtime pushes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub message_id: Option<Id>,
    pub room_id: Id,
    #[serde(default)]
    pub content: String,
    /// ISO 8601 timestamp as sent by the backend.
    pub created_at: String,
    pub sender_id: Id,
    #[serde(default)]
    pub receiver_id: Option<Id>,
    #[serde(default, rename = "messageType")]
    pub kind: MessageKind,
}

impl ChatMessage {
    /// Parsed `created_at` in milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_ms(&self) -> Option<i64> {
        parse_timestamp_ms(&self.created_at)
    }
}

/// Outbound chat message published over STOMP.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingChatMessage {
    pub room_id: Id,
    pub content: String,
    #[serde(rename = "messageType")]
    pub kind: MessageKind,
}

/// Preview of the newest message in a room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    #[serde(default)]
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub sender_id: Option<Id>,
    #[serde(default, rename = "messageType")]
    pub kind: MessageKind,
    #[serde(default, rename = "isRead")]
    pub read: bool,
}

impl LastMessage {
    /// Parsed `created_at` in milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_ms(&self) -> Option<i64> {
        parse_timestamp_ms(&self.created_at)
    }
}

impl From<&ChatMessage> for LastMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            content: msg.content.clone(),
            created_at: msg.created_at.clone(),
            sender_id: Some(msg.sender_id),
            kind: msg.kind.clone(),
            read: false,
        }
    }
}

// =============================================================================
// ROOMS
// =============================================================================

/// Buyer or seller summary shown in room headers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: Id,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// Product sale lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    #[default]
    OnSale,
    Reserved,
    SoldOut,
}

/// Product summary attached to a chat room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub product_id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub price: i64,
    #[serde(default)]
    pub sale_status: SaleStatus,
    #[serde(default, rename = "isVideoCallAvailable")]
    pub video_call_available: bool,
    #[serde(default, rename = "isDeliveryAvailable")]
    pub delivery_available: bool,
    #[serde(default, rename = "isDirectTradeAvailable")]
    pub direct_trade_available: bool,
}

/// Canonical chat room used by every view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub room_id: Id,
    pub buyer: UserSummary,
    pub seller: UserSummary,
    pub product: ProductSummary,
    pub last_message: Option<LastMessage>,
    pub unread_count: u32,
}

impl ChatRoom {
    /// The counterpart of `me` in this room.
    #[must_use]
    pub fn partner_of(&self, me: Id) -> &UserSummary {
        if self.buyer.user_id == me { &self.seller } else { &self.buyer }
    }

    /// True when `me` is the seller in this room.
    #[must_use]
    pub fn is_seller(&self, me: Id) -> bool {
        self.seller.user_id == me
    }
}

impl<'de> Deserialize<'de> for ChatRoom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RoomPayload::deserialize(deserializer).map(Into::into)
    }
}

/// The two wire shapes a chat room arrives in.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RoomPayload {
    Nested(NestedRoom),
    Flat(FlatRoom),
}

/// Room-list shape: participants and product as nested objects.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedRoom {
    pub room_id: Id,
    pub buyer: UserSummary,
    pub seller: UserSummary,
    pub product: ProductSummary,
    #[serde(default)]
    pub last_message: Option<LastMessage>,
    #[serde(default)]
    pub unread_count: u32,
}

/// Room detail/creation/delta shape: every field flattened with prefixes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRoom {
    pub chat_room_id: Id,
    pub buyer_id: Id,
    #[serde(default)]
    pub buyer_nickname: String,
    #[serde(default)]
    pub buyer_profile_image_url: Option<String>,
    pub seller_id: Id,
    #[serde(default)]
    pub seller_nickname: String,
    #[serde(default)]
    pub seller_profile_image_url: Option<String>,
    pub product_id: Id,
    #[serde(default)]
    pub product_title: String,
    #[serde(default)]
    pub product_thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub product_price: i64,
    #[serde(default)]
    pub sale_status: SaleStatus,
    #[serde(default)]
    pub video_call_available: bool,
    #[serde(default)]
    pub delivery_available: bool,
    #[serde(default)]
    pub direct_trade_available: bool,
    #[serde(default)]
    pub last_message_content: Option<String>,
    #[serde(default)]
    pub last_message_created_at: Option<String>,
    #[serde(default)]
    pub last_message_sender_id: Option<Id>,
    #[serde(default)]
    pub last_message_type: MessageKind,
    #[serde(default)]
    pub unread_count: u32,
}

impl From<RoomPayload> for ChatRoom {
    fn from(payload: RoomPayload) -> Self {
        match payload {
            RoomPayload::Nested(room) => Self {
                room_id: room.room_id,
                buyer: room.buyer,
                seller: room.seller,
                product: room.product,
                last_message: room.last_message,
                unread_count: room.unread_count,
            },
            RoomPayload::Flat(room) => {
                let last_message = room.last_message_created_at.map(|created_at| LastMessage {
                    content: room.last_message_content.unwrap_or_default(),
                    created_at,
                    sender_id: room.last_message_sender_id,
                    kind: room.last_message_type,
                    read: room.unread_count == 0,
                });
                Self {
                    room_id: room.chat_room_id,
                    buyer: UserSummary {
                        user_id: room.buyer_id,
                        nickname: room.buyer_nickname,
                        profile_image_url: room.buyer_profile_image_url,
                    },
                    seller: UserSummary {
                        user_id: room.seller_id,
                        nickname: room.seller_nickname,
                        profile_image_url: room.seller_profile_image_url,
                    },
                    product: ProductSummary {
                        product_id: room.product_id,
                        title: room.product_title,
                        thumbnail_url: room.product_thumbnail_url,
                        price: room.product_price,
                        sale_status: room.sale_status,
                        video_call_available: room.video_call_available,
                        delivery_available: room.delivery_available,
                        direct_trade_available: room.direct_trade_available,
                    },
                    last_message,
                    unread_count: room.unread_count,
                }
            }
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Product category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: Id,
    pub name: String,
}

/// Product card in listing pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub product_id: Id,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub price: i64,
    #[serde(default)]
    pub sale_status: SaleStatus,
    #[serde(default)]
    pub wish_count: u32,
    #[serde(default)]
    pub chat_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Full product detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub price: i64,
    #[serde(default)]
    pub sale_status: SaleStatus,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub seller: UserSummary,
    #[serde(default)]
    pub wish_count: u32,
    #[serde(default, rename = "isWished")]
    pub wished: bool,
    #[serde(default, rename = "isVideoCallAvailable")]
    pub video_call_available: bool,
    #[serde(default, rename = "isDeliveryAvailable")]
    pub delivery_available: bool,
    #[serde(default, rename = "isDirectTradeAvailable")]
    pub direct_trade_available: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub has_next: bool,
}

// =============================================================================
// ACCOUNT
// =============================================================================

/// Account role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// The signed-in user as returned by `/api/users/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: Id,
    pub nickname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// A saved delivery address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_id: Id,
    pub recipient_name: String,
    pub phone_number: String,
    pub zip_code: String,
    pub road_address: String,
    #[serde(default)]
    pub detail_address: String,
    #[serde(default, rename = "isDefault")]
    pub default: bool,
}

/// Create/update body for an address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub recipient_name: String,
    pub phone_number: String,
    pub zip_code: String,
    pub road_address: String,
    pub detail_address: String,
    #[serde(rename = "isDefault")]
    pub default: bool,
}

// =============================================================================
// PAYMENTS & ADMIN
// =============================================================================

/// Body forwarded to `/api/payments/confirm`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmRequest {
    pub payment_key: String,
    pub order_id: String,
    pub amount: i64,
}

/// Confirmation result returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub order_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub total_amount: i64,
    #[serde(default)]
    pub approved_at: Option<String>,
}

/// Moderation status of a user report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    #[default]
    Pending,
    Resolved,
    Rejected,
}

/// A user report shown in the admin console.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_id: Id,
    #[serde(default)]
    pub reporter_nickname: String,
    #[serde(default)]
    pub target_type: String,
    pub target_id: Id,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =============================================================================
// HELPERS
// =============================================================================

/// Parse a backend timestamp into milliseconds since the Unix epoch.
///
/// Accepts RFC 3339 (`2025-01-02T00:00:00Z`) and zone-less local date-times
/// (`2025-01-02T00:00:00.123`), the latter interpreted as UTC.
#[must_use]
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
