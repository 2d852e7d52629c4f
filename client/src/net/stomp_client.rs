//! STOMP-over-WebSocket client for realtime chat.
//!
//! `connect_stomp` opens one session per mounted chat layout: it sends
//! `CONNECT`, waits for `CONNECTED`, subscribes to the user's room-list topic
//! (and the open room, if any), then dispatches pushes into the room-list and
//! active-room state until the socket closes or `disconnect_stomp` runs.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment.
//!
//! ERROR HANDLING
//! ==============
//! There is no automatic reconnect. A failed or dropped session is logged and
//! resets the connection flags so the next mount (or an explicit call) can
//! try again. `ERROR` frames end the session.

#[cfg(any(test, feature = "hydrate"))]
#[path = "stomp_client_parse.rs"]
mod stomp_client_parse;
#[path = "stomp_client_requests.rs"]
mod stomp_client_requests;

#[cfg(test)]
#[path = "stomp_client_test.rs"]
mod stomp_client_test;

use futures::channel::mpsc::UnboundedSender;
use leptos::prelude::*;

#[cfg(any(test, feature = "hydrate"))]
use self::stomp_client_parse::InboundEvent;
use self::stomp_client_requests::{chat_message_frame, room_subscribe_frame, room_unsubscribe_frame};
use crate::net::types::{Id, OutgoingChatMessage};
use crate::state::chat_room::ActiveRoomState;
use crate::state::chat_rooms::RoomListState;
use crate::state::connection::ConnectionState;

/// Signals the realtime session reads and writes, plus its outbound queue.
#[derive(Clone, Copy)]
pub struct ChatSocket {
    pub connection: RwSignal<ConnectionState>,
    pub rooms: RwSignal<RoomListState>,
    pub active: RwSignal<ActiveRoomState>,
    outbox: StoredValue<Option<UnboundedSender<String>>>,
}

impl ChatSocket {
    pub fn new(
        connection: RwSignal<ConnectionState>,
        rooms: RwSignal<RoomListState>,
        active: RwSignal<ActiveRoomState>,
    ) -> Self {
        Self { connection, rooms, active, outbox: StoredValue::new(None) }
    }

    /// Queue an encoded frame. Returns `false` without a live session.
    fn send_frame(&self, frame: &frames::Frame) -> bool {
        if !self.connection.with_untracked(|c| c.is_connected) {
            return false;
        }
        self.outbox.with_value(|tx| {
            tx.as_ref()
                .is_some_and(|tx| tx.unbounded_send(frames::encode_frame(frame)).is_ok())
        })
    }
}

/// Open the realtime session for `user_id`. No-op while one is pending or live.
///
/// Returns whether a new attempt started. Off-browser there is no transport,
/// so the attempt stays pending until `disconnect_stomp`.
pub fn connect_stomp(socket: ChatSocket, user_id: Id, access_token: Option<String>) -> bool {
    let Some(session) = socket.connection.try_update(ConnectionState::begin_connect).flatten() else {
        return false;
    };

    #[cfg(feature = "hydrate")]
    {
        let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
        socket.outbox.set_value(Some(tx));
        leptos::task::spawn_local(async move {
            match run_session(socket, session, user_id, access_token, rx).await {
                Ok(()) => leptos::logging::log!("STOMP session {session} closed"),
                Err(e) => leptos::logging::warn!("STOMP session {session} failed: {e}"),
            }
            socket.connection.update(|c| c.closed(session));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (session, user_id, access_token);
    true
}

/// Tear down the realtime session, if any.
pub fn disconnect_stomp(socket: ChatSocket) {
    let was_live = socket.connection.with_untracked(|c| c.is_connected);
    socket.connection.update(ConnectionState::disconnect);
    let tx = socket.outbox.try_update_value(Option::take).flatten();
    if let Some(tx) = tx {
        if was_live {
            let receipt = uuid::Uuid::new_v4().to_string();
            let _ = tx.unbounded_send(frames::encode_frame(&frames::disconnect_frame(&receipt)));
        }
        tx.close_channel();
    }
}

/// Start receiving messages for `room_id`.
///
/// Without a live session this does nothing; the session subscribes to the
/// open room itself once `CONNECTED` arrives.
pub fn subscribe_room(socket: ChatSocket, room_id: Id) -> bool {
    socket.send_frame(&room_subscribe_frame(room_id))
}

pub fn unsubscribe_room(socket: ChatSocket, room_id: Id) -> bool {
    socket.send_frame(&room_unsubscribe_frame(room_id))
}

/// Publish a chat message.
///
/// # Errors
///
/// Returns a user-facing message when there is no live session.
pub fn send_chat_message(socket: ChatSocket, message: &OutgoingChatMessage) -> Result<(), &'static str> {
    let frame = chat_message_frame(message).map_err(|_| "메시지를 보낼 수 없어요.")?;
    if socket.send_frame(&frame) {
        Ok(())
    } else {
        Err("연결이 끊어졌어요. 잠시 후 다시 시도해 주세요.")
    }
}

/// Apply one push to the room list and the open room.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn apply_inbound(event: InboundEvent, rooms: &mut RoomListState, active: &mut ActiveRoomState, me: Id) {
    match event {
        InboundEvent::RoomDelta(room) => rooms.apply_room_delta(room),
        InboundEvent::Message(message) => {
            let (is_seller, delivery_available) = rooms
                .room(message.room_id)
                .map_or((false, false), |r| (r.is_seller(me), r.product.delivery_available));
            rooms.apply_message(&message, me, active.room_id);
            active.push_message(message, is_seller, delivery_available);
        }
    }
}

#[cfg(feature = "hydrate")]
async fn run_session(
    socket: ChatSocket,
    session: u64,
    user_id: Id,
    access_token: Option<String>,
    mut rx: futures::channel::mpsc::UnboundedReceiver<String>,
) -> Result<(), String> {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    use self::stomp_client_requests::{room_list_subscribe_frame, stomp_host};

    let config = crate::config::ClientConfig::current();
    let ws = WebSocket::open(&config.stomp_url()).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    let connect = frames::connect_frame(&stomp_host(&config.ws_origin), access_token.as_deref());
    ws_write
        .send(Message::Text(frames::encode_frame(&connect)))
        .await
        .map_err(|e| e.to_string())?;

    // Handshake: nothing else is meaningful before CONNECTED.
    loop {
        let text = match ws_read.next().await {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Bytes(_))) => continue,
            Some(Err(e)) => return Err(e.to_string()),
            None => return Err("socket closed before CONNECTED".to_owned()),
        };
        match frames::decode_frame(&text).map_err(|e| e.to_string())? {
            Some(frame) if frame.command == frames::Command::Connected => break,
            Some(frame) if frame.command == frames::Command::Error => {
                return Err(stomp_client_parse::frame_error_message(&frame));
            }
            _ => {}
        }
    }

    socket.connection.update(|c| c.connect_succeeded(session));
    ws_write
        .send(Message::Text(frames::encode_frame(&room_list_subscribe_frame(user_id))))
        .await
        .map_err(|e| e.to_string())?;
    if let Some(room_id) = socket.active.with_untracked(|a| a.room_id) {
        ws_write
            .send(Message::Text(frames::encode_frame(&room_subscribe_frame(room_id))))
            .await
            .map_err(|e| e.to_string())?;
    }

    let send_task = async {
        while let Some(text) = rx.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if !handle_text(&text, socket, user_id) {
                        break;
                    }
                }
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("STOMP recv error: {e}");
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;
    Ok(())
}

/// Handle one inbound text message. Returns `false` to end the session.
#[cfg(feature = "hydrate")]
fn handle_text(text: &str, socket: ChatSocket, user_id: Id) -> bool {
    use frames::Command;

    let frame = match frames::decode_frame(text) {
        Ok(Some(frame)) => frame,
        Ok(None) => return true,
        Err(e) => {
            leptos::logging::warn!("STOMP decode error: {e}");
            return true;
        }
    };

    match frame.command {
        Command::Message => match stomp_client_parse::parse_inbound(&frame) {
            Ok(Some(event)) => {
                socket
                    .rooms
                    .update(|rooms| socket.active.update(|active| apply_inbound(event, rooms, active, user_id)));
            }
            Ok(None) => {}
            Err(e) => leptos::logging::warn!("STOMP payload error: {e}"),
        },
        Command::Error => {
            leptos::logging::warn!("STOMP ERROR frame: {}", stomp_client_parse::frame_error_message(&frame));
            return false;
        }
        _ => {}
    }
    true
}
