//! Room-list state for the chat layout.
//!
//! DESIGN
//! ======
//! The list is replaced wholesale by every full fetch, so concurrent fetches
//! resolve to exactly one complete response (last write wins). Realtime
//! events patch single rooms in place. The selected room is a copy resolved
//! from the route id and re-resolved whenever the list or route changes.

#[cfg(test)]
#[path = "chat_rooms_test.rs"]
mod chat_rooms_test;

use crate::net::types::{ChatMessage, ChatRoom, Id, LastMessage};

/// Room list, selection, and fetch status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomListState {
    pub rooms: Vec<ChatRoom>,
    pub selected: Option<ChatRoom>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set when a push referenced a room not in the list; cleared by the next
    /// full fetch.
    pub stale: bool,
    /// Bumped by every full replacement.
    pub revision: u64,
    /// Room id from the current route, as last passed to `reconcile_selected`.
    pub route_room_id: Option<Id>,
}

impl RoomListState {
    /// Apply a complete room-list response.
    pub fn replace_rooms(&mut self, rooms: Vec<ChatRoom>) {
        self.rooms = rooms;
        self.loading = false;
        self.error = None;
        self.stale = false;
        self.revision += 1;
    }

    pub fn fetch_failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn set_current_selected_room(&mut self, room: Option<ChatRoom>) {
        self.selected = room;
    }

    /// Re-resolve the selection from the route parameter.
    ///
    /// A route id with no matching room keeps the previous selection; no
    /// route id clears it.
    pub fn reconcile_selected(&mut self, route_room_id: Option<Id>) {
        self.route_room_id = route_room_id;
        let Some(room_id) = route_room_id else {
            self.selected = None;
            return;
        };
        if let Some(room) = self.room(room_id) {
            self.selected = Some(room.clone());
        }
    }

    /// The routed room when a full list has landed without it.
    pub fn missing_routed_room(&self) -> Option<Id> {
        let room_id = self.route_room_id?;
        (self.revision > 0 && !self.loading && self.room(room_id).is_none()).then_some(room_id)
    }

    pub fn room(&self, room_id: Id) -> Option<&ChatRoom> {
        self.rooms.iter().find(|r| r.room_id == room_id)
    }

    /// Rooms for display: newest last message first, rooms without a
    /// message after all others in their original order.
    pub fn sorted_rooms(&self) -> Vec<ChatRoom> {
        let mut rooms = self.rooms.clone();
        rooms.sort_by_key(|room| {
            let ts = room
                .last_message
                .as_ref()
                .map(|m| m.timestamp_ms().unwrap_or(i64::MIN));
            std::cmp::Reverse(ts)
        });
        rooms
    }

    /// Sum of unread counts across rooms.
    pub fn total_unread(&self) -> u32 {
        self.rooms.iter().map(|r| r.unread_count).sum()
    }

    /// Patch the target room's preview from a pushed message.
    ///
    /// Unread increments only for messages from the partner in rooms other
    /// than `open_room`. Returns `false` (and marks the list stale) when the
    /// room is unknown.
    pub fn apply_message(&mut self, msg: &ChatMessage, me: Id, open_room: Option<Id>) -> bool {
        let Some(room) = self.rooms.iter_mut().find(|r| r.room_id == msg.room_id) else {
            self.stale = true;
            return false;
        };
        let mut preview = LastMessage::from(msg);
        let counts_unread = msg.sender_id != me && open_room != Some(msg.room_id);
        if counts_unread {
            room.unread_count = room.unread_count.saturating_add(1);
        } else {
            preview.read = true;
        }
        room.last_message = Some(preview);
        self.sync_selected(msg.room_id);
        true
    }

    /// Insert or replace a room pushed on the room-list subscription.
    pub fn apply_room_delta(&mut self, room: ChatRoom) {
        let room_id = room.room_id;
        match self.rooms.iter_mut().find(|r| r.room_id == room_id) {
            Some(existing) => *existing = room,
            None => self.rooms.push(room),
        }
        self.sync_selected(room_id);
    }

    /// Local half of a read receipt. Unread never goes below zero.
    pub fn mark_read_local(&mut self, room_id: Id) {
        if let Some(room) = self.rooms.iter_mut().find(|r| r.room_id == room_id) {
            room.unread_count = 0;
            if let Some(last) = room.last_message.as_mut() {
                last.read = true;
            }
        }
        self.sync_selected(room_id);
    }

    /// Refresh the selected copy, or select the room the route is waiting for.
    fn sync_selected(&mut self, room_id: Id) {
        let is_selected = self.selected.as_ref().is_some_and(|s| s.room_id == room_id);
        if is_selected || self.route_room_id == Some(room_id) {
            self.selected = self.room(room_id).cloned();
        }
    }
}
