//! Client-side state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each container is a plain struct with its transitions as methods. `App`
//! wraps them in `RwSignal`s provided through context; tests drive the
//! methods directly.

pub mod addresses;
pub mod admin;
pub mod auth;
pub mod chat_room;
pub mod chat_rooms;
pub mod connection;
pub mod payment;
pub mod products;
pub mod toast;
pub mod wishlist;
