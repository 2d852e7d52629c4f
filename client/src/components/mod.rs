//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render marketplace chrome and interaction surfaces while
//! reading/writing shared state from Leptos context providers.

pub mod address_form;
pub mod chat_detail;
pub mod header;
pub mod product_card;
pub mod room_list;
pub mod system_modal;
pub mod toast;
pub mod wishlist_button;
