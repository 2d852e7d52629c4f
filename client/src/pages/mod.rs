//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetches, cancellation, redirect
//! rules) and delegates rendering details to `components`.

pub mod admin;
pub mod chat;
pub mod home;
pub mod my_page;
pub mod payment;
pub mod product_detail;
