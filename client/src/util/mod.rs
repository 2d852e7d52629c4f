//! Small helpers shared by pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Cookie access, cancellation flags, and display formatting live here so
//! that views stay declarative and the logic stays testable off-browser.

pub mod alive;
pub mod auth;
pub mod cookie;
pub mod format;
pub mod message_label;
