//! Networking modules for the REST backend and the STOMP chat transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns authenticated request execution and token refresh (`refresh`),
//! `api` maps backend endpoints onto typed calls, `stomp_client` manages the
//! realtime session, and `types` defines the shared wire schema.

pub mod api;
pub mod http;
pub mod refresh;
pub mod stomp_client;
pub mod types;

pub use http::{ApiClient, ApiError};
