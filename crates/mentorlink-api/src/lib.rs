//! # mentorlink-api
//!
//! Typed REST client for the MentorLink backend. One wrapper method per
//! endpoint, camelCase DTOs matching the backend's JSON, and consistent
//! mapping of transport/status failures into [`mentorlink_core::AppError`].
//!
//! The client holds the current bearer token in a shared slot; the session
//! store updates it on login/logout.

pub mod auth;
pub mod client;
pub mod dto;
pub mod notifications;
pub mod wallet;

pub use client::ApiClient;
