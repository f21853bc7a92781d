//! # mentorlink-core
//!
//! Core crate for the MentorLink client. Contains configuration schemas,
//! shared API response types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other MentorLink crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
