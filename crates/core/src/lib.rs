//! Paper Cart Core - Shared types library.
//!
//! This crate provides common types used across all Paper Cart components:
//! - `server` - The shop HTTP API
//! - `integration-tests` - Black-box API tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
