//! Paper Cart server library.
//!
//! This crate provides the shop API as a library, allowing it to be
//! tested and reused. The binary in `main.rs` is a thin wrapper that
//! loads configuration and serves [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;
