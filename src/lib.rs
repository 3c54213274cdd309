//! Rust client library for the merchant-management REST API.
//!
//! This crate provides a typed client for listing, creating, editing,
//! deleting and summarizing merchant records, plus the view state a front
//! end keeps over it (merchant table, status filter, create/edit form and
//! statistics cards).

pub mod client;
pub mod download;
pub mod error;
pub mod models;
pub mod view;
