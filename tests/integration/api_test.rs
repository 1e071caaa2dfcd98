//! API endpoint integration tests
//!
//! Drives the composed router end to end over in-memory stores.

#![allow(dead_code)]

mod auth;
mod common;
mod speakers;
mod versioning;
