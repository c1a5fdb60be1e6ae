//! Integration test support for the channel mirror
//!
//! Runs updates through the real router, services and SQLite repositories,
//! with a recording transport standing in for the Bot API.

pub mod fixtures;
pub mod helpers;

pub use helpers::{RecordingTransport, Sent, TestApp, ADMIN_ID};
