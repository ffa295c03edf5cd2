// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Functional tests for the smb admin client.
//!
//! These tests drive the full show/apply paths against a mock command
//! transport, WITHOUT requiring a live cluster. The mock records every
//! command so tests can assert on the exact wire payloads.
//!
//! ```bash
//! # Run all functional tests
//! cargo test --test functional
//!
//! # Run specific test
//! cargo test --test functional test_apply_base64_password_filter
//! ```

mod admin_tests;
mod mock_conn;
mod show_tests;

// Re-export for use in tests
pub use mock_conn::*;
