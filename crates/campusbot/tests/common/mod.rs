//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fakes;
pub mod helpers;

#[allow(unused_imports)]
pub use fakes::{FakeApi, RecordingMessenger, Sent};
#[allow(unused_imports)]
pub use helpers::{building, callback, dispatcher, item, pages, payloads, test_today, texts, TEST_WEB_APP};
