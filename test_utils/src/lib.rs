//! Shared helpers for puffball's integration tests.
//!
//! [`MapBuilder`] writes level JSON in the editor's export format and
//! [`GameHarness`] drives a headless app one fixed step at a time.

mod harness;
mod maps;

pub use harness::{GameHarness, STEP};
pub use maps::{library, MapBuilder};
