//! Runs `rspec` suites inside `cargo test`.

use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};
use std::sync::Arc;

/// Runs `suite` serially; a failed example ends the test binary.
///
/// The app behind each fixture holds non-`Send` state, so examples share
/// one thread. Exiting on failure keeps a failing `then` from being reported
/// as a passing `#[test]`.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    Runner::new(config, vec![logger]).run(suite);
}
