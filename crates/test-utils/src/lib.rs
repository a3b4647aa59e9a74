//! Shared fixtures for testwatch's integration tests: a scripted process
//! runner, recording reporter and problem service, and `go test` output
//! builders.

pub mod builders;
pub mod fake_runner;
pub mod recording;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING: Once = Once::new();

/// Upper bound for any single awaited step in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Install a test subscriber once per test binary.
///
/// Output goes through the harness capture, so it only shows for failing
/// tests. Filter with `TESTWATCH_LOG`, e.g. `TESTWATCH_LOG=testwatch=trace`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("TESTWATCH_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn,testwatch=debug"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `fut`, panicking if it takes longer than [`TEST_TIMEOUT`].
#[track_caller]
pub fn with_timeout<F, T>(fut: F) -> impl Future<Output = T>
where
    F: Future<Output = T>,
{
    let location = std::panic::Location::caller();
    async move {
        match tokio::time::timeout(TEST_TIMEOUT, fut).await {
            Ok(value) => value,
            Err(_) => panic!("timed out after {TEST_TIMEOUT:?} at {location}"),
        }
    }
}
