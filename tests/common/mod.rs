#![allow(dead_code, unused_imports)]

pub use testwatch_test_utils::{builders, fake_runner, init_tracing, recording, with_timeout};
