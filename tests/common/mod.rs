#![allow(dead_code)]

pub use remind_test_utils::builders;
pub use remind_test_utils::init_tracing;
pub use remind_test_utils::notifiers;
pub use remind_test_utils::smtp;

use remind::exec::{Runner, RunnerOptions};

/// A runner that captures without echoing into the test output.
pub fn quiet_runner() -> Runner {
    Runner::new(RunnerOptions { echo: false }).expect("building runner")
}

/// A cancellation future that never fires.
pub async fn never() {
    std::future::pending::<()>().await
}
