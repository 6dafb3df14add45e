//! Observer-hook tracing events (requires `--features tracing`)

#![cfg(feature = "tracing")]

use holdfast::testing::Status;
use holdfast::UniqueError;
use tracing_test::traced_test;

#[traced_test]
#[test]
fn initiation_emits_a_debug_event() {
    let mut err = UniqueError::<Status>::new(-2);
    err.suppress();
    assert!(logs_contain("error initiated"));
}

#[traced_test]
#[test]
fn reset_emits_a_debug_event() {
    let mut err = UniqueError::<Status>::default();
    err.reset_to(-2);
    err.suppress();
    assert!(logs_contain("error reset"));
}

#[traced_test]
#[test]
fn success_values_stay_silent() {
    let _quiet = UniqueError::<Status>::new(0);
    assert!(!logs_contain("error initiated"));
}
