//! Serialization of the disposition-free pieces (requires `--features serde`)

#![cfg(feature = "serde")]

use holdfast::testing::Status;
use holdfast::{Disposition, StaticError};

#[test]
fn static_error_round_trips_through_json() {
    let snapshot = StaticError::<Status>::new(-3);
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: StaticError<Status> = serde_json::from_str(&json).unwrap();
    assert_eq!(*back.get(), -3);
}

#[test]
fn disposition_serializes_by_name() {
    let json = serde_json::to_string(&Disposition::Checked).unwrap();
    assert_eq!(json, "\"Checked\"");
    let back: Disposition = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Disposition::Checked);
}
