//! 进度事件测试

use crate::progress::{ProgressEvent, ProgressFactor};

#[test]
fn derived_values() {
    let event = ProgressEvent::new(256, 1024);
    assert_eq!(event.bytes_left(), 768);
    assert_eq!(event.factor(), 0.25);
    assert_eq!(event.percentage(), 25.0);
    assert!(!event.is_complete());
}

#[test]
fn empty_body_counts_as_complete() {
    let event = ProgressEvent::completed(0);
    assert_eq!(event.factor(), 1.0);
    assert!(event.is_complete());
    assert_eq!(event.bytes_left(), 0);
}

#[test]
fn display_rounds_percentage_to_one_decimal() {
    let event = ProgressEvent::new(1536, 3072);
    assert_eq!(event.to_string(), "50% (1.5 KiB / 3.0 KiB)");

    let event = ProgressEvent::new(1, 3);
    assert_eq!(event.to_string(), "33.3% (1 B / 3 B)");
}
