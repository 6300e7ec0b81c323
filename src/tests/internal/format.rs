//! 格式化测试：字节数与时长。

use std::time::Duration;

use crate::format::{bytes_to_string, format_duration, timespan_to_string};

#[test]
fn bytes_below_one_kib_are_plain() {
    assert_eq!(bytes_to_string(0), "0 B");
    assert_eq!(bytes_to_string(512), "512 B");
    assert_eq!(bytes_to_string(1023), "1023 B");
}

#[test]
fn bytes_use_binary_magnitudes() {
    assert_eq!(bytes_to_string(1024), "1.0 KiB");
    assert_eq!(bytes_to_string(1536), "1.5 KiB");
    assert_eq!(bytes_to_string(1_073_741_824), "1.0 GiB");
    assert_eq!(bytes_to_string(5 * 1024 * 1024 + 256 * 1024), "5.25 MiB");
}

#[test]
fn bytes_keep_leading_zero_in_hundredths() {
    assert_eq!(bytes_to_string(1075), "1.05 KiB");
    assert_eq!(bytes_to_string(1034), "1.01 KiB");
}

#[test]
fn bytes_round_hundredths_with_carry() {
    // 小数部分四舍五入到 100 时进位到整数部分
    assert_eq!(bytes_to_string(1024 * 1024 - 1), "1024.0 KiB");
    assert_eq!(bytes_to_string(u64::MAX), "16.0 EiB");
}

#[test]
fn brief_duration_omits_zero_components() {
    let span = Duration::from_secs(3600 + 60 + 1);
    assert_eq!(timespan_to_string(span, true, true, false), "1h 1min 1s");
    assert_eq!(format_duration(span), "1h 1min 1s");
}

#[test]
fn long_duration_uses_plural_words() {
    let span = Duration::from_secs(2 * 86_400 + 3600 + 5) + Duration::from_millis(250);
    assert_eq!(
        timespan_to_string(span, false, true, false),
        "2 days 1 hour 5 seconds 250 milliseconds"
    );
}

#[test]
fn microseconds_only_when_requested() {
    let span = Duration::from_micros(1_500);
    assert_eq!(timespan_to_string(span, true, true, true), "1ms 500μs");
    assert_eq!(timespan_to_string(span, true, true, false), "1ms");
    assert_eq!(timespan_to_string(span, true, false, false), "");
}
