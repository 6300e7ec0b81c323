use std::time::Duration;

const MICROS_PER_MILLI: u128 = 1_000;
const MICROS_PER_SECOND: u128 = 1_000 * MICROS_PER_MILLI;
const MICROS_PER_MINUTE: u128 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: u128 = 60 * MICROS_PER_MINUTE;
const MICROS_PER_DAY: u128 = 24 * MICROS_PER_HOUR;

/// 时长的一个组成部分：单位长度（微秒）、简写后缀、完整单词。
struct Component {
    micros: u128,
    brief: &'static str,
    long: &'static str,
}

const DAYS: Component = Component {
    micros: MICROS_PER_DAY,
    brief: "d",
    long: "day",
};
const HOURS: Component = Component {
    micros: MICROS_PER_HOUR,
    brief: "h",
    long: "hour",
};
const MINUTES: Component = Component {
    micros: MICROS_PER_MINUTE,
    brief: "min",
    long: "minute",
};
const SECONDS: Component = Component {
    micros: MICROS_PER_SECOND,
    brief: "s",
    long: "second",
};
const MILLIS: Component = Component {
    micros: MICROS_PER_MILLI,
    brief: "ms",
    long: "millisecond",
};
const MICROS: Component = Component {
    micros: 1,
    brief: "μs",
    long: "microsecond",
};

/// 时长转为可读字符串。
///
/// 按天、时、分、秒、毫秒（可选）、微秒（可选）从大到小输出，值为 0 的部分整体省略。
/// `brief` 为 true 时使用 `d h min s ms μs` 后缀，否则使用完整单词，数值大于 1 时加复数 `s`。
pub fn timespan_to_string(
    span: Duration,
    brief: bool,
    with_milliseconds: bool,
    with_microseconds: bool,
) -> String {
    let components = [
        (&DAYS, true),
        (&HOURS, true),
        (&MINUTES, true),
        (&SECONDS, true),
        (&MILLIS, with_milliseconds),
        (&MICROS, with_microseconds),
    ];

    let mut remaining = span.as_micros();
    let mut result = String::new();
    for (component, enabled) in components {
        if !enabled || remaining < component.micros {
            continue;
        }
        let units = remaining / component.micros;
        remaining -= units * component.micros;

        result.push_str(&units.to_string());
        if brief {
            result.push_str(component.brief);
        } else {
            result.push(' ');
            result.push_str(component.long);
            if units > 1 {
                result.push('s');
            }
        }
        result.push(' ');
    }
    result.trim_end().to_string()
}

/// 下载器诊断输出使用的默认格式：简写，含毫秒，不含微秒。
pub fn format_duration(span: Duration) -> String {
    timespan_to_string(span, true, true, false)
}
