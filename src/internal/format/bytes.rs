/// 二进制（1024 进制）数量级及其单位名，从小到大排列。
pub const BYTE_MAGNITUDES: [(&str, u64); 7] = [
    ("B", 1),
    ("KiB", 1 << 10),
    ("MiB", 1 << 20),
    ("GiB", 1 << 30),
    ("TiB", 1 << 40),
    ("PiB", 1 << 50),
    ("EiB", 1 << 60),
];

/// 字节数转为可读字符串。
///
/// - 小于 1024：`"512 B"`，不带小数点；
/// - 其余：整数部分 + 两位小数（去掉末尾的 0，至少保留一位）+ 单位，如 `"1.5 KiB"`、`"1.0 GiB"`。
pub fn bytes_to_string(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let (name, unit) = BYTE_MAGNITUDES
        .iter()
        .rev()
        .find(|(_, unit)| bytes >= *unit)
        .copied()
        .unwrap_or(BYTE_MAGNITUDES[0]);

    let mut units = bytes / unit;
    let unit = u128::from(unit);
    let remainder = u128::from(bytes) % unit;
    // 余数按百分位四舍五入，进位到整数部分
    let mut hundredths = (remainder * 100 + unit / 2) / unit;
    if hundredths == 100 {
        units += 1;
        hundredths = 0;
    }

    let digits = format!("{hundredths:02}");
    let fraction = match digits.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    format!("{units}.{fraction} {name}")
}
