use std::cmp::Ordering;

/// 去掉首尾空白与末尾的 `.0` 段：`"1.2.0"` → `"1.2"`，`"0.0"` → `"0"`。
pub fn trim_version(version: &str) -> String {
    let mut parts: Vec<&str> = version.trim().split('.').collect();
    while parts.last() == Some(&"0") {
        parts.pop();
        if parts.is_empty() {
            return "0".to_string();
        }
    }
    parts.join(".")
}

/// 逐段比较点分版本号，缺失的段视为 `"0"`。
///
/// 两段都是整数时按数值比较，否则按字符串比较，所以 `"1.10" > "1.9"`，
/// `"1.0" == "1"`。
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = a.trim().split('.').collect();
    let right: Vec<&str> = b.trim().split('.').collect();

    for i in 0..left.len().max(right.len()) {
        let l = left.get(i).copied().unwrap_or("0");
        let r = right.get(i).copied().unwrap_or("0");
        let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            _ => l.cmp(r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
