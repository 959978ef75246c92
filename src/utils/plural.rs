//! Pluralization helpers for log lines.

/// `"s"` suffix unless `n == 1`
///
/// - `plural_s(0)` -> `"s"` (0 changes)
/// - `plural_s(1)` -> `""` (1 change)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, e.g. `plural_count(3, "layout")` -> `"3 layouts"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
