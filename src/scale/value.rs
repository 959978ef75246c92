//! Value scaler.
//!
//! Extracts the numbers from a raw layout value, rescales them according to
//! a [`ScalePolicy`], and joins them back with the separator the original
//! value used (a single space if it contained any space, nothing otherwise).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::{ScaleFactors, ScalePolicy};

/// Optional minus, digits, optional point and fraction.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?[0-9]+\.?[0-9]*").unwrap());

/// Decimal places every scaled number is rendered with before trimming.
pub const OUTPUT_PRECISION: usize = 6;

/// Rescale every number in `value` according to `policy`.
///
/// Returns the input untouched when it holds no number, when the policy is
/// [`ScalePolicy::CountOnly`], or when the number count does not fit the
/// policy (e.g. three numbers for an `x y` pair).
pub fn scale_value(value: &str, factors: ScaleFactors, policy: ScalePolicy) -> Cow<'_, str> {
    let numbers = extract_numbers(value);
    if numbers.is_empty() {
        return Cow::Borrowed(value);
    }

    let scaled: Vec<f64> = match (policy, numbers.as_slice()) {
        (ScalePolicy::CountOnly, _) => return Cow::Borrowed(value),
        (ScalePolicy::YAxisSingle, [n]) => vec![n * factors.y],
        (ScalePolicy::XyPair, [x, y]) => vec![x * factors.x, y * factors.y],
        (ScalePolicy::XyPair, [x]) => vec![x * factors.x],
        (ScalePolicy::YAxisSingle | ScalePolicy::XyPair, _) => return Cow::Borrowed(value),
        (ScalePolicy::DefaultAlternating, _) => numbers
            .iter()
            .enumerate()
            .map(|(i, n)| if i % 2 == 0 { n * factors.x } else { n * factors.y })
            .collect(),
    };

    let separator = if value.contains(' ') { " " } else { "" };
    let joined = scaled
        .into_iter()
        .map(format_number)
        .collect::<Vec<_>>()
        .join(separator);

    Cow::Owned(joined)
}

/// All numeric tokens of `value`, in order.
pub fn extract_numbers(value: &str) -> Vec<f64> {
    NUMBER
        .find_iter(value)
        .filter_map(|m| m.as_str().trim_end_matches('.').parse().ok())
        .collect()
}

/// Fixed six decimals, then trailing zeros and a bare point removed.
///
/// `12.000000` -> `12`, `12.500000` -> `12.5`.
pub fn format_number(n: f64) -> String {
    let fixed = format!("{:.*}", OUTPUT_PRECISION, n);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SX: f64 = 1366.0 / 1920.0;
    const SY: f64 = 768.0 / 1080.0;

    fn scale(value: &str, x: f64, y: f64, policy: ScalePolicy) -> String {
        scale_value(value, ScaleFactors::new(x, y), policy).into_owned()
    }

    #[test]
    fn test_extract_numbers() {
        assert_eq!(extract_numbers("0.5 0.25"), vec![0.5, 0.25]);
        assert_eq!(extract_numbers("-12 7."), vec![-12.0, 7.0]);
        assert_eq!(extract_numbers("10px,20px"), vec![10.0, 20.0]);
        assert!(extract_numbers("center").is_empty());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-3.25), "-3.25");
        assert_eq!(format_number(100.0 * 0.711111), "71.1111");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn test_xy_pair() {
        assert_eq!(scale("10 20", 0.5, 2.0, ScalePolicy::XyPair), "5 40");
        // A lone number is treated as the X half of a pair.
        assert_eq!(scale("10", 0.5, 2.0, ScalePolicy::XyPair), "5");
    }

    #[test]
    fn test_y_axis_single() {
        assert_eq!(scale("100", 9.0, 0.711111, ScalePolicy::YAxisSingle), "71.1111");
        assert_eq!(scale("0.045", SX, 2.0, ScalePolicy::YAxisSingle), "0.09");
    }

    #[test]
    fn test_unexpected_count_passes_through() {
        assert_eq!(scale("1 2 3", 2.0, 3.0, ScalePolicy::XyPair), "1 2 3");
        assert_eq!(scale("1.50 2", 2.0, 3.0, ScalePolicy::YAxisSingle), "1.50 2");
    }

    #[test]
    fn test_count_only_is_identity() {
        for value in ["3", "12 7", "0.500", "many", ""] {
            assert_eq!(scale(value, 2.0, 3.0, ScalePolicy::CountOnly), value);
        }
    }

    #[test]
    fn test_default_alternating() {
        assert_eq!(
            scale("1 2 3 4", 2.0, 3.0, ScalePolicy::DefaultAlternating),
            "2 6 6 12"
        );
    }

    #[test]
    fn test_separator_without_space_concatenates() {
        assert_eq!(scale("10,20", 2.0, 3.0, ScalePolicy::DefaultAlternating), "2060");
    }

    #[test]
    fn test_non_numeric_is_untouched() {
        assert!(matches!(
            scale_value("center", ScaleFactors::new(2.0, 2.0), ScalePolicy::XyPair),
            Cow::Borrowed("center")
        ));
    }

    #[test]
    fn test_identity_factors_keep_values() {
        let value = "0.0375 0.8";
        assert_eq!(scale(value, 1.0, 1.0, ScalePolicy::XyPair), value);
        assert_eq!(scale("0.3", 1.0, 1.0, ScalePolicy::YAxisSingle), "0.3");
    }

    #[test]
    fn test_composition_matches_product() {
        let (sx1, sy1) = (SX, SY);
        let (sx2, sy2) = (1.25, 0.8);

        for (value, policy) in [
            ("640 360", ScalePolicy::XyPair),
            ("512", ScalePolicy::XyPair),
            ("48", ScalePolicy::YAxisSingle),
        ] {
            let twice = scale(&scale(value, sx1, sy1, policy), sx2, sy2, policy);
            let once = scale(value, sx1 * sx2, sy1 * sy2, policy);
            let lhs = extract_numbers(&twice);
            let rhs = extract_numbers(&once);
            assert_eq!(lhs.len(), rhs.len());
            for (a, b) in lhs.iter().zip(&rhs) {
                assert!((a - b).abs() < 1e-5, "{value}: {twice} vs {once}");
            }
        }
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(scale("-10 -20", 0.5, 0.5, ScalePolicy::XyPair), "-5 -10");
    }
}
