//! Number rounding and human-readable formatting used in findings.

/// Round half away from zero to `decimals` places
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to one decimal place
#[must_use]
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Round to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// `part / whole` as a percentage, 0 when `whole` is not positive
#[must_use]
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// `numerator / denominator`, 0 when the denominator is not positive
#[must_use]
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Whole-currency amount with thousands separators, e.g. `$1,642`
#[must_use]
pub fn money(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(format!("{:.0}", rounded.abs())))
}

/// Integer-valued count with thousands separators, e.g. `12,480`
#[must_use]
pub fn count(value: f64) -> String {
    group_thousands(format!("{:.0}", value.round().abs()))
}

/// Count that may be fractional: whole values as [`count`], others with one
/// decimal, e.g. `15.4` or `1,204.5`
#[must_use]
pub fn quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        return count(value);
    }
    let tenths = (value.abs() * 10.0).round() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{}", group_thousands((tenths / 10).to_string()), tenths % 10)
}

/// Percentage with one decimal, e.g. `12.5%`
#[must_use]
pub fn pct(value: f64) -> String {
    format!("{value:.1}%")
}

fn group_thousands(digits: String) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(1642.4), "$1,642");
        assert_eq!(money(999.5), "$1,000");
        assert_eq!(money(0.0), "$0");
        assert_eq!(money(1_234_567.0), "$1,234,567");
        assert_eq!(money(-25.0), "-$25");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round1(72.25), 72.3);
        assert_eq!(round2(2.005_1), 2.01);
        assert_eq!(round1(-0.05), -0.1);
    }

    #[test]
    fn test_guarded_division() {
        assert_eq!(percent(25.0, 1000.0), 2.5);
        assert_eq!(percent(5.0, 0.0), 0.0);
        assert_eq!(ratio(100.0, 20.0), 5.0);
        assert_eq!(ratio(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_pct_and_count() {
        assert_eq!(pct(12.345), "12.3%");
        assert_eq!(count(12480.0), "12,480");
    }

    #[test]
    fn test_quantity_keeps_fractions() {
        assert_eq!(quantity(42.0), "42");
        assert_eq!(quantity(15.4), "15.4");
        assert_eq!(quantity(1204.46), "1,204.5");
    }
}
