//! Duty-rate and code helpers

/// Magnitude assigned to rates with no parseable number ("Free", blank).
/// Sorts below every real rate.
pub const NO_RATE: f64 = f64::NEG_INFINITY;

/// Extract the numeric magnitude of a free-text duty rate.
///
/// Every character other than an ASCII digit or `.` is dropped and the
/// remainder parsed as a float, so `"5.5¢/t"` gives `5.5`.
pub fn parse_tariff_value(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return NO_RATE;
    };
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return NO_RATE;
    }
    digits.parse::<f64>().unwrap_or(NO_RATE)
}

/// Depth of a hierarchical code: the number of `.` separators.
pub fn count_dots(code: &str) -> usize {
    code.bytes().filter(|b| *b == b'.').count()
}
