//! Number formatting for parse summaries.
//!
//! All report-facing numbers go through here so the text summary and any
//! downstream renderer agree, including the European swap of `.` and `,`.

/// Swap `.` and `,` in an already formatted number.
fn europeanize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '.' => ',',
            ',' => '.',
            _ => c,
        })
        .collect()
}

#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Format a damage total with a K/M suffix.
///
/// # Examples
/// ```
/// use revtc_types::formatting::format_damage;
/// assert_eq!(format_damage(950, false), "950");
/// assert_eq!(format_damage(12_340, false), "12.34K");
/// assert_eq!(format_damage(2_500_000, false), "2.50M");
/// assert_eq!(format_damage(12_340, true), "12,34K");
/// ```
pub fn format_damage(n: i64, european: bool) -> String {
    let s = if n.abs() >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n.abs() >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    };
    maybe_eu(s, european)
}

/// Format a DPS figure with thousands separators.
///
/// # Examples
/// ```
/// use revtc_types::formatting::format_dps;
/// assert_eq!(format_dps(200, false), "200");
/// assert_eq!(format_dps(31_415, false), "31,415");
/// assert_eq!(format_dps(31_415, true), "31.415");
/// ```
pub fn format_dps(n: u32, european: bool) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    maybe_eu(out, european)
}

/// Format a duration-stacking uptime ratio (0..=1) as a percentage.
///
/// # Examples
/// ```
/// use revtc_types::formatting::format_uptime;
/// assert_eq!(format_uptime(0.875, false), "87.5%");
/// assert_eq!(format_uptime(0.875, true), "87,5%");
/// ```
pub fn format_uptime(ratio: f32, european: bool) -> String {
    maybe_eu(format!("{:.1}%", ratio * 100.0), european)
}

/// Format a mean stack count for intensity boons.
///
/// # Examples
/// ```
/// use revtc_types::formatting::format_stacks;
/// assert_eq!(format_stacks(23.456, false), "23.5");
/// ```
pub fn format_stacks(avg: f32, european: bool) -> String {
    maybe_eu(format!("{:.1}", avg), european)
}

/// Format a millisecond duration as `M:SS.mmm`.
///
/// # Examples
/// ```
/// use revtc_types::formatting::format_duration_ms;
/// assert_eq!(format_duration_ms(5_000), "0:05.000");
/// assert_eq!(format_duration_ms(245_120), "4:05.120");
/// ```
pub fn format_duration_ms(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}.{:03}", secs / 60, secs % 60, ms % 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_damage() {
        assert_eq!(format_damage(0, false), "0");
        assert_eq!(format_damage(999, false), "999");
        assert_eq!(format_damage(1_000, false), "1.00K");
        assert_eq!(format_damage(1_500_000, false), "1.50M");
        assert_eq!(format_damage(-2_000, false), "-2.00K");
    }

    #[test]
    fn test_format_dps() {
        assert_eq!(format_dps(0, false), "0");
        assert_eq!(format_dps(999, false), "999");
        assert_eq!(format_dps(1_000, false), "1,000");
        assert_eq!(format_dps(1_234_567, false), "1,234,567");
        assert_eq!(format_dps(1_234_567, true), "1.234.567");
    }

    #[test]
    fn test_format_uptime_bounds() {
        assert_eq!(format_uptime(0.0, false), "0.0%");
        assert_eq!(format_uptime(1.0, false), "100.0%");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(0), "0:00.000");
        assert_eq!(format_duration_ms(59_999), "0:59.999");
        assert_eq!(format_duration_ms(60_000), "1:00.000");
    }

    #[test]
    fn test_europeanize() {
        assert_eq!(europeanize("1.50K"), "1,50K");
        assert_eq!(europeanize("1,500,000"), "1.500.000");
    }
}
