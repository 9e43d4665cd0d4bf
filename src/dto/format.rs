//! Display formatting shared by the dashboard pages.

use chrono::{DateTime, NaiveDate};

/// Currency prefix used for Kenyan shillings.
const CURRENCY_SYMBOL: &str = "Ksh";

/// Inserts thousands separators into a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_fixed(amount: f64, decimals: usize, trim_zeros: bool) -> String {
    let fixed = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (fixed.as_str(), ""),
    };
    let frac_part = if trim_zeros {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };

    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{sign}{}", group_thousands(int_part))
    } else {
        format!("{sign}{}.{frac_part}", group_thousands(int_part))
    }
}

/// Formats a plain amount with thousands separators and at most three
/// decimals, e.g. `12,345.5`.
pub fn format_amount(amount: f64) -> String {
    format_fixed(amount, 3, true)
}

/// Formats a shilling amount, e.g. `Ksh 45,000.00`.
pub fn format_currency(amount: f64) -> String {
    let formatted = format_fixed(amount, 2, false);
    match formatted.strip_prefix('-') {
        Some(unsigned) => format!("-{CURRENCY_SYMBOL} {unsigned}"),
        None => format!("{CURRENCY_SYMBOL} {formatted}"),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    value
        .get(..10)
        .unwrap_or(value)
        .parse::<NaiveDate>()
        .ok()
}

/// Formats a date as `15 March 1990`; unparseable input is returned as is.
pub fn format_long_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%-d %B %Y").to_string(),
        None => value.to_string(),
    }
}

/// First ten characters of a timestamp (the `YYYY-MM-DD` part).
pub fn date_part(value: &str) -> &str {
    value.get(..10).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_grouped_like_locale_strings() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(1234567.5), "1,234,567.5");
        assert_eq!(format_amount(12.3456), "12.346");
        assert_eq!(format_amount(-2500.0), "-2,500");
    }

    #[test]
    fn currency_has_symbol_and_two_decimals() {
        assert_eq!(format_currency(45000.0), "Ksh 45,000.00");
        assert_eq!(format_currency(0.5), "Ksh 0.50");
        assert_eq!(format_currency(-1200.0), "-Ksh 1,200.00");
        assert_eq!(format_currency(-0.001), "Ksh 0.00");
    }

    #[test]
    fn long_dates_accept_plain_and_timestamp_forms() {
        assert_eq!(format_long_date("1990-03-15"), "15 March 1990");
        assert_eq!(format_long_date("1990-03-15T00:00:00.000Z"), "15 March 1990");
        assert_eq!(format_long_date("2001-12-01T10:00:00+03:00"), "1 December 2001");
        assert_eq!(format_long_date("not a date"), "not a date");
    }

    #[test]
    fn date_part_slices_timestamps() {
        assert_eq!(date_part("2026-10-19T08:15:42.000Z"), "2026-10-19");
        assert_eq!(date_part("short"), "short");
    }
}
