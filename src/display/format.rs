//! Currency, date and percent formatting
//!
//! Dates are entered as `YYYY-MM-DD` and shown in long Indonesian form
//! ("5 Maret 2025"). Currency is shown in whole rupiah with `.` as the
//! thousands separator.

use chrono::{Datelike, NaiveDate};

use crate::models::Money;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// "Rp 1.500.000"
pub fn format_currency(amount: Money) -> String {
    amount.to_string()
}

/// Date as typed into a form, `YYYY-MM-DD`
pub fn format_input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a form date; surrounding whitespace is ignored
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Long Indonesian date, e.g. "5 Maret 2025"
pub fn format_display_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Percent with two decimals, e.g. "75.00%"
pub fn format_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}

/// Shorten text to `max` characters for table cells
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(Money::from_rupiah(1_500_000)), "Rp 1.500.000");
        assert_eq!(format_currency(Money::zero()), "Rp 0");
    }

    #[test]
    fn test_input_date_round_trip() {
        let d = date(2025, 3, 5);
        assert_eq!(format_input_date(d), "2025-03-05");
        assert_eq!(parse_input_date(" 2025-03-05 "), Some(d));
        assert_eq!(parse_input_date("05/03/2025"), None);
        assert_eq!(parse_input_date(""), None);
    }

    #[test]
    fn test_display_date() {
        assert_eq!(format_display_date(date(2025, 3, 5)), "5 Maret 2025");
        assert_eq!(format_display_date(date(2025, 12, 31)), "31 Desember 2025");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(75.0), "75.00%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Katering", 20), "Katering");
        assert_eq!(truncate("Pesta Adat (Maneat Horja)", 10), "Pesta A...");
    }
}
