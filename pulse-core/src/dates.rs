//! Date parsing and formatting helpers shared across the dashboard crates.

use chrono::{Datelike, NaiveDate};

/// Wire format for all date parameters and payload fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a NaiveDate as "YYYY-MM-DD".
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date string in "YYYY-MM-DD" format.
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

/// Long display form used in captions and the hover popup,
/// e.g. "November 2, 2024".
pub fn display_date(date: &NaiveDate) -> String {
    format!(
        "{} {}, {}",
        month_name(date.month()),
        date.day(),
        date.year()
    )
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_parse() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let formatted = format_date(&date);
        assert_eq!(formatted, "2024-11-02");
        let parsed = parse_date(&formatted).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("2024/11/02").is_err());
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_display_date() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        assert_eq!(display_date(&date), "November 2, 2024");
    }
}
