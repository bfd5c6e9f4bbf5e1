//! Time-bucket expansion for chart point clicks.
//!
//! A chart point is labeled by a single date even when the series is
//! bucketed by week or month; clicking it scopes the other widgets to the
//! whole bucket, so the label has to expand back into its window.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::dates::display_date;
use crate::selection::GroupBy;

impl GroupBy {
    /// Expand a bucket label into its inclusive date window.
    ///
    /// `Day` is the day itself, `Week` the Monday-anchored seven-day
    /// window containing the date, `Month` the first through last day of
    /// that calendar month.
    pub fn expand(self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            GroupBy::Day => (date, date),
            GroupBy::Week => {
                let offset = date.weekday().num_days_from_monday() as i64;
                let start = date - TimeDelta::try_days(offset).unwrap();
                (start, start + TimeDelta::try_days(6).unwrap())
            }
            GroupBy::Month => {
                let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
                let next_month = if date.month() == 12 {
                    NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
                };
                let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(date);
                (start, end)
            }
        }
    }
}

/// Caption for the currently selected bucket, e.g.
/// "November 2, 2024" or "November 4, 2024 – November 10, 2024".
pub fn bucket_label(group_by: GroupBy, date: NaiveDate) -> String {
    let (start, end) = group_by.expand(date);
    if start == end {
        display_date(&start)
    } else {
        format!("{} – {}", display_date(&start), display_date(&end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_expands_to_itself() {
        let d = date(2024, 11, 2);
        assert_eq!(GroupBy::Day.expand(d), (d, d));
    }

    #[test]
    fn test_week_anchors_on_monday() {
        // 2024-11-06 is a Wednesday; its week runs Mon 11-04 .. Sun 11-10.
        assert_eq!(
            GroupBy::Week.expand(date(2024, 11, 6)),
            (date(2024, 11, 4), date(2024, 11, 10))
        );
        // A Monday maps to its own week.
        assert_eq!(
            GroupBy::Week.expand(date(2024, 11, 4)),
            (date(2024, 11, 4), date(2024, 11, 10))
        );
        // A Sunday belongs to the preceding Monday's week.
        assert_eq!(
            GroupBy::Week.expand(date(2024, 11, 10)),
            (date(2024, 11, 4), date(2024, 11, 10))
        );
    }

    #[test]
    fn test_week_crosses_month_boundary() {
        // 2024-12-01 is a Sunday inside the week of Mon 11-25.
        assert_eq!(
            GroupBy::Week.expand(date(2024, 12, 1)),
            (date(2024, 11, 25), date(2024, 12, 1))
        );
    }

    #[test]
    fn test_month_expands_to_calendar_month() {
        assert_eq!(
            GroupBy::Month.expand(date(2024, 11, 15)),
            (date(2024, 11, 1), date(2024, 11, 30))
        );
        // Leap February.
        assert_eq!(
            GroupBy::Month.expand(date(2024, 2, 10)),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        // December rolls the year for its end bound.
        assert_eq!(
            GroupBy::Month.expand(date(2024, 12, 25)),
            (date(2024, 12, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn test_bucket_label() {
        assert_eq!(
            bucket_label(GroupBy::Day, date(2024, 11, 2)),
            "November 2, 2024"
        );
        assert_eq!(
            bucket_label(GroupBy::Week, date(2024, 11, 6)),
            "November 4, 2024 – November 10, 2024"
        );
    }
}
