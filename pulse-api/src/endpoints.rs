//! Route paths and query-parameter builders.
//!
//! Builders are pure functions from the shared selection to `(key, value)`
//! pairs so they stay natively testable; the client percent-encodes them
//! at send time. Range bounds are emitted only when both exist, otherwise
//! the single date, matching the precedence the backend applies.

use pulse_core::dates::format_date;
use pulse_core::Selection;

/// Default mount point of the backend, overridable at runtime.
pub const DEFAULT_API_BASE: &str = "/api/v2";

pub const CHART: &str = "/news/chart/";
pub const NEWS: &str = "/news/";
pub const SUMMARY: &str = "/news/summary/";
pub const QUICK_SUMMARY: &str = "/news/quick-summary/";

pub fn hover_summary_path(date: &str) -> String {
    format!("/news/hover-summary/{date}/")
}

pub fn news_detail_path(id: u64) -> String {
    format!("/news/{id}/")
}

pub type Params = Vec<(&'static str, String)>;

/// Chart series scope: query, granularity, and the explicit range only.
/// The single `date` field never narrows the chart; clicking a point must
/// not re-scope the series it was clicked on.
pub fn chart_params(selection: &Selection) -> Params {
    let mut params = base_params(selection);
    if let (Some(start), Some(end)) = (selection.start_date, selection.end_date) {
        params.push(("start_date", format_date(&start)));
        params.push(("end_date", format_date(&end)));
    }
    params
}

/// News list page scope: full selection plus the page cursor.
pub fn news_params(selection: &Selection, page: u32, page_size: u32) -> Params {
    let mut params = scoped_params(selection);
    params.push(("page", page.to_string()));
    params.push(("page_size", page_size.to_string()));
    params
}

/// Summary scope: the full selection.
pub fn summary_params(selection: &Selection) -> Params {
    scoped_params(selection)
}

/// Hover summary scope: the date rides in the path, so only query and
/// granularity remain as parameters.
pub fn hover_summary_params(selection: &Selection) -> Params {
    base_params(selection)
}

pub fn quick_summary_params(query: &str) -> Params {
    vec![("query", query.to_string())]
}

fn base_params(selection: &Selection) -> Params {
    vec![
        ("query", selection.query.clone()),
        ("group_by", selection.group_by.to_string()),
    ]
}

fn scoped_params(selection: &Selection) -> Params {
    let mut params = base_params(selection);
    if let (Some(start), Some(end)) = (selection.start_date, selection.end_date) {
        params.push(("start_date", format_date(&start)));
        params.push(("end_date", format_date(&end)));
    } else if let Some(date) = selection.date {
        params.push(("date", format_date(&date)));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pulse_core::GroupBy;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn get<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_news_params_range_wins_over_date() {
        let selection = Selection {
            query: "의대".into(),
            date: Some(date(2024, 11, 15)),
            start_date: Some(date(2024, 11, 1)),
            end_date: Some(date(2024, 11, 30)),
            group_by: GroupBy::Week,
        };
        let params = news_params(&selection, 2, 10);
        assert_eq!(get(&params, "query"), Some("의대"));
        assert_eq!(get(&params, "group_by"), Some("1week"));
        assert_eq!(get(&params, "start_date"), Some("2024-11-01"));
        assert_eq!(get(&params, "end_date"), Some("2024-11-30"));
        assert_eq!(get(&params, "date"), None);
        assert_eq!(get(&params, "page"), Some("2"));
        assert_eq!(get(&params, "page_size"), Some("10"));
    }

    #[test]
    fn test_news_params_single_date() {
        let selection = Selection {
            query: "의대".into(),
            date: Some(date(2024, 11, 2)),
            ..Default::default()
        };
        let params = news_params(&selection, 1, 10);
        assert_eq!(get(&params, "date"), Some("2024-11-02"));
        assert_eq!(get(&params, "start_date"), None);
    }

    #[test]
    fn test_chart_params_ignore_single_date() {
        let selection = Selection {
            query: "strike".into(),
            date: Some(date(2024, 11, 2)),
            ..Default::default()
        };
        let params = chart_params(&selection);
        assert_eq!(get(&params, "date"), None);
        assert_eq!(get(&params, "start_date"), None);
        assert_eq!(get(&params, "group_by"), Some("1day"));
    }

    #[test]
    fn test_chart_params_carry_explicit_range() {
        let selection = Selection {
            query: "strike".into(),
            start_date: Some(date(2024, 10, 1)),
            end_date: Some(date(2024, 10, 31)),
            group_by: GroupBy::Month,
            ..Default::default()
        };
        let params = chart_params(&selection);
        assert_eq!(get(&params, "start_date"), Some("2024-10-01"));
        assert_eq!(get(&params, "end_date"), Some("2024-10-31"));
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            hover_summary_path("2024-11-02"),
            "/news/hover-summary/2024-11-02/"
        );
        assert_eq!(news_detail_path(17), "/news/17/");
    }
}
