//! The shared search selection and its URL query-string form.
//!
//! One `Selection` drives all three widgets. It is initialized from
//! `location.search` at startup, mutated by user interaction (search,
//! filter edits, chart clicks) or history navigation, and serialized back
//! into the query string after every accepted change. `start_date` and
//! `end_date` accept the legacy camelCase spellings on read; writes are
//! always snake_case.

use std::fmt;

use chrono::NaiveDate;

use crate::dates::{format_date, parse_date};

/// Time-bucket granularity for the chart and the scoped endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupBy {
    #[default]
    Day,
    Week,
    Month,
}

impl GroupBy {
    /// Wire string used in query parameters and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Day => "1day",
            GroupBy::Week => "1week",
            GroupBy::Month => "1month",
        }
    }

    /// Parse a wire string; anything unrecognized falls back to the default.
    pub fn parse(s: &str) -> Self {
        match s {
            "1week" => GroupBy::Week,
            "1month" => GroupBy::Month,
            _ => GroupBy::Day,
        }
    }

    /// Label for the granularity dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::Day => "Daily",
            GroupBy::Week => "Weekly",
            GroupBy::Month => "Monthly",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures raised by [`Selection::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// `start_date` is chronologically after `end_date`.
    InvertedRange,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::InvertedRange => {
                write!(f, "The start date must not be after the end date.")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// The shared filter: query, optional single date, optional date range,
/// and bucket granularity.
///
/// Fetches always run against a cloned snapshot, so mutating the live
/// selection cannot alter an in-flight request's parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub query: String,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub group_by: GroupBy,
}

/// A partial change to a [`Selection`]. `None` leaves the field alone;
/// `Some(None)` clears an optional field.
#[derive(Clone, Debug, Default)]
pub struct SelectionPatch {
    pub query: Option<String>,
    pub date: Option<Option<NaiveDate>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub group_by: Option<GroupBy>,
}

impl Selection {
    /// Parse recognized parameters out of a query string (with or without
    /// the leading `?`). Unknown parameters are ignored, unparseable dates
    /// are dropped rather than failing the whole parse.
    pub fn from_query_string(qs: &str) -> Self {
        let mut selection = Selection::default();
        for (key, value) in parse_pairs(qs) {
            match key.as_str() {
                "query" => selection.query = value,
                "date" => selection.date = parse_date(&value).ok(),
                "start_date" | "startDate" => selection.start_date = parse_date(&value).ok(),
                "end_date" | "endDate" => selection.end_date = parse_date(&value).ok(),
                "group_by" => selection.group_by = GroupBy::parse(&value),
                _ => {}
            }
        }
        selection
    }

    /// Serialize the owned fields, omitting empty and default values.
    pub fn to_query_string(&self) -> String {
        encode_pairs(&self.owned_pairs())
    }

    /// The `(key, value)` pairs this selection owns in the URL, in
    /// canonical order with canonical casing.
    pub fn owned_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.query.is_empty() {
            pairs.push(("query", self.query.clone()));
        }
        if let Some(date) = self.date {
            pairs.push(("date", format_date(&date)));
        }
        if let Some(start) = self.start_date {
            pairs.push(("start_date", format_date(&start)));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", format_date(&end)));
        }
        if self.group_by != GroupBy::default() {
            pairs.push(("group_by", self.group_by.to_string()));
        }
        pairs
    }

    /// Merge a partial change. An inverted date range is rejected and the
    /// selection stays untouched. Returns whether the effective selection
    /// actually changed, so callers can suppress redundant fetches.
    pub fn apply(&mut self, patch: &SelectionPatch) -> Result<bool, SelectionError> {
        let mut next = self.clone();
        if let Some(query) = &patch.query {
            next.query = query.clone();
        }
        if let Some(date) = patch.date {
            next.date = date;
        }
        if let Some(start) = patch.start_date {
            next.start_date = start;
        }
        if let Some(end) = patch.end_date {
            next.end_date = end;
        }
        if let Some(group_by) = patch.group_by {
            next.group_by = group_by;
        }
        if let (Some(start), Some(end)) = (next.start_date, next.end_date) {
            if start > end {
                return Err(SelectionError::InvertedRange);
            }
        }
        if next == *self {
            return Ok(false);
        }
        *self = next;
        Ok(true)
    }

    /// Canonical cache key over all five fields. The query component is
    /// percent-encoded so a `|` inside the query cannot collide with the
    /// field separator.
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            urlencoding::encode(&self.query),
            self.date.map(|d| format_date(&d)).unwrap_or_default(),
            self.start_date.map(|d| format_date(&d)).unwrap_or_default(),
            self.end_date.map(|d| format_date(&d)).unwrap_or_default(),
            self.group_by,
        )
    }

    /// The date window this selection scopes to: an explicit range wins
    /// over the single date; a single date is its own one-day window.
    pub fn effective_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => self.date.map(|d| (d, d)),
        }
    }

    /// No fetch runs anywhere without a query.
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }
}

/// Rewrite only the selection-owned parameters inside an existing query
/// string, preserving foreign parameters and their relative order. URL
/// writers merge; they never overwrite wholesale.
pub fn merge_into_query(existing: &str, selection: &Selection) -> String {
    const OWNED: [&str; 7] = [
        "query",
        "date",
        "start_date",
        "startDate",
        "end_date",
        "endDate",
        "group_by",
    ];
    let mut pairs: Vec<(String, String)> = parse_pairs(existing)
        .into_iter()
        .filter(|(key, _)| !OWNED.contains(&key.as_str()))
        .collect();
    for (key, value) in selection.owned_pairs() {
        pairs.push((key.to_string(), value));
    }
    let borrowed: Vec<(&str, String)> = pairs
        .iter()
        .map(|(key, value)| (key.as_str(), value.clone()))
        .collect();
    encode_pairs(&borrowed)
}

fn parse_pairs(qs: &str) -> Vec<(String, String)> {
    qs.trim_start_matches('?')
        .split('&')
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let (key, value) = chunk.split_once('=').unwrap_or((chunk, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    // URLSearchParams spells spaces as '+'.
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(raw)
}

fn encode_pairs(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_query_string_defaults() {
        let selection = Selection::from_query_string("");
        assert_eq!(selection, Selection::default());
        assert_eq!(selection.group_by, GroupBy::Day);
        assert!(!selection.has_query());
    }

    #[test]
    fn test_from_query_string_full() {
        let selection = Selection::from_query_string(
            "?query=medical%20school&date=2024-11-02&start_date=2024-11-01&end_date=2024-11-30&group_by=1week",
        );
        assert_eq!(selection.query, "medical school");
        assert_eq!(selection.date, Some(date(2024, 11, 2)));
        assert_eq!(selection.start_date, Some(date(2024, 11, 1)));
        assert_eq!(selection.end_date, Some(date(2024, 11, 30)));
        assert_eq!(selection.group_by, GroupBy::Week);
    }

    #[test]
    fn test_from_query_string_accepts_camel_case_range() {
        let selection =
            Selection::from_query_string("query=a&startDate=2024-01-01&endDate=2024-01-31");
        assert_eq!(selection.start_date, Some(date(2024, 1, 1)));
        assert_eq!(selection.end_date, Some(date(2024, 1, 31)));
        // Writes are canonical snake_case.
        let qs = selection.to_query_string();
        assert!(qs.contains("start_date=2024-01-01"));
        assert!(qs.contains("end_date=2024-01-31"));
        assert!(!qs.contains("startDate"));
    }

    #[test]
    fn test_from_query_string_drops_bad_dates() {
        let selection = Selection::from_query_string("query=a&date=yesterday&group_by=hourly");
        assert_eq!(selection.date, None);
        assert_eq!(selection.group_by, GroupBy::Day);
    }

    #[test]
    fn test_to_query_string_omits_defaults() {
        let selection = Selection {
            query: "budget".into(),
            ..Default::default()
        };
        assert_eq!(selection.to_query_string(), "query=budget");
    }

    #[test]
    fn test_round_trip_preserves_selection() {
        let selection = Selection {
            query: "의대".into(),
            date: Some(date(2024, 11, 2)),
            start_date: Some(date(2024, 10, 28)),
            end_date: Some(date(2024, 11, 3)),
            group_by: GroupBy::Week,
        };
        let round = Selection::from_query_string(&selection.to_query_string());
        assert_eq!(round, selection);
    }

    #[test]
    fn test_round_trip_distinguishes_distinct_selections() {
        let base = Selection {
            query: "strike".into(),
            ..Default::default()
        };
        let mut with_date = base.clone();
        with_date.date = Some(date(2024, 11, 2));
        let mut with_group = base.clone();
        with_group.group_by = GroupBy::Month;

        let reparse = |s: &Selection| Selection::from_query_string(&s.to_query_string());
        assert_ne!(reparse(&base), reparse(&with_date));
        assert_ne!(reparse(&base), reparse(&with_group));
        assert_ne!(reparse(&with_date), reparse(&with_group));
    }

    #[test]
    fn test_apply_reports_change() {
        let mut selection = Selection {
            query: "strike".into(),
            ..Default::default()
        };
        let changed = selection
            .apply(&SelectionPatch {
                date: Some(Some(date(2024, 11, 2))),
                ..Default::default()
            })
            .unwrap();
        assert!(changed);
        assert_eq!(selection.date, Some(date(2024, 11, 2)));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut selection = Selection {
            query: "strike".into(),
            date: Some(date(2024, 11, 2)),
            ..Default::default()
        };
        let changed = selection
            .apply(&SelectionPatch {
                date: Some(Some(date(2024, 11, 2))),
                ..Default::default()
            })
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_apply_rejects_inverted_range_and_keeps_previous_value() {
        let mut selection = Selection {
            query: "strike".into(),
            start_date: Some(date(2024, 11, 1)),
            end_date: Some(date(2024, 11, 30)),
            ..Default::default()
        };
        let before = selection.clone();
        let result = selection.apply(&SelectionPatch {
            start_date: Some(Some(date(2024, 12, 25))),
            ..Default::default()
        });
        assert_eq!(result, Err(SelectionError::InvertedRange));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_apply_clears_optional_fields() {
        let mut selection = Selection {
            query: "strike".into(),
            date: Some(date(2024, 11, 2)),
            ..Default::default()
        };
        let changed = selection
            .apply(&SelectionPatch {
                date: Some(None),
                ..Default::default()
            })
            .unwrap();
        assert!(changed);
        assert_eq!(selection.date, None);
    }

    #[test]
    fn test_cache_key_distinct_across_fields() {
        let base = Selection {
            query: "strike".into(),
            ..Default::default()
        };
        let mut keys = vec![base.cache_key()];
        let mut with_date = base.clone();
        with_date.date = Some(date(2024, 11, 2));
        keys.push(with_date.cache_key());
        let mut with_range = base.clone();
        with_range.start_date = Some(date(2024, 11, 2));
        with_range.end_date = Some(date(2024, 11, 2));
        keys.push(with_range.cache_key());
        let mut with_group = base.clone();
        with_group.group_by = GroupBy::Week;
        keys.push(with_group.cache_key());

        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_cache_key_survives_separator_in_query() {
        let tricky = Selection {
            query: "a|2024-11-02".into(),
            ..Default::default()
        };
        let honest = Selection {
            query: "a".into(),
            date: Some(date(2024, 11, 2)),
            ..Default::default()
        };
        assert_ne!(tricky.cache_key(), honest.cache_key());
    }

    #[test]
    fn test_effective_range_prefers_range_over_date() {
        let selection = Selection {
            query: "strike".into(),
            date: Some(date(2024, 11, 15)),
            start_date: Some(date(2024, 11, 1)),
            end_date: Some(date(2024, 11, 30)),
            ..Default::default()
        };
        assert_eq!(
            selection.effective_range(),
            Some((date(2024, 11, 1), date(2024, 11, 30)))
        );

        let day_only = Selection {
            query: "strike".into(),
            date: Some(date(2024, 11, 15)),
            ..Default::default()
        };
        assert_eq!(
            day_only.effective_range(),
            Some((date(2024, 11, 15), date(2024, 11, 15)))
        );
    }

    #[test]
    fn test_merge_into_query_preserves_foreign_params() {
        let selection = Selection {
            query: "strike".into(),
            date: Some(date(2024, 11, 2)),
            ..Default::default()
        };
        let merged = merge_into_query("?tab=news&query=old&startDate=2020-01-01", &selection);
        assert!(merged.starts_with("tab=news"));
        assert!(merged.contains("query=strike"));
        assert!(merged.contains("date=2024-11-02"));
        assert!(!merged.contains("2020"));
        assert!(!merged.contains("startDate"));
    }

    #[test]
    fn test_merge_into_query_round_trips() {
        let selection = Selection {
            query: "med school".into(),
            group_by: GroupBy::Month,
            ..Default::default()
        };
        let merged = merge_into_query("utm_source=mail", &selection);
        assert_eq!(Selection::from_query_string(&merged), selection);
    }
}
