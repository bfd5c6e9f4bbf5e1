//! JSON payload shapes for the backend endpoints.
//!
//! Optional fields decode tolerantly: the widgets substitute placeholders
//! at render time instead of failing the whole payload.

use serde::{Deserialize, Serialize};

/// One time bucket of the chart series: `GET /news/chart/`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: String,
    pub count: u64,
}

/// A single article in the news list.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub press: String,
    #[serde(default)]
    pub author: Option<String>,
    pub link: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// One page of the news list: `GET /news/`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct NewsListPage {
    #[serde(default)]
    pub news_list: Vec<NewsItem>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub has_next: bool,
}

/// The three-part generated summary: `GET /news/summary/`.
///
/// While generation is still in progress the service answers with
/// `{"is_error": true}` and no sections; callers retry.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct IssueSummary {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub core_content: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub is_error: bool,
}

impl IssueSummary {
    pub fn is_ready(&self) -> bool {
        !self.is_error
    }
}

/// Point-level popup payload: `GET /news/hover-summary/{date}/`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HoverSummary {
    pub date: String,
    #[serde(default)]
    pub news_count: u64,
    #[serde(default)]
    pub title_summary: String,
    #[serde(default)]
    pub content_summary: String,
    #[serde(default)]
    pub top_keywords: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One-paragraph keyword summary: `GET /news/quick-summary/`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct QuickSummary {
    #[serde(default)]
    pub summary: String,
}

/// Full article payload for the list's detail overlay: `GET /news/{id}/`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewsDetail {
    pub title: String,
    pub press: String,
    #[serde(default)]
    pub author: Option<String>,
    pub link: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_chart_series() {
        let points: Vec<ChartPoint> = serde_json::from_str(
            r#"[{"date":"2024-11-01","count":5},{"date":"2024-11-02","count":12}]"#,
        )
        .unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].date, "2024-11-02");
        assert_eq!(points[1].count, 12);
    }

    #[test]
    fn test_decode_news_page_with_optional_fields() {
        let page: NewsListPage = serde_json::from_str(
            r#"{
                "news_list": [
                    {"id": 7, "title": "t", "date": "2024-11-02", "press": "p", "link": "https://x"},
                    {"id": 8, "title": "u", "date": "2024-11-02", "press": "q",
                     "author": "kim", "link": "https://y", "image": "https://img"}
                ],
                "total_count": 42,
                "has_next": true
            }"#,
        )
        .unwrap();
        assert_eq!(page.news_list.len(), 2);
        assert_eq!(page.news_list[0].author, None);
        assert_eq!(page.news_list[1].author.as_deref(), Some("kim"));
        assert_eq!(page.total_count, 42);
        assert!(page.has_next);
    }

    #[test]
    fn test_decode_summary_still_generating() {
        let summary: IssueSummary = serde_json::from_str(r#"{"is_error": true}"#).unwrap();
        assert!(!summary.is_ready());
        assert_eq!(summary.background, None);
    }

    #[test]
    fn test_decode_summary_ready_with_missing_section() {
        let summary: IssueSummary = serde_json::from_str(
            r#"{"background": "b", "conclusion": "c"}"#,
        )
        .unwrap();
        assert!(summary.is_ready());
        assert_eq!(summary.background.as_deref(), Some("b"));
        assert_eq!(summary.core_content, None);
        assert_eq!(summary.conclusion.as_deref(), Some("c"));
    }

    #[test]
    fn test_decode_hover_summary() {
        let hover: HoverSummary = serde_json::from_str(
            r#"{
                "date": "2024-11-02",
                "news_count": 12,
                "title_summary": "headline digest",
                "content_summary": "body digest",
                "top_keywords": ["a", "b"]
            }"#,
        )
        .unwrap();
        assert_eq!(hover.news_count, 12);
        assert_eq!(hover.top_keywords, vec!["a", "b"]);
        assert_eq!(hover.image_url, None);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        // A list where an object is expected is a data error, not a panic.
        let result: Result<NewsListPage, _> = serde_json::from_str(r#"[1, 2, 3]"#);
        assert!(result.is_err());
    }
}
