//! Transformation functions for GitHub search API responses

use serde::{Deserialize, Serialize};

/// Issue state as reported by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

/// Issue as returned by `GET /search/issues`.
///
/// Only the fields shown in the table are kept; everything else in the payload
/// is ignored.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GithubIssue {
    pub html_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub number: u64,
    pub state: IssueState,
    pub title: String,
}

/// Search response from GitHub API
#[derive(Debug, Deserialize, Clone)]
pub struct GithubSearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<GithubIssue>,
}

/// One table row
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub number: u64,
    pub state: IssueState,
    pub title: String,
}

/// Rows and total count of one successful search
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub total_count: u64,
    pub items: Vec<IssueRecord>,
}

/// Parse a raw search response body
pub fn parse_search_response(body: &str) -> Result<GithubSearchResponse, serde_json::Error> {
    serde_json::from_str(body)
}

/// Convert a GitHub search response into table rows.
///
/// Items keep the order GitHub returned them in; sorting is the API's job.
pub fn transform_search_response(response: GithubSearchResponse) -> SearchResponse {
    let items = response
        .items
        .into_iter()
        .map(|issue| IssueRecord {
            url: issue.html_url,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
            number: issue.number,
            state: issue.state,
            title: issue.title,
        })
        .collect();

    SearchResponse {
        total_count: response.total_count,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "total_count": 2,
        "incomplete_results": false,
        "items": [
            {
                "url": "https://api.github.com/repos/angular/material2/issues/9982",
                "html_url": "https://github.com/angular/material2/issues/9982",
                "number": 9982,
                "title": "mat-select panel position",
                "user": { "login": "someone" },
                "labels": [],
                "state": "open",
                "comments": 3,
                "created_at": "2018-02-15T08:40:11Z",
                "updated_at": "2018-02-16T10:01:00Z"
            },
            {
                "html_url": "https://github.com/angular/material2/issues/9001",
                "number": 9001,
                "title": "datepicker locale",
                "state": "closed",
                "created_at": "2017-12-01T00:00:00Z",
                "updated_at": "2018-01-03T12:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn test_parse_search_response_ignores_extra_fields() {
        let response = parse_search_response(FIXTURE).unwrap();

        assert_eq!(response.total_count, 2);
        assert!(!response.incomplete_results);
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].number, 9982);
        assert_eq!(response.items[1].state, IssueState::Closed);
    }

    #[test]
    fn test_transform_search_response_preserves_order() {
        let response = parse_search_response(FIXTURE).unwrap();
        let output = transform_search_response(response);

        assert_eq!(output.total_count, 2);
        let numbers: Vec<u64> = output.items.iter().map(|i| i.number).collect();
        assert_eq!(numbers, vec![9982, 9001]);
    }

    #[test]
    fn test_transform_search_response_maps_fields() {
        let response = parse_search_response(FIXTURE).unwrap();
        let output = transform_search_response(response);

        let first = &output.items[0];
        assert_eq!(first.url, "https://github.com/angular/material2/issues/9982");
        assert_eq!(first.created_at, "2018-02-15T08:40:11Z");
        assert_eq!(first.updated_at, "2018-02-16T10:01:00Z");
        assert_eq!(first.state, IssueState::Open);
        assert_eq!(first.title, "mat-select panel position");
    }

    #[test]
    fn test_transform_search_response_empty() {
        let response = parse_search_response(r#"{"total_count": 0, "items": []}"#).unwrap();
        let output = transform_search_response(response);

        assert_eq!(output.total_count, 0);
        assert!(output.items.is_empty());
    }

    #[test]
    fn test_parse_search_response_rejects_error_payload() {
        let body = r#"{"message": "API rate limit exceeded", "documentation_url": "https://docs.github.com"}"#;
        assert!(parse_search_response(body).is_err());
    }

    #[test]
    fn test_parse_search_response_rejects_unknown_state() {
        let body = r#"{"total_count": 1, "items": [{
            "html_url": "u", "number": 1, "title": "t", "state": "merged",
            "created_at": "c", "updated_at": "u"
        }]}"#;
        assert!(parse_search_response(body).is_err());
    }

    #[test]
    fn test_issue_record_serializes_state_lowercase() {
        let record = IssueRecord {
            url: "https://github.com/angular/material2/issues/1".to_string(),
            created_at: "2018-01-01T00:00:00Z".to_string(),
            updated_at: "2018-01-01T00:00:00Z".to_string(),
            number: 1,
            state: IssueState::Open,
            title: "First".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["state"], "open");
        assert_eq!(json["number"], 1);
    }
}
