//! View state shown to the user
//!
//! Transitions keep two invariants: `is_loading` and `is_rate_limited` are
//! never both set, and a rate-limited view has no rows.

use serde::Serialize;

use crate::github::{IssueRecord, SearchResponse};

/// Page size of the GitHub search API when `per_page` is not given
pub const PAGE_SIZE: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    is_loading: bool,
    is_rate_limited: bool,
    result_count: u64,
    rows: Vec<IssueRecord>,
    #[serde(skip)]
    has_results: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Start-up state: loading, since the first search fires immediately
    pub fn new() -> Self {
        Self {
            is_loading: true,
            is_rate_limited: false,
            result_count: 0,
            rows: Vec::new(),
            has_results: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_rate_limited(&self) -> bool {
        self.is_rate_limited
    }

    pub fn result_count(&self) -> u64 {
        self.result_count
    }

    pub fn rows(&self) -> &[IssueRecord] {
        &self.rows
    }

    /// Number of pages the current result count spans
    pub fn total_pages(&self) -> u64 {
        self.result_count.div_ceil(PAGE_SIZE)
    }

    /// Page count of the last successful search, `None` until one succeeded.
    ///
    /// Unlike [`ViewState::total_pages`] this tells an empty result apart from
    /// a count that is not known yet.
    pub fn known_total_pages(&self) -> Option<u64> {
        self.has_results.then(|| self.total_pages())
    }

    /// A request was triggered. Rows of the previous result stay visible.
    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.is_rate_limited = false;
    }

    /// The latest request succeeded
    pub fn apply_success(&mut self, response: SearchResponse) {
        self.is_loading = false;
        self.is_rate_limited = false;
        self.result_count = response.total_count;
        self.rows = response.items;
        self.has_results = true;
    }

    /// The latest request failed, whatever the cause
    pub fn apply_failure(&mut self) {
        self.is_loading = false;
        self.is_rate_limited = true;
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::IssueState;

    fn record(number: u64, title: &str) -> IssueRecord {
        IssueRecord {
            url: format!("https://github.com/angular/material2/issues/{number}"),
            created_at: "2018-01-01T00:00:00Z".to_string(),
            updated_at: "2018-01-02T00:00:00Z".to_string(),
            number,
            state: IssueState::Open,
            title: title.to_string(),
        }
    }

    fn assert_invariants(state: &ViewState) {
        assert!(!(state.is_loading() && state.is_rate_limited()));
        if state.is_rate_limited() {
            assert!(state.rows().is_empty());
        }
    }

    #[test]
    fn test_new_state_is_loading() {
        let state = ViewState::new();

        assert!(state.is_loading());
        assert!(!state.is_rate_limited());
        assert_eq!(state.result_count(), 0);
        assert!(state.rows().is_empty());
    }

    #[test]
    fn test_apply_success() {
        let mut state = ViewState::new();
        let a = record(1, "A");
        let b = record(2, "B");

        state.apply_success(SearchResponse {
            total_count: 2,
            items: vec![a.clone(), b.clone()],
        });

        assert!(!state.is_loading());
        assert!(!state.is_rate_limited());
        assert_eq!(state.result_count(), 2);
        assert_eq!(state.rows(), &[a, b]);
        assert_invariants(&state);
    }

    #[test]
    fn test_apply_failure_from_any_state() {
        let mut loaded = ViewState::new();
        loaded.apply_success(SearchResponse {
            total_count: 1,
            items: vec![record(1, "A")],
        });

        let mut loading = loaded.clone();
        loading.begin_loading();

        let mut failed = ViewState::new();
        failed.apply_failure();

        for mut state in [ViewState::new(), loaded, loading, failed] {
            state.apply_failure();

            assert!(!state.is_loading());
            assert!(state.is_rate_limited());
            assert!(state.rows().is_empty());
            assert_invariants(&state);
        }
    }

    #[test]
    fn test_begin_loading_clears_rate_limit() {
        let mut state = ViewState::new();
        state.apply_failure();

        state.begin_loading();

        assert!(state.is_loading());
        assert!(!state.is_rate_limited());
        assert_invariants(&state);
    }

    #[test]
    fn test_begin_loading_keeps_previous_rows() {
        let mut state = ViewState::new();
        state.apply_success(SearchResponse {
            total_count: 1,
            items: vec![record(7, "kept")],
        });

        state.begin_loading();

        assert_eq!(state.rows().len(), 1);
        assert_eq!(state.result_count(), 1);
    }

    #[test]
    fn test_success_after_failure_recovers() {
        let mut state = ViewState::new();
        state.apply_failure();
        state.begin_loading();
        state.apply_success(SearchResponse {
            total_count: 40,
            items: vec![record(3, "C")],
        });

        assert!(!state.is_rate_limited());
        assert_eq!(state.result_count(), 40);
        assert_eq!(state.total_pages(), 2);
    }

    #[test]
    fn test_known_total_pages() {
        let mut state = ViewState::new();
        assert_eq!(state.known_total_pages(), None);

        state.apply_success(SearchResponse {
            total_count: 0,
            items: vec![],
        });
        assert_eq!(state.known_total_pages(), Some(0));

        state.begin_loading();
        state.apply_failure();
        assert_eq!(state.known_total_pages(), Some(0));
    }

    #[test]
    fn test_total_pages() {
        let mut state = ViewState::new();
        assert_eq!(state.total_pages(), 0);

        state.apply_success(SearchResponse {
            total_count: 30,
            items: vec![],
        });
        assert_eq!(state.total_pages(), 1);

        state.apply_success(SearchResponse {
            total_count: 31,
            items: vec![],
        });
        assert_eq!(state.total_pages(), 2);
    }
}
