//! GitHub issue search URL construction
//!
//! Pure functions that turn the current filter, sort and page state into the
//! request URL for `GET /search/issues`. See
//! <https://docs.github.com/en/rest/search/search#search-issues-and-pull-requests>.

use serde::{Deserialize, Serialize};

/// GitHub REST API root
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Filter values taken from the selected facets.
///
/// Fields are emitted in declaration order. `None` and empty values are left
/// out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFilter {
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub html_url: Option<String>,
    pub state: Option<String>,
    pub title: Option<String>,
    pub number: Option<String>,
}

impl FacetFilter {
    /// Every filter entry in emission order
    pub fn entries(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("created_at", self.created_at.as_deref()),
            ("updated_at", self.updated_at.as_deref()),
            ("html_url", self.html_url.as_deref()),
            ("state", self.state.as_deref()),
            ("title", self.title.as_deref()),
            ("number", self.number.as_deref()),
        ]
    }

    /// `field:value` terms for every non-empty entry
    pub fn terms(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|(field, value)| {
                let value = value.filter(|v| !v.trim().is_empty())?;
                Some(format!("{}:{}", query_field_name(field), encode_value(value)))
            })
            .collect()
    }
}

/// Name of a response field as understood by the search query syntax.
///
/// GitHub reports `created_at`/`updated_at` in responses but expects
/// `created`/`updated` in `q`. Other names pass through.
pub fn query_field_name(field: &str) -> &str {
    field.strip_suffix("_at").unwrap_or(field)
}

/// Encode a value for use inside `q`.
///
/// Whitespace runs become `+` (GitHub's term separator) and every word is
/// percent-encoded, so `bug`, `open` or `2018-01-01` pass unchanged.
pub fn encode_value(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

/// Sort order requested from the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    #[serde(rename = "")]
    Unsorted,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
            SortDirection::Unsorted => "",
        }
    }

    /// Parse `asc`, `desc` or an empty string
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            "" => Some(SortDirection::Unsorted),
            _ => None,
        }
    }
}

/// Everything needed to build one search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequestParams {
    pub repository: String,
    pub filter: FacetFilter,
    pub keyword: String,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub page_index: u32,
}

impl SearchRequestParams {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            filter: FacetFilter::default(),
            keyword: String::new(),
            sort_field: String::new(),
            sort_direction: SortDirection::Unsorted,
            page_index: 0,
        }
    }

    /// Request URL against the public GitHub API
    pub fn to_url(&self) -> String {
        build_search_url(DEFAULT_API_BASE, self)
    }
}

/// Build the `q` parameter: keyword, repository, then filter terms.
///
/// The keyword is always present, so an empty keyword leaves a leading `+`.
pub fn build_search_query(params: &SearchRequestParams) -> String {
    let mut segments = vec![
        encode_value(&params.keyword),
        format!("repo:{}", params.repository),
    ];
    segments.extend(params.filter.terms());
    segments.join("+")
}

/// Build the full search URL for the given API root
pub fn build_search_url(api_base: &str, params: &SearchRequestParams) -> String {
    // Handle base_url that may or may not have trailing slash
    let api_base = api_base.trim_end_matches('/');

    format!(
        "{api_base}/search/issues?q={}&sort={}&order={}&page={}",
        build_search_query(params),
        params.sort_field,
        params.sort_direction.as_str(),
        u64::from(params.page_index) + 1
    )
}
