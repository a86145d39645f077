//! Facet definitions and selected-facet extraction
//!
//! A facet is a named, typed field the user can filter on. The definitions are
//! static configuration; the selection is whatever the user has picked so far.
//! Reading a selection never fails: a facet that is not selected, has no
//! values or holds an empty value simply yields `None`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::query::FacetFilter;

/// The one repository this application searches.
pub const REPOSITORY: &str = "angular/material2";

/// Filter fields the query builder understands, in the order they are emitted.
pub const FILTER_FIELDS: [&str; 6] = [
    "created_at",
    "updated_at",
    "html_url",
    "state",
    "title",
    "number",
];

/// Kind of data a facet holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetDataType {
    Text,
    Date,
    CategorySingle,
}

impl FacetDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetDataType::Text => "text",
            FacetDataType::Date => "date",
            FacetDataType::CategorySingle => "category",
        }
    }
}

/// How a selected value is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Equal,
    Contains,
}

/// One selectable option of a category facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

/// A facet value as picked by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FacetValue {
    Number(u64),
    Date(NaiveDate),
    Text(String),
}

impl FacetValue {
    /// Render the value the way it appears in a search query.
    ///
    /// Dates are normalized to `YYYY-MM-DD`. Empty text yields `None`.
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            FacetValue::Number(n) => Some(n.to_string()),
            FacetValue::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
            FacetValue::Text(text) if text.trim().is_empty() => None,
            FacetValue::Text(text) => Some(text.trim().to_string()),
        }
    }
}

/// A value together with the way it should be matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedValue {
    pub value: FacetValue,
    pub filter_type: FilterType,
}

impl SelectedValue {
    pub fn equal(value: FacetValue) -> Self {
        Self {
            value,
            filter_type: FilterType::Equal,
        }
    }
}

/// Static description of a facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetDefinition {
    pub name: String,
    pub label: String,
    pub data_type: FacetDataType,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub readonly: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixed_values: Vec<SelectedValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FacetOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_filter_type: Option<FilterType>,
}

impl FacetDefinition {
    fn new(name: &str, label: &str, data_type: FacetDataType, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            data_type,
            icon: icon.to_string(),
            description: None,
            readonly: false,
            fixed_values: Vec::new(),
            options: Vec::new(),
            fixed_filter_type: None,
        }
    }

    /// Filter type applied to values selected for this facet
    pub fn filter_type(&self) -> FilterType {
        self.fixed_filter_type.unwrap_or(FilterType::Equal)
    }
}

/// The facets offered by the search input
pub fn default_facets() -> Vec<FacetDefinition> {
    let mut repo = FacetDefinition::new("repo", "Repo", FacetDataType::Text, "");
    repo.readonly = true;
    repo.fixed_values = vec![SelectedValue::equal(FacetValue::Text(REPOSITORY.to_string()))];

    let mut state = FacetDefinition::new(
        "state",
        "State",
        FacetDataType::CategorySingle,
        "folder_open",
    );
    state.options = vec![
        FacetOption {
            value: "open".to_string(),
            label: "Open".to_string(),
        },
        FacetOption {
            value: "closed".to_string(),
            label: "Closed".to_string(),
        },
    ];

    let mut keyword = FacetDefinition::new("keyword", "Keyword", FacetDataType::Text, "description");
    keyword.description = Some(
        "Github API will search this keyword in all issue title, issue body, and issue comment body."
            .to_string(),
    );
    keyword.fixed_filter_type = Some(FilterType::Contains);

    vec![
        repo,
        FacetDefinition::new("created_at", "Created", FacetDataType::Date, "date_range"),
        FacetDefinition::new("updated_at", "Updated", FacetDataType::Date, "date_range"),
        state,
        keyword,
    ]
}

/// Look up a facet definition by name
pub fn find_facet<'a>(facets: &'a [FacetDefinition], name: &str) -> Option<&'a FacetDefinition> {
    facets.iter().find(|facet| facet.name == name)
}

/// Errors raised while turning user input into a facet value
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FacetInputError {
    #[error("Unknown facet: {0}")]
    UnknownFacet(String),

    #[error("Facet '{0}' is read-only")]
    ReadOnly(String),

    #[error("Facet '{0}' needs a value")]
    EmptyValue(String),

    #[error("Invalid date for facet '{facet}': {value} (expected YYYY-MM-DD)")]
    InvalidDate { facet: String, value: String },

    #[error("Invalid number for facet '{facet}': {value}")]
    InvalidNumber { facet: String, value: String },

    #[error("Invalid value for facet '{facet}': {value} (expected one of: {expected})")]
    UnknownOption {
        facet: String,
        value: String,
        expected: String,
    },
}

/// Parse a date given either as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps are reduced to their UTC calendar date, which is how GitHub
/// reads `created:` and `updated:` qualifiers.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Parse raw text into a typed value for the given facet definition
pub fn parse_facet_value(
    facet: &FacetDefinition,
    raw: &str,
) -> Result<SelectedValue, FacetInputError> {
    if facet.readonly {
        return Err(FacetInputError::ReadOnly(facet.name.clone()));
    }

    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FacetInputError::EmptyValue(facet.name.clone()));
    }

    let value = match facet.data_type {
        FacetDataType::Date => {
            FacetValue::Date(parse_date(raw).ok_or_else(|| FacetInputError::InvalidDate {
                facet: facet.name.clone(),
                value: raw.to_string(),
            })?)
        }
        FacetDataType::CategorySingle => {
            let option = facet
                .options
                .iter()
                .find(|option| option.value.eq_ignore_ascii_case(raw))
                .ok_or_else(|| FacetInputError::UnknownOption {
                    facet: facet.name.clone(),
                    value: raw.to_string(),
                    expected: facet
                        .options
                        .iter()
                        .map(|option| option.value.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })?;
            FacetValue::Text(option.value.clone())
        }
        FacetDataType::Text => FacetValue::Text(raw.to_string()),
    };

    Ok(SelectedValue {
        value,
        filter_type: facet.filter_type(),
    })
}

/// Parse a selection for any field the query builder accepts.
///
/// Declared facets go through [`parse_facet_value`]. The remaining filter
/// fields (`html_url`, `title`, `number`) have no facet definition and are
/// taken as plain equality values.
pub fn parse_selection(
    facets: &[FacetDefinition],
    name: &str,
    raw: &str,
) -> Result<SelectedValue, FacetInputError> {
    if let Some(facet) = find_facet(facets, name) {
        return parse_facet_value(facet, raw);
    }

    if !FILTER_FIELDS.contains(&name) {
        return Err(FacetInputError::UnknownFacet(name.to_string()));
    }

    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FacetInputError::EmptyValue(name.to_string()));
    }

    let value = if name == "number" {
        let number = raw
            .trim_start_matches('#')
            .parse::<u64>()
            .map_err(|_| FacetInputError::InvalidNumber {
                facet: name.to_string(),
                value: raw.to_string(),
            })?;
        FacetValue::Number(number)
    } else {
        FacetValue::Text(raw.to_string())
    };

    Ok(SelectedValue::equal(value))
}

/// A facet currently selected in the search input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFacet {
    pub name: String,
    pub values: Vec<SelectedValue>,
}

/// The full selection of the search input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectedFacets {
    facets: Vec<SelectedFacet>,
}

impl SelectedFacets {
    /// Selection holding only the fixed values of read-only facets
    pub fn from_definitions(definitions: &[FacetDefinition]) -> Self {
        let facets = definitions
            .iter()
            .filter(|facet| !facet.fixed_values.is_empty())
            .map(|facet| SelectedFacet {
                name: facet.name.clone(),
                values: facet.fixed_values.clone(),
            })
            .collect();

        Self { facets }
    }

    pub fn facets(&self) -> &[SelectedFacet] {
        &self.facets
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.facets.iter().any(|facet| facet.name == name)
    }

    /// Replace the values of a facet, adding it when missing
    pub fn select(&mut self, name: &str, value: SelectedValue) {
        match self.facets.iter_mut().find(|facet| facet.name == name) {
            Some(facet) => facet.values = vec![value],
            None => self.facets.push(SelectedFacet {
                name: name.to_string(),
                values: vec![value],
            }),
        }
    }

    /// Remove a facet from the selection. Returns whether anything changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.facets.len();
        self.facets.retain(|facet| facet.name != name);
        before != self.facets.len()
    }

    /// Drop every facet except the fixed ones of the given definitions
    pub fn clear(&mut self, definitions: &[FacetDefinition]) {
        self.facets.retain(|facet| {
            find_facet(definitions, &facet.name).is_some_and(|definition| definition.readonly)
        });
    }

    /// First selected value of a facet, rendered for a search query.
    ///
    /// Any absence (not selected, no values, empty value) is `None`.
    pub fn first_value(&self, name: &str) -> Option<String> {
        self.facets
            .iter()
            .find(|facet| facet.name == name)?
            .values
            .first()?
            .value
            .to_query_value()
    }

    /// Build the filter for the query builder from the current selection
    pub fn to_filter(&self) -> FacetFilter {
        FacetFilter {
            created_at: self.first_value("created_at"),
            updated_at: self.first_value("updated_at"),
            html_url: self.first_value("html_url"),
            state: self.first_value("state"),
            title: self.first_value("title"),
            number: self.first_value("number"),
        }
    }

    /// Free-text keyword, empty when none is selected
    pub fn keyword(&self) -> String {
        self.first_value("keyword").unwrap_or_default()
    }

    /// Repository to search, falling back to the fixed repository
    pub fn repository(&self) -> String {
        self.first_value("repo")
            .unwrap_or_else(|| REPOSITORY.to_string())
    }
}
