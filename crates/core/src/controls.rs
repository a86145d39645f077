//! Trigger events and the sort/page/facet control state
//!
//! The table's sort header, its paginator and the facet search input each hold
//! a piece of state and announce changes. [`SearchControls`] keeps that state in
//! one place and turns each [`Trigger`] into the parameters of a fresh request.

use serde::{Deserialize, Serialize};

use crate::facets::{FacetDefinition, SelectedFacets};
use crate::query::{SearchRequestParams, SortDirection};

/// Columns shown in the issue table, which are also the accepted sort fields
pub const SORTABLE_COLUMNS: [&str; 5] = ["created_at", "updated_at", "state", "number", "title"];

/// Active sort column and direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub active: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(active: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            active: active.into(),
            direction,
        }
    }
}

/// Anything that should cause a fresh search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Synthetic start-up trigger so the first page loads without input
    Initial,
    SortChanged(SortState),
    PageChanged { page_index: u32 },
    FacetsChanged(SelectedFacets),
}

impl Trigger {
    pub fn kind(&self) -> &'static str {
        match self {
            Trigger::Initial => "initial",
            Trigger::SortChanged(_) => "sort",
            Trigger::PageChanged { .. } => "page",
            Trigger::FacetsChanged(_) => "facets",
        }
    }
}

/// Current state of the sort, paginator and facet controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchControls {
    pub sort: SortState,
    pub page_index: u32,
    pub facets: SelectedFacets,
}

impl SearchControls {
    /// Controls with no sort, first page and only the fixed facets selected
    pub fn new(definitions: &[FacetDefinition]) -> Self {
        Self {
            sort: SortState::default(),
            page_index: 0,
            facets: SelectedFacets::from_definitions(definitions),
        }
    }

    /// Fold a trigger into the controls and return the request it calls for.
    ///
    /// A sort change sends the paginator back to the first page.
    pub fn apply(&mut self, trigger: Trigger) -> SearchRequestParams {
        match trigger {
            Trigger::Initial => {}
            Trigger::SortChanged(sort) => {
                self.sort = sort;
                self.page_index = 0;
            }
            Trigger::PageChanged { page_index } => self.page_index = page_index,
            Trigger::FacetsChanged(facets) => self.facets = facets,
        }

        self.request_params()
    }

    /// Read the latest control values into request parameters
    pub fn request_params(&self) -> SearchRequestParams {
        SearchRequestParams {
            repository: self.facets.repository(),
            filter: self.facets.to_filter(),
            keyword: self.facets.keyword(),
            sort_field: self.sort.active.clone(),
            sort_direction: self.sort.direction,
            page_index: self.page_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::{default_facets, FacetValue, SelectedValue};

    fn controls() -> SearchControls {
        SearchControls::new(&default_facets())
    }

    #[test]
    fn test_initial_trigger_builds_default_request() {
        let mut controls = controls();
        let params = controls.apply(Trigger::Initial);

        assert_eq!(params.repository, "angular/material2");
        assert_eq!(params.keyword, "");
        assert_eq!(params.page_index, 0);
        assert_eq!(params.sort_direction, SortDirection::Unsorted);
        assert_eq!(
            params.to_url(),
            "https://api.github.com/search/issues?q=+repo:angular/material2&sort=&order=&page=1"
        );
    }

    #[test]
    fn test_page_change_sets_page_index() {
        let mut controls = controls();
        let params = controls.apply(Trigger::PageChanged { page_index: 3 });

        assert_eq!(params.page_index, 3);
        assert!(params.to_url().ends_with("&page=4"));
    }

    #[test]
    fn test_sort_change_resets_page() {
        let mut controls = controls();
        controls.apply(Trigger::PageChanged { page_index: 5 });

        let params = controls.apply(Trigger::SortChanged(SortState::new(
            "updated_at",
            SortDirection::Asc,
        )));

        assert_eq!(params.page_index, 0);
        assert_eq!(params.sort_field, "updated_at");
        assert_eq!(params.sort_direction, SortDirection::Asc);
        assert_eq!(controls.page_index, 0);
    }

    #[test]
    fn test_facet_change_keeps_page_and_sort() {
        let mut controls = controls();
        controls.apply(Trigger::SortChanged(SortState::new(
            "created_at",
            SortDirection::Desc,
        )));
        controls.apply(Trigger::PageChanged { page_index: 2 });

        let mut facets = controls.facets.clone();
        facets.select(
            "state",
            SelectedValue::equal(FacetValue::Text("open".to_string())),
        );
        facets.select(
            "keyword",
            SelectedValue::equal(FacetValue::Text("bug".to_string())),
        );

        let params = controls.apply(Trigger::FacetsChanged(facets));

        assert_eq!(params.page_index, 2);
        assert_eq!(
            params.to_url(),
            "https://api.github.com/search/issues?q=bug+repo:angular/material2+state:open&sort=created_at&order=desc&page=3"
        );
    }

    #[test]
    fn test_facet_change_without_repo_falls_back() {
        let mut controls = controls();
        let params = controls.apply(Trigger::FacetsChanged(SelectedFacets::default()));

        assert_eq!(params.repository, "angular/material2");
    }

    #[test]
    fn test_request_params_read_latest_values() {
        let mut controls = controls();
        controls.page_index = 9;

        assert_eq!(controls.request_params().page_index, 9);
    }

    #[test]
    fn test_trigger_kind() {
        assert_eq!(Trigger::Initial.kind(), "initial");
        assert_eq!(Trigger::PageChanged { page_index: 0 }.kind(), "page");
        assert_eq!(
            Trigger::FacetsChanged(SelectedFacets::default()).kind(),
            "facets"
        );
        assert_eq!(Trigger::SortChanged(SortState::default()).kind(), "sort");
    }
}
