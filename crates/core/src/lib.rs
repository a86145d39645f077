//! Core library for issuefacet
//!
//! This crate implements the **Functional Core** of the issuefacet application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The issuefacet project uses a two-crate architecture:
//!
//! - **`issuefacet_core`** (this crate): Pure transformation functions with zero I/O
//! - **`issuefacet`**: HTTP transport, the search session and the terminal front end
//!
//! Nothing in this crate touches the network, the terminal or a clock. Every
//! function returns the same output for the same input, so the tests below each
//! module work on plain fixture data.
//!
//! # Module Organization
//!
//! - [`facets`]: Facet definitions and extraction of the selected facet values
//! - [`query`]: Filter model and GitHub search URL construction
//! - [`github`]: GitHub search API response types and their transformation into rows
//! - [`view`]: The view state shown to the user and its transitions
//! - [`controls`]: Trigger events and the sort/page/facet control state
//! - [`ledger`]: Request sequencing for latest-wins result application
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use issuefacet_core::controls::{SearchControls, Trigger};
//! use issuefacet_core::facets::default_facets;
//!
//! let mut controls = SearchControls::new(&default_facets());
//! let params = controls.apply(Trigger::Initial);
//!
//! assert_eq!(
//!     params.to_url(),
//!     "https://api.github.com/search/issues?q=+repo:angular/material2&sort=&order=&page=1"
//! );
//! ```

pub mod controls;
pub mod facets;
pub mod github;
pub mod ledger;
pub mod query;
pub mod view;
