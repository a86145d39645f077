use issuefacet_core::facets::FacetInputError;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid sort: {0}")]
    InvalidSort(String),

    #[error("Invalid page: {0} (pages start at 1)")]
    InvalidPage(String),

    #[error(transparent)]
    InvalidFacet(#[from] FacetInputError),
}
