use crate::config::GithubConfig;
use crate::prelude::{eprintln, println, *};
use crate::render::{format_view_json, format_view_text};
use crate::session::SearchSession;
use crate::transport::GithubTransport;
use issuefacet_core::controls::{SearchControls, SortState, SORTABLE_COLUMNS};
use issuefacet_core::facets::{default_facets, parse_selection, FacetDefinition};
use issuefacet_core::query::SortDirection;

/// Filter, sort and page flags shared by `search` and `url`
#[derive(Debug, clap::Args, Clone, Default)]
pub struct FilterArgs {
    /// Keyword searched in issue titles, bodies and comments
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Issue state: open or closed
    #[arg(long)]
    pub state: Option<String>,

    /// Creation date (YYYY-MM-DD)
    #[arg(long)]
    pub created: Option<String>,

    /// Last update date (YYYY-MM-DD)
    #[arg(long)]
    pub updated: Option<String>,

    /// Issue page URL (e.g., "https://github.com/angular/material2/issues/9982")
    #[arg(long)]
    pub html_url: Option<String>,

    /// Issue title
    #[arg(long)]
    pub title: Option<String>,

    /// Issue number
    #[arg(long)]
    pub number: Option<String>,

    /// Sort column: created_at, updated_at, state, number or title
    #[arg(long, default_value = "")]
    pub sort: String,

    /// Sort order: asc or desc
    #[arg(long, default_value = "")]
    pub order: String,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

impl FilterArgs {
    /// Build the control state these flags describe
    pub fn to_controls(&self, definitions: &[FacetDefinition]) -> Result<SearchControls, Error> {
        let mut controls = SearchControls::new(definitions);

        let selections = [
            ("keyword", &self.keyword),
            ("state", &self.state),
            ("created_at", &self.created),
            ("updated_at", &self.updated),
            ("html_url", &self.html_url),
            ("title", &self.title),
            ("number", &self.number),
        ];

        for (name, raw) in selections {
            if let Some(raw) = raw {
                let value = parse_selection(definitions, name, raw)?;
                controls.facets.select(name, value);
            }
        }

        controls.sort = parse_sort(&self.sort, &self.order)?;
        controls.page_index = page_index(self.page)?;

        Ok(controls)
    }
}

/// Validate a sort column and order
pub fn parse_sort(field: &str, order: &str) -> Result<SortState, Error> {
    let field = field.trim();

    if !field.is_empty() && !SORTABLE_COLUMNS.contains(&field) {
        return Err(Error::InvalidSort(format!(
            "unknown column '{field}' (expected one of: {})",
            SORTABLE_COLUMNS.join(", ")
        )));
    }

    let direction = SortDirection::parse(order).ok_or_else(|| {
        Error::InvalidSort(format!("unknown order '{order}' (expected asc or desc)"))
    })?;

    Ok(SortState::new(field, direction))
}

/// Convert a 1-indexed page number into a page index
pub fn page_index(page: u32) -> Result<u32, Error> {
    page.checked_sub(1)
        .ok_or_else(|| Error::InvalidPage(page.to_string()))
}

/// Options for a one-shot search
#[derive(Debug, clap::Args, Clone)]
pub struct SearchOptions {
    #[clap(flatten)]
    pub filters: FilterArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for printing the request URL
#[derive(Debug, clap::Args, Clone)]
pub struct UrlOptions {
    #[clap(flatten)]
    pub filters: FilterArgs,
}

/// Run one search through a session that only sees the start-up trigger
pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    let definitions = default_facets();
    let controls = options.filters.to_controls(&definitions)?;
    let page_index = controls.page_index;

    if global.verbose {
        eprintln!("GET {}", controls.request_params().to_url());
    }

    let transport = GithubTransport::new(&GithubConfig::from_env())?;
    let (session, _receiver) = SearchSession::new(transport, controls);
    let (handle, task) = session.spawn();
    drop(handle);

    let state = task.await.context("Search session stopped unexpectedly")?;

    if options.json {
        println!("{}", format_view_json(&state, page_index)?);
    } else {
        println!("{}", format_view_text(&state, page_index));
    }

    Ok(())
}

/// Print the request URL without contacting GitHub
pub fn run_url(options: UrlOptions) -> Result<()> {
    let controls = options.filters.to_controls(&default_facets())?;
    println!("{}", controls.request_params().to_url());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuefacet_core::facets::FacetInputError;

    fn url_for(args: &FilterArgs) -> String {
        args.to_controls(&default_facets())
            .unwrap()
            .request_params()
            .to_url()
    }

    fn args() -> FilterArgs {
        FilterArgs {
            page: 1,
            ..FilterArgs::default()
        }
    }

    #[test]
    fn test_default_args() {
        assert_eq!(
            url_for(&args()),
            "https://api.github.com/search/issues?q=+repo:angular/material2&sort=&order=&page=1"
        );
    }

    #[test]
    fn test_reference_search() {
        let args = FilterArgs {
            keyword: Some("bug".to_string()),
            state: Some("open".to_string()),
            sort: "created_at".to_string(),
            order: "desc".to_string(),
            ..args()
        };

        assert_eq!(
            url_for(&args),
            "https://api.github.com/search/issues?q=bug+repo:angular/material2+state:open&sort=created_at&order=desc&page=1"
        );
    }

    #[test]
    fn test_all_filters() {
        let args = FilterArgs {
            created: Some("2018-01-01".to_string()),
            updated: Some("2018-06-30T12:00:00Z".to_string()),
            title: Some("datepicker".to_string()),
            number: Some("#42".to_string()),
            page: 3,
            ..args()
        };

        assert_eq!(
            url_for(&args),
            "https://api.github.com/search/issues?q=+repo:angular/material2+created:2018-01-01+updated:2018-06-30+title:datepicker+number:42&sort=&order=&page=3"
        );
    }

    #[test]
    fn test_html_url_filter() {
        let args = FilterArgs {
            html_url: Some("https://github.com/angular/material2/issues/9982".to_string()),
            state: Some("closed".to_string()),
            ..args()
        };

        assert_eq!(
            url_for(&args),
            "https://api.github.com/search/issues?q=+repo:angular/material2+html_url:https%3A%2F%2Fgithub.com%2Fangular%2Fmaterial2%2Fissues%2F9982+state:closed&sort=&order=&page=1"
        );
    }

    #[test]
    fn test_invalid_state() {
        let args = FilterArgs {
            state: Some("merged".to_string()),
            ..args()
        };

        let err = args.to_controls(&default_facets()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFacet(FacetInputError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_invalid_date() {
        let args = FilterArgs {
            created: Some("01/02/2018".to_string()),
            ..args()
        };

        let err = args.to_controls(&default_facets()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFacet(FacetInputError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_parse_sort() {
        let sort = parse_sort("number", "ASC").unwrap();
        assert_eq!(sort.active, "number");
        assert_eq!(sort.direction, SortDirection::Asc);

        assert!(matches!(
            parse_sort("comments", "desc"),
            Err(Error::InvalidSort(_))
        ));
        assert!(matches!(
            parse_sort("title", "sideways"),
            Err(Error::InvalidSort(_))
        ));
    }

    #[test]
    fn test_page_index() {
        assert_eq!(page_index(1).unwrap(), 0);
        assert_eq!(page_index(10).unwrap(), 9);
        assert_eq!(page_index(0).unwrap_err(), Error::InvalidPage("0".to_string()));
    }
}
