//! Interactive browsing session
//!
//! Each input line is one UI action: a sort header click, a paginator move or
//! a facet edit. [`BrowseState`] holds what those controls would show and turns
//! an action into the trigger the session expects.

use crate::config::GithubConfig;
use crate::prelude::{eprintln, println, *};
use crate::render::format_view_text;
use crate::search::{page_index, parse_sort};
use crate::session::SearchSession;
use crate::transport::GithubTransport;
use colored::Colorize;
use issuefacet_core::controls::{SearchControls, SortState, Trigger};
use issuefacet_core::facets::{
    default_facets, find_facet, parse_selection, FacetDefinition, FacetInputError, SelectedFacets,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands:
  sort <column> [asc|desc]   sort by created_at, updated_at, state, number or title
  page <n>                   go to page n (1-indexed)
  next | prev                move one page forward or back
  facet <name> <value>       select a facet (state, created_at, updated_at, keyword, html_url, title, number)
  clear [<name>]             remove one facet, or every facet but the repository
  show                       print the current results again
  help                       print this help
  quit                       leave";

#[derive(Debug, clap::Args, Clone)]
pub struct BrowseOptions {}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Sort(SortState),
    Page(u32),
    Next,
    Prev,
    Facet { name: String, value: String },
    Clear(Option<String>),
    Show,
    Help,
    Quit,
}

/// Parse one input line into a command
pub fn parse_command(line: &str) -> Result<BrowseCommand, Error> {
    let mut parts = line.trim().splitn(3, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_ascii_lowercase();
    let first = parts.next().map(str::trim).filter(|s| !s.is_empty());
    let rest = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match (command.as_str(), first, rest) {
        ("sort", Some(field), order) => {
            // A first click on a sort header sorts ascending.
            Ok(BrowseCommand::Sort(parse_sort(field, order.unwrap_or("asc"))?))
        }
        ("sort", None, _) => Err(Error::InvalidCommand("sort needs a column".to_string())),
        ("page", Some(page), None) => page
            .parse::<u32>()
            .map(BrowseCommand::Page)
            .map_err(|_| Error::InvalidPage(page.to_string())),
        ("page", _, _) => Err(Error::InvalidCommand("page needs a number".to_string())),
        ("next", None, None) => Ok(BrowseCommand::Next),
        ("prev", None, None) => Ok(BrowseCommand::Prev),
        ("facet", Some(name), Some(value)) => Ok(BrowseCommand::Facet {
            name: name.to_string(),
            value: value.to_string(),
        }),
        ("facet", _, _) => Err(Error::InvalidCommand(
            "facet needs a name and a value".to_string(),
        )),
        ("clear", name, None) => Ok(BrowseCommand::Clear(name.map(str::to_string))),
        ("show", None, None) => Ok(BrowseCommand::Show),
        ("help", _, _) => Ok(BrowseCommand::Help),
        ("quit" | "exit", None, None) => Ok(BrowseCommand::Quit),
        _ => Err(Error::InvalidCommand(line.trim().to_string())),
    }
}

/// What the sort header, paginator and facet input currently show
#[derive(Debug, Clone)]
pub struct BrowseState {
    definitions: Vec<FacetDefinition>,
    pub facets: SelectedFacets,
    pub sort: SortState,
    pub page_index: u32,
}

impl BrowseState {
    pub fn new(definitions: Vec<FacetDefinition>) -> Self {
        let facets = SelectedFacets::from_definitions(&definitions);

        Self {
            definitions,
            facets,
            sort: SortState::default(),
            page_index: 0,
        }
    }

    /// Controls matching this state, for the session to start from
    pub fn controls(&self) -> SearchControls {
        SearchControls {
            sort: self.sort.clone(),
            page_index: self.page_index,
            facets: self.facets.clone(),
        }
    }

    /// Apply a control action and return the trigger it fires, if any.
    ///
    /// `total_pages` is the page count of the last successful search, `None`
    /// while nothing has loaded yet.
    pub fn apply(
        &mut self,
        command: BrowseCommand,
        total_pages: Option<u64>,
    ) -> Result<Option<Trigger>, Error> {
        match command {
            BrowseCommand::Sort(sort) => {
                self.sort = sort.clone();
                self.page_index = 0;
                Ok(Some(Trigger::SortChanged(sort)))
            }
            BrowseCommand::Page(page) => {
                self.page_index = page_index(page)?;
                Ok(Some(self.page_trigger()))
            }
            BrowseCommand::Next => {
                let last_page = || Error::InvalidCommand("already on the last page".to_string());

                if total_pages.is_some_and(|total| u64::from(self.page_index) + 1 >= total) {
                    return Err(last_page());
                }
                self.page_index = self.page_index.checked_add(1).ok_or_else(last_page)?;
                Ok(Some(self.page_trigger()))
            }
            BrowseCommand::Prev => {
                self.page_index = self.page_index.checked_sub(1).ok_or_else(|| {
                    Error::InvalidCommand("already on the first page".to_string())
                })?;
                Ok(Some(self.page_trigger()))
            }
            BrowseCommand::Facet { name, value } => {
                let selected = parse_selection(&self.definitions, &name, &value)?;
                self.facets.select(&name, selected);
                Ok(Some(Trigger::FacetsChanged(self.facets.clone())))
            }
            BrowseCommand::Clear(None) => {
                self.facets.clear(&self.definitions);
                Ok(Some(Trigger::FacetsChanged(self.facets.clone())))
            }
            BrowseCommand::Clear(Some(name)) => {
                if find_facet(&self.definitions, &name).is_some_and(|facet| facet.readonly) {
                    return Err(FacetInputError::ReadOnly(name).into());
                }
                if self.facets.remove(&name) {
                    Ok(Some(Trigger::FacetsChanged(self.facets.clone())))
                } else {
                    Ok(None)
                }
            }
            BrowseCommand::Show | BrowseCommand::Help | BrowseCommand::Quit => Ok(None),
        }
    }

    fn page_trigger(&self) -> Trigger {
        Trigger::PageChanged {
            page_index: self.page_index,
        }
    }
}

pub async fn run(_options: BrowseOptions, global: crate::Global) -> Result<()> {
    let mut browse = BrowseState::new(default_facets());

    let transport = GithubTransport::new(&GithubConfig::from_env())?;
    let (session, mut receiver) = SearchSession::new(transport, browse.controls());
    let (handle, task) = session.spawn();

    println!("{}", HELP.bright_black());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = receiver.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = receiver.borrow_and_update().clone();
                println!("{}", format_view_text(&state, browse.page_index));
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    // EOF: let the latest request settle and show its outcome.
                    drop(handle);
                    let state = task.await.context("Search session stopped unexpectedly")?;
                    println!("{}", format_view_text(&state, browse.page_index));
                    return Ok(());
                };

                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if global.verbose {
                    eprintln!("Received: {trimmed}");
                }

                let command = match parse_command(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e.to_string().red());
                        continue;
                    }
                };

                match command {
                    BrowseCommand::Quit => break,
                    BrowseCommand::Help => println!("{HELP}"),
                    BrowseCommand::Show => {
                        let state = receiver.borrow().clone();
                        println!("{}", format_view_text(&state, browse.page_index));
                    }
                    command => {
                        let total_pages = receiver.borrow().known_total_pages();
                        match browse.apply(command, total_pages) {
                            Ok(Some(trigger)) => {
                                if !handle.send(trigger).await {
                                    break;
                                }
                            }
                            Ok(None) => {}
                            Err(e) => eprintln!("{}", e.to_string().red()),
                        }
                    }
                }
            }
        }
    }

    task.abort();
    Ok(())
}
