//! Terminal rendering of the view state

use crate::prelude::*;
use chrono::DateTime;
use colored::Colorize;
use issuefacet_core::facets::REPOSITORY;
use issuefacet_core::github::IssueRecord;
use issuefacet_core::view::ViewState;
use serde::Serialize;

pub const RATE_LIMIT_MESSAGE: &str =
    "GitHub's API rate limit has been reached. It will be reset in one minute.";

/// Format a GitHub timestamp as a calendar date, keeping unparseable input as is
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Render the rows as a table with the issue columns
pub fn format_rows_table(rows: &[IssueRecord]) -> String {
    let mut table = new_table();
    table.set_titles(prettytable::row!["Created", "Updated", "State", "#", "Title"]);

    for issue in rows {
        table.add_row(prettytable::row![
            format_date(&issue.created_at),
            format_date(&issue.updated_at),
            issue.state.as_str(),
            issue.number,
            &issue.title
        ]);
    }

    table.to_string()
}

/// Render the whole view: header, status or table, and page footer.
///
/// `page_index` is the zero-based page the view was requested for.
pub fn format_view_text(state: &ViewState, page_index: u32) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{}\n",
        format!("{} ISSUES", REPOSITORY.to_uppercase())
            .bright_cyan()
            .bold()
    ));

    if state.is_loading() {
        result.push_str(&format!("{}\n", "Loading results...".yellow()));
        return result;
    }

    if state.is_rate_limited() {
        result.push_str(&format!("{}\n", RATE_LIMIT_MESSAGE.red().bold()));
        return result;
    }

    if state.rows().is_empty() {
        result.push_str(&format!("{}\n", "No issues found.".yellow()));
    } else {
        result.push_str(&format_rows_table(state.rows()));
    }

    result.push_str(&format!(
        "\n{} {} {} {} ({} {})\n",
        "Page".bright_white(),
        (u64::from(page_index) + 1).to_string().bright_cyan().bold(),
        "of".bright_white(),
        state.total_pages().max(1).to_string().bright_cyan().bold(),
        state.result_count().to_string().bright_cyan().bold(),
        "issues".bright_white()
    ));

    result
}

#[derive(Serialize)]
struct ViewJson<'a> {
    page: u64,
    total_pages: u64,
    #[serde(flatten)]
    state: &'a ViewState,
}

/// Render the view as pretty JSON
pub fn format_view_json(state: &ViewState, page_index: u32) -> Result<String> {
    let output = ViewJson {
        page: u64::from(page_index) + 1,
        total_pages: state.total_pages(),
        state,
    };

    serde_json::to_string_pretty(&output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}
