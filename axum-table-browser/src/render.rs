//! HTML fragment rendering
//!
//! Turns a [`PageResult`] into the results summary, the data table and the
//! pagination controls. Every piece of store data is HTML-escaped.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_safe};
use regex::{Regex, RegexBuilder};

use crate::schema::PageResult;

/// How many numbered page buttons to show on each side of the current page
const PAGE_WINDOW: u64 = 2;

/// Render the complete fragment: summary, table, pagination
pub fn render_fragment(result: &PageResult) -> String {
    let mut output = render_summary(result);
    output.push_str(&render_table(result));
    output.push_str(&render_pagination(result.page, result.total_pages()));
    output
}

/// `Showing {start}-{end} of {total} results[ for "{term}"]`
pub fn render_summary(result: &PageResult) -> String {
    let mut summary = format!(
        "<div class=\"results-info\">Showing {}-{} of {} results",
        result.first_row_number(),
        result.last_row_number(),
        result.total_count
    );
    if let Some(term) = &result.term {
        let _ = write!(summary, " for \"{}\"", encode_safe(term));
    }
    summary.push_str("</div>");
    summary
}

/// Render rows as a table whose header comes from the first row
///
/// Returns an empty string when there are no rows.
pub fn render_table(result: &PageResult) -> String {
    let Some(first_row) = result.rows.first() else {
        return String::new();
    };
    let highlighter = result.term.as_deref().and_then(Highlighter::new);

    let mut output = String::from("<table class=\"browser-table striped\"><thead><tr>");
    for column in first_row.columns() {
        let _ = write!(output, "<th>{}</th>", encode_safe(column));
    }
    output.push_str("</tr></thead><tbody>");

    for row in &result.rows {
        output.push_str("<tr>");
        for value in row.values() {
            let cell = match &highlighter {
                Some(highlighter) => highlighter.highlight(value),
                None => encode_safe(value).into_owned(),
            };
            let _ = write!(output, "<td>{cell}</td>");
        }
        output.push_str("</tr>");
    }

    output.push_str("</tbody></table>");
    output
}

/// Render previous/numbered/next page buttons
pub fn render_pagination(page: u64, total_pages: u64) -> String {
    let mut pagination = String::from("<div class=\"pagination\">");

    if page > 1 {
        let _ = write!(
            pagination,
            "<button class=\"page-button\" data-page=\"{}\">&laquo; Previous</button>",
            page - 1
        );
    }

    let start_page = page.saturating_sub(PAGE_WINDOW).max(1);
    let end_page = page.saturating_add(PAGE_WINDOW).min(total_pages);
    for number in start_page..=end_page {
        let active_class = if number == page { " active" } else { "" };
        let _ = write!(
            pagination,
            "<button class=\"page-button{active_class}\" data-page=\"{number}\">{number}</button>"
        );
    }

    if page < total_pages {
        let _ = write!(
            pagination,
            "<button class=\"page-button\" data-page=\"{}\">Next &raquo;</button>",
            page + 1
        );
    }

    pagination.push_str("</div>");
    pagination
}

/// Render a `<option>` list of table names for the table picker
pub fn render_table_options(tables: &[String]) -> String {
    let mut options = String::new();
    for table in tables {
        let _ = write!(
            options,
            "<option value=\"{}\">{}</option>",
            encode_double_quoted_attribute(table),
            encode_safe(table)
        );
    }
    options
}

/// Wraps every case-insensitive occurrence of a term in `<mark>`
///
/// Matches are found on the raw value and each segment is escaped on its
/// own, so escaping never shifts or splits a match.
pub struct Highlighter {
    pattern: Regex,
}

impl Highlighter {
    /// Returns `None` for an empty term
    pub fn new(term: &str) -> Option<Self> {
        if term.is_empty() {
            return None;
        }
        RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .ok()
            .map(|pattern| Self { pattern })
    }

    pub fn highlight(&self, value: &str) -> String {
        let mut output = String::with_capacity(value.len());
        let mut last_end = 0;

        for found in self.pattern.find_iter(value) {
            output.push_str(&encode_safe(&value[last_end..found.start()]));
            let _ = write!(output, "<mark>{}</mark>", encode_safe(found.as_str()));
            last_end = found.end();
        }
        output.push_str(&encode_safe(&value[last_end..]));

        output
    }
}
