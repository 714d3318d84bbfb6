//! # List Subcommand
//!
//! Pages through credentials matching the filters and prints one row per
//! visible credential, followed by a pagination footer.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::DateTime;
use clap::{Args, ValueEnum};

use credlens_core::display::EMPTY_CELL;
use credlens_state::{CredentialRow, PageState};

use crate::{load_pages, FilterArgs, Session};

/// Output format for `credlens list`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Arguments for the `credlens list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Execute the list subcommand.
pub async fn run_list(args: &ListArgs, session: &Session) -> Result<u8> {
    let browser = session.browser(None)?;
    let state = load_pages(&browser, &args.filters).await?;
    let rows = browser.rows();

    match args.format {
        OutputFormat::Table => print!("{}", render_table(&rows, &state)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(0)
}

const HEADERS: [&str; 7] = [
    "STATUS", "EXECUTION", "WORKFLOW", "REASONER", "DURATION", "VERIFIED", "CREATED",
];

/// Render rows as an aligned table with a pagination footer.
pub fn render_table(rows: &[CredentialRow], state: &PageState) -> String {
    let cells: Vec<[String; 7]> = rows.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }

    if rows.is_empty() {
        out.push_str("no credentials found\n");
    }
    let _ = writeln!(
        out,
        "\n{} shown, {} loaded, {} total",
        rows.len(),
        state.items.len(),
        state.total
    );
    if state.has_more {
        out.push_str("more results available: raise --pages to load them\n");
    }
    if let Some(err) = &state.error {
        let _ = writeln!(out, "warning: {err}");
    }
    out
}

fn row_cells(row: &CredentialRow) -> [String; 7] {
    let status = if row.animated {
        format!("{} ●", row.status)
    } else {
        row.status.to_string()
    };
    [
        status,
        row.execution_id.clone(),
        row.workflow_id.clone(),
        row.reasoner.clone(),
        row.duration.clone(),
        if row.verified { "yes" } else { "no" }.to_string(),
        format_created_at(&row.created_at),
    ]
}

/// `YYYY-MM-DD HH:MM:SS UTC`, or the raw value if it is not RFC 3339.
pub fn format_created_at(raw: &str) -> String {
    if raw.is_empty() {
        return EMPTY_CELL.to_string();
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{filter_args, serve, session};

    #[test]
    fn created_at_is_normalized_to_utc() {
        assert_eq!(
            format_created_at("2026-01-15T12:30:00+02:00"),
            "2026-01-15 10:30:00 UTC"
        );
        assert_eq!(format_created_at("yesterday"), "yesterday");
        assert_eq!(format_created_at(""), EMPTY_CELL);
    }

    #[tokio::test]
    async fn table_lists_visible_rows_and_footer() {
        let server = serve(5, 3).await;
        let browser = session(&server, 3).browser(None).unwrap();
        let state = load_pages(&browser, &filter_args(1, "")).await.unwrap();

        let table = render_table(&browser.rows(), &state);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("STATUS"));
        assert!(lines[1].starts_with("succeeded"));
        assert!(lines[1].contains("exec-0"));
        assert!(lines[1].contains("2.5s"));
        assert!(lines[2].starts_with("running ●"));
        assert!(table.contains("3 shown, 3 loaded, 5 total"));
        assert!(table.contains("more results available"));
    }

    #[tokio::test]
    async fn search_narrows_rows_but_not_loaded_count() {
        let server = serve(5, 5).await;
        let browser = session(&server, 5).browser(None).unwrap();
        let state = load_pages(&browser, &filter_args(1, "EXEC-4")).await.unwrap();

        let table = render_table(&browser.rows(), &state);
        assert!(table.contains("1 shown, 5 loaded, 5 total"));
        assert!(!table.contains("more results available"));
    }

    #[test]
    fn empty_table_says_so() {
        let table = render_table(&[], &PageState::default());
        assert!(table.contains("no credentials found"));
    }

    #[tokio::test]
    async fn run_list_succeeds() {
        let server = serve(2, 50).await;
        let args = ListArgs {
            filters: filter_args(1, ""),
            format: OutputFormat::Json,
        };
        assert_eq!(run_list(&args, &session(&server, 50)).await.unwrap(), 0);
    }
}
