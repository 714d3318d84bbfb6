//! # Show Subcommand
//!
//! Finds one credential by `vc_id` or `execution_id`, opens it in the
//! detail view and prints it. `--raw` expands the raw JSON document.

use std::fmt::Write as _;

use anyhow::Result;
use clap::Args;

use credlens_core::display::EMPTY_CELL;
use credlens_core::{format_duration, workflow_route, StatusTable};
use credlens_state::ViewState;

use crate::list::format_created_at;
use crate::{locate, FilterArgs, Session};

/// Arguments for the `credlens show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Credential `vc_id` or `execution_id`.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Include the raw credential document.
    #[arg(long)]
    pub raw: bool,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Execute the show subcommand.
pub async fn run_show(args: &ShowArgs, session: &Session) -> Result<u8> {
    let browser = session.browser(None)?;
    if !locate(&browser, &args.filters, &args.id).await? {
        println!("NOT FOUND: credential {}", args.id);
        return Ok(1);
    }
    if args.raw {
        browser.toggle_raw();
    }
    print!("{}", render_detail(&browser.view(), browser.status_table())?);
    Ok(0)
}

/// Render the inspected credential. Empty when listing.
pub fn render_detail(view: &ViewState, statuses: &StatusTable) -> Result<String> {
    let Some(record) = view.inspected() else {
        return Ok(String::new());
    };
    let status = statuses.normalize(&record.status);
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| EMPTY_CELL.to_string());

    let fields = [
        ("VC ID", record.vc_id.clone()),
        ("Execution", record.execution_id.clone()),
        (
            "Workflow",
            format!("{} ({})", record.workflow_id, workflow_route(&record.workflow_id)),
        ),
        ("Session", opt(&record.session_id)),
        ("Reasoner", opt(&record.reasoner_name)),
        ("Agent", opt(&record.agent_name)),
        ("Status", format!("{status} [{}] (raw: {})", status.badge(), record.status)),
        ("Duration", format_duration(record.duration_ms)),
        ("Verified", if record.verified { "yes" } else { "no" }.to_string()),
        ("Created", format_created_at(&record.created_at)),
        ("Issuer DID", opt(&record.issuer_did)),
        ("Target DID", opt(&record.target_did)),
        ("Caller DID", opt(&record.caller_did)),
    ];

    let mut out = String::new();
    for (label, value) in fields {
        let _ = writeln!(out, "{label:<11} {value}");
    }
    if view.is_raw_expanded() {
        let _ = writeln!(out, "\n{}", serde_json::to_string_pretty(record)?);
    }
    Ok(out)
}
