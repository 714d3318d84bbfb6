//! Display helpers shared by list and detail renderers.

/// Placeholder for missing values in tables.
pub const EMPTY_CELL: &str = "—";

/// Human-readable execution duration.
///
/// `<1s` as milliseconds, `<1m` as seconds with one decimal, otherwise
/// minutes with one decimal. Absent or zero durations render as
/// [`EMPTY_CELL`].
pub fn format_duration(duration_ms: Option<u64>) -> String {
    match duration_ms {
        None | Some(0) => EMPTY_CELL.to_string(),
        Some(ms) if ms < 1_000 => format!("{ms}ms"),
        Some(ms) if ms < 60_000 => format!("{:.1}s", ms as f64 / 1_000.0),
        Some(ms) => format!("{:.1}m", ms as f64 / 60_000.0),
    }
}

/// Navigation target for a workflow reference.
pub fn workflow_route(workflow_id: &str) -> String {
    format!("/workflows/{workflow_id}")
}
