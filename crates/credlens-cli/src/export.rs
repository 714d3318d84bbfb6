//! # Export Subcommand
//!
//! Writes credentials to disk through [`DirectorySink`]:
//!
//! - with an ID: the single credential as `vc-<execution_id>.json`;
//! - without: every visible credential (after `--search`) as
//!   `credentials-export-<epoch_millis>.json`.
//!
//! Only loaded credentials are exported; raise `--pages` to include more.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;

use crate::sink::DirectorySink;
use crate::{load_pages, locate, FilterArgs, Session};

/// Arguments for the `credlens export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Credential `vc_id` or `execution_id`. Omit to export the filtered set.
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Directory to write into.
    #[arg(long, short, default_value = ".")]
    pub out: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Execute the export subcommand.
pub async fn run_export(args: &ExportArgs, session: &Session) -> Result<u8> {
    let browser = session.browser(Some(Arc::new(DirectorySink::new(&args.out))))?;

    let filename = match &args.id {
        Some(id) => {
            if !locate(&browser, &args.filters, id).await? {
                println!("NOT FOUND: credential {id}");
                return Ok(1);
            }
            let Some(record) = browser.view().inspected().cloned() else {
                bail!("credential {id} was located but not opened");
            };
            browser.export_one(&record)?
        }
        None => {
            load_pages(&browser, &args.filters).await?;
            if !browser.can_export() {
                println!("NOTHING TO EXPORT: no credentials match the filters");
                return Ok(1);
            }
            browser.export_visible()?
        }
    };

    println!("OK: wrote {}", args.out.join(filename).display());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{filter_args, serve, session};
    use credlens_core::CredentialRecord;

    #[tokio::test]
    async fn exports_single_credential_by_execution_id() {
        let server = serve(6, 3).await;
        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            id: Some("exec-5".into()),
            out: dir.path().to_path_buf(),
            filters: filter_args(3, ""),
        };

        assert_eq!(run_export(&args, &session(&server, 3)).await.unwrap(), 0);

        let content = std::fs::read_to_string(dir.path().join("vc-exec-5.json")).unwrap();
        let record: CredentialRecord = serde_json::from_str(&content).unwrap();
        assert_eq!(record.vc_id, "vc-5");
        assert!(content.starts_with("{\n  \"vc_id\""));
    }

    #[tokio::test]
    async fn exports_filtered_loaded_set() {
        let server = serve(6, 3).await;
        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            id: None,
            out: dir.path().to_path_buf(),
            filters: filter_args(2, "exec-"),
        };

        assert_eq!(run_export(&args, &session(&server, 3)).await.unwrap(), 0);

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("credentials-export-") && name.ends_with(".json"));

        let records: Vec<CredentialRecord> =
            serde_json::from_str(&std::fs::read_to_string(&entries[0]).unwrap()).unwrap();
        assert_eq!(records.len(), 6);
    }

    #[tokio::test]
    async fn empty_filtered_set_writes_nothing() {
        let server = serve(3, 3).await;
        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            id: None,
            out: dir.path().to_path_buf(),
            filters: filter_args(1, "no-such-run"),
        };

        assert_eq!(run_export(&args, &session(&server, 3)).await.unwrap(), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn missing_id_reports_not_found() {
        let server = serve(3, 3).await;
        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            id: Some("exec-77".into()),
            out: dir.path().to_path_buf(),
            filters: filter_args(1, ""),
        };
        assert_eq!(run_export(&args, &session(&server, 3)).await.unwrap(), 1);
    }
}
