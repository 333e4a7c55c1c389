//! Issue drafts for the tracker client
//!
//! The tool does not talk to an issue tracker. When posting is requested,
//! each per-source failure becomes an `IssueDraft` written as one JSON line;
//! an external client turns those into tracker issues.
//!
//! Draft ids are stable: the same filter failing on the same source for the
//! same reason always produces the same id, so the client can deduplicate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::batch::{FailureKind, SourceFailure};

/// Tool name used in titles and default labels.
pub const TOOL_NAME: &str = "filter_inventory";

/// One issue to be filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDraft {
    pub id: String,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub source: String,
    pub filter: String,
    pub kind: FailureKind,
    pub created_at: DateTime<Utc>,
}

impl IssueDraft {
    /// Builds the draft for one failure.
    pub fn from_failure(failure: &SourceFailure, labels: &[String], created_at: DateTime<Utc>) -> Self {
        Self {
            id: draft_id(failure),
            title: format!(
                "{}: Filter {} failed on {}",
                TOOL_NAME, failure.filter, failure.source
            ),
            body: format!(
                "**Filter:** `{}`\n**Source:** `{}`\n**Error kind:** `{}`\n\n{}\n",
                failure.filter,
                failure.source,
                failure.kind.as_str(),
                failure.message
            ),
            labels: labels.to_vec(),
            source: failure.source.clone(),
            filter: failure.filter.clone(),
            kind: failure.kind,
            created_at,
        }
    }
}

/// First 16 hex digits of SHA-256 over `filter|source|kind`.
fn draft_id(failure: &SourceFailure) -> String {
    let digest = Sha256::digest(format!(
        "{}|{}|{}",
        failure.filter,
        failure.source,
        failure.kind.as_str()
    ));
    let hex = format!("{:x}", digest);
    hex[..16].to_string()
}

/// Builds drafts for every failure, stamped with the same time.
pub fn drafts_for(failures: &[SourceFailure], labels: &[String]) -> Vec<IssueDraft> {
    let now = Utc::now();
    failures
        .iter()
        .map(|f| IssueDraft::from_failure(f, labels, now))
        .collect()
}

/// Writes drafts as JSON lines.
pub fn write_drafts<W: Write>(drafts: &[IssueDraft], mut writer: W) -> io::Result<()> {
    for draft in drafts {
        serde_json::to_writer(&mut writer, draft)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Writes drafts to a file, or to stderr when no path is given.
pub fn emit_drafts(drafts: &[IssueDraft], path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => write_drafts(drafts, BufWriter::new(File::create(path)?)),
        None => write_drafts(drafts, io::stderr().lock()),
    }
}
