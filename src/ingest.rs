//! Image ingestion: single images, batches and survey directories
//!
//! Each image is independent. A container that cannot be parsed fails only
//! that image; the batch carries on and reports it.

use std::fs;
use std::path::{Path, PathBuf};
use rayon::prelude::*;
use tracing::{info, warn};
use crate::error::{Error, Result};
use crate::geo;
use crate::record::{self, FeatureRecord};

/// Extensions accepted for ingestion, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// An image that could not be ingested
#[derive(Debug)]
pub struct IngestFailure {
    pub filename: String,
    pub error: Error,
}

/// Outcome of ingesting a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Records in input order
    pub records: Vec<FeatureRecord>,
    pub failures: Vec<IngestFailure>,
}

/// Extracts geolocation from one image and assembles its record
pub fn ingest(filename: impl Into<String>, raw_bytes: Vec<u8>) -> Result<FeatureRecord> {
    let geolocation = geo::extract(&raw_bytes)?;
    Ok(record::assemble(filename, geolocation, raw_bytes))
}

/// Ingests every `(filename, bytes)` pair in parallel
pub fn ingest_batch(items: Vec<(String, Vec<u8>)>) -> BatchReport {
    let outcomes = items
        .into_par_iter()
        .map(|(filename, bytes)| ingest_item(filename, bytes))
        .collect();

    into_report(outcomes)
}

fn ingest_item(filename: String, bytes: Vec<u8>) -> std::result::Result<FeatureRecord, IngestFailure> {
    match geo::extract(&bytes) {
        Ok(geolocation) => Ok(record::assemble(filename, geolocation, bytes)),
        Err(error) => Err(IngestFailure { filename, error }),
    }
}

/// Splits ordered outcomes into a report, keeping their relative order
fn into_report(outcomes: Vec<std::result::Result<FeatureRecord, IngestFailure>>) -> BatchReport {
    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(record) => report.records.push(record),
            Err(failure) => {
                warn!("skipping {}: {}", failure.filename, failure.error);
                report.failures.push(failure);
            }
        }
    }

    info!(
        "ingested {} image(s), {} failed",
        report.records.len(),
        report.failures.len()
    );
    report
}

/// Returns whether the filename has an accepted image extension
pub fn is_allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| {
            ALLOWED_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Reduces a client-supplied filename to a safe single path component
///
/// Directory parts are dropped, whitespace becomes `_`, anything outside
/// `[A-Za-z0-9._-]` becomes `_`, and leading dots are stripped. Returns
/// `None` if nothing usable remains.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let base = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Lists accepted images under `root`, recursively, in path order
///
/// Symlinked directories are not descended into. Only an unreadable `root`
/// is an error; an unreadable subdirectory is logged and skipped.
pub fn scan_directory(root: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>> {
    let entries = sorted_entries(root)?;

    let mut found = Vec::new();
    collect_images(entries, &mut found);

    if let Some(limit) = limit {
        found.truncate(limit);
    }
    Ok(found)
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<(PathBuf, fs::FileType)>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?))))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

fn collect_images(entries: Vec<(PathBuf, fs::FileType)>, found: &mut Vec<PathBuf>) {
    for (path, file_type) in entries {
        if file_type.is_dir() {
            match sorted_entries(&path) {
                Ok(children) => collect_images(children, found),
                Err(e) => warn!("skipping unreadable directory {}: {}", path.display(), e),
            }
            continue;
        }

        // Symlinks to files count; symlinks to directories do not.
        let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
        let allowed = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_allowed_file);

        if is_file && allowed {
            found.push(path);
        }
    }
}

/// Scans `root` and ingests what it finds
///
/// Fails only if `root` itself cannot be listed; unreadable files become
/// failures in the report, in scan order.
pub fn ingest_directory(root: &Path, limit: Option<usize>) -> Result<BatchReport> {
    let paths = scan_directory(root, limit)?;
    info!("found {} image(s) under {}", paths.len(), root.display());

    let outcomes = paths
        .into_par_iter()
        .map(|path| {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            match fs::read(&path) {
                Ok(bytes) => ingest_item(filename, bytes),
                Err(e) => Err(IngestFailure { filename, error: e.into() }),
            }
        })
        .collect();

    Ok(into_report(outcomes))
}
