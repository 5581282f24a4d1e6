//! Filesystem document source.
//!
//! Walks `[source].root` and parses every file that matches the include
//! globs (and none of the excludes) as JSON. A file holding one object is
//! one document; a file holding a top-level array contributes one document
//! per element. Files that cannot be read or parsed are logged and skipped.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde_json::Value;
use std::path::Path;
use walkdir::WalkDir;

use beer_catalog_core::models::RawDocument;

use crate::config::Config;

pub fn scan_documents(config: &Config) -> Result<Vec<RawDocument>> {
    let source = &config.source;
    let root = &source.root;
    if !root.is_dir() {
        bail!("Source root is not a directory: {}", root.display());
    }

    let include_set = build_globset(&source.include_globs)?;
    let exclude_set = build_globset(&source.exclude_globs)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(source.follow_symlinks) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }
        files.push((rel_str, path.to_path_buf()));
    }

    // Sort for deterministic ordering
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut docs = Vec::with_capacity(files.len());
    let mut skipped = 0usize;
    for (rel_str, path) in &files {
        match read_json(path) {
            Ok(Value::Array(items)) => {
                for (i, item) in items.into_iter().enumerate() {
                    docs.push(RawDocument::new(format!("{}#{}", rel_str, i), item));
                }
            }
            Ok(body) => docs.push(RawDocument::new(rel_str.clone(), body)),
            Err(e) => {
                skipped += 1;
                tracing::warn!(file = %rel_str, error = %e, "skipping unreadable document");
            }
        }
    }

    tracing::info!(
        root = %root.display(),
        files = files.len(),
        documents = docs.len(),
        skipped,
        "scanned document source"
    );

    Ok(docs)
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
