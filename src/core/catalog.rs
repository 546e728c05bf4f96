// src/core/catalog.rs

//! Loads the dork catalog from disk.
//!
//! Two formats are accepted: the exploit-db GHDB XML export, and a JSON
//! array of entries. Entries with an empty query are dropped here so that
//! every later stage can assume a non-empty query.

use crate::core::error::CatalogError;
use crate::core::models::CatalogEntry;
use crate::logging::get_data_dir;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name looked up in the data directory when no explicit catalog exists.
pub const DEFAULT_CATALOG_FILE: &str = "ghdb.xml";

// Raw shape of the GHDB export. Every child is optional; unknown children
// (author, textualDescription, ...) are ignored.
#[derive(Debug, Deserialize)]
struct GhdbDocument {
    #[serde(rename = "entry", default)]
    entries: Vec<GhdbEntry>,
}

#[derive(Debug, Deserialize)]
struct GhdbEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    query: Option<String>,
    #[serde(rename = "shortDescription", default)]
    short_description: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl From<GhdbEntry> for CatalogEntry {
    fn from(raw: GhdbEntry) -> Self {
        CatalogEntry {
            id: raw.id.as_deref().and_then(|id| id.trim().parse().ok()).unwrap_or(0),
            category: raw.category.unwrap_or_default().trim().to_string(),
            query: raw.query.unwrap_or_default().trim().to_string(),
            short_description: raw.short_description.unwrap_or_default().trim().to_string(),
            date: raw.date.unwrap_or_default().trim().to_string(),
        }
    }
}

/// Picks the catalog file to load.
///
/// The explicit path wins when it exists; otherwise `ghdb.xml` in the
/// per-user data directory is tried.
pub fn resolve_catalog_path(explicit: &Path) -> Result<PathBuf, CatalogError> {
    if explicit.exists() {
        return Ok(explicit.to_path_buf());
    }
    let fallback = get_data_dir().join(DEFAULT_CATALOG_FILE);
    if fallback.exists() {
        warn!(requested = %explicit.display(), using = %fallback.display(), "Catalog not found, using data directory copy.");
        return Ok(fallback);
    }
    Err(CatalogError::NotFound(explicit.to_path_buf()))
}

/// Reads and parses a catalog file. The format follows the file extension.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let entries = if is_json { parse_json(&raw)? } else { parse_xml(&raw)? };

    info!(path = %path.display(), entries = entries.len(), "Catalog loaded.");
    Ok(entries)
}

/// Parses a GHDB XML document.
pub fn parse_xml(raw: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let document: GhdbDocument = quick_xml::de::from_str(raw)?;
    Ok(keep_queries(document.entries.into_iter().map(CatalogEntry::from)))
}

/// Parses a JSON array of entries.
pub fn parse_json(raw: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(raw)?;
    Ok(keep_queries(entries.into_iter()))
}

fn keep_queries(entries: impl Iterator<Item = CatalogEntry>) -> Vec<CatalogEntry> {
    entries.filter(|e| !e.query.trim().is_empty()).collect()
}
