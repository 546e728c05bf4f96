// src/core/converter.rs

use crate::core::knowledge_base::filetype_paths;
use crate::core::models::{CatalogEntry, Probe};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

// Operator patterns. Quotes around a value are optional for path and
// extension hints; title and body hints prefer a quoted phrase.
static RE_INURL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)inurl:\s*["']?([^\s"']+)["']?"#).unwrap());
static RE_FILETYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)filetype:\s*["']?(\w+)["']?"#).unwrap());
static RE_INTITLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)intitle:\s*"([^"]+)""#).unwrap());
static RE_INTITLE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)intitle:\s*(\S+)").unwrap());
static RE_INTEXT_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)intext:\s*"([^"]+)""#).unwrap());
static RE_INTEXT_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)intext:\s*(\S+)").unwrap());

/// Converts one filtered catalog entry into a probe.
///
/// Hints are extracted in a fixed order: `inurl:` paths, then `filetype:`
/// expansions, then the `intitle:` rule, then the `intext:` rule. An entry
/// with only content rules probes the site root. Returns `None` when the
/// entry yields no path at all.
pub fn convert(entry: &CatalogEntry) -> Option<Probe> {
    let query = entry.query.as_str();

    let mut candidates = extract_path_hints(query);
    let generic_paths = extract_extension_hints(query);
    candidates.extend(generic_paths.iter().cloned());

    let title_rule = extract_rule(query, &RE_INTITLE_QUOTED, &RE_INTITLE_TOKEN);
    let body_rule = extract_rule(query, &RE_INTEXT_QUOTED, &RE_INTEXT_TOKEN);

    if candidates.is_empty() && (title_rule.is_some() || body_rule.is_some()) {
        candidates.push("/".to_string());
    }

    let paths = dedup_preserving_order(candidates);
    if paths.is_empty() {
        debug!(id = entry.id, query, "Entry produced no probe paths.");
        return None;
    }

    Some(Probe {
        source_id: entry.id,
        category: entry.category.clone(),
        description: entry.short_description.clone(),
        query: entry.query.clone(),
        paths,
        title_rule,
        body_rule,
        filetype_paths: generic_paths.into_iter().collect(),
    })
}

/// Converts every entry, dropping the ones that yield no probe.
pub fn convert_all<'a, I>(entries: I) -> Vec<Probe>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    entries.into_iter().filter_map(convert).collect()
}

/// Every `inurl:` value as an absolute path.
fn extract_path_hints(query: &str) -> Vec<String> {
    RE_INURL
        .captures_iter(query)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            let path = m.as_str();
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{}", path)
            }
        })
        .collect()
}

/// Every recognised `filetype:` value expanded to its conventional filenames.
/// Unknown extensions contribute nothing.
fn extract_extension_hints(query: &str) -> Vec<String> {
    RE_FILETYPE
        .captures_iter(query)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| filetype_paths(m.as_str()))
        .flat_map(|paths| paths.iter().map(|p| p.to_string()))
        .collect()
}

/// The first quoted phrase after the operator, else the first bare token.
fn extract_rule(query: &str, quoted: &Regex, token: &Regex) -> Option<String> {
    if let Some(m) = quoted.captures(query).and_then(|caps| caps.get(1)) {
        return Some(m.as_str().to_string());
    }
    token
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches('"').to_string())
        .filter(|rule| !rule.is_empty())
}

fn dedup_preserving_order(paths: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    paths.into_iter().filter(|p| seen.insert(p.clone())).collect()
}
