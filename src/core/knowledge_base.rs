//! This module holds the scanner's static, read-only intelligence.
//! It knows which search operators can be turned into HTTP requests, which
//! conventional filenames belong to each file extension, and how severe each
//! catalog category is. The knowledge filter that selects usable catalog
//! entries lives here as well, since it is driven entirely by these tables.

use crate::core::models::{CatalogEntry, Severity};
use tracing::debug;

/// Operators that only make sense to a search engine and have no HTTP equivalent.
pub const SEARCH_ONLY_OPERATORS: &[&str] = &["cache:", "info:", "related:", "define:", "link:"];

/// Operators the converter knows how to translate, in extraction order:
/// path hint, extension hint, title hint, body hint.
pub const CONVERTIBLE_OPERATORS: &[&str] = &["inurl:", "filetype:", "intitle:", "intext:"];

/// Maps a catalog category to the severity its findings carry.
struct CategorySeverity {
    category: &'static str,
    severity: Severity,
}

/// Maps a file extension to the conventional filenames worth probing for it.
struct FiletypeExpansion {
    extension: &'static str,
    paths: &'static [&'static str],
}

static CATEGORY_SEVERITIES: &[CategorySeverity] = &[
    CategorySeverity { category: "Files Containing Passwords", severity: Severity::High },
    CategorySeverity { category: "Footholds", severity: Severity::High },
    CategorySeverity { category: "Vulnerable Files", severity: Severity::High },
    CategorySeverity { category: "Vulnerable Servers", severity: Severity::High },
    CategorySeverity { category: "Sensitive Online Shopping Info", severity: Severity::High },
    CategorySeverity { category: "Sensitive Directories", severity: Severity::Medium },
    CategorySeverity { category: "Files Containing Usernames", severity: Severity::Medium },
    CategorySeverity { category: "Files Containing Juicy Info", severity: Severity::Medium },
    CategorySeverity { category: "Various Online Devices", severity: Severity::Medium },
    CategorySeverity { category: "Network or Vulnerability Data", severity: Severity::Medium },
    CategorySeverity { category: "Advisories and Vulnerabilities", severity: Severity::Medium },
    CategorySeverity { category: "Pages Containing Login Portals", severity: Severity::Low },
    CategorySeverity { category: "Error Messages", severity: Severity::Low },
    CategorySeverity { category: "Web Server Detection", severity: Severity::Low },
];

static FILETYPE_EXPANSIONS: &[FiletypeExpansion] = &[
    FiletypeExpansion { extension: "sql", paths: &["/backup.sql", "/dump.sql", "/database.sql", "/db.sql"] },
    FiletypeExpansion { extension: "env", paths: &["/.env", "/.env.local", "/.env.production", "/.env.backup"] },
    FiletypeExpansion { extension: "log", paths: &["/error.log", "/debug.log", "/logs/error.log", "/access.log"] },
    FiletypeExpansion { extension: "bak", paths: &["/web.config.bak", "/.htaccess.bak", "/index.php.bak"] },
    FiletypeExpansion { extension: "git", paths: &["/.git/HEAD", "/.git/config"] },
    FiletypeExpansion { extension: "php", paths: &["/phpinfo.php", "/info.php", "/config.php", "/test.php"] },
    FiletypeExpansion { extension: "json", paths: &["/package.json", "/composer.json", "/appsettings.json"] },
    FiletypeExpansion { extension: "yml", paths: &["/docker-compose.yml", "/swagger.yml", "/.travis.yml"] },
    FiletypeExpansion { extension: "yaml", paths: &["/docker-compose.yaml", "/swagger.yaml", "/openapi.yaml"] },
    FiletypeExpansion { extension: "zip", paths: &["/backup.zip", "/www.zip", "/site.zip", "/archive.zip"] },
    FiletypeExpansion { extension: "tar", paths: &["/backup.tar", "/backup.tar.gz", "/www.tar.gz"] },
    FiletypeExpansion { extension: "gz", paths: &["/backup.gz", "/dump.gz", "/database.sql.gz"] },
    FiletypeExpansion { extension: "txt", paths: &["/robots.txt", "/security.txt", "/readme.txt", "/changelog.txt"] },
    FiletypeExpansion { extension: "xml", paths: &["/sitemap.xml", "/crossdomain.xml", "/web.config"] },
    FiletypeExpansion { extension: "conf", paths: &["/httpd.conf", "/nginx.conf", "/.htaccess"] },
    FiletypeExpansion { extension: "cfg", paths: &["/setup.cfg", "/app.cfg"] },
    FiletypeExpansion { extension: "ini", paths: &["/php.ini", "/config.ini", "/settings.ini"] },
    FiletypeExpansion { extension: "old", paths: &["/index.php.old", "/config.php.old", "/.htaccess.old"] },
    FiletypeExpansion { extension: "csv", paths: &["/users.csv", "/export.csv", "/data.csv"] },
    FiletypeExpansion { extension: "key", paths: &["/server.key", "/private.key", "/.ssh/id_rsa"] },
    FiletypeExpansion { extension: "pem", paths: &["/server.pem", "/cert.pem", "/ca-bundle.pem"] },
];

/// Returns the severity a finding from `category` carries before any capping.
///
/// Unknown categories default to `Severity::Info`.
pub fn category_severity(category: &str) -> Severity {
    CATEGORY_SEVERITIES
        .iter()
        .find(|c| c.category == category)
        .map(|c| c.severity)
        .unwrap_or(Severity::Info)
}

/// Retrieves the curated filename list for a file extension.
///
/// # Arguments
///
/// * `extension` - The extension without a leading dot, in any case.
///
/// # Returns
///
/// The conventional paths for that extension, or `None` if the extension is
/// not in the table.
pub fn filetype_paths(extension: &str) -> Option<&'static [&'static str]> {
    FILETYPE_EXPANSIONS
        .iter()
        .find(|f| f.extension.eq_ignore_ascii_case(extension))
        .map(|f| f.paths)
}

/// Selects the catalog entries that can become HTTP probes.
///
/// An entry is rejected when its query uses any search-engine-only operator
/// (even alongside convertible ones), when it uses none of the convertible
/// operators, or when a category allowlist is given and its category is not
/// on it. Input order is preserved.
pub fn filter_entries<'a>(
    entries: &'a [CatalogEntry],
    categories: Option<&[String]>,
) -> Vec<&'a CatalogEntry> {
    let filtered: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| {
            let query = entry.query.to_lowercase();
            if SEARCH_ONLY_OPERATORS.iter().any(|op| query.contains(op)) {
                return false;
            }
            if !CONVERTIBLE_OPERATORS.iter().any(|op| query.contains(op)) {
                return false;
            }
            categories.is_none_or(|allowed| allowed.iter().any(|c| c == &entry.category))
        })
        .collect();

    debug!(total = entries.len(), kept = filtered.len(), "Filtered catalog entries.");
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, category: &str, query: &str) -> CatalogEntry {
        CatalogEntry {
            id,
            category: category.to_string(),
            query: query.to_string(),
            short_description: format!("entry {id}"),
            date: String::new(),
        }
    }

    #[test]
    fn search_only_operator_rejects_entry_regardless_of_others() {
        let entries = vec![
            entry(1, "Footholds", "cache:example.com inurl:admin"),
            entry(2, "Footholds", "inurl:admin"),
        ];
        let kept = filter_entries(&entries, None);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }

    #[test]
    fn entries_without_convertible_operator_are_rejected() {
        let entries = vec![
            entry(1, "Footholds", "site:example.com \"powered by\""),
            entry(2, "Footholds", "INTITLE:\"index of\""),
        ];
        let kept = filter_entries(&entries, None);
        assert_eq!(kept.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn category_allowlist_preserves_input_order() {
        let entries = vec![
            entry(1, "Error Messages", "intext:\"sql syntax\""),
            entry(2, "Footholds", "inurl:shell.php"),
            entry(3, "Web Server Detection", "intitle:\"apache status\""),
            entry(4, "Footholds", "inurl:cmd.php"),
        ];
        let allow = vec!["Footholds".to_string(), "Error Messages".to_string()];
        let kept = filter_entries(&entries, Some(&allow));
        assert_eq!(kept.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn unknown_category_defaults_to_info() {
        assert_eq!(category_severity("Footholds"), Severity::High);
        assert_eq!(category_severity("Files Containing Passwords"), Severity::High);
        assert_eq!(category_severity("Something New"), Severity::Info);
    }

    #[test]
    fn filetype_lookup_is_case_insensitive() {
        assert_eq!(filetype_paths("SQL").map(|p| p.len()), Some(4));
        assert!(filetype_paths("docx").is_none());
    }
}
