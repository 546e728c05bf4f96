// src/core/scanner/classifier.rs

//! Decides whether a single response is evidence of exposure.
//!
//! Ambiguous or insufficient evidence always resolves to a discard.

use crate::core::models::{Baseline, Probe, ProbeResult};
use crate::core::scanner::fetcher::FetchedResponse;
use scraper::{Html, Selector};
use tracing::debug;

/// Characters of body text kept in a result preview.
pub const PREVIEW_CHARS: usize = 300;

/// Classifies one response for a (probe, path) pair.
///
/// Precedence:
/// 1. 404 and any 3xx produce nothing.
/// 2. On a 200 with content rules, the title rule is tested against the
///    page `<title>` and the body rule against the captured body, both as
///    case-insensitive substrings. A title miss discards outright only when
///    there is no body rule; otherwise the body rule decides.
/// 3. On a 200 without content rules, existence is the finding unless the
///    size sits within the soft-404 tolerance of a known baseline.
/// 4. A 403 is always kept, as informational.
/// 5. Anything else unmatched is discarded.
pub fn classify<'a>(
    probe: &'a Probe,
    path: &str,
    url: String,
    response: &FetchedResponse,
    baseline: Baseline,
) -> Option<ProbeResult<'a>> {
    let status = response.status;
    if status == 0 || status == 404 || (300..400).contains(&status) {
        debug!(url = %url, status, "Discarded: missing or redirected.");
        return None;
    }

    let body = String::from_utf8_lossy(&response.body);
    let mut matched = false;

    if status == 200 {
        if let Some(title_rule) = &probe.title_rule {
            if title_contains(&body, title_rule) {
                matched = true;
            } else if probe.body_rule.is_none() {
                debug!(url = %url, rule = %title_rule, "Discarded: title rule not satisfied.");
                return None;
            }
        }

        if let Some(body_rule) = &probe.body_rule {
            if contains_ignore_case(&body, body_rule) {
                matched = true;
            } else if !matched {
                debug!(url = %url, rule = %body_rule, "Discarded: body rule not satisfied.");
                return None;
            }
        }

        if !probe.has_content_rule() {
            if baseline.is_soft_404(response.size) {
                debug!(url = %url, size = response.size, "Discarded: soft-404.");
                return None;
            }
            matched = true;
        }
    }

    if status == 403 {
        matched = true;
    }

    if !matched && status != 200 && status != 403 {
        debug!(url = %url, status, "Discarded: uninteresting status.");
        return None;
    }

    Some(ProbeResult {
        probe,
        url,
        path: path.to_string(),
        status,
        size: response.size,
        content_type: response.content_type.clone(),
        body_preview: preview(&body),
        matched,
        from_filetype: probe.is_filetype_path(path),
    })
}

/// Text of the first `<title>` element, if any.
fn page_title(body: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(body);
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

fn title_contains(body: &str, rule: &str) -> bool {
    page_title(body).is_some_and(|title| contains_ignore_case(&title, rule))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// First `PREVIEW_CHARS` characters with line breaks flattened to spaces.
fn preview(body: &str) -> String {
    body.chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn probe(title: Option<&str>, body: Option<&str>) -> Probe {
        Probe {
            source_id: 1,
            category: "Sensitive Directories".into(),
            description: "listing".into(),
            query: "q".into(),
            paths: vec!["/backup".into(), "/dump.sql".into()],
            title_rule: title.map(String::from),
            body_rule: body.map(String::from),
            filetype_paths: HashSet::from(["/dump.sql".to_string()]),
        }
    }

    fn response(status: u16, body: &str) -> FetchedResponse {
        FetchedResponse {
            status,
            size: body.len() as u64,
            content_type: "text/html".into(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn sized(status: u16, size: u64) -> FetchedResponse {
        FetchedResponse { status, size, ..Default::default() }
    }

    fn run<'a>(p: &'a Probe, r: &FetchedResponse, baseline: Baseline) -> Option<ProbeResult<'a>> {
        classify(p, "/backup", "http://t/backup".into(), r, baseline)
    }

    const LISTING: &str = "<html><head><title>Index of /backup</title></head><body>db.tar</body></html>";

    #[test]
    fn title_rule_matches_case_insensitively() {
        let p = probe(Some("index OF"), None);
        let result = run(&p, &response(200, LISTING), Baseline::unknown()).unwrap();
        assert!(result.matched);
        assert_eq!(result.status, 200);
    }

    #[test]
    fn title_miss_without_body_rule_discards() {
        let p = probe(Some("index of"), None);
        let page = "<html><head><title>Welcome</title></head><body>index of</body></html>";
        assert!(run(&p, &response(200, page), Baseline::unknown()).is_none());
    }

    #[test]
    fn title_miss_defers_to_body_rule() {
        let p = probe(Some("index of"), Some("db.tar"));
        let page = "<html><head><title>Files</title></head><body>db.tar</body></html>";
        assert!(run(&p, &response(200, page), Baseline::unknown()).unwrap().matched);

        let page = "<html><head><title>Files</title></head><body>nothing</body></html>";
        assert!(run(&p, &response(200, page), Baseline::unknown()).is_none());
    }

    #[test]
    fn title_hit_survives_body_miss() {
        let p = probe(Some("index of"), Some("secret"));
        assert!(run(&p, &response(200, LISTING), Baseline::unknown()).unwrap().matched);
    }

    #[test]
    fn body_rule_alone() {
        let p = probe(None, Some("DB.TAR"));
        assert!(run(&p, &response(200, LISTING), Baseline::unknown()).is_some());
        let p = probe(None, Some("passwd"));
        assert!(run(&p, &response(200, LISTING), Baseline::unknown()).is_none());
    }

    #[test]
    fn page_without_title_fails_title_rule() {
        let p = probe(Some("index of"), None);
        assert!(run(&p, &response(200, "plain index of text"), Baseline::unknown()).is_none());
    }

    #[test]
    fn soft_404_window_around_baseline() {
        let p = probe(None, None);
        let baseline = Baseline(Some(5000));
        assert!(run(&p, &sized(200, 5050), baseline).is_none());
        let kept = run(&p, &sized(200, 5200), baseline).unwrap();
        assert!(kept.matched);
        assert!(run(&p, &sized(200, 5050), Baseline::unknown()).is_some());
    }

    #[test]
    fn missing_and_redirect_statuses_discard() {
        let p = probe(None, None);
        for status in [0, 404, 301, 302, 307, 399] {
            assert!(run(&p, &sized(status, 10), Baseline::unknown()).is_none(), "status {status}");
        }
    }

    #[test]
    fn forbidden_is_kept_even_with_content_rules() {
        let p = probe(Some("index of"), Some("db.tar"));
        let result = run(&p, &response(403, "Forbidden"), Baseline::unknown()).unwrap();
        assert!(result.matched);
        assert_eq!(result.status, 403);
    }

    #[test]
    fn other_statuses_discard() {
        let p = probe(None, None);
        for status in [201, 401, 500, 503] {
            assert!(run(&p, &sized(status, 10), Baseline::unknown()).is_none(), "status {status}");
        }
    }

    #[test]
    fn preview_is_truncated_and_flattened() {
        let p = probe(None, None);
        let body = format!("line one\nline two\r\n{}", "z".repeat(400));
        let result = run(&p, &response(200, &body), Baseline::unknown()).unwrap();
        assert!(result.body_preview.starts_with("line one line two"));
        assert_eq!(result.body_preview.chars().count(), PREVIEW_CHARS);
        assert!(!result.body_preview.contains('\n'));
    }

    #[test]
    fn filetype_origin_follows_path() {
        let p = probe(None, None);
        let r = sized(200, 10);
        let generic = classify(&p, "/dump.sql", "http://t/dump.sql".into(), &r, Baseline::unknown()).unwrap();
        assert!(generic.from_filetype);
        assert!(!run(&p, &r, Baseline::unknown()).unwrap().from_filetype);
    }
}
