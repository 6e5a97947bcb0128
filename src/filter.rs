//! Entry selection. The pipeline only analyzes entries the active
//! predicate accepts; everything else is dropped before any byte math.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::RawEntry;

static SRC_JS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^/]+/src/.*\.m?js$").unwrap());

/// Default predicate: same-origin scripts under `/src/` with a `.js` or
/// `.mjs` extension. Dev-server noise (node_modules, injected client
/// scripts, stylesheets) fails this and is skipped.
#[must_use]
pub fn default_filter(entry: &RawEntry) -> bool {
    SRC_JS_RE.is_match(&entry.url)
}

/// Build a predicate matching entry URLs against a caller-supplied pattern.
#[must_use]
pub fn url_filter(pattern: Regex) -> impl Fn(&RawEntry) -> bool + Send + Sync {
    move |entry: &RawEntry| pattern.is_match(&entry.url)
}

/// Keep the entries the predicate accepts, preserving input order.
pub fn filter_entries<F>(mut entries: Vec<RawEntry>, mut predicate: F) -> Vec<RawEntry>
where
    F: FnMut(&RawEntry) -> bool,
{
    entries.retain(|entry| predicate(entry));
    entries
}
