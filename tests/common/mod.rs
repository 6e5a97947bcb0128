use chromecov::model::{ByteRange, RawEntry};

/// Build an entry from a URL, its source text and the executed spans.
pub fn entry(url: &str, text: &str, ranges: &[(usize, usize)]) -> RawEntry {
    RawEntry {
        url: url.to_string(),
        text: text.to_string(),
        ranges: ranges
            .iter()
            .map(|&(start, end)| ByteRange { start, end })
            .collect(),
    }
}

/// Serialize entries into the raw JSON dump format the CLI consumes.
pub fn dump(entries: &[RawEntry]) -> String {
    serde_json::to_string(entries).unwrap()
}

/// A small dev-server session: one partially covered module, one fully
/// covered module (modulo a trailing newline) and an injected dev-server
/// script that the default filter should drop.
pub fn sample_session() -> Vec<RawEntry> {
    vec![
        entry(
            "http://localhost:8080/src/app.js",
            "export function used() {\n  return 1;\n}\n\nexport function dead() {\n  return 2;\n}\n",
            &[(0, 39), (77, 79)],
        ),
        entry(
            "http://localhost:8080/src/util.js",
            "export const n = 1;\n",
            &[(0, 19)],
        ),
        entry(
            "http://localhost:8080/node_modules/vite/client.js",
            "console.log('connected');\n",
            &[(0, 26)],
        ),
    ]
}
