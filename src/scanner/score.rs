// Importance scoring and text decoding
//
// score = lines
//       * 2    if the extension is a source extension
//       * 1.5  if, additionally, the content carries an import marker

use crate::config::ScanConfig;
use std::collections::HashSet;

/// Computes the importance score of a loaded file
#[derive(Debug, Clone)]
pub struct ImportanceScorer {
    source_extensions: HashSet<String>,
    import_markers: Vec<String>,
}

impl ImportanceScorer {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            source_extensions: config
                .source_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            import_markers: config.import_markers.clone(),
        }
    }

    pub fn is_source(&self, extension: &str) -> bool {
        self.source_extensions.contains(&extension.to_lowercase())
    }

    /// Case-sensitive substring check against the import markers
    pub fn has_import(&self, content: &str) -> bool {
        self.import_markers.iter().any(|m| content.contains(m.as_str()))
    }

    pub fn score(&self, extension: &str, content: &str) -> f64 {
        let mut score = count_lines(content) as f64;
        if self.is_source(extension) {
            score *= 2.0;
            if self.has_import(content) {
                score *= 1.5;
            }
        }
        score
    }
}

impl Default for ImportanceScorer {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Number of lines under Unicode line-break rules.
///
/// `\r\n` counts as one break and a trailing break does not open a new
/// line, so `"a\x0cb\n"` has two lines.
pub fn count_lines(text: &str) -> usize {
    let mut count = 0;
    let mut open = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if is_line_break(c) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            count += 1;
            open = false;
        } else {
            open = true;
        }
    }

    count + usize::from(open)
}

/// Decode bytes as UTF-8, dropping invalid sequences, with line endings
/// normalised to `\n`.
pub fn decode_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }

    if text.contains('\r') {
        text = text.replace("\r\n", "\n").replace('\r', "\n");
    }
    text
}
