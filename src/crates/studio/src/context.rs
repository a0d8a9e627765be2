//! Character-budgeted context assembly for LLM prompts.
//!
//! Given the user's selected sources, produce a single bounded text blob
//! that is safe to send to the model: each source gets a header label and
//! at most a per-source slice of its text, and the whole blob never
//! exceeds the global budget. Truncation is reported to the caller rather
//! than swallowed, so API responses can tell the user their context was
//! cut.

/// Global budget for assembled context, in bytes of UTF-8 text.
pub const MAX_CONTEXT_CHARS: usize = 240_000;

/// Per-source budget within the global budget.
pub const MAX_SOURCE_CHARS: usize = 80_000;

/// Budget for the single-source summary path.
pub const MAX_SUMMARY_CHARS: usize = 120_000;

/// A source as seen by the context builder: just a name and its usable
/// text (extracted text for PDFs, raw content otherwise).
#[derive(Debug, Clone)]
pub struct ContextSource {
    /// Display name, used in the `[SOURCE: ...]` header
    pub name: String,

    /// Usable text of the source
    pub text: String,
}

impl ContextSource {
    /// Create a new context source.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Result of context assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltContext {
    /// The assembled context blob
    pub text: String,

    /// True when any source contributed less than its full available text
    pub truncated: bool,
}

/// Budgeted context builder.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    max_chars: usize,
    per_source_max_chars: usize,
    include_headers: bool,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self {
            max_chars: MAX_CONTEXT_CHARS,
            per_source_max_chars: MAX_SOURCE_CHARS,
            include_headers: true,
        }
    }
}

impl ContextBuilder {
    /// Create a builder with the default budgets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global character budget.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the per-source character budget.
    pub fn with_per_source_max_chars(mut self, per_source_max_chars: usize) -> Self {
        self.per_source_max_chars = per_source_max_chars;
        self
    }

    /// Enable or disable `[SOURCE: ...]` headers.
    pub fn with_headers(mut self, include_headers: bool) -> Self {
        self.include_headers = include_headers;
        self
    }

    /// Assemble the context blob from `sources`, in order.
    ///
    /// Sources with no text contribute nothing. Iteration stops once the
    /// global budget is exhausted; any remaining sources with text set the
    /// truncation flag.
    pub fn build(&self, sources: &[ContextSource]) -> BuiltContext {
        let mut pieces: Vec<String> = Vec::new();
        let mut total = 0usize;
        let mut truncated = false;

        for source in sources {
            if source.text.is_empty() {
                continue;
            }

            let header = if self.include_headers {
                format!("[SOURCE: {}]\n", source.name)
            } else {
                String::new()
            };

            let remaining = self.max_chars.saturating_sub(total + header.len());
            if remaining == 0 {
                // Budget spent with usable text still pending.
                truncated = true;
                break;
            }

            let budget = self.per_source_max_chars.min(remaining);
            let (taken, cut) = take_prefix(&source.text, budget);
            if cut {
                truncated = true;
            }

            let piece_len = header.len() + taken.len();
            let mut piece = header;
            piece.push_str(taken);
            pieces.push(piece);

            // Account for the blank-line separator between pieces.
            total += piece_len + 2;
        }

        BuiltContext {
            text: pieces.join("\n\n"),
            truncated,
        }
    }
}

/// Take at most `max_bytes` of `text`, backing off to the nearest UTF-8
/// character boundary. Returns the slice and whether anything was cut.
pub fn take_prefix(text: &str, max_bytes: usize) -> (&str, bool) {
    if text.len() <= max_bytes {
        return (text, false);
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    (&text[..end], true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, len: usize) -> ContextSource {
        ContextSource::new(name, "x".repeat(len))
    }

    #[test]
    fn test_empty_sources_yield_empty_context() {
        let built = ContextBuilder::new().build(&[]);
        assert_eq!(built.text, "");
        assert!(!built.truncated);
    }

    #[test]
    fn test_source_without_text_contributes_nothing() {
        let built = ContextBuilder::new().build(&[
            ContextSource::new("empty.pdf", ""),
            source("a.txt", 10),
        ]);
        assert!(built.text.starts_with("[SOURCE: a.txt]\n"));
        assert!(!built.text.contains("empty.pdf"));
        assert!(!built.truncated);
    }

    #[test]
    fn test_headers_label_each_source() {
        let built = ContextBuilder::new().build(&[source("a.txt", 5), source("b.txt", 5)]);
        assert!(built.text.contains("[SOURCE: a.txt]"));
        assert!(built.text.contains("[SOURCE: b.txt]"));
        assert!(built.text.contains("\n\n"));
    }

    #[test]
    fn test_headers_can_be_disabled() {
        let built = ContextBuilder::new()
            .with_headers(false)
            .build(&[source("a.txt", 5)]);
        assert_eq!(built.text, "xxxxx");
    }

    #[test]
    fn test_never_exceeds_global_budget() {
        let builder = ContextBuilder::new()
            .with_max_chars(100)
            .with_per_source_max_chars(80);
        let sources: Vec<ContextSource> = (0..5).map(|i| source(&format!("s{}", i), 50)).collect();
        let built = builder.build(&sources);
        assert!(built.text.len() <= 100, "len = {}", built.text.len());
        assert!(built.truncated);
    }

    #[test]
    fn test_per_source_budget_truncates() {
        let builder = ContextBuilder::new()
            .with_max_chars(1_000)
            .with_per_source_max_chars(10);
        let built = builder.build(&[source("a.txt", 50)]);
        assert!(built.truncated);
        assert!(built.text.ends_with(&"x".repeat(10)));
    }

    #[test]
    fn test_no_truncation_when_everything_fits() {
        let builder = ContextBuilder::new()
            .with_max_chars(1_000)
            .with_per_source_max_chars(100);
        let built = builder.build(&[source("a.txt", 50), source("b.txt", 50)]);
        assert!(!built.truncated);
    }

    #[test]
    fn test_pending_source_sets_truncated_flag() {
        // First source consumes the whole budget; the second never runs.
        let builder = ContextBuilder::new()
            .with_max_chars(60)
            .with_per_source_max_chars(60)
            .with_headers(false);
        let built = builder.build(&[source("a.txt", 60), source("b.txt", 10)]);
        assert!(built.truncated);
    }

    #[test]
    fn test_take_prefix_respects_char_boundaries() {
        let text = "héllo wörld";
        let (taken, cut) = take_prefix(text, 2);
        assert!(cut);
        assert!(taken.is_char_boundary(taken.len()));
        assert_eq!(taken, "h");
    }

    #[test]
    fn test_take_prefix_no_cut() {
        let (taken, cut) = take_prefix("abc", 10);
        assert_eq!(taken, "abc");
        assert!(!cut);
    }
}
