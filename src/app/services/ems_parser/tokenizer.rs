//! Line tokenization for EMS records
//!
//! Two splitting modes are used. Bus records need quote-aware splitting
//! because bus names may contain spaces inside single quotes; every other
//! section is split on plain whitespace.

/// Tokenizer mode used by a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerMode {
    /// Split on spaces outside single-quoted spans
    QuoteAware,
    /// Split on any whitespace
    Whitespace,
}

impl TokenizerMode {
    /// Split a line into tokens using this mode
    pub fn tokenize(self, line: &str) -> Vec<&str> {
        match self {
            TokenizerMode::QuoteAware => tokenize_quoted(line),
            TokenizerMode::Whitespace => tokenize_whitespace(line),
        }
    }
}

/// Split a line on runs of spaces outside single-quoted spans
///
/// Quote characters stay part of their token. Each `'` toggles the
/// in-quotes state, so an unmatched quote keeps the rest of the line in one
/// token. Tokens are slices of `line`.
pub fn tokenize_quoted(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut token_start: Option<usize> = None;
    let mut in_quotes = false;

    for (index, ch) in line.char_indices() {
        match ch {
            '\'' => {
                in_quotes = !in_quotes;
                token_start.get_or_insert(index);
            }
            ' ' if !in_quotes => {
                if let Some(start) = token_start.take() {
                    tokens.push(&line[start..index]);
                }
            }
            _ => {
                token_start.get_or_insert(index);
            }
        }
    }

    if let Some(start) = token_start {
        tokens.push(&line[start..]);
    }

    tokens
}

/// Split a line on any whitespace, ignoring quotes
pub fn tokenize_whitespace(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
