/// Marker that starts a comment line in a filter list.
const COMMENT_MARKER: char = '!';

/// How a single line of a filter list was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Nothing left after trimming.
    Blank,
    /// Starts with `!`.
    Comment,
    /// Anything else; handed on to the rule builder.
    Candidate,
}

/// A trimmed line together with its 1-based position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub number: usize,
    pub text: &'a str,
    pub kind: LineKind,
}

/// Splits filter-list text into trimmed, classified lines.
///
/// Only spaces, tabs, carriage returns and newlines count as incidental
/// whitespace; other Unicode whitespace is kept as part of the line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineClassifier;

impl LineClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies a single raw line.
    pub fn classify_line<'a>(&self, number: usize, raw: &'a str) -> ClassifiedLine<'a> {
        let text = raw.trim_matches(is_incidental_whitespace);
        let kind = if text.is_empty() {
            LineKind::Blank
        } else if text.starts_with(COMMENT_MARKER) {
            LineKind::Comment
        } else {
            LineKind::Candidate
        };
        ClassifiedLine { number, text, kind }
    }

    /// Lazily classifies every line of `content`, including blanks and comments.
    pub fn classify<'a>(&self, content: &'a str) -> impl Iterator<Item = ClassifiedLine<'a>> {
        let classifier = *self;
        content
            .split('\n')
            .enumerate()
            .map(move |(index, raw)| classifier.classify_line(index + 1, raw))
    }

    /// Lazily yields only the lines that may carry a rule.
    pub fn candidates<'a>(&self, content: &'a str) -> impl Iterator<Item = ClassifiedLine<'a>> {
        self.classify(content)
            .filter(|line| line.kind == LineKind::Candidate)
    }
}

fn is_incidental_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
