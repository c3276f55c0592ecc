//! Data models for the flashcard system

/// A term/definition pair with a running count of wrong answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub term: String,
    pub definition: String,
    pub mistakes: u32,
}

impl Card {
    pub fn new(term: String, definition: String) -> Self {
        Self {
            term,
            definition,
            mistakes: 0,
        }
    }

    pub fn with_mistakes(term: String, definition: String, mistakes: u32) -> Self {
        Self {
            term,
            definition,
            mistakes,
        }
    }
}

/// The card(s) answered wrong most often
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardestCards {
    /// Terms sharing the highest mistake count, in store order
    pub terms: Vec<String>,
    pub mistakes: u32,
}

impl HardestCards {
    /// Terms quoted and comma-joined, e.g. `"a", "b"`
    pub fn quoted_terms(&self) -> String {
        self.terms
            .iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Outcome of loading a card file into the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Records applied to the store
    pub loaded: usize,
    /// How many of those replaced a card with the same term
    pub replaced: usize,
    /// Malformed lines that were skipped
    pub skipped: usize,
}

/// What to do when an imported line cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedLines {
    /// Reject the whole file and leave the store untouched
    #[default]
    Reject,
    /// Skip the bad line and keep going
    Skip,
}
