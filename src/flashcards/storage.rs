//! In-memory card store and its card-file import/export
//!
//! Cards are kept in insertion order. Terms are unique; definitions are
//! only checked for uniqueness when a card is added interactively, so an
//! import may bring in a definition that another card already uses.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::format::{format_card, parse_card, ParseCardError};
use super::models::*;

#[derive(Error, Debug)]
pub enum CardStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("The card \"{0}\" already exists.")]
    DuplicateTerm(String),

    #[error("The definition \"{0}\" already exists.")]
    DuplicateDefinition(String),

    #[error("Can't remove \"{0}\": there is no such card.")]
    CardNotFound(String),

    #[error("File not found.")]
    FileNotFound(PathBuf),

    #[error("Line {line} is malformed: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: ParseCardError,
    },
}

pub type Result<T> = std::result::Result<T, CardStoreError>;

/// The live collection of cards for a session
#[derive(Debug, Default, Clone)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in store order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn find_by_term(&self, term: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.term == term)
    }

    pub fn find_by_definition(&self, definition: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.definition == definition)
    }

    // ==================== Card Operations ====================

    /// Add a new card with no mistakes
    pub fn add(&mut self, term: String, definition: String) -> Result<&Card> {
        if self.find_by_term(&term).is_some() {
            return Err(CardStoreError::DuplicateTerm(term));
        }
        if self.find_by_definition(&definition).is_some() {
            return Err(CardStoreError::DuplicateDefinition(definition));
        }

        log::debug!("Adding card \"{}\"", term);
        self.cards.push(Card::new(term, definition));
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Remove the card with the given term
    pub fn remove(&mut self, term: &str) -> Result<Card> {
        let pos = self
            .cards
            .iter()
            .position(|c| c.term == term)
            .ok_or_else(|| CardStoreError::CardNotFound(term.to_string()))?;

        log::debug!("Removing card \"{}\"", term);
        Ok(self.cards.remove(pos))
    }

    /// Append a card, dropping any existing card with the same term first.
    /// Returns true if a card was replaced.
    pub fn upsert(&mut self, card: Card) -> bool {
        let replaced = match self.cards.iter().position(|c| c.term == card.term) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        };
        self.cards.push(card);
        replaced
    }

    /// Count one more wrong answer for the card at `index`
    pub fn record_mistake(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.mistakes = card.mistakes.saturating_add(1);
        }
    }

    // ==================== Statistics ====================

    /// Zero every card's mistake counter
    pub fn reset_stats(&mut self) {
        for card in &mut self.cards {
            card.mistakes = 0;
        }
    }

    /// Cards sharing the highest mistake count, or None if nobody has erred
    pub fn hardest(&self) -> Option<HardestCards> {
        let max = self.cards.iter().map(|c| c.mistakes).max()?;
        if max == 0 {
            return None;
        }

        let terms = self
            .cards
            .iter()
            .filter(|c| c.mistakes == max)
            .map(|c| c.term.clone())
            .collect();

        Some(HardestCards {
            terms,
            mistakes: max,
        })
    }

    // ==================== File Operations ====================

    /// Load cards from a card file.
    ///
    /// Each record replaces any card with the same term and lands at the
    /// end of the store. With [`MalformedLines::Reject`] the file is fully
    /// parsed before anything is applied, so a bad line leaves the store
    /// untouched.
    pub fn import(&mut self, path: &Path, malformed: MalformedLines) -> Result<ImportReport> {
        if !path.exists() {
            log::warn!("Card file {:?} does not exist", path);
            return Err(CardStoreError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let mut report = ImportReport::default();
        let mut parsed = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_card(line) {
                Ok(card) => parsed.push(card),
                Err(source) => match malformed {
                    MalformedLines::Reject => {
                        return Err(CardStoreError::Malformed {
                            line: idx + 1,
                            source,
                        });
                    }
                    MalformedLines::Skip => {
                        log::warn!("Skipping line {} of {:?}: {}", idx + 1, path, source);
                        report.skipped += 1;
                    }
                },
            }
        }

        for card in parsed {
            if self.upsert(card) {
                report.replaced += 1;
            }
            report.loaded += 1;
        }

        log::info!(
            "Imported {} cards from {:?} ({} replaced, {} skipped)",
            report.loaded,
            path,
            report.replaced,
            report.skipped
        );
        Ok(report)
    }

    /// Write every card to `path`, overwriting it. Returns the number written.
    pub fn export(&self, path: &Path) -> Result<usize> {
        let mut content = String::new();
        for card in &self.cards {
            content.push_str(&format_card(card));
            content.push('\n');
        }
        fs::write(path, content)?;

        log::info!("Exported {} cards to {:?}", self.cards.len(), path);
        Ok(self.cards.len())
    }
}
