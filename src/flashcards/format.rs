//! Line format for card files
//!
//! One card per line, three fields joined by ` / `:
//! ```text
//! capital / Paris / 0
//! author / Orwell / 3
//! ```
//! There is no escaping, so a term or definition containing the
//! delimiter will not survive a round trip.

use thiserror::Error;

use super::models::Card;

pub const FIELD_DELIMITER: &str = " / ";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("expected 3 fields separated by \" / \", found {0}")]
    FieldCount(usize),

    #[error("mistake count \"{0}\" is not a non-negative integer")]
    InvalidMistakes(String),
}

/// Render a card as a single line (without the trailing newline)
pub fn format_card(card: &Card) -> String {
    format!(
        "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
        card.term, card.definition, card.mistakes
    )
}

/// Parse one line back into a card
pub fn parse_card(line: &str) -> Result<Card, ParseCardError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();

    let [term, definition, mistakes] = fields.as_slice() else {
        return Err(ParseCardError::FieldCount(fields.len()));
    };

    let mistakes = mistakes
        .trim()
        .parse::<u32>()
        .map_err(|_| ParseCardError::InvalidMistakes(mistakes.to_string()))?;

    Ok(Card::with_mistakes(
        term.to_string(),
        definition.to_string(),
        mistakes,
    ))
}
