//! Quiz engine
//!
//! Picks cards uniformly at random (repeats allowed), asks the examinee
//! for the definition and grades the answer against the card. Every wrong
//! answer adds one to that card's mistake counter.

use std::fmt;
use std::io;

use rand::Rng;
use thiserror::Error;

use super::storage::CardStore;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("There are no cards to ask about.")]
    EmptyStore,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result of grading one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong {
        expected: String,
        /// Term of another card whose definition the answer matched
        other_term: Option<String>,
    },
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "Correct answer."),
            Verdict::Wrong {
                expected,
                other_term: None,
            } => write!(f, "Wrong answer. The correct one is \"{}\".", expected),
            Verdict::Wrong {
                expected,
                other_term: Some(term),
            } => write!(
                f,
                "Wrong answer. The correct one is \"{}\", you've just written the definition of \"{}\".",
                expected, term
            ),
        }
    }
}

/// Whoever is being quizzed
pub trait Examinee {
    /// Ask for the definition of `term`. `None` means no more input.
    fn answer(&mut self, term: &str) -> io::Result<Option<String>>;

    /// Tell the examinee how they did
    fn feedback(&mut self, verdict: &Verdict) -> io::Result<()>;
}

/// Tally of a finished (or cut short) quiz
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizSummary {
    pub asked: usize,
    pub correct: usize,
}

pub struct QuizEngine<R> {
    rng: R,
}

impl<R: Rng> QuizEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Index of a uniformly random card
    pub fn pick(&mut self, store: &CardStore) -> Result<usize, QuizError> {
        if store.is_empty() {
            return Err(QuizError::EmptyStore);
        }
        Ok(self.rng.gen_range(0..store.len()))
    }

    /// Grade `answer` against the card at `index`, counting a mistake if wrong.
    /// `index` must be in bounds, as returned by [`QuizEngine::pick`].
    pub fn grade(&self, store: &mut CardStore, index: usize, answer: &str) -> Verdict {
        let card = &store.cards()[index];
        if card.definition == answer {
            return Verdict::Correct;
        }

        let expected = card.definition.clone();
        let other_term = store
            .find_by_definition(answer)
            .map(|other| other.term.clone());
        store.record_mistake(index);

        Verdict::Wrong {
            expected,
            other_term,
        }
    }

    /// Run `rounds` ask-and-check cycles
    pub fn ask<E: Examinee>(
        &mut self,
        store: &mut CardStore,
        rounds: usize,
        examinee: &mut E,
    ) -> Result<QuizSummary, QuizError> {
        if store.is_empty() {
            return Err(QuizError::EmptyStore);
        }

        let mut summary = QuizSummary::default();
        for _ in 0..rounds {
            let index = self.pick(store)?;
            let term = store.cards()[index].term.clone();

            let Some(answer) = examinee.answer(&term)? else {
                log::debug!("Input ended after {} of {} questions", summary.asked, rounds);
                break;
            };

            let verdict = self.grade(store, index, &answer);
            summary.asked += 1;
            if verdict.is_correct() {
                summary.correct += 1;
            }
            examinee.feedback(&verdict)?;
        }

        log::info!(
            "Quiz finished: {}/{} correct",
            summary.correct,
            summary.asked
        );
        Ok(summary)
    }
}
