//! Flashcard collection and quiz for a single session
//!
//! This module provides:
//! - Card store (add, remove, lookup, hardest card, statistics reset)
//! - Card file import/export in the `term / definition / mistakes` format
//! - Randomised quiz with mistake tracking

pub mod format;
pub mod models;
pub mod quiz;
pub mod storage;

pub use models::*;
pub use quiz::{Examinee, QuizEngine, QuizError, QuizSummary, Verdict};
pub use storage::{CardStore, CardStoreError};
