//! Interactive command loop
//!
//! A session owns the card store, the quiz engine and the console. Every
//! command reports its outcome as a printed line; only console I/O
//! failures end the session early.

mod command;
mod console;
mod transcript;

use std::io::{self, BufRead, Write};
use std::path::Path;

use rand::Rng;
use thiserror::Error;

use crate::flashcards::{CardStore, CardStoreError, MalformedLines, QuizEngine, QuizError};

pub use command::Command;
pub use console::Console;
pub use transcript::Transcript;

pub const MENU: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Console error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Whether the command loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub struct Session<R, W, G> {
    store: CardStore,
    quiz: QuizEngine<G>,
    console: Console<R, W>,
    malformed: MalformedLines,
}

impl<R: BufRead, W: Write, G: Rng> Session<R, W, G> {
    pub fn new(input: R, output: W, rng: G) -> Self {
        Self {
            store: CardStore::new(),
            quiz: QuizEngine::new(rng),
            console: Console::new(input, output),
            malformed: MalformedLines::default(),
        }
    }

    /// Choose how imports treat lines that do not parse
    pub fn with_malformed_lines(mut self, malformed: MalformedLines) -> Self {
        self.malformed = malformed;
        self
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CardStore {
        &mut self.store
    }

    pub fn transcript(&self) -> &Transcript {
        self.console.transcript()
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Run the command loop until `exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        log::debug!("Session started with {} cards", self.store.len());

        loop {
            let Some(line) = self.console.prompt(MENU)? else {
                break;
            };

            let command = Command::from(line.as_str());

            if self.dispatch(command)? == Flow::Stop {
                break;
            }
            self.console.say("")?;
        }

        log::debug!("Session ended with {} cards", self.store.len());
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Add => self.add(),
            Command::Remove => self.remove(),
            Command::Import => self.import_prompted(),
            Command::Export => self.export_prompted(),
            Command::Ask => self.ask(),
            Command::Log => self.save_log(),
            Command::HardestCard => self.hardest_card(),
            Command::ResetStats => self.reset_stats(),
            Command::Exit => {
                self.console.say("Bye bye!")?;
                Ok(Flow::Stop)
            }
            Command::Unknown(input) => {
                log::debug!("Unrecognised command {:?}", input);
                self.console.say("Sorry, are you sure?")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(term) = self.console.prompt("The card:")? else {
            return Ok(Flow::Stop);
        };
        if self.store.find_by_term(&term).is_some() {
            self.console
                .say(CardStoreError::DuplicateTerm(term).to_string())?;
            return Ok(Flow::Continue);
        }

        let Some(definition) = self.console.prompt("The definition of the card:")? else {
            return Ok(Flow::Stop);
        };

        let message = match self.store.add(term, definition) {
            Ok(card) => format!(
                "The pair (\"{}\":\"{}\") has been added.",
                card.term, card.definition
            ),
            Err(e) => e.to_string(),
        };
        self.console.say(message)?;
        Ok(Flow::Continue)
    }

    fn remove(&mut self) -> Result<Flow> {
        let Some(term) = self.console.prompt("The card:")? else {
            return Ok(Flow::Stop);
        };

        let message = match self.store.remove(&term) {
            Ok(_) => "The card has been removed.".to_string(),
            Err(e) => e.to_string(),
        };
        self.console.say(message)?;
        Ok(Flow::Continue)
    }

    fn import_prompted(&mut self) -> Result<Flow> {
        let Some(file_name) = self.console.prompt("File name:")? else {
            return Ok(Flow::Stop);
        };
        self.import_file(Path::new(&file_name))?;
        Ok(Flow::Continue)
    }

    fn export_prompted(&mut self) -> Result<Flow> {
        let Some(file_name) = self.console.prompt("File name:")? else {
            return Ok(Flow::Stop);
        };
        self.export_file(Path::new(&file_name))?;
        Ok(Flow::Continue)
    }

    /// Load a card file and report how many records were read
    pub fn import_file(&mut self, path: &Path) -> Result<()> {
        let message = match self.store.import(path, self.malformed) {
            Ok(report) => format!("{} cards have been loaded.", report.loaded),
            Err(e) => e.to_string(),
        };
        self.console.say(message)?;
        Ok(())
    }

    /// Save every card and report how many were written
    pub fn export_file(&mut self, path: &Path) -> Result<()> {
        let message = match self.store.export(path) {
            Ok(count) => format!("{} cards have been saved.", count),
            Err(e) => {
                log::error!("Failed to export cards to {:?}: {}", path, e);
                format!("Could not write \"{}\": {}", path.display(), e)
            }
        };
        self.console.say(message)?;
        Ok(())
    }

    fn ask(&mut self) -> Result<Flow> {
        let Some(reply) = self.console.prompt("How many times to ask?")? else {
            return Ok(Flow::Stop);
        };
        let Ok(rounds) = reply.trim().parse::<usize>() else {
            self.console
                .say(format!("\"{}\" is not a valid number of questions.", reply))?;
            return Ok(Flow::Continue);
        };

        match self.quiz.ask(&mut self.store, rounds, &mut self.console) {
            Ok(summary) if summary.asked < rounds => Ok(Flow::Stop),
            Ok(_) => Ok(Flow::Continue),
            Err(QuizError::EmptyStore) => {
                self.console.say(QuizError::EmptyStore.to_string())?;
                Ok(Flow::Continue)
            }
            Err(QuizError::Io(e)) => Err(e.into()),
        }
    }

    fn save_log(&mut self) -> Result<Flow> {
        let Some(file_name) = self.console.prompt("File name:")? else {
            return Ok(Flow::Stop);
        };
        let path = Path::new(&file_name);

        let message = match self.console.transcript().export(path) {
            Ok(()) => "The log has been saved.".to_string(),
            Err(e) => {
                log::error!("Failed to save transcript to {:?}: {}", path, e);
                format!("Could not write \"{}\": {}", path.display(), e)
            }
        };
        self.console.say(message)?;
        Ok(Flow::Continue)
    }

    fn hardest_card(&mut self) -> Result<Flow> {
        let message = match self.store.hardest() {
            None => "There are no cards with errors.".to_string(),
            Some(hardest) if hardest.terms.len() == 1 => format!(
                "The hardest card is {}. You have {} errors answering it.",
                hardest.quoted_terms(),
                hardest.mistakes
            ),
            Some(hardest) => format!(
                "The hardest cards are {}. You have {} errors answering them.",
                hardest.quoted_terms(),
                hardest.mistakes
            ),
        };
        self.console.say(message)?;
        Ok(Flow::Continue)
    }

    fn reset_stats(&mut self) -> Result<Flow> {
        self.store.reset_stats();
        self.console.say("Card statistics has been reset.")?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::Card;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    type TestSession = Session<Cursor<String>, Vec<u8>, StdRng>;

    fn session(input: &str) -> TestSession {
        Session::new(
            Cursor::new(input.to_string()),
            Vec::new(),
            StdRng::seed_from_u64(42),
        )
    }

    fn seed_cards(session: &mut TestSession, cards: &[(&str, &str, u32)]) {
        for (term, definition, mistakes) in cards {
            session.store_mut().upsert(Card::with_mistakes(
                term.to_string(),
                definition.to_string(),
                *mistakes,
            ));
        }
    }

    fn output(session: TestSession) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn test_add_and_exit() {
        let mut s = session("add\ncapital\nParis\nexit\n");
        s.run().unwrap();

        assert_eq!(s.store().len(), 1);
        assert_eq!(
            s.transcript().lines(),
            &[
                MENU,
                "add",
                "The card:",
                "capital",
                "The definition of the card:",
                "Paris",
                "The pair (\"capital\":\"Paris\") has been added.",
                "",
                MENU,
                "exit",
                "Bye bye!",
            ]
        );
    }

    #[test]
    fn test_add_duplicate_term_stops_early() {
        let mut s = session("add\ncapital\nexit\n");
        seed_cards(&mut s, &[("capital", "Paris", 0), ("author", "Orwell", 0)]);
        s.run().unwrap();

        assert_eq!(s.store().len(), 2);
        assert_eq!(s.store().find_by_term("capital").unwrap().definition, "Paris");
        assert!(s
            .transcript()
            .lines()
            .contains(&"The card \"capital\" already exists.".to_string()));
    }

    #[test]
    fn test_add_duplicate_definition() {
        let mut s = session("add\ncity\nParis\nexit\n");
        seed_cards(&mut s, &[("capital", "Paris", 0)]);
        s.run().unwrap();

        assert_eq!(s.store().len(), 1);
        assert!(output(s).contains("The definition \"Paris\" already exists.\n"));
    }

    #[test]
    fn test_remove_messages() {
        let mut s = session("remove\ncapital\nremove\ncapital\nexit\n");
        seed_cards(&mut s, &[("capital", "Paris", 0)]);
        s.run().unwrap();

        assert!(s.store().is_empty());
        let out = output(s);
        assert!(out.contains("The card has been removed.\n"));
        assert!(out.contains("Can't remove \"capital\": there is no such card.\n"));
    }

    #[test]
    fn test_unknown_command() {
        let mut s = session("dance\nexit\n");
        s.run().unwrap();
        assert_eq!(
            s.transcript().lines(),
            &[MENU, "dance", "Sorry, are you sure?", "", MENU, "exit", "Bye bye!"]
        );
    }

    #[test]
    fn test_end_of_input_ends_loop() {
        let mut s = session("add\ncapital\n");
        s.run().unwrap();
        assert!(s.store().is_empty());
        assert_eq!(s.transcript().lines().last().unwrap(), "The definition of the card:");
    }

    #[test]
    fn test_hardest_card_messages() {
        let mut s = session("hardest card\nexit\n");
        seed_cards(&mut s, &[("a", "1", 2), ("b", "2", 2), ("c", "3", 0)]);
        s.run().unwrap();
        assert!(output(s)
            .contains("The hardest cards are \"a\", \"b\". You have 2 errors answering them.\n"));

        let mut s = session("hardest card\nexit\n");
        seed_cards(&mut s, &[("a", "1", 1), ("b", "2", 3)]);
        s.run().unwrap();
        assert!(output(s).contains("The hardest card is \"b\". You have 3 errors answering it.\n"));
    }

    #[test]
    fn test_reset_stats_then_hardest() {
        let mut s = session("reset stats\nhardest card\nexit\n");
        seed_cards(&mut s, &[("a", "1", 4)]);
        s.run().unwrap();

        assert_eq!(s.store().cards()[0].mistakes, 0);
        let out = output(s);
        assert!(out.contains("Card statistics has been reset.\n"));
        assert!(out.contains("There are no cards with errors.\n"));
    }

    #[test]
    fn test_ask_single_card() {
        let mut s = session("ask\n2\nParis\nLondon\nexit\n");
        seed_cards(&mut s, &[("capital", "Paris", 0)]);
        s.run().unwrap();

        assert_eq!(s.store().cards()[0].mistakes, 1);
        let out = output(s);
        assert!(out.contains("Print the definition of \"capital\":\n"));
        assert!(out.contains("Correct answer.\n"));
        assert!(out.contains("Wrong answer. The correct one is \"Paris\".\n"));
    }

    #[test]
    fn test_ask_mentions_other_card() {
        // With one answer per question that always names "author", the
        // "author" card itself is graded correct and "capital" is graded wrong.
        let mut s = session("ask\n6\nOrwell\nOrwell\nOrwell\nOrwell\nOrwell\nOrwell\nexit\n");
        seed_cards(&mut s, &[("capital", "Paris", 0), ("author", "Orwell", 0)]);
        s.run().unwrap();

        let capital_misses = s.store().find_by_term("capital").unwrap().mistakes;
        assert_eq!(s.store().find_by_term("author").unwrap().mistakes, 0);
        let mention = "Wrong answer. The correct one is \"Paris\", you've just written the definition of \"author\".";
        let mentions = s
            .transcript()
            .lines()
            .iter()
            .filter(|l| l.as_str() == mention)
            .count();
        assert_eq!(mentions as u32, capital_misses);
    }

    #[test]
    fn test_ask_rejects_bad_count() {
        let mut s = session("ask\nmany\nexit\n");
        seed_cards(&mut s, &[("capital", "Paris", 0)]);
        s.run().unwrap();
        assert!(output(s).contains("\"many\" is not a valid number of questions.\n"));
    }

    #[test]
    fn test_ask_empty_store() {
        let mut s = session("ask\n3\nexit\n");
        s.run().unwrap();
        let out = output(s);
        assert!(out.contains("There are no cards to ask about.\n"));
        assert!(out.ends_with("Bye bye!\n"));
    }

    #[test]
    fn test_export_and_import_commands() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cards.txt");
        let path_str = path.to_str().unwrap();

        let mut s = session(&format!("export\n{path_str}\nexit\n"));
        seed_cards(&mut s, &[("a", "1", 2), ("b", "2", 0)]);
        s.run().unwrap();
        assert!(output(s).contains("2 cards have been saved.\n"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a / 1 / 2\nb / 2 / 0\n");

        let mut s = session(&format!("import\n{path_str}\nexit\n"));
        s.run().unwrap();
        assert_eq!(s.store().len(), 2);
        assert_eq!(s.store().find_by_term("a").unwrap().mistakes, 2);
        assert!(output(s).contains("2 cards have been loaded.\n"));
    }

    #[test]
    fn test_import_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");
        let mut s = session(&format!("import\n{}\nexit\n", path.display()));
        s.run().unwrap();
        assert!(output(s).contains("File not found.\n"));
    }

    #[test]
    fn test_import_malformed_policies() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cards.txt");
        fs::write(&path, "a / 1 / 0\nb / 2 / x\n").unwrap();

        let mut s = session("exit\n");
        s.import_file(&path).unwrap();
        assert!(s.store().is_empty());
        assert!(output(s).contains("Line 2 is malformed"));

        let mut s = session("exit\n").with_malformed_lines(MalformedLines::Skip);
        s.import_file(&path).unwrap();
        assert_eq!(s.store().len(), 1);
        assert!(output(s).contains("1 cards have been loaded.\n"));
    }

    #[test]
    fn test_log_command_writes_transcript() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("log.txt");

        let mut s = session(&format!("hello\nlog\n{}\nexit\n", path.display()));
        s.run().unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        let expected = format!(
            "{MENU}\nhello\nSorry, are you sure?\n\n{MENU}\nlog\nFile name:\n{}\n",
            path.display()
        );
        assert_eq!(saved, expected);
        assert!(s
            .transcript()
            .lines()
            .contains(&"The log has been saved.".to_string()));
    }
}
