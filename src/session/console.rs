//! Line-oriented terminal I/O that echoes everything into the transcript

use std::io::{self, BufRead, Write};

use super::transcript::Transcript;
use crate::flashcards::{Examinee, Verdict};

pub struct Console<R, W> {
    input: R,
    output: W,
    transcript: Transcript,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Print a line and record it
    pub fn say(&mut self, line: impl Into<String>) -> io::Result<()> {
        let line = line.into();
        writeln!(self.output, "{}", line)?;
        self.transcript.record(line);
        Ok(())
    }

    /// Read one line without its line ending. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let line = buf.trim_end_matches(['\n', '\r']).to_string();
        self.transcript.record(line.clone());
        Ok(Some(line))
    }

    /// Print a question and read the reply
    pub fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        self.say(question)?;
        self.read_line()
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Examinee for Console<R, W> {
    fn answer(&mut self, term: &str) -> io::Result<Option<String>> {
        self.prompt(&format!("Print the definition of \"{}\":", term))
    }

    fn feedback(&mut self, verdict: &Verdict) -> io::Result<()> {
        self.say(verdict.to_string())
    }
}
