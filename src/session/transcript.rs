use std::fs;
use std::path::Path;

/// Every line shown to or typed by the user, in order
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn record(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write the transcript to `path`, one entry per line, overwriting it
    pub fn export(&self, path: &Path) -> std::io::Result<()> {
        let mut content = self.lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(path, content)?;
        log::info!("Saved {} transcript lines to {:?}", self.lines.len(), path);
        Ok(())
    }
}
