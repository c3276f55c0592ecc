/// Interactive commands accepted at the menu prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove,
    Import,
    Export,
    Ask,
    Log,
    HardestCard,
    ResetStats,
    Exit,
    Unknown(String),
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        match line.trim() {
            "add" => Command::Add,
            "remove" => Command::Remove,
            "import" => Command::Import,
            "export" => Command::Export,
            "ask" => Command::Ask,
            "log" => Command::Log,
            "hardest card" => Command::HardestCard,
            "reset stats" => Command::ResetStats,
            "exit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        }
    }
}
