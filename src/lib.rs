pub mod config;
pub mod flashcards;
pub mod session;

pub use config::{ConfigError, TrainerConfig};
pub use flashcards::{Card, CardStore, CardStoreError, MalformedLines};
pub use session::{Session, SessionError};
