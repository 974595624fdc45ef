// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod display;
pub mod error;
pub mod game_state;
pub mod history;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::HangmanError;
pub use game_state::{
    GameInterface, GameState, GameView, GuessResult, MAX_ATTEMPTS, Outcome, Session, Status,
    UserAction, game_loop,
};
pub use history::Scoreboard;
pub use wordbank::{
    EmbeddedWords, FileWords, UrlWords, Word, WordSource, load_word_list_from_file,
    parse_word_list, pick_word,
};
