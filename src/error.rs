use thiserror::Error;

/// Errors surfaced by the hangman core.
#[derive(Debug, Error)]
pub enum HangmanError {
    /// The candidate word list could not be obtained.
    #[error("Word list unavailable from {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// The candidate list was empty or an entry was not a usable word.
    #[error("Invalid word list: {0}")]
    InvalidInput(String),

    /// A guess that is not a single uppercase letter A-Z.
    #[error("Invalid guess {0:?}: guesses must be a single letter A-Z")]
    InvalidGuess(char),
}

impl HangmanError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HangmanError>;
