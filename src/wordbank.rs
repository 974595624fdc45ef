use crate::error::{HangmanError, Result};
use crate::info_log;
use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/dictionary.txt");

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The secret word of one session: non-empty, uppercase, A-Z only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HangmanError::InvalidInput("blank word".to_string()));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(HangmanError::InvalidInput(format!(
                "word {trimmed:?} contains non-letter characters"
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    pub fn distinct_letters(&self) -> BTreeSet<char> {
        self.0.chars().collect()
    }
}

impl FromStr for Word {
    type Err = HangmanError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draws one candidate uniformly at random and normalizes it to uppercase.
pub fn pick_word<R: Rng + ?Sized>(candidates: &[String], rng: &mut R) -> Result<Word> {
    if candidates.is_empty() {
        return Err(HangmanError::InvalidInput(
            "candidate list is empty".to_string(),
        ));
    }
    let index = rng.random_range(0..candidates.len());
    Word::new(&candidates[index])
}

pub fn parse_word_list(data: &str) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_uppercase())
        .filter(|word| !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()))
        .collect()
}

pub fn load_word_list_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .map_err(|e| HangmanError::unavailable(path.display().to_string(), e))?;
    Ok(parse_word_list(&data))
}

/// `<config dir>/hangman/dictionary.txt`, if the platform has a config dir.
pub fn default_word_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hangman").join("dictionary.txt"))
}

/// Anything that can produce the candidate list for a new session.
pub trait WordSource {
    fn describe(&self) -> String;
    fn candidates(&self) -> Result<Vec<String>>;
}

/// The dictionary compiled into the binary.
pub struct EmbeddedWords;

impl WordSource for EmbeddedWords {
    fn describe(&self) -> String {
        "embedded dictionary".to_string()
    }

    fn candidates(&self) -> Result<Vec<String>> {
        Ok(parse_word_list(EMBEDDED_WORDBANK))
    }
}

pub struct FileWords(pub PathBuf);

impl WordSource for FileWords {
    fn describe(&self) -> String {
        self.0.display().to_string()
    }

    fn candidates(&self) -> Result<Vec<String>> {
        info_log!("Loading word list from {}", self.0.display());
        load_word_list_from_file(&self.0)
    }
}

/// A plain-text word list served over HTTP.
pub struct UrlWords {
    pub url: String,
    pub timeout: Duration,
}

impl UrlWords {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl WordSource for UrlWords {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn candidates(&self) -> Result<Vec<String>> {
        info_log!("Fetching word list from {}", self.url);
        let unavailable = |e: reqwest::Error| HangmanError::unavailable(self.url.clone(), e);
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(unavailable)?;
        let body = client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(unavailable)?;
        Ok(parse_word_list(&body))
    }
}
