use crate::display::{HELP_LINES, gallows, spaced};
use crate::error::HangmanError;
use crate::game_state::{GameInterface, GameView, GuessResult, Outcome, UserAction};
use crate::history::Scoreboard;
use crate::wordbank::{EmbeddedWords, FileWords, UrlWords, WordSource, default_word_file};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

/// Hangman: guess the word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// URL of a newline-delimited word list, fetched over HTTP
    #[arg(short = 'u', long = "url", conflicts_with = "wordbank_path")]
    pub url: Option<String>,

    /// Timeout for fetching the word list over HTTP
    #[arg(long = "timeout-secs", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Seed for reproducible word selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    /// `--url`, then `--input`, then the per-user dictionary if present,
    /// then the built-in list.
    pub fn word_source(&self) -> Box<dyn WordSource> {
        self.word_source_with_default(default_word_file())
    }

    fn word_source_with_default(&self, default_file: Option<PathBuf>) -> Box<dyn WordSource> {
        if let Some(url) = &self.url {
            return Box::new(
                UrlWords::new(url.clone()).with_timeout(Duration::from_secs(self.timeout_secs)),
            );
        }
        if let Some(path) = &self.wordbank_path {
            return Box::new(FileWords(PathBuf::from(path)));
        }
        match default_file {
            Some(path) if path.is_file() => Box::new(FileWords(path)),
            _ => Box::new(EmbeddedWords),
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

// UI Input/Output functions

pub enum LineInput {
    Action(UserAction),
    Empty,
    Invalid(String),
}

pub fn parse_line(line: &str) -> LineInput {
    let input = line.trim().to_uppercase();
    let mut chars = input.chars();
    match (input.as_str(), chars.next(), chars.next()) {
        ("", ..) => LineInput::Empty,
        ("EXIT" | "QUIT", ..) => LineInput::Action(UserAction::Exit),
        ("NEW" | "NEXT" | "RESTART", ..) => LineInput::Action(UserAction::NewGame),
        ("HELP" | "?", ..) => LineInput::Action(UserAction::Help),
        (_, Some(letter), None) => LineInput::Action(UserAction::Guess(letter)),
        _ => LineInput::Invalid(input.clone()),
    }
}

pub fn read_action<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    println!("\nGuess a letter ('help', 'new' or 'exit'):");
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => Some(UserAction::Exit),
        Ok(_) => match parse_line(&line) {
            LineInput::Action(action) => Some(action),
            LineInput::Empty => None,
            LineInput::Invalid(input) => {
                println!("'{input}' is not a single letter.");
                None
            }
        },
    }
}

pub fn display_view(view: &GameView) {
    for line in gallows(view.wrong_guesses) {
        println!("{line}");
    }
    println!();
    println!("Word: {}", spaced(&view.masked));
    println!("Guesses left: {}", view.attempts_remaining);
    if !view.guessed.is_empty() {
        let guessed: String = view.guessed.iter().collect();
        println!("Guessed: {}", spaced(&guessed));
    }
}

pub fn display_guess_result(letter: char, result: GuessResult) {
    match result {
        GuessResult::Hit => println!("Yes, {letter} is in the word."),
        GuessResult::Miss => println!("No {letter} in the word."),
        GuessResult::Repeated => println!("You already guessed {letter}."),
        GuessResult::Ignored => println!("No game in progress. Type 'new' to start one."),
    }
}

pub fn display_outcome(view: &GameView) {
    let word = view.solution.as_deref().unwrap_or(&view.masked);
    match view.outcome {
        Outcome::Won => println!("Congratulations, you won! The word was {word}."),
        Outcome::Lost => println!("Game over! The word was {word}."),
        Outcome::InProgress => {}
    }
    println!("Type 'new' to play again or 'exit' to quit.");
}

pub fn display_help() {
    for line in HELP_LINES {
        println!("{line}");
    }
}

/// CLI implementation of the `GameInterface` trait, reading one command per line.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_action(&mut self) -> Option<UserAction> {
        read_action(&mut self.reader)
    }

    fn display_view(&mut self, view: &GameView) {
        display_view(view);
    }

    fn display_guess_result(&mut self, letter: char, result: GuessResult) {
        display_guess_result(letter, result);
    }

    fn display_invalid_guess(&mut self, error: &HangmanError) {
        println!("{error}");
    }

    fn display_outcome(&mut self, view: &GameView) {
        display_outcome(view);
    }

    fn display_start_failure(&mut self, error: &HangmanError) {
        println!("Could not start a game: {error}");
        println!("Type 'new' to try again or 'exit' to quit.");
    }

    fn display_new_game_message(&mut self, source: &str, word_len: usize) {
        println!("New game started from {source}. The word has {word_len} letters.");
    }

    fn display_help(&mut self) {
        display_help();
    }

    fn display_exit_message(&mut self, scoreboard: &Scoreboard) {
        println!("{}", scoreboard.summary());
        println!("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn action(line: &str) -> Option<UserAction> {
        match parse_line(line) {
            LineInput::Action(action) => Some(action),
            _ => None,
        }
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.url, None);
        assert_eq!(cli.timeout_secs, 10);
        assert!(!cli.tui);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli =
            Cli::try_parse_from(["hangman", "-i", "words.txt", "--seed", "9", "--tui"]).unwrap();
        assert_eq!(cli.wordbank_path.as_deref(), Some("words.txt"));
        assert_eq!(cli.seed, Some(9));
        assert!(cli.tui);
        assert_eq!(cli.word_source().describe(), "words.txt");
    }

    #[test]
    fn test_url_and_input_conflict() {
        let result = Cli::try_parse_from(["hangman", "-i", "a.txt", "-u", "http://x/words"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_url_source_takes_precedence() {
        let cli =
            Cli::try_parse_from(["hangman", "--url", "http://example.com/dictionary.txt"]).unwrap();
        assert_eq!(cli.word_source().describe(), "http://example.com/dictionary.txt");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;
        let cli = Cli::try_parse_from(["hangman", "--seed", "123"]).unwrap();
        let a: u64 = cli.rng().random();
        let b: u64 = cli.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_line_letters_are_uppercased() {
        assert_eq!(action("a\n"), Some(UserAction::Guess('A')));
        assert_eq!(action("  Z  "), Some(UserAction::Guess('Z')));
    }

    #[test]
    fn test_parse_line_commands() {
        assert_eq!(action("exit"), Some(UserAction::Exit));
        assert_eq!(action("QUIT"), Some(UserAction::Exit));
        assert_eq!(action("new"), Some(UserAction::NewGame));
        assert_eq!(action("Restart"), Some(UserAction::NewGame));
        assert_eq!(action("help"), Some(UserAction::Help));
        assert_eq!(action("?"), Some(UserAction::Help));
    }

    #[test]
    fn test_parse_line_non_letter_single_char_reaches_core() {
        assert_eq!(action("7"), Some(UserAction::Guess('7')));
    }

    #[test]
    fn test_parse_line_rejects_words() {
        assert!(matches!(parse_line("cat"), LineInput::Invalid(s) if s == "CAT"));
        assert!(matches!(parse_line("   \n"), LineInput::Empty));
    }

    #[test]
    fn test_read_action_eof_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(read_action(&mut reader), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_action_invalid_then_valid() {
        let mut reader = Cursor::new("abc\nb\n");
        assert_eq!(read_action(&mut reader), None);
        assert_eq!(read_action(&mut reader), Some(UserAction::Guess('B')));
    }

    #[test]
    fn test_falls_back_to_embedded_without_default_file() {
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        let missing = std::env::temp_dir().join("hangman_no_such_dir/dictionary.txt");
        assert_eq!(cli.word_source_with_default(Some(missing)).describe(), "embedded dictionary");
        assert_eq!(cli.word_source_with_default(None).describe(), "embedded dictionary");
    }

    #[test]
    fn test_default_word_file_used_when_present() {
        let path = std::env::temp_dir().join("hangman_cli_default_dictionary.txt");
        std::fs::write(&path, "lantern\n").unwrap();
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        let source = cli.word_source_with_default(Some(path.clone()));
        assert_eq!(source.describe(), path.display().to_string());
        assert_eq!(source.candidates().unwrap(), vec!["LANTERN".to_string()]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_explicit_input_beats_default_file() {
        let cli = Cli::try_parse_from(["hangman", "-i", "mine.txt"]).unwrap();
        let default = std::env::temp_dir().join("hangman_cli_ignored_default.txt");
        assert_eq!(cli.word_source_with_default(Some(default)).describe(), "mine.txt");
    }
}
