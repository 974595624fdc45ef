use crate::error::{HangmanError, Result};
use crate::history::Scoreboard;
use crate::wordbank::{Word, WordSource, pick_word};
use crate::{debug_log, info_log};
use rand::Rng;
use std::collections::BTreeSet;

pub const MAX_ATTEMPTS: u8 = 10;
pub const PLACEHOLDER: char = '_';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Lifecycle of the [`GameState`] holder. `Initializing` until the first
/// session has been started successfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Initializing,
    InProgress,
    Won,
    Lost,
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::InProgress => Self::InProgress,
            Outcome::Won => Self::Won,
            Outcome::Lost => Self::Lost,
        }
    }
}

/// What a single call to `guess` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessResult {
    /// New letter, present in the word.
    Hit,
    /// New letter, absent from the word; one attempt consumed.
    Miss,
    /// Letter was already guessed this session.
    Repeated,
    /// No session in progress; nothing changed.
    Ignored,
}

impl GuessResult {
    pub fn changed_state(self) -> bool {
        matches!(self, Self::Hit | Self::Miss)
    }
}

fn validate_letter(letter: char) -> Result<()> {
    if letter.is_ascii_uppercase() {
        Ok(())
    } else {
        Err(HangmanError::InvalidGuess(letter))
    }
}

/// One play-through, from start to a terminal outcome.
#[derive(Clone, Debug)]
pub struct Session {
    word: Word,
    guessed: BTreeSet<char>,
    attempts_remaining: u8,
}

impl Session {
    pub fn new(word: Word) -> Self {
        Self {
            word,
            guessed: BTreeSet::new(),
            attempts_remaining: MAX_ATTEMPTS,
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    pub fn wrong_guesses(&self) -> u8 {
        MAX_ATTEMPTS - self.attempts_remaining
    }

    pub fn outcome(&self) -> Outcome {
        if self.attempts_remaining == 0 {
            Outcome::Lost
        } else if self.word.chars().all(|c| self.guessed.contains(&c)) {
            Outcome::Won
        } else {
            Outcome::InProgress
        }
    }

    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| {
                if self.guessed.contains(&c) {
                    c
                } else {
                    PLACEHOLDER
                }
            })
            .collect()
    }

    pub fn guess(&mut self, letter: char) -> Result<GuessResult> {
        validate_letter(letter)?;

        if self.outcome().is_terminal() {
            debug_log!("guess({}) ignored: session already over", letter);
            return Ok(GuessResult::Ignored);
        }

        if !self.guessed.insert(letter) {
            return Ok(GuessResult::Repeated);
        }

        if self.word.contains(letter) {
            Ok(GuessResult::Hit)
        } else {
            self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            Ok(GuessResult::Miss)
        }
    }

    pub fn view(&self) -> GameView {
        let outcome = self.outcome();
        GameView {
            masked: self.masked_word(),
            attempts_remaining: self.attempts_remaining,
            wrong_guesses: self.wrong_guesses(),
            outcome,
            guessed: self.guessed.clone(),
            solution: outcome
                .is_terminal()
                .then(|| self.word.as_str().to_string()),
        }
    }
}

/// Read-only projection handed to the presentation layer after every mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameView {
    pub masked: String,
    pub attempts_remaining: u8,
    pub wrong_guesses: u8,
    pub outcome: Outcome,
    pub guessed: BTreeSet<char>,
    /// The secret word, only once the session is over.
    pub solution: Option<String>,
}

/// Owns the current session. Starting or restarting replaces it wholesale,
/// and only once a new word has been drawn successfully.
#[derive(Debug, Default)]
pub struct GameState {
    session: Option<Session>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start<R: Rng + ?Sized>(&mut self, candidates: &[String], rng: &mut R) -> Result<()> {
        let word = pick_word(candidates, rng)?;
        info_log!("New session with a {}-letter word", word.len());
        self.session = Some(Session::new(word));
        Ok(())
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, candidates: &[String], rng: &mut R) -> Result<()> {
        self.start(candidates, rng)
    }

    /// Loads candidates from `source` and starts a session with them.
    pub fn start_from<S, R>(&mut self, source: &S, rng: &mut R) -> Result<()>
    where
        S: WordSource + ?Sized,
        R: Rng + ?Sized,
    {
        let candidates = source.candidates()?;
        self.start(&candidates, rng)
    }

    pub fn guess(&mut self, letter: char) -> Result<GuessResult> {
        match self.session.as_mut() {
            Some(session) => session.guess(letter),
            None => validate_letter(letter).map(|()| GuessResult::Ignored),
        }
    }

    pub fn status(&self) -> Status {
        self.session
            .as_ref()
            .map_or(Status::Initializing, |s| s.outcome().into())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn view(&self) -> Option<GameView> {
        self.session.as_ref().map(Session::view)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    NewGame,
    Help,
    Exit,
}

/// The presentation side of the game. `game_loop` drives it; implementations
/// only render what they are given and translate input into [`UserAction`]s.
pub trait GameInterface {
    /// `None` means nothing actionable was entered; the loop asks again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_view(&mut self, view: &GameView);
    fn display_guess_result(&mut self, letter: char, result: GuessResult);
    fn display_invalid_guess(&mut self, error: &HangmanError);
    fn display_outcome(&mut self, view: &GameView);
    fn display_start_failure(&mut self, error: &HangmanError);
    fn display_new_game_message(&mut self, source: &str, word_len: usize);
    fn display_help(&mut self);
    fn display_exit_message(&mut self, scoreboard: &Scoreboard);
}

fn begin_session<S, R, I>(game: &mut GameState, source: &S, rng: &mut R, interface: &mut I)
where
    S: WordSource + ?Sized,
    R: Rng + ?Sized,
    I: GameInterface + ?Sized,
{
    match game.start_from(source, rng) {
        Ok(()) => {
            if let Some(session) = game.session() {
                interface.display_new_game_message(&source.describe(), session.word().len());
            }
        }
        Err(e) => {
            log::warn!("Could not start a game from {}: {e}", source.describe());
            interface.display_start_failure(&e);
        }
    }
    if let Some(view) = game.view() {
        interface.display_view(&view);
    }
}

/// Runs sessions until the player exits, returning the finished-session tally.
pub fn game_loop<S, R, I>(source: &S, rng: &mut R, interface: &mut I) -> Scoreboard
where
    S: WordSource + ?Sized,
    R: Rng + ?Sized,
    I: GameInterface + ?Sized,
{
    let mut game = GameState::new();
    let mut scoreboard = Scoreboard::default();

    begin_session(&mut game, source, rng, interface);

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => break,
            UserAction::Help => interface.display_help(),
            UserAction::NewGame => begin_session(&mut game, source, rng, interface),
            UserAction::Guess(letter) => match game.guess(letter) {
                Ok(result) => {
                    interface.display_guess_result(letter, result);
                    if let Some(session) = game.session() {
                        let view = session.view();
                        interface.display_view(&view);
                        if result.changed_state() && view.outcome.is_terminal() {
                            scoreboard.record(session);
                            interface.display_outcome(&view);
                        }
                    }
                }
                Err(e) => interface.display_invalid_guess(&e),
            },
        }
    }

    interface.display_exit_message(&scoreboard);
    scoreboard
}
