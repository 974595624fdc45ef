// Integration tests for the hangman application
// These tests verify that all modules work together correctly

use hangman::cli::CliInterface;
use hangman::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::Cell;
use std::collections::VecDeque;
use std::io::Cursor;

struct FixedWords(Vec<String>);

impl FixedWords {
    fn new(words: &[&str]) -> Self {
        Self(words.iter().map(|w| (*w).to_string()).collect())
    }
}

impl WordSource for FixedWords {
    fn describe(&self) -> String {
        "fixed list".to_string()
    }

    fn candidates(&self) -> Result<Vec<String>, HangmanError> {
        Ok(self.0.clone())
    }
}

/// Serves `words` for the first `healthy_loads` loads, then fails.
struct FlakyWords {
    words: Vec<String>,
    healthy_loads: Cell<usize>,
}

impl WordSource for FlakyWords {
    fn describe(&self) -> String {
        "flaky server".to_string()
    }

    fn candidates(&self) -> Result<Vec<String>, HangmanError> {
        let left = self.healthy_loads.get();
        if left == 0 {
            return Err(HangmanError::unavailable(self.describe(), "connection reset"));
        }
        self.healthy_loads.set(left - 1);
        Ok(self.words.clone())
    }
}

/// Replays scripted actions and records what the loop showed.
#[derive(Default)]
struct ScriptedInterface {
    actions: VecDeque<UserAction>,
    views: Vec<GameView>,
    results: Vec<(char, GuessResult)>,
    outcomes: Vec<Outcome>,
    invalid_guesses: usize,
    start_failures: usize,
    new_games: usize,
    help_shown: usize,
    exited: bool,
}

impl ScriptedInterface {
    fn new(actions: &[UserAction]) -> Self {
        Self {
            actions: actions.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn guesses(letters: &str) -> Vec<UserAction> {
        letters.chars().map(UserAction::Guess).collect()
    }

    fn last_view(&self) -> &GameView {
        self.views.last().expect("at least one view")
    }
}

impl GameInterface for ScriptedInterface {
    fn read_action(&mut self) -> Option<UserAction> {
        Some(self.actions.pop_front().unwrap_or(UserAction::Exit))
    }

    fn display_view(&mut self, view: &GameView) {
        self.views.push(view.clone());
    }

    fn display_guess_result(&mut self, letter: char, result: GuessResult) {
        self.results.push((letter, result));
    }

    fn display_invalid_guess(&mut self, _error: &HangmanError) {
        self.invalid_guesses += 1;
    }

    fn display_outcome(&mut self, view: &GameView) {
        self.outcomes.push(view.outcome);
    }

    fn display_start_failure(&mut self, _error: &HangmanError) {
        self.start_failures += 1;
    }

    fn display_new_game_message(&mut self, _source: &str, _word_len: usize) {
        self.new_games += 1;
    }

    fn display_help(&mut self) {
        self.help_shown += 1;
    }

    fn display_exit_message(&mut self, _scoreboard: &Scoreboard) {
        self.exited = true;
    }
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(2024)
}

#[test]
fn test_winning_game_through_loop() {
    let source = FixedWords::new(&["cat"]);
    let mut ui = ScriptedInterface::new(&ScriptedInterface::guesses("CAT"));
    let board = game_loop(&source, &mut rng(), &mut ui);

    assert_eq!(ui.new_games, 1);
    assert_eq!(ui.outcomes, vec![Outcome::Won]);
    let view = ui.last_view();
    assert_eq!(view.masked, "CAT");
    assert_eq!(view.attempts_remaining, 10);
    assert_eq!(view.solution.as_deref(), Some("CAT"));
    assert_eq!(board.wins(), 1);
    assert!(ui.exited);
}

#[test]
fn test_losing_game_through_loop() {
    let source = FixedWords::new(&["cat"]);
    let mut ui = ScriptedInterface::new(&ScriptedInterface::guesses("BDEFGHIJKL"));
    let board = game_loop(&source, &mut rng(), &mut ui);

    assert_eq!(ui.outcomes, vec![Outcome::Lost]);
    let view = ui.last_view();
    assert_eq!(view.masked, "___");
    assert_eq!(view.attempts_remaining, 0);
    assert_eq!(board.losses(), 1);
}

#[test]
fn test_guesses_after_game_over_are_ignored_and_recorded_once() {
    let source = FixedWords::new(&["cat"]);
    let mut actions = ScriptedInterface::guesses("CATXYZ");
    actions.push(UserAction::Guess('C'));
    let mut ui = ScriptedInterface::new(&actions);
    let board = game_loop(&source, &mut rng(), &mut ui);

    assert_eq!(board.played(), 1);
    assert_eq!(ui.outcomes.len(), 1);
    assert!(
        ui.results[3..]
            .iter()
            .all(|(_, r)| *r == GuessResult::Ignored)
    );
    assert_eq!(ui.last_view().attempts_remaining, 10);
}

#[test]
fn test_invalid_guesses_are_reported_without_state_change() {
    let source = FixedWords::new(&["cat"]);
    let actions = [
        UserAction::Guess('c'),
        UserAction::Guess('3'),
        UserAction::Guess('X'),
    ];
    let mut ui = ScriptedInterface::new(&actions);
    game_loop(&source, &mut rng(), &mut ui);

    assert_eq!(ui.invalid_guesses, 2);
    assert_eq!(ui.results, vec![('X', GuessResult::Miss)]);
    assert_eq!(ui.last_view().attempts_remaining, 9);
}

#[test]
fn test_new_game_mid_session_resets() {
    let source = FixedWords::new(&["cat"]);
    let actions = [
        UserAction::Guess('Q'),
        UserAction::Guess('C'),
        UserAction::NewGame,
    ];
    let mut ui = ScriptedInterface::new(&actions);
    let board = game_loop(&source, &mut rng(), &mut ui);

    assert_eq!(ui.new_games, 2);
    let view = ui.last_view();
    assert_eq!(view.attempts_remaining, MAX_ATTEMPTS);
    assert!(view.guessed.is_empty());
    assert_eq!(view.masked, "___");
    assert_eq!(board.played(), 0);
}

#[test]
fn test_empty_source_leaves_game_initializing() {
    let source = FixedWords::new(&[]);
    let mut ui = ScriptedInterface::new(&[UserAction::Guess('A'), UserAction::Help]);
    game_loop(&source, &mut rng(), &mut ui);

    assert_eq!(ui.start_failures, 1);
    assert!(ui.views.is_empty());
    assert_eq!(ui.results, vec![('A', GuessResult::Ignored)]);
    assert_eq!(ui.help_shown, 1);
}

#[test]
fn test_failed_reload_keeps_current_session() {
    let source = FlakyWords {
        words: vec!["dog".to_string()],
        healthy_loads: Cell::new(1),
    };
    let actions = [
        UserAction::Guess('D'),
        UserAction::NewGame,
        UserAction::Guess('O'),
        UserAction::Guess('G'),
    ];
    let mut ui = ScriptedInterface::new(&actions);
    let board = game_loop(&source, &mut rng(), &mut ui);

    assert_eq!(ui.start_failures, 1);
    assert_eq!(ui.new_games, 1);
    assert_eq!(ui.outcomes, vec![Outcome::Won]);
    assert_eq!(board.records()[0].word, "DOG");
}

#[test]
fn test_cli_interface_plays_full_game() {
    let source = FixedWords::new(&["moon"]);
    let input = "help\nm\nzz\nx\no\nn\n";
    let mut ui = CliInterface::new(Cursor::new(input));
    let board = game_loop(&source, &mut rng(), &mut ui);

    assert_eq!(board.wins(), 1);
    assert_eq!(board.records()[0].wrong_guesses, 1);
}

#[test]
fn test_cli_interface_exits_on_eof_mid_game() {
    let source = FixedWords::new(&["moon"]);
    let mut ui = CliInterface::new(Cursor::new("m\n"));
    let board = game_loop(&source, &mut rng(), &mut ui);
    assert_eq!(board.played(), 0);
}

#[test]
fn test_word_list_file_to_game() {
    use std::fs::File;
    use std::io::Write;

    let path = std::env::temp_dir().join("hangman_integration_words.txt");
    {
        let mut file = File::create(&path).unwrap();
        writeln!(file, "zebra\n\nnot-a-word\n").unwrap();
    }

    let mut game = GameState::new();
    game.start_from(&FileWords(path.clone()), &mut rng()).unwrap();
    let session = game.session().unwrap();
    assert_eq!(session.word().as_str(), "ZEBRA");
    assert_eq!(game.status(), Status::InProgress);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_embedded_dictionary_starts_a_game() {
    let mut game = GameState::new();
    game.start_from(&EmbeddedWords, &mut rng()).unwrap();
    let view = game.view().unwrap();
    assert!(view.masked.chars().all(|c| c == '_'));
    assert_eq!(view.outcome, Outcome::InProgress);
}

fn candidate_lists() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z]{1,12}", 1..20)
}

proptest! {
    #[test]
    fn prop_start_picks_an_uppercased_candidate(candidates in candidate_lists(), seed in any::<u64>()) {
        let mut game = GameState::new();
        let mut rng = StdRng::seed_from_u64(seed);
        game.start(&candidates, &mut rng).unwrap();
        let word = game.session().unwrap().word().to_string();
        prop_assert!(candidates.iter().any(|c| c.to_ascii_uppercase() == word));
        prop_assert_eq!(game.status(), Status::InProgress);
    }

    #[test]
    fn prop_attempts_never_increase_and_terminal_is_final(
        word in "[A-Z]{1,10}",
        guesses in prop::collection::vec(prop::char::range('A', 'Z'), 0..40),
    ) {
        let mut session = Session::new(Word::new(&word).unwrap());
        let mut previous = session.attempts_remaining();
        let mut terminal: Option<GameView> = None;

        for letter in guesses {
            let before = session.view();
            let result = session.guess(letter).unwrap();
            let after = session.view();

            prop_assert!(after.attempts_remaining <= previous);
            previous = after.attempts_remaining;

            if let Some(done) = &terminal {
                prop_assert_eq!(result, GuessResult::Ignored);
                prop_assert_eq!(&after, done);
            } else if before.guessed.contains(&letter) {
                prop_assert_eq!(result, GuessResult::Repeated);
                prop_assert_eq!(&after, &before);
            }

            if after.outcome.is_terminal() && terminal.is_none() {
                terminal = Some(after);
            }
        }
    }

    #[test]
    fn prop_outcome_matches_guessed_set(
        word in "[A-Z]{1,10}",
        guesses in prop::collection::vec(prop::char::range('A', 'Z'), 0..40),
    ) {
        let word = Word::new(&word).unwrap();
        let mut session = Session::new(word.clone());
        for letter in guesses {
            session.guess(letter).unwrap();
        }
        let view = session.view();
        let all_revealed = word.distinct_letters().is_subset(&view.guessed);
        match view.outcome {
            Outcome::Won => prop_assert!(all_revealed && view.attempts_remaining > 0),
            Outcome::Lost => prop_assert_eq!(view.attempts_remaining, 0),
            Outcome::InProgress => prop_assert!(!all_revealed && view.attempts_remaining > 0),
        }
        prop_assert_eq!(view.masked.len(), word.len());
    }
}
