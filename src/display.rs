//! Presentation pieces shared by the CLI and the TUI.

use crate::game_state::MAX_ATTEMPTS;

pub const HELP_LINES: [&str; 5] = [
    "Hangman is a guessing game.",
    "A word is chosen at random, and you guess it one letter at a time.",
    "A correct letter is revealed everywhere it appears in the word.",
    "A wrong letter adds another piece to the hangman drawing.",
    "You have 10 wrong guesses before the drawing is complete.",
];

pub const KEYBOARD_ROWS: [&str; 3] = ["ABCDEFGHI", "JKLMNOPQR", "STUVWXYZ"];

const GALLOWS_HEIGHT: usize = 7;

// Each stage adds one piece; index = number of wrong guesses.
#[rustfmt::skip]
const STAGES: [[&str; GALLOWS_HEIGHT]; MAX_ATTEMPTS as usize + 1] = [
    ["", "", "", "", "", "", ""],
    ["", "", "", "", "", "", "=========="],
    ["", "  |", "  |", "  |", "  |", "  |", "=========="],
    ["  +----+", "  |", "  |", "  |", "  |", "  |", "=========="],
    ["  +----+", "  |    |", "  |", "  |", "  |", "  |", "=========="],
    ["  +----+", "  |    |", "  |    O", "  |", "  |", "  |", "=========="],
    ["  +----+", "  |    |", "  |    O", "  |    |", "  |", "  |", "=========="],
    ["  +----+", "  |    |", "  |    O", "  |   /|", "  |", "  |", "=========="],
    ["  +----+", "  |    |", "  |    O", "  |   /|\\", "  |", "  |", "=========="],
    ["  +----+", "  |    |", "  |    O", "  |   /|\\", "  |   /", "  |", "=========="],
    ["  +----+", "  |    |", "  |    O", "  |   /|\\", "  |   / \\", "  |", "=========="],
];

/// The drawing for the given number of wrong guesses, clamped to the last stage.
pub fn gallows(wrong_guesses: u8) -> &'static [&'static str; GALLOWS_HEIGHT] {
    let stage = usize::from(wrong_guesses).min(STAGES.len() - 1);
    &STAGES[stage]
}

/// "C_T" -> "C _ T"
pub fn spaced(masked: &str) -> String {
    let letters: Vec<String> = masked.chars().map(String::from).collect();
    letters.join(" ")
}
