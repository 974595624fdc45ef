//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Layout
//! Title, then the gallows drawing next to the masked word, an on-screen
//! letter keyboard (already guessed letters greyed out), a status line and
//! key instructions.
//!
//! # Input
//! Typing a letter guesses it. Arrow keys move the keyboard cursor and ENTER
//! guesses the highlighted letter. While the help screen is shown any key
//! closes it.

use crate::display::{HELP_LINES, KEYBOARD_ROWS, gallows, spaced};
use crate::error::HangmanError;
use crate::game_state::{GameInterface, GameView, GuessResult, Outcome, UserAction};
use crate::history::Scoreboard;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOST_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TuiMode {
    Playing,
    ShowingHelp,
    /// Session finished (or never started) - only new game / quit make sense
    GameOver,
}

/// Position of the highlighted key on the on-screen keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyCursor {
    row: usize,
    col: usize,
}

impl KeyCursor {
    fn letter(self) -> char {
        KEYBOARD_ROWS[self.row]
            .chars()
            .nth(self.col)
            .unwrap_or('A')
    }

    fn row_len(row: usize) -> usize {
        KEYBOARD_ROWS[row].len()
    }

    fn moved(self, code: KeyCode) -> Self {
        let rows = KEYBOARD_ROWS.len();
        let len = Self::row_len(self.row);
        let mut next = self;
        match code {
            KeyCode::Left => next.col = (next.col + len - 1) % len,
            KeyCode::Right => next.col = (next.col + 1) % len,
            KeyCode::Up => next.row = (next.row + rows - 1) % rows,
            KeyCode::Down => next.row = (next.row + 1) % rows,
            _ => {}
        }
        next.col = next.col.min(Self::row_len(next.row) - 1);
        next
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: Option<&'a GameView>,
    mode: TuiMode,
    cursor: KeyCursor,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Maps a key press to a game action for the given mode. Cursor keys are
/// handled by the caller.
fn action_for_key(mode: TuiMode, key: KeyEvent) -> Option<UserAction> {
    if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
        return None;
    }
    match (mode, key.code) {
        (_, KeyCode::Esc) => Some(UserAction::Exit),
        (_, KeyCode::Tab | KeyCode::F(2)) => Some(UserAction::NewGame),
        (_, KeyCode::F(1) | KeyCode::Char('?')) => Some(UserAction::Help),
        (TuiMode::GameOver, KeyCode::Char('n' | 'N')) => Some(UserAction::NewGame),
        (TuiMode::GameOver, _) => None,
        (_, KeyCode::Char(c)) => Some(UserAction::Guess(c.to_ascii_uppercase())),
        _ => None,
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<GameView>,
    mode: TuiMode,
    /// Mode to return to once the help screen is dismissed
    previous_mode: TuiMode,
    cursor: KeyCursor,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            view: None,
            mode: TuiMode::GameOver,
            previous_mode: TuiMode::GameOver,
            cursor: KeyCursor::default(),
            message: String::new(),
            error_message: String::new(),
            status: "Loading word list...".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: self.view.as_ref(),
            mode: self.mode,
            cursor: self.cursor,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Min(11),    // Gallows + word
                Constraint::Length(5),  // Keyboard
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        if ctx.mode == TuiMode::ShowingHelp {
            Self::render_help(f, chunks[1]);
        } else {
            let board = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(16), Constraint::Min(20)])
                .split(chunks[1]);
            Self::render_gallows(f, board[0], ctx.view);
            Self::render_word(f, board[1], ctx);
        }
        Self::render_keyboard(f, chunks[2], ctx.view, ctx.cursor);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.mode);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, view: Option<&GameView>) {
        let wrong = view.map_or(0, |v| v.wrong_guesses);
        let lines: Vec<Line> = gallows(wrong).iter().map(|l| Line::from(*l)).collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Gallows"));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(view) = ctx.view {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(spaced(&view.masked), WORD_STYLE)));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "Guesses left: {}",
                view.attempts_remaining
            )));
            lines.push(Line::from(""));
            match (view.outcome, view.solution.as_deref()) {
                (Outcome::Won, _) => lines.push(Line::from(Span::styled(
                    "Congratulations, you won!",
                    SUCCESS_STYLE,
                ))),
                (Outcome::Lost, Some(word)) => lines.push(Line::from(Span::styled(
                    format!("Game over! The word was {word}"),
                    LOST_STYLE,
                ))),
                _ => {}
            }
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.message, MESSAGE_STYLE)));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Word").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_help(f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = HELP_LINES.iter().map(|l| Line::from(*l)).collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("How to play").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn key_style(letter: char, guessed: &BTreeSet<char>, highlighted: bool) -> Style {
        let style = if guessed.contains(&letter) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Black).bg(Color::White)
        };
        if highlighted {
            style.bg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    fn render_keyboard(f: &mut Frame, area: Rect, view: Option<&GameView>, cursor: KeyCursor) {
        let empty = BTreeSet::new();
        let guessed = view.map_or(&empty, |v| &v.guessed);

        let lines: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .enumerate()
            .map(|(row, letters)| {
                let mut spans = vec![Span::raw("  ")];
                for (col, letter) in letters.chars().enumerate() {
                    let highlighted = cursor == KeyCursor { row, col };
                    spans.push(Span::styled(
                        format!(" {letter} "),
                        Self::key_style(letter, guessed, highlighted),
                    ));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Letters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, mode: TuiMode) {
        let text = match mode {
            TuiMode::Playing => {
                "Type a letter or ARROWS+ENTER to guess | ?: Help | TAB: New game | ESC: Quit"
            }
            TuiMode::ShowingHelp => "Press any key to return to the game",
            TuiMode::GameOver => "N: New Game | ?: Help | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            // Mouse, focus, paste and resize events; resize is picked up by the next draw
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Garbage from terminal escape sequences (alt-tab and friends)
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}, mode={:?}",
            key.code,
            key.modifiers,
            self.mode
        );

        if self.mode == TuiMode::ShowingHelp {
            self.mode = self.previous_mode;
            return Ok(None);
        }

        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = self.cursor.moved(key.code);
                Ok(None)
            }
            KeyCode::Enter if self.mode == TuiMode::Playing => {
                Ok(Some(UserAction::Guess(self.cursor.letter())))
            }
            _ => Ok(action_for_key(self.mode, key)),
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    self.error_message.clear();
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_view(&mut self, view: &GameView) {
        self.mode = if view.outcome.is_terminal() {
            TuiMode::GameOver
        } else {
            TuiMode::Playing
        };
        self.view = Some(view.clone());
        self.draw_or_log();
    }

    fn display_guess_result(&mut self, letter: char, result: GuessResult) {
        self.message = match result {
            GuessResult::Hit => format!("{letter} is in the word!"),
            GuessResult::Miss => format!("No {letter}."),
            GuessResult::Repeated => format!("Already guessed {letter}."),
            GuessResult::Ignored => "No game in progress - press N for a new one.".to_string(),
        };
    }

    fn display_invalid_guess(&mut self, error: &HangmanError) {
        self.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_outcome(&mut self, view: &GameView) {
        self.mode = TuiMode::GameOver;
        self.message.clear();
        self.status = match view.outcome {
            Outcome::Won => "You won! Press N for a new game".to_string(),
            _ => "You lost. Press N for a new game".to_string(),
        };
        self.draw_or_log();
    }

    fn display_start_failure(&mut self, error: &HangmanError) {
        self.error_message = error.to_string();
        self.status = "Could not start a game - press N to retry".to_string();
        if self.view.as_ref().is_none_or(|v| v.outcome.is_terminal()) {
            self.mode = TuiMode::GameOver;
        }
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, source: &str, word_len: usize) {
        self.cursor = KeyCursor::default();
        self.error_message.clear();
        self.message = format!("New word from {source}: {word_len} letters.");
        self.status = "Guess a letter".to_string();
        self.mode = TuiMode::Playing;
    }

    fn display_help(&mut self) {
        if self.mode != TuiMode::ShowingHelp {
            self.previous_mode = self.mode;
        }
        self.mode = TuiMode::ShowingHelp;
        self.draw_or_log();
    }

    fn display_exit_message(&mut self, scoreboard: &Scoreboard) {
        self.message = scoreboard.summary();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
