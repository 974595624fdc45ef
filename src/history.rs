//! Tally of the sessions finished during this run. Nothing is written to disk.

use crate::game_state::{Outcome, Session};
use chrono::{DateTime, Local};

const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Clone, Debug)]
pub struct SessionRecord {
    pub word: String,
    pub outcome: Outcome,
    pub wrong_guesses: u8,
    pub finished_at: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct Scoreboard {
    records: Vec<SessionRecord>,
}

impl Scoreboard {
    /// Records a finished session. Sessions still in progress are skipped.
    pub fn record(&mut self, session: &Session) {
        let outcome = session.outcome();
        if !outcome.is_terminal() {
            return;
        }
        self.records.push(SessionRecord {
            word: session.word().to_string(),
            outcome,
            wrong_guesses: session.wrong_guesses(),
            finished_at: Local::now(),
        });
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn played(&self) -> usize {
        self.records.len()
    }

    pub fn wins(&self) -> usize {
        self.count(Outcome::Won)
    }

    pub fn losses(&self) -> usize {
        self.count(Outcome::Lost)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn last_finished(&self) -> Option<DateTime<Local>> {
        self.records.last().map(|r| r.finished_at)
    }

    pub fn summary(&self) -> String {
        match self.last_finished() {
            None => "No games finished.".to_string(),
            Some(last) => format!(
                "Played {}, won {}, lost {}. Last game finished at {}.",
                self.played(),
                self.wins(),
                self.losses(),
                last.format(TIME_FORMAT)
            ),
        }
    }
}
