//! Rotating "typed" headline.
//!
//! Cycles through a list of phrases: types one character at a time, holds the
//! finished phrase, deletes it faster than it was typed, then moves on to the
//! next phrase (wrapping). Driven by [`Typewriter::poll`] from the frame loop.

use std::time::{Duration, Instant};

use crate::config::TypingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Holding,
    Deleting,
}

#[derive(Debug)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    phrase_index: usize,
    shown: usize,
    phase: Phase,
    next_at: Instant,
    text: String,
    type_delay: Duration,
    delete_delay: Duration,
    hold_delay: Duration,
}

impl Typewriter {
    /// The first character appears on the first poll at or after `now`.
    pub fn new(config: &TypingConfig, now: Instant) -> Self {
        Self {
            phrases: config.phrases.iter().map(|p| p.chars().collect()).collect(),
            phrase_index: 0,
            shown: 0,
            phase: Phase::Typing,
            next_at: now,
            text: String::new(),
            type_delay: Duration::from_millis(config.type_ms),
            delete_delay: Duration::from_millis(config.delete_ms),
            hold_delay: Duration::from_millis(config.hold_ms),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    /// Advance at most one step. Returns `true` if the text changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.phrases.is_empty() || now < self.next_at {
            return false;
        }

        let delay = self.step();
        self.next_at = now + delay;

        let text: String = self.phrases[self.phrase_index][..self.shown].iter().collect();
        if text != self.text {
            self.text = text;
            true
        } else {
            false
        }
    }

    fn step(&mut self) -> Duration {
        let len = self.phrases[self.phrase_index].len();
        match self.phase {
            Phase::Typing => {
                if self.shown < len {
                    self.shown += 1;
                }
                if self.shown >= len {
                    self.phase = Phase::Holding;
                    self.hold_delay
                } else {
                    self.type_delay
                }
            }
            Phase::Holding => {
                self.phase = Phase::Deleting;
                self.delete_one()
            }
            Phase::Deleting => self.delete_one(),
        }
    }

    fn delete_one(&mut self) -> Duration {
        self.shown = self.shown.saturating_sub(1);
        if self.shown == 0 {
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            self.phase = Phase::Typing;
            self.type_delay
        } else {
            self.delete_delay
        }
    }
}
