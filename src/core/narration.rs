//! Narration sink.
//!
//! Components and the execution driver describe what happened in plain
//! sentences ("Paid 3 credits", "Select a target"). Those go to a
//! [`LogSink`] supplied by the host. Diagnostics for developers go through
//! the `log` facade instead and never reach players.

use im::Vector;

/// Receiver for user-visible narration.
pub trait LogSink {
    fn log(&mut self, message: &str);
}

impl LogSink for Vec<String> {
    fn log(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Bounded narration history.
///
/// Oldest lines are dropped once `capacity` is reached. A capacity of zero
/// keeps nothing.
#[derive(Clone, Debug, Default)]
pub struct GameLog {
    entries: Vector<String>,
    capacity: usize,
}

impl GameLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    /// Most recent line.
    #[must_use]
    pub fn last(&self) -> Option<&String> {
        self.entries.last()
    }

    /// Whether any retained line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|line| line.contains(needle))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl LogSink for GameLog {
    fn log(&mut self, message: &str) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message.to_string());
    }
}
