//! Session state: current view plus the shuffled play queue.

use crate::model::{shuffle, Catalog, WordModule};
use rand::Rng;
use std::sync::Arc;

/// Top-level view of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Entry screen.
    #[default]
    Lobby,
    /// Words are being played.
    Playing,
}

/// Result of trying to move to the next word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The next word was displayed.
    Advanced,
    /// The queue is exhausted; nothing changed.
    NoMoreWords,
}

/// View, queue and progress counters. Pure data, reset on every session start.
///
/// Invariant: `played_count == cursor` after every successful advance, and
/// `cursor <= queue.len()`.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    view: View,
    queue: Vec<Arc<WordModule>>,
    cursor: usize,
    played_count: usize,
    finished: bool,
}

impl SessionState {
    /// Lobby with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view.
    pub fn view(&self) -> View {
        self.view
    }

    pub(crate) fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Shuffle the whole catalog into a fresh queue and zero the counters.
    pub fn start<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) {
        self.queue = catalog.words().to_vec();
        shuffle(&mut self.queue, rng);
        self.cursor = 0;
        self.played_count = 0;
        self.finished = false;
    }

    /// Word at the cursor, if the queue is not exhausted.
    pub fn upcoming(&self) -> Option<&Arc<WordModule>> {
        self.queue.get(self.cursor)
    }

    /// Record that the word at the cursor was displayed.
    pub(crate) fn record_played(&mut self) {
        debug_assert!(self.cursor < self.queue.len());
        self.cursor += 1;
        self.played_count += 1;
    }

    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }

    /// The session's queue order.
    pub fn queue(&self) -> &[Arc<WordModule>] {
        &self.queue
    }

    /// Ids in queue order.
    pub fn queue_ids(&self) -> Vec<&str> {
        self.queue.iter().map(|w| w.id()).collect()
    }

    /// Index of the next word to play.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Words displayed so far this session.
    pub fn played_count(&self) -> usize {
        self.played_count
    }

    /// Words left in the queue.
    pub fn remaining(&self) -> usize {
        self.queue.len() - self.cursor
    }

    /// Whether every queued word has been played.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.queue.len()
    }

    /// Whether the end-of-session summary has been shown.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
