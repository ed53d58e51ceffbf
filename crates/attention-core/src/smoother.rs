//! Rolling-window attention smoothing.
//!
//! Keeps the most recent face-present judgments in a fixed-capacity FIFO
//! and reports the share that were focused. Frames without a face never
//! reach the smoother.

use std::collections::VecDeque;

/// Default rolling window length, in face-present frames.
pub const WINDOW_SIZE: usize = 100;

/// Bounded history of focus judgments.
#[derive(Debug, Clone)]
pub struct AttentionSmoother {
    capacity: usize,
    history: VecDeque<bool>,
    focused: usize,
}

impl AttentionSmoother {
    /// Create a smoother with the default window.
    pub fn new() -> Self {
        Self::with_window(WINDOW_SIZE)
    }

    /// Create a smoother keeping the last `window` judgments (at least one).
    pub fn with_window(window: usize) -> Self {
        let capacity = window.max(1);
        Self {
            capacity,
            history: VecDeque::with_capacity(capacity),
            focused: 0,
        }
    }

    /// Append a judgment, evicting the oldest one at capacity, and return the
    /// updated score.
    pub fn update(&mut self, focused: bool) -> f64 {
        if self.history.len() >= self.capacity {
            if let Some(true) = self.history.pop_front() {
                self.focused -= 1;
            }
        }

        self.history.push_back(focused);
        if focused {
            self.focused += 1;
        }

        percent(self.focused, self.history.len())
    }

    /// Focused share of the window in `[0, 100]`, or `None` before the first
    /// judgment.
    pub fn score(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        Some(percent(self.focused, self.history.len()))
    }

    /// Judgments currently in the window, oldest first.
    pub fn history(&self) -> impl Iterator<Item = bool> + '_ {
        self.history.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn focused_count(&self) -> usize {
        self.focused
    }

    /// Drop all judgments.
    pub fn clear(&mut self) {
        self.history.clear();
        self.focused = 0;
    }
}

impl Default for AttentionSmoother {
    fn default() -> Self {
        Self::new()
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    100.0 * part as f64 / whole as f64
}
