//! Presentation position within a pool.
//!
//! The cursor only moves forward, one step per decision. The only way back
//! is a wholesale pool replacement, which resets it to 0 and bumps the pool
//! epoch so in-flight work can tell the pool it started on is gone.

/// Whether anything is left to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Pool is empty or fully consumed
    Empty,
    /// At least one item at or after the cursor
    Active,
}

#[derive(Debug, Clone)]
pub struct SessionCursor<T> {
    pool: Vec<T>,
    cursor: usize,
    window_size: usize,
    epoch: u64,
}

impl<T> SessionCursor<T> {
    /// An empty cursor. A window size of 0 is raised to 1.
    pub fn new(window_size: usize) -> Self {
        Self {
            pool: Vec::new(),
            cursor: 0,
            window_size: window_size.max(1),
            epoch: 0,
        }
    }

    /// Replace the pool wholesale and rewind to its start.
    pub fn replace(&mut self, pool: Vec<T>) {
        self.pool = pool;
        self.cursor = 0;
        self.epoch += 1;
    }

    /// `pool[cursor .. cursor + window_size]`, shorter near the end
    pub fn window(&self) -> &[T] {
        let end = self.cursor.saturating_add(self.window_size).min(self.pool.len());
        &self.pool[self.cursor..end]
    }

    /// The item a decision would apply to
    pub fn current(&self) -> Option<&T> {
        self.pool.get(self.cursor)
    }

    /// Move past the current item. Returns false (and does nothing) when
    /// already `Empty`.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.pool.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> CursorState {
        if self.cursor < self.pool.len() {
            CursorState::Active
        } else {
            CursorState::Empty
        }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn remaining(&self) -> usize {
        self.pool.len() - self.cursor
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of wholesale replacements so far
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
