use std::collections::HashMap;

use chess::fen::reduced_key;

/// Occurrence counts of reduced positions (placement, side to move,
/// castling rights, en passant) since the table was last cleared.
#[derive(Debug, Clone, Default)]
pub struct RepetitionTable {
    counts: HashMap<String, u32>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of the position in `fen` and return the
    /// updated count.
    pub fn record(&mut self, fen: &str) -> u32 {
        let count = self.counts.entry(reduced_key(fen)).or_insert(0);
        *count += 1;
        *count
    }

    /// Occurrences of the position in `fen`; move clocks are ignored.
    pub fn count(&self, fen: &str) -> u32 {
        self.counts.get(&reduced_key(fen)).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
