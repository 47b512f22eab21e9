//! Cart snapshot - current cart state computed from the event stream

use super::types::{CartLine, LineKey};
use serde::{Deserialize, Serialize};

/// Cart snapshot
///
/// Lines are kept in insertion order: a merge leaves a line in place, a line
/// re-created after deletion goes to the end.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    /// Sequence of the last applied event
    pub last_sequence: u64,
    /// Server timestamp of the last applied event (Unix milliseconds)
    pub updated_at: i64,
}

impl CartSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key == key)
    }

    pub fn get_mut(&mut self, key: &LineKey) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.key == key)
    }

    pub fn contains(&self, key: &LineKey) -> bool {
        self.get(key).is_some()
    }

    /// Lines of one product, oldest first
    pub fn lines_for_product(&self, product_id: i64) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(move |l| l.product_id == product_id)
    }

    /// Drop the line with `key`, returning it
    pub fn remove(&mut self, key: &LineKey) -> Option<CartLine> {
        let pos = self.lines.iter().position(|l| &l.key == key)?;
        Some(self.lines.remove(pos))
    }

    /// Sum of quantities over all lines
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.quantity)).sum()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
