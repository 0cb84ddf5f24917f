//! Prize queue — ordered prizes awarded front-to-back
//!
//! Queue order is draw sequence: the front prize goes to the next winner
//! and is then consumed. Reordering is adjacent swaps only, mirroring the
//! up/down controls in the prize list.

use serde::{Deserialize, Serialize};

use crate::id::PrizeId;
use crate::parse::tokenize;

/// A single prize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    /// Unique id
    pub id: PrizeId,
    /// Display name
    pub name: String,
}

impl Prize {
    /// Create a prize with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PrizeId::new(),
            name: name.into(),
        }
    }
}

/// Ordered prize collection, front = next award
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrizeQueue {
    prizes: Vec<Prize>,
}

impl PrizeQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw text and append one prize per token, in input order.
    ///
    /// Same tokenization as the roster; zero tokens is a silent no-op.
    pub fn add(&mut self, raw: &str) -> Vec<PrizeId> {
        let added: Vec<Prize> = tokenize(raw).into_iter().map(Prize::new).collect();
        let ids: Vec<PrizeId> = added.iter().map(|p| p.id).collect();
        if !ids.is_empty() {
            log::debug!("prizes: adding {} prizes", ids.len());
            self.prizes.extend(added);
        }
        ids
    }

    /// Remove the prize with the given id. Returns false if absent.
    pub fn remove(&mut self, id: PrizeId) -> bool {
        let before = self.prizes.len();
        self.prizes.retain(|p| p.id != id);
        self.prizes.len() != before
    }

    /// Remove all prizes
    pub fn clear(&mut self) {
        self.prizes.clear();
    }

    /// Swap the prize at `index` with its predecessor. No-op at index 0.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.prizes.len() {
            return false;
        }
        self.prizes.swap(index, index - 1);
        true
    }

    /// Swap the prize at `index` with its successor. No-op at the tail.
    pub fn move_down(&mut self, index: usize) -> bool {
        if self.prizes.len() < 2 || index >= self.prizes.len() - 1 {
            return false;
        }
        self.prizes.swap(index, index + 1);
        true
    }

    /// The prize awarded to the next winner, if any
    pub fn peek_next(&self) -> Option<&Prize> {
        self.prizes.first()
    }

    /// Remove and return the front prize
    pub fn consume_next(&mut self) -> Option<Prize> {
        if self.prizes.is_empty() {
            None
        } else {
            Some(self.prizes.remove(0))
        }
    }

    /// Prize count
    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    /// Iterate in award order
    pub fn iter(&self) -> impl Iterator<Item = &Prize> {
        self.prizes.iter()
    }
}
