//! Roster — the authoritative ordered participant list
//!
//! Participants are identified by id, not name. Duplicate names are legal
//! and reported, never rejected: the presentation layer blocks progression
//! to the draw/grouping stage until duplicates are resolved or removed.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::id::ParticipantId;
use crate::parse::tokenize;

/// A single draw participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique id (identity)
    pub id: ParticipantId,
    /// Display name (may repeat across participants)
    pub name: String,
}

impl Participant {
    /// Create a participant with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into(),
        }
    }
}

/// Duplicate-name report over a roster snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Occurrence count per distinct name
    pub counts: HashMap<String, usize>,
}

impl DuplicateReport {
    /// True if any name occurs more than once
    pub fn has_duplicates(&self) -> bool {
        self.counts.values().any(|&count| count > 1)
    }

    /// Occurrences of a specific name (0 if absent)
    pub fn count_for(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct names
    pub fn distinct_names(&self) -> usize {
        self.counts.len()
    }
}

/// Ordered participant collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in demo list for quick trials
    pub fn demo() -> Self {
        let names = [
            "王小明", "陳美麗", "林志豪", "張雅婷", "李建國",
            "黃怡君", "吳淑芬", "蔡志偉", "楊家豪", "許雅雯",
            "孫悟空", "魯夫", "鳴人", "炭治郎", "阿尼",
            "Iron Man", "Batman", "Spider-Man", "Wonder Woman", "Thor",
        ];
        Self {
            participants: names.into_iter().map(Participant::new).collect(),
        }
    }

    /// Parse raw text and append one participant per token, in input order.
    ///
    /// Returns the ids of the participants added. Zero usable tokens is a
    /// silent no-op returning an empty vec.
    pub fn add(&mut self, raw: &str) -> Vec<ParticipantId> {
        let added: Vec<Participant> = tokenize(raw).into_iter().map(Participant::new).collect();
        let ids: Vec<ParticipantId> = added.iter().map(|p| p.id).collect();
        if !ids.is_empty() {
            log::debug!("roster: adding {} participants", ids.len());
            self.participants.extend(added);
        }
        ids
    }

    /// Remove the participant with the given id. Returns false if absent.
    pub fn remove(&mut self, id: ParticipantId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        self.participants.len() != before
    }

    /// Remove all participants
    pub fn clear(&mut self) {
        self.participants.clear();
    }

    /// Count name occurrences across the current roster
    pub fn duplicates_by_name(&self) -> DuplicateReport {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for participant in &self.participants {
            *counts.entry(participant.name.clone()).or_insert(0) += 1;
        }
        DuplicateReport { counts }
    }

    /// Keep the first participant per name (by current order), drop the
    /// rest. Returns the number removed.
    pub fn remove_duplicates_by_name(&mut self) -> usize {
        let before = self.participants.len();
        let mut seen: HashSet<String> = HashSet::new();
        self.participants.retain(|p| seen.insert(p.name.clone()));
        let removed = before - self.participants.len();
        if removed > 0 {
            log::debug!("roster: removed {removed} duplicate names");
        }
        removed
    }

    /// Participant count
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterate in roster order
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Look up a participant by id
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Snapshot the full roster as an owned vec
    pub fn snapshot(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    /// Append every participant from another roster, ids preserved
    pub fn merge(&mut self, other: Roster) {
        self.participants.extend(other.participants);
    }
}
