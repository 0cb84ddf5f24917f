//! Group Partitioner — shuffle-and-chunk team generation
//!
//! Every `generate` call reshuffles the full roster and cuts it into
//! contiguous chunks; previous groups are discarded wholesale, never
//! merged. The input roster is read-only here.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use df_core::{DrawError, DrawResult, Participant, Roster};

use crate::shuffle;

/// One generated group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// 1-based id in partition order
    pub id: u32,
    /// Members in shuffled order
    pub members: Vec<Participant>,
}

/// Grouping settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingSettings {
    /// Target members per group; the UI clamps this to >= 2
    pub group_size: usize,
}

impl Default for GroupingSettings {
    fn default() -> Self {
        Self { group_size: 3 }
    }
}

impl GroupingSettings {
    /// Groups a roster of `roster_len` would split into
    pub fn expected_groups(&self, roster_len: usize) -> usize {
        if roster_len == 0 {
            0
        } else {
            roster_len.div_ceil(self.group_size.max(1))
        }
    }
}

/// Group Partitioner
pub struct GroupPartitioner {
    /// Random number generator
    rng: StdRng,
}

impl GroupPartitioner {
    /// Create with OS-seeded randomness
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Shuffle the roster uniformly and partition it into contiguous
    /// chunks of `group_size`; the last chunk may be short.
    ///
    /// Fails with `EmptyRoster` on an empty roster. Sizes below 2 are a
    /// caller-side validation concern; the partitioner clamps to 1 so
    /// chunking stays well-defined.
    pub fn generate(&mut self, roster: &Roster, group_size: usize) -> DrawResult<Vec<Group>> {
        if roster.is_empty() {
            return Err(DrawError::EmptyRoster);
        }
        let size = group_size.max(1);
        let members = shuffle::shuffled(roster.snapshot(), &mut self.rng);

        let groups: Vec<Group> = members
            .chunks(size)
            .enumerate()
            .map(|(index, chunk)| Group {
                id: index as u32 + 1,
                members: chunk.to_vec(),
            })
            .collect();

        log::debug!(
            "grouping: {} participants into {} groups of {}",
            roster.len(),
            groups.len(),
            size
        );
        Ok(groups)
    }
}

impl Default for GroupPartitioner {
    fn default() -> Self {
        Self::new()
    }
}
