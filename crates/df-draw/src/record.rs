//! Draw records and prize awards

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use df_core::{Participant, Prize};

/// What a winner receives
///
/// Captured from the front of the prize queue when the roll starts; when
/// the queue is empty at that moment the draw still proceeds and awards a
/// generic win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrizeAward {
    /// A named prize from the queue
    Prize(Prize),
    /// Generic win, no prize attached
    Generic,
}

impl PrizeAward {
    /// Display label for the award
    pub fn label(&self) -> &str {
        match self {
            Self::Prize(prize) => &prize.name,
            Self::Generic => "generic win",
        }
    }

    /// True when no named prize was attached
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Generic)
    }
}

/// One completed draw
///
/// Immutable once created. The engine appends records chronologically
/// (oldest first); display layers reverse for most-recent-first lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// The winner
    pub participant: Participant,
    /// The award attached to this draw
    pub award: PrizeAward,
    /// When the winner was selected
    pub drawn_at: DateTime<Utc>,
}

impl DrawRecord {
    /// Create a record stamped with the current time
    pub fn new(participant: Participant, award: PrizeAward) -> Self {
        Self {
            participant,
            award,
            drawn_at: Utc::now(),
        }
    }
}
