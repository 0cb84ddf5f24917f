//! # df-draw — Draw Engine for DrawForge
//!
//! Provides the randomized selection and partition core behind the prize
//! draw and team grouping screens: a three-phase draw state machine over a
//! shrinking or fixed participant pool, prize sequencing, and a fair
//! shuffle-and-chunk group partitioner.
//!
//! ## Features
//!
//! - **Draw Engine**: uniform winner selection with repeat-allowed toggle
//! - **Prize Sequencing**: front-of-queue prize per draw, generic-win fallback
//! - **Roll Timing**: Normal, Turbo, Instant timing profiles for the
//!   rolling animation schedule
//! - **Cancelable Rolls**: token-guarded stop signals, stale timers never
//!   mutate a reset pool
//! - **Group Partitioner**: unbiased shuffle, contiguous equal-size chunks
//!
//! ## Architecture
//!
//! ```text
//! DrawEngine
//!     │
//!     ├── Roster (participants, duplicate detection)
//!     ├── PrizeQueue (award order)
//!     ├── RollTimingConfig (tick cadence, roll duration window)
//!     └── DrawSettings (repeat-allowed flag)
//!           │
//!           v
//!     RollPlan → sample_display() ticks → finish_roll() → DrawRecord
//! ```

pub mod engine;
pub mod grouping;
pub mod record;
pub mod scheduler;
pub mod session;
pub mod shuffle;
pub mod timing;

pub use engine::*;
pub use grouping::*;
pub use record::*;
pub use scheduler::*;
pub use session::*;
pub use shuffle::*;
pub use timing::*;
