//! Quest System Module
//!
//! Quest definitions loaded from the quests file, the per-character quest
//! log, and the accept/complete/abandon operations that tie them together.

pub mod definition;
pub mod ledger;
pub mod registry;
pub mod state;

pub use definition::{NO_PREREQUISITE, QuestDefinition};
pub use ledger::QuestReward;
pub use registry::QuestRegistry;
pub use state::QuestLog;
