//! Intent resolution for the heist GM engine.
//!
//! Takes the structured intents a narrator produces, rolls the dice,
//! consults the campaign's rule tables, and applies each beat to the
//! ledger as one transaction. Also hosts the transcript seam (intent
//! extraction and the narration backend trait), the suggestion applier,
//! and the resolution journal.

pub mod config;
pub mod error;
pub mod game_master;
pub mod intent;
pub mod journal;
pub mod orchestrator;
pub mod result;
pub mod suggestion;
pub mod transcript;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use game_master::{GameMaster, StepOutcome};
pub use intent::{ActionProposal, DowntimeProposal, Intent, RollProposal};
pub use journal::{Journal, JournalRecord};
pub use orchestrator::Resolver;
pub use result::{
    ActionResult, ClockProgress, DowntimeAck, EngagementResult, FortuneResult, ResistResult,
    ToolResult,
};
pub use suggestion::{AppliedSuggestion, SuggestionTarget, apply_suggestion};
pub use transcript::{ChatTurn, NarrationBackend, ReplayBackend, extract_intent};
