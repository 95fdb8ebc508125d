//! Resolution journal: one record per narrated step.

pub mod entry;
pub mod log;

pub use entry::JournalRecord;
pub use log::Journal;
