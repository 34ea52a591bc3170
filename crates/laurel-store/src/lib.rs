//! Laurel Store - Persistence layer for the engagement engine
//!
//! Provides the abstract per-document storage the engine runs against:
//! - `Document` binding record types to collections and keys
//! - `DocumentStore`, the async get/create/update/query contract with
//!   atomic single-document transactions
//! - `UserRecord` and `QuestSetRecord`, the two stored document kinds
//! - `MemoryStore`, the in-process reference implementation

mod document;
mod error;
mod memory;
mod store;

pub use document::{
    AwardedBadge, Document, QuestInstance, QuestSetRecord, UserRecord, QUEST_SET_COLLECTION,
    USER_COLLECTION,
};
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use store::DocumentStore;
