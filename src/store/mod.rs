//! Entity stores backing every studyflow view.
//!
//! All record stores follow one pattern: state is loaded once from the
//! JSON persistence layer at construction (a missing document means an
//! empty collection, a corrupt or unreadable one means an empty
//! collection with the store flagged degraded - never a hard failure),
//! mutations apply to the in-memory collection synchronously, and the
//! full collection is then queued on a per-store [`persister::Persister`]
//! for a detached durability write. Write failures are surfaced as a
//! dismissable warning and never rolled back.
//!
//! The pure state transitions live in per-store `reduce` functions
//! (`enum Action` in, new collection out) so they can be tested without
//! any persistence in the picture.

pub mod assignments;
pub mod courses;
pub mod persister;
pub mod sessions;
pub mod settings;
