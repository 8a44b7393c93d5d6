//! Change-set application and timeline replay for lexdiff.
//!
//! This crate reconstructs the state of a law at any point of its
//! legislative history. It provides:
//! - Atomic application of a change set, and of a chain of them
//! - The `DocumentStore` boundary for looking up step documents
//! - `InMemoryDocumentStore` for tests and embedding
//! - `TimelineReplayer`, producing per-step cumulative views with local and
//!   accumulated word diffs

pub mod apply;
pub mod config;
pub mod error;
pub mod memory;
pub mod projection;
pub mod store;
pub mod timeline;

pub use apply::{apply_chain, apply_change_set, Applied};
pub use config::{FailurePolicy, ReplayConfig};
pub use error::{ApplyError, ApplyErrorKind, ChainError, ReplayError, StoreError};
pub use memory::InMemoryDocumentStore;
pub use projection::{SkippedStep, StepSummary, TimelineView};
pub use store::DocumentStore;
pub use timeline::{replay_timeline, TimelineReplayer};
