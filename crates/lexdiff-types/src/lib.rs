//! Foundation types for lexdiff.
//!
//! This crate provides the data model shared by every other lexdiff crate:
//! the versioned legal document, its canonical article identifiers, the
//! typed edits that transform one document state into another, and the
//! rendering-oriented projections consumed by a display layer.
//!
//! # Key Types
//!
//! - [`LawState`] / [`Section`] / [`Article`] — A full document at one point in time
//! - [`ArticleNumber`] — Parsed form of an article identifier (`art_5bis`, `art_t3`)
//! - [`ArticleChange`] / [`ChangeSet`] — Typed edits keyed by article identifier
//! - [`ArticleDiff`] / [`WordToken`] — Rendering projections of a change
//! - [`TimelineStep`] / [`StepKind`] — Legislative events in chronological order
//! - [`DocumentDigest`] — BLAKE3 content digest of a law state

pub mod article;
pub mod change;
pub mod digest;
pub mod error;
pub mod number;
pub mod text;
pub mod timeline;
pub mod token;

pub use article::{Article, LawState, Section};
pub use change::{ArticleChange, ChangeKind, ChangeSet, SectionRef};
pub use digest::DocumentDigest;
pub use error::TypeError;
pub use number::ArticleNumber;
pub use text::normalize_for_comparison;
pub use timeline::{NamedVote, StepKind, TimelineStep, VoteChoice, VoteRecord};
pub use token::{ArticleDiff, TokenKind, WordToken};
