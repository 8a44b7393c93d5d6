//! Article extraction for lexdiff.
//!
//! Turns a hierarchical text tree, already cleaned of source annotations,
//! into a [`LawState`](lexdiff_types::LawState) whose articles carry stable,
//! collision-free identifiers. Permanent articles are numbered `art_<n>`
//! (with an optional Latin suffix), transitory articles live in the disjoint
//! `art_t<n>` space, and Spanish ordinal headings (`Artículo vigésimo
//! primero`) are mapped to numbers. Sections are named after their division
//! designators (`sec_titulo_ii`), not their position.
//!
//! # Key Types
//!
//! - [`SourceDocument`] / [`SourceNode`] -- Input text tree
//! - [`Extraction`] -- Extracted law state plus [`Diagnostic`]s
//! - [`ExtractConfig`] -- Tunables for the embedded-reference guard and default section

pub mod config;
pub mod diagnostic;
pub mod extract;
mod markers;
pub mod ordinal;
pub mod source;

pub use config::ExtractConfig;
pub use diagnostic::Diagnostic;
pub use extract::{extract, extract_with, Extraction};
pub use ordinal::ordinal_to_number;
pub use source::{SourceDocument, SourceNode};
