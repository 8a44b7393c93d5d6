//! Diff engine for lexdiff.
//!
//! Compares two law states article by article, producing typed change sets
//! keyed by article identifier, and aligns article bodies word by word for
//! fine-grained display.
//!
//! # Key Types
//!
//! - [`compute_change_set`] -- Repeal/substitute/insert edit list between two states
//! - [`compute_word_diff`] -- Word runs tagged unchanged/added/removed

pub mod change_set;
pub mod word_diff;

pub use change_set::{compute_change_set, compute_change_set_with_refs};
pub use word_diff::{
    compute_word_diff, has_changes, inserted_tokens, reconstruct_new, reconstruct_old,
    removed_tokens,
};
