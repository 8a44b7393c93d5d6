//! Word-level diff: align two article bodies word by word.
//!
//! Uses the `similar` crate (Myers diff algorithm) over whitespace-split
//! tokens. Adjacent words of the same kind are merged into one run joined by
//! single spaces; a replaced region is emitted as its removed run followed by
//! its added run.

use lexdiff_types::{TokenKind, WordToken};
use similar::{capture_diff_slices, Algorithm, DiffTag};

/// Compute the word-level diff between two texts.
pub fn compute_word_diff(old: &str, new: &str) -> Vec<WordToken> {
    let old_words: Vec<&str> = old.split_whitespace().collect();
    let new_words: Vec<&str> = new.split_whitespace().collect();

    let mut runs = Runs::default();
    for op in capture_diff_slices(Algorithm::Myers, &old_words, &new_words) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => runs.push(TokenKind::Unchanged, &old_words[old_range]),
            DiffTag::Delete => runs.push(TokenKind::Removed, &old_words[old_range]),
            DiffTag::Insert => runs.push(TokenKind::Added, &new_words[new_range]),
            DiffTag::Replace => {
                runs.push(TokenKind::Removed, &old_words[old_range]);
                runs.push(TokenKind::Added, &new_words[new_range]);
            }
        }
    }
    runs.0
}

/// Diff of a newly created article: its whole text as one added run.
pub fn inserted_tokens(text: &str) -> Vec<WordToken> {
    compute_word_diff("", text)
}

/// Diff of a repealed article: its whole text as one removed run.
pub fn removed_tokens(text: &str) -> Vec<WordToken> {
    compute_word_diff(text, "")
}

/// Rebuild the whitespace-normalized old text.
pub fn reconstruct_old(tokens: &[WordToken]) -> String {
    join_kinds(tokens, TokenKind::Removed)
}

/// Rebuild the whitespace-normalized new text.
pub fn reconstruct_new(tokens: &[WordToken]) -> String {
    join_kinds(tokens, TokenKind::Added)
}

/// Returns `true` if any run is added or removed.
pub fn has_changes(tokens: &[WordToken]) -> bool {
    tokens.iter().any(|t| t.kind != TokenKind::Unchanged)
}

fn join_kinds(tokens: &[WordToken], side: TokenKind) -> String {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Unchanged || t.kind == side)
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Default)]
struct Runs(Vec<WordToken>);

impl Runs {
    fn push(&mut self, kind: TokenKind, words: &[&str]) {
        if words.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(last) if last.kind == kind => {
                last.text.push(' ');
                last.text.push_str(&words.join(" "));
            }
            _ => self.0.push(WordToken::new(words.join(" "), kind)),
        }
    }
}
