//! Serializable view models for one point of a timeline.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use lexdiff_diff::{compute_word_diff, inserted_tokens, removed_tokens};
use lexdiff_types::{
    ArticleChange, ArticleDiff, ChangeSet, LawState, StepKind, TimelineStep, VoteRecord,
    WordToken,
};
use serde::Serialize;

/// Step metadata shown alongside a view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    /// Position in the timeline; `None` for the original text.
    pub index: Option<usize>,
    pub reference: String,
    #[serde(rename = "type")]
    pub kind: Option<StepKind>,
    pub date: Option<NaiveDate>,
    pub title: String,
    pub description: String,
    pub votes: Option<VoteRecord>,
    pub has_change_set: bool,
}

impl StepSummary {
    pub(crate) fn of(index: usize, step: &TimelineStep) -> Self {
        Self {
            index: Some(index),
            reference: step.reference.clone(),
            kind: Some(step.kind),
            date: step.date,
            title: step.title.clone(),
            description: step.description.clone(),
            votes: step.votes.clone(),
            has_change_set: step.change_set.is_some(),
        }
    }

    pub(crate) fn original(law: Option<&LawState>) -> Self {
        Self {
            index: None,
            reference: String::new(),
            kind: None,
            date: None,
            title: law.map(|l| l.title.clone()).unwrap_or_default(),
            description: String::new(),
            votes: None,
            has_change_set: false,
        }
    }
}

/// A change-bearing step left out of the cumulative state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedStep {
    pub index: usize,
    pub reference: String,
    pub reason: String,
}

/// The law as of one timeline step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    pub step: StepSummary,
    /// Cumulative state after this step.
    pub law: LawState,
    /// Every article touched up to and including this step, sorted.
    pub changed_article_ids: Vec<String>,
    /// Changes made by this step alone.
    pub diffs: Vec<ArticleDiff>,
    /// Per touched article, its original text against its current text.
    pub accumulated_diffs: BTreeMap<String, Vec<WordToken>>,
    pub is_new_law: bool,
    pub skipped_steps: Vec<SkippedStep>,
    /// Why this step's own diff could not be shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_unavailable: Option<String>,
}

impl TimelineView {
    pub fn original(law: Option<&LawState>) -> Self {
        Self {
            step: StepSummary::original(law),
            law: law.cloned().unwrap_or_default(),
            changed_article_ids: Vec::new(),
            diffs: Vec::new(),
            accumulated_diffs: BTreeMap::new(),
            is_new_law: law.is_none(),
            skipped_steps: Vec::new(),
            diff_unavailable: None,
        }
    }

    /// Returns `true` if this step changed no article.
    pub fn is_unchanged(&self) -> bool {
        self.diffs.is_empty()
    }
}

/// Article diffs for the changes of one step.
///
/// Headings come from the state after the step, then the state before it,
/// then the change itself.
pub(crate) fn local_diffs(
    change_set: &ChangeSet,
    before: &LawState,
    after: &LawState,
    word_diffs: bool,
) -> Vec<ArticleDiff> {
    change_set
        .changes
        .iter()
        .map(|change| {
            let id = change.article();
            let heading = after
                .find(id)
                .or_else(|| before.find(id))
                .map(|a| a.heading.as_str());
            let diff = ArticleDiff::from_change(change, heading);
            if !word_diffs {
                return diff;
            }
            let tokens = match change {
                ArticleChange::Insert { new_text, .. } => inserted_tokens(new_text),
                ArticleChange::Substitute {
                    old_text, new_text, ..
                } => compute_word_diff(old_text, new_text),
                ArticleChange::Repeal { old_text, .. } => removed_tokens(old_text),
            };
            diff.with_word_diff(tokens)
        })
        .collect()
}

/// Word diffs of every touched article between the original and current state.
pub(crate) fn accumulated_diffs(
    original: &LawState,
    current: &LawState,
    touched: &BTreeSet<String>,
) -> BTreeMap<String, Vec<WordToken>> {
    touched
        .iter()
        .filter_map(|id| {
            let tokens = match (original.find(id), current.find(id)) {
                (Some(before), Some(after)) => compute_word_diff(&before.content, &after.content),
                (None, Some(after)) => inserted_tokens(&after.content),
                (Some(before), None) => removed_tokens(&before.content),
                (None, None) => return None,
            };
            Some((id.clone(), tokens))
        })
        .collect()
}
