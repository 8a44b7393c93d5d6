//! Timeline replay.
//!
//! Replaying to step `k` walks steps `0..=k` in order. Bills and amendments
//! contribute their change set; every other step only occupies a position.
//! The cumulative state after step `k`, the step's own diff, and the diff of
//! every touched article against the original text make up the
//! [`TimelineView`].

use std::collections::BTreeSet;

use lexdiff_diff::compute_change_set_with_refs;
use lexdiff_types::{ChangeSet, LawState, TimelineStep};
use tracing::{debug, info, warn};

use crate::apply::apply_change_set;
use crate::config::{FailurePolicy, ReplayConfig};
use crate::error::ReplayError;
use crate::projection::{accumulated_diffs, local_diffs, SkippedStep, StepSummary, TimelineView};
use crate::store::DocumentStore;

/// Replays a timeline over an optional original text.
///
/// Each call to [`replay`](Self::replay) starts again from a clone of the
/// original, so calls are independent and may run concurrently.
pub struct TimelineReplayer<'a> {
    original: Option<&'a LawState>,
    steps: &'a [TimelineStep],
    store: Option<&'a dyn DocumentStore>,
    config: ReplayConfig,
}

impl<'a> TimelineReplayer<'a> {
    pub fn new(original: Option<&'a LawState>, steps: &'a [TimelineStep]) -> Self {
        Self {
            original,
            steps,
            store: None,
            config: ReplayConfig::default(),
        }
    }

    /// Look up step documents here when a step carries no change set.
    pub fn with_store(mut self, store: &'a dyn DocumentStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: ReplayConfig) -> Self {
        self.config = config;
        self
    }

    /// The view before any event: the original text, unchanged.
    pub fn original_view(&self) -> TimelineView {
        TimelineView::original(self.original)
    }

    /// Replay up to and including step `target`.
    pub fn replay(&self, target: usize) -> Result<TimelineView, ReplayError> {
        let Some(step) = self.steps.get(target) else {
            return Err(ReplayError::StepOutOfRange {
                target,
                len: self.steps.len(),
            });
        };

        let Some(original) = self.original else {
            return self.new_law_view(target, step);
        };

        let mut current = original.clone();
        let mut touched = BTreeSet::new();
        let mut skipped_steps = Vec::new();
        let mut local: Option<(ChangeSet, LawState)> = None;
        let mut diff_unavailable = None;

        for (index, step) in self.steps[..=target].iter().enumerate() {
            if !step.carries_changes() {
                continue;
            }

            let Some(change_set) = self.change_set_for(step, &current)? else {
                debug!(index, reference = %step.reference, "step has no change set or document");
                if index == target {
                    diff_unavailable = Some("no change set or document for this step".to_string());
                }
                continue;
            };

            match apply_change_set(&current, &change_set) {
                Ok(applied) => {
                    info!(
                        index,
                        reference = %step.reference,
                        changes = change_set.len(),
                        "replayed step"
                    );
                    touched.extend(applied.touched);
                    let before = std::mem::replace(&mut current, applied.result);
                    if index == target {
                        local = Some((change_set, before));
                    }
                }
                Err(source) => match self.config.failure_policy {
                    FailurePolicy::Abort => {
                        return Err(ReplayError::Inconsistent {
                            index,
                            reference: step.reference.clone(),
                            source,
                        });
                    }
                    FailurePolicy::SkipStep => {
                        warn!(index, reference = %step.reference, error = %source, "skipping step");
                        if index == target {
                            diff_unavailable = Some(source.to_string());
                        }
                        skipped_steps.push(SkippedStep {
                            index,
                            reference: step.reference.clone(),
                            reason: source.to_string(),
                        });
                    }
                },
            }
        }

        let diffs = match &local {
            Some((change_set, before)) => {
                local_diffs(change_set, before, &current, self.config.word_diffs)
            }
            None => Vec::new(),
        };

        Ok(TimelineView {
            step: StepSummary::of(target, step),
            accumulated_diffs: accumulated_diffs(original, &current, &touched),
            changed_article_ids: touched.into_iter().collect(),
            law: current,
            diffs,
            is_new_law: false,
            skipped_steps,
            diff_unavailable,
        })
    }

    /// Replay several targets concurrently. Results are in `targets` order.
    ///
    /// At most one thread per available core runs at a time.
    pub fn replay_many(&self, targets: &[usize]) -> Vec<Result<TimelineView, ReplayError>> {
        let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
        self.replay_chunked(targets, workers)
    }

    fn replay_chunked(
        &self,
        targets: &[usize],
        workers: usize,
    ) -> Vec<Result<TimelineView, ReplayError>> {
        let mut results = Vec::with_capacity(targets.len());
        for chunk in targets.chunks(workers.max(1)) {
            std::thread::scope(|scope| {
                let handles: Vec<_> = chunk
                    .iter()
                    .map(|&target| (target, scope.spawn(move || self.replay(target))))
                    .collect();
                results.extend(handles.into_iter().map(|(target, handle)| {
                    handle
                        .join()
                        .unwrap_or(Err(ReplayError::WorkerPanicked { target }))
                }));
            });
        }
        results
    }

    fn change_set_for(
        &self,
        step: &TimelineStep,
        current: &LawState,
    ) -> Result<Option<ChangeSet>, ReplayError> {
        if let Some(change_set) = &step.change_set {
            return Ok(Some(change_set.clone()));
        }
        let Some(store) = self.store else {
            return Ok(None);
        };
        Ok(store.load(&step.reference)?.map(|document| {
            compute_change_set_with_refs(
                current,
                &document,
                current.digest().to_reference(),
                step.reference.clone(),
            )
        }))
    }

    /// A law with no prior text: nothing to diff against.
    fn new_law_view(&self, target: usize, step: &TimelineStep) -> Result<TimelineView, ReplayError> {
        let document = match self.store {
            Some(store) => store.load(&step.reference)?,
            None => None,
        };
        let law = document.unwrap_or_else(|| LawState::new(step.title.clone()));
        debug!(target, reference = %step.reference, "new law, diffs skipped");
        Ok(TimelineView {
            step: StepSummary::of(target, step),
            law,
            changed_article_ids: Vec::new(),
            diffs: Vec::new(),
            accumulated_diffs: Default::default(),
            is_new_law: true,
            skipped_steps: Vec::new(),
            diff_unavailable: None,
        })
    }
}

/// Replay `steps` over `original` up to `target` with default settings.
pub fn replay_timeline(
    original: Option<&LawState>,
    steps: &[TimelineStep],
    target: usize,
) -> Result<TimelineView, ReplayError> {
    TimelineReplayer::new(original, steps).replay(target)
}
