use serde::{Deserialize, Serialize};

/// What replay does with a step whose change set does not apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the step, record it as skipped, and continue without it.
    #[default]
    SkipStep,
    /// Stop and return the error.
    Abort,
}

/// Timeline replay settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub failure_policy: FailurePolicy,
    /// Attach word diffs to the local article diffs of a view.
    pub word_diffs: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::SkipStep,
            word_diffs: true,
        }
    }
}
