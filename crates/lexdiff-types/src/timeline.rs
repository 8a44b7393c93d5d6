//! Legislative events that make up a timeline.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::change::ChangeSet;

/// The kind of a legislative event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    Act,
    Bill,
    Amendment,
    Debate,
    Communication,
    Citation,
    Question,
    Judgment,
    OfficialGazette,
}

impl StepKind {
    /// Whether steps of this kind contribute a change set during replay.
    pub fn carries_changes(self) -> bool {
        matches!(self, Self::Bill | Self::Amendment)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Act => "act",
            Self::Bill => "bill",
            Self::Amendment => "amendment",
            Self::Debate => "debate",
            Self::Communication => "communication",
            Self::Citation => "citation",
            Self::Question => "question",
            Self::Judgment => "judgment",
            Self::OfficialGazette => "officialGazette",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ternary individual vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedVote {
    pub name: String,
    pub choice: VoteChoice,
}

/// Vote metadata attached to a step. Carried as-is; never interpreted
/// beyond tallying.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoteRecord {
    Tally { yes: u32, no: u32, abstain: u32 },
    Named(Vec<NamedVote>),
}

impl VoteRecord {
    /// `(yes, no, abstain)` counts.
    pub fn totals(&self) -> (u32, u32, u32) {
        match self {
            Self::Tally { yes, no, abstain } => (*yes, *no, *abstain),
            Self::Named(votes) => votes.iter().fold((0, 0, 0), |(y, n, a), v| match v.choice {
                VoteChoice::Yes => (y + 1, n, a),
                VoteChoice::No => (y, n + 1, a),
                VoteChoice::Abstain => (y, n, a + 1),
            }),
        }
    }
}

/// One legislative event in chronological order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    /// Document URI, also the key used to look the step's document up in a store.
    pub reference: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_set: Option<ChangeSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<VoteRecord>,
}

impl TimelineStep {
    pub fn new(reference: impl Into<String>, kind: StepKind) -> Self {
        Self {
            reference: reference.into(),
            kind,
            date: None,
            title: String::new(),
            description: String::new(),
            change_set: None,
            votes: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_change_set(mut self, change_set: ChangeSet) -> Self {
        self.change_set = Some(change_set);
        self
    }

    pub fn with_votes(mut self, votes: VoteRecord) -> Self {
        self.votes = Some(votes);
        self
    }

    pub fn carries_changes(&self) -> bool {
        self.kind.carries_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_bills_and_amendments_carry_changes() {
        let carrying: Vec<_> = [
            StepKind::Act,
            StepKind::Bill,
            StepKind::Amendment,
            StepKind::Debate,
            StepKind::Communication,
            StepKind::Citation,
            StepKind::Question,
            StepKind::Judgment,
            StepKind::OfficialGazette,
        ]
        .into_iter()
        .filter(|k| k.carries_changes())
        .collect();
        assert_eq!(carrying, vec![StepKind::Bill, StepKind::Amendment]);
    }

    #[test]
    fn step_roundtrips_through_json() {
        let step: TimelineStep = serde_json::from_value(json!({
            "reference": "/cl/bill/boletin-17370/spa@2025-01-15",
            "type": "amendment",
            "date": "2025-01-15",
            "title": "Indicaciones",
            "votes": {"yes": 30, "no": 5, "abstain": 2}
        }))
        .unwrap();
        assert_eq!(step.kind, StepKind::Amendment);
        assert_eq!(step.date, NaiveDate::from_ymd_opt(2025, 1, 15));
        assert!(step.change_set.is_none());
        assert_eq!(step.votes.as_ref().map(VoteRecord::totals), Some((30, 5, 2)));

        let back = serde_json::to_value(&step).unwrap();
        assert_eq!(back["type"], "amendment");
        assert!(back.get("changeSet").is_none());
    }

    #[test]
    fn official_gazette_uses_camel_case() {
        assert_eq!(
            serde_json::to_value(StepKind::OfficialGazette).unwrap(),
            json!("officialGazette")
        );
        assert_eq!(StepKind::OfficialGazette.to_string(), "officialGazette");
    }

    #[test]
    fn named_votes_are_tallied() {
        let votes: VoteRecord = serde_json::from_value(json!([
            {"name": "Pérez", "choice": "yes"},
            {"name": "Soto", "choice": "no"},
            {"name": "Rojas", "choice": "yes"},
            {"name": "Vidal", "choice": "abstain"}
        ]))
        .unwrap();
        assert_eq!(votes.totals(), (2, 1, 1));
    }
}
