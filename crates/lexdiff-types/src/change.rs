//! Typed article edits and change sets.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::article::LawState;
use crate::digest::DocumentDigest;

/// The kind of an [`ArticleChange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Substitute,
    Repeal,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Insert => "insert",
            Self::Substitute => "substitute",
            Self::Repeal => "repeal",
        };
        f.write_str(s)
    }
}

/// The section an inserted article belongs to in the target ordering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    #[serde(rename = "eId")]
    pub id: String,
    #[serde(default)]
    pub heading: String,
}

impl SectionRef {
    pub fn new(id: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
        }
    }
}

/// A single edit to one article, keyed by its identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArticleChange {
    /// A new article placed after `after` (empty = first position).
    #[serde(rename_all = "camelCase")]
    Insert {
        article: String,
        #[serde(default)]
        after: String,
        new_text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        heading: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section: Option<SectionRef>,
    },
    /// Replacement of an existing article's text.
    #[serde(rename_all = "camelCase")]
    Substitute {
        article: String,
        old_text: String,
        new_text: String,
    },
    /// Removal of an existing article.
    #[serde(rename_all = "camelCase")]
    Repeal { article: String, old_text: String },
}

impl ArticleChange {
    /// An insert without placement hints.
    pub fn insert(
        article: impl Into<String>,
        after: impl Into<String>,
        new_text: impl Into<String>,
    ) -> Self {
        Self::Insert {
            article: article.into(),
            after: after.into(),
            new_text: new_text.into(),
            heading: None,
            section: None,
        }
    }

    pub fn substitute(
        article: impl Into<String>,
        old_text: impl Into<String>,
        new_text: impl Into<String>,
    ) -> Self {
        Self::Substitute {
            article: article.into(),
            old_text: old_text.into(),
            new_text: new_text.into(),
        }
    }

    pub fn repeal(article: impl Into<String>, old_text: impl Into<String>) -> Self {
        Self::Repeal {
            article: article.into(),
            old_text: old_text.into(),
        }
    }

    /// The subject article identifier.
    pub fn article(&self) -> &str {
        match self {
            Self::Insert { article, .. }
            | Self::Substitute { article, .. }
            | Self::Repeal { article, .. } => article,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Insert { .. } => ChangeKind::Insert,
            Self::Substitute { .. } => ChangeKind::Substitute,
            Self::Repeal { .. } => ChangeKind::Repeal,
        }
    }

    pub fn old_text(&self) -> Option<&str> {
        match self {
            Self::Insert { .. } => None,
            Self::Substitute { old_text, .. } | Self::Repeal { old_text, .. } => Some(old_text),
        }
    }

    pub fn new_text(&self) -> Option<&str> {
        match self {
            Self::Insert { new_text, .. } | Self::Substitute { new_text, .. } => Some(new_text),
            Self::Repeal { .. } => None,
        }
    }
}

/// An ordered collection of edits transforming `base` into `result`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Reference to the document the changes apply to.
    #[serde(default)]
    pub base: String,
    /// Reference to the document the changes produce.
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub changes: Vec<ArticleChange>,
}

impl ChangeSet {
    pub fn new(
        base: impl Into<String>,
        result: impl Into<String>,
        changes: Vec<ArticleChange>,
    ) -> Self {
        Self {
            base: base.into(),
            result: result.into(),
            changes,
        }
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Number of inserted articles.
    pub fn inserts(&self) -> usize {
        self.count(ChangeKind::Insert)
    }

    /// Number of substituted articles.
    pub fn substitutions(&self) -> usize {
        self.count(ChangeKind::Substitute)
    }

    /// Number of repealed articles.
    pub fn repeals(&self) -> usize {
        self.count(ChangeKind::Repeal)
    }

    /// Whether `law` is the document this change set was computed from.
    ///
    /// `None` when `base` is not a digest reference (a step URI, say), in
    /// which case there is nothing to check against.
    pub fn applies_to(&self, law: &LawState) -> Option<bool> {
        let expected: DocumentDigest = self.base.parse().ok()?;
        Some(expected == law.digest())
    }

    /// Identifiers of every article this change set touches.
    pub fn touched_ids(&self) -> BTreeSet<&str> {
        self.changes.iter().map(ArticleChange::article).collect()
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{Article, Section};
    use serde_json::json;

    #[test]
    fn applies_to_checks_digest_bases_only() {
        let law = LawState::new("Ley").with_section(
            Section::new("sec_general", "Disposiciones Generales")
                .with_articles(vec![Article::new("art_1", "A")]),
        );
        let other = LawState::new("Otra ley");

        let by_digest = ChangeSet::new(law.digest().to_reference(), "", Vec::new());
        assert_eq!(by_digest.applies_to(&law), Some(true));
        assert_eq!(by_digest.applies_to(&other), Some(false));

        let by_uri = ChangeSet::new("/cl/bill/1", "", Vec::new());
        assert_eq!(by_uri.applies_to(&law), None);
    }

    #[test]
    fn accessors_cover_every_variant() {
        let ins = ArticleChange::insert("art_3", "art_1", "C");
        let sub = ArticleChange::substitute("art_1", "A", "A2");
        let rep = ArticleChange::repeal("art_2", "B");

        assert_eq!(ins.kind(), ChangeKind::Insert);
        assert_eq!(ins.old_text(), None);
        assert_eq!(ins.new_text(), Some("C"));

        assert_eq!(sub.article(), "art_1");
        assert_eq!(sub.old_text(), Some("A"));
        assert_eq!(sub.new_text(), Some("A2"));

        assert_eq!(rep.kind(), ChangeKind::Repeal);
        assert_eq!(rep.new_text(), None);
    }

    #[test]
    fn counts_by_kind() {
        let cs = ChangeSet::new(
            "base",
            "result",
            vec![
                ArticleChange::repeal("art_2", "B"),
                ArticleChange::substitute("art_1", "A", "A2"),
                ArticleChange::insert("art_3", "art_1", "C"),
                ArticleChange::insert("art_4", "art_3", "D"),
            ],
        );
        assert_eq!(cs.len(), 4);
        assert_eq!(cs.repeals(), 1);
        assert_eq!(cs.substitutions(), 1);
        assert_eq!(cs.inserts(), 2);
        assert_eq!(
            cs.touched_ids().into_iter().collect::<Vec<_>>(),
            vec!["art_1", "art_2", "art_3", "art_4"]
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let value = serde_json::to_value(ArticleChange::insert("art_3", "art_1", "C")).unwrap();
        assert_eq!(
            value,
            json!({"type": "insert", "article": "art_3", "after": "art_1", "newText": "C"})
        );

        let value = serde_json::to_value(ArticleChange::substitute("art_1", "A", "B")).unwrap();
        assert_eq!(
            value,
            json!({"type": "substitute", "article": "art_1", "oldText": "A", "newText": "B"})
        );
    }

    #[test]
    fn deserializes_hand_authored_change_set() {
        let cs: ChangeSet = serde_json::from_value(json!({
            "base": "/cl/act/ley-18045/spa@1981-10-22",
            "result": "/cl/act/ley-18045/spa@1981-10-23",
            "changes": [
                {"type": "insert", "article": "art_5bis", "newText": "Nuevo."},
                {"type": "repeal", "article": "art_7", "oldText": "Viejo."}
            ]
        }))
        .unwrap();

        assert_eq!(cs.len(), 2);
        match &cs.changes[0] {
            ArticleChange::Insert {
                after,
                heading,
                section,
                ..
            } => {
                assert!(after.is_empty());
                assert!(heading.is_none());
                assert!(section.is_none());
            }
            other => panic!("expected Insert, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_change_type() {
        let result: Result<ArticleChange, _> =
            serde_json::from_value(json!({"type": "move", "article": "art_1"}));
        assert!(result.is_err());
    }
}
