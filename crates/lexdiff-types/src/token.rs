//! Rendering projections of article changes.

use serde::{Deserialize, Serialize};

use crate::change::{ArticleChange, ChangeKind};
use crate::number::ArticleNumber;

/// Classification of a word-diff run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Unchanged,
    Added,
    Removed,
}

/// A run of one or more words sharing a [`TokenKind`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordToken {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl WordToken {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::Unchanged)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::Added)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::Removed)
    }
}

/// Display-oriented view of one article change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDiff {
    pub article_id: String,
    pub heading: String,
    pub change_type: ChangeKind,
    #[serde(default)]
    pub old_text: String,
    #[serde(default)]
    pub new_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_diff: Option<Vec<WordToken>>,
}

impl ArticleDiff {
    /// Project a change, using `heading` when known and otherwise the
    /// heading synthesized from the article identifier.
    pub fn from_change(change: &ArticleChange, heading: Option<&str>) -> Self {
        let heading = match (heading, change) {
            (Some(h), _) if !h.is_empty() => h.to_string(),
            (
                _,
                ArticleChange::Insert {
                    heading: Some(h), ..
                },
            ) if !h.is_empty() => h.clone(),
            _ => ArticleNumber::parse(change.article()).heading(),
        };
        Self {
            article_id: change.article().to_string(),
            heading,
            change_type: change.kind(),
            old_text: change.old_text().unwrap_or_default().to_string(),
            new_text: change.new_text().unwrap_or_default().to_string(),
            word_diff: None,
        }
    }

    pub fn with_word_diff(mut self, tokens: Vec<WordToken>) -> Self {
        self.word_diff = Some(tokens);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_serializes_with_type_field() {
        let value = serde_json::to_value(WordToken::removed("texto")).unwrap();
        assert_eq!(value, json!({"text": "texto", "type": "removed"}));
    }

    #[test]
    fn diff_from_substitute() {
        let change = ArticleChange::substitute("art_2", "viejo", "nuevo");
        let diff = ArticleDiff::from_change(&change, Some("Artículo 2"));
        assert_eq!(diff.article_id, "art_2");
        assert_eq!(diff.change_type, ChangeKind::Substitute);
        assert_eq!(diff.old_text, "viejo");
        assert_eq!(diff.new_text, "nuevo");
        assert!(diff.word_diff.is_none());
    }

    #[test]
    fn heading_falls_back_to_insert_hint_then_identifier() {
        let hinted = ArticleChange::Insert {
            article: "art_4".into(),
            after: "art_3".into(),
            new_text: "Texto.".into(),
            heading: Some("Artículo 4.- Del registro".into()),
            section: None,
        };
        assert_eq!(
            ArticleDiff::from_change(&hinted, None).heading,
            "Artículo 4.- Del registro"
        );

        let repeal = ArticleChange::repeal("art_t2", "Texto.");
        let diff = ArticleDiff::from_change(&repeal, Some(""));
        assert_eq!(diff.heading, "Artículo 2° transitorio");
        assert!(diff.new_text.is_empty());
    }

    #[test]
    fn diff_json_is_camel_case() {
        let diff = ArticleDiff::from_change(&ArticleChange::insert("art_3", "art_1", "C"), None)
            .with_word_diff(vec![WordToken::added("C")]);
        let value = serde_json::to_value(diff).unwrap();
        assert_eq!(value["articleId"], "art_3");
        assert_eq!(value["changeType"], "insert");
        assert_eq!(value["wordDiff"][0]["type"], "added");
    }
}
