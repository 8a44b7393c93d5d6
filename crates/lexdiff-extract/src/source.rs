//! Input text tree.

use serde::{Deserialize, Serialize};

/// A hierarchical legal text, as produced by a source-specific scraper.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub preface: String,
    #[serde(default)]
    pub nodes: Vec<SourceNode>,
}

impl SourceDocument {
    pub fn new(title: impl Into<String>, nodes: Vec<SourceNode>) -> Self {
        Self {
            title: title.into(),
            preface: String::new(),
            nodes,
        }
    }

    /// A document made of one text node, the shape of a plain-text bill.
    pub fn from_text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(title, vec![SourceNode::text(text)])
    }
}

/// One node of the text tree.
///
/// `label` is the structural name a source gives the node (`Título I`,
/// `Disposiciones transitorias`); `text` is its own body. Either may be
/// absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SourceNode>,
}

impl SourceNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SourceNode>) -> Self {
        self.children = children;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_tree() {
        let doc: SourceDocument = serde_json::from_str(
            r#"{"title": "Ley", "nodes": [{"label": "Título I", "children": [{"text": "Artículo 1.- A"}]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].label.as_deref(), Some("Título I"));
        assert!(doc.nodes[0].text.is_none());
        assert_eq!(doc.nodes[0].children[0].text.as_deref(), Some("Artículo 1.- A"));
    }
}
