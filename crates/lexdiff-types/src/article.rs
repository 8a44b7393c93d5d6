//! Versioned legal document model.
//!
//! A [`LawState`] is the whole document at one point in time: an ordered list
//! of [`Section`]s, each holding an ordered list of [`Article`]s. Order is the
//! document's narrative order, not a sort key.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::digest::DocumentDigest;
use crate::number::ArticleNumber;
use crate::text::normalize_for_comparison;

/// The canonical unit of a legal text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Identifier, unique within a law state (`art_5bis`, `art_t3`).
    #[serde(rename = "eId")]
    pub id: String,
    /// Display number (`5`, `5 bis`, `T3`).
    #[serde(default)]
    pub num: String,
    #[serde(default)]
    pub heading: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
}

impl Article {
    /// Create an article whose number and heading derive from its identifier.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        let id = id.into();
        let number = ArticleNumber::parse(&id);
        Self {
            num: number.label(),
            heading: number.heading(),
            id,
            content: content.into(),
        }
    }

    pub fn number(&self) -> ArticleNumber {
        ArticleNumber::parse(&self.id)
    }
}

/// A structural division of the document (título, capítulo, transitory provisions).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "eId")]
    pub id: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Section {
    /// Identifier of the section collecting articles before any division.
    pub const GENERAL_ID: &'static str = "sec_general";
    /// Identifier of the single transitory provisions section.
    pub const TRANSITORY_ID: &'static str = "sec_transitorio";

    pub fn new(id: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
            articles: Vec::new(),
        }
    }

    pub fn with_articles(mut self, articles: Vec<Article>) -> Self {
        self.articles = articles;
        self
    }
}

/// The full document at one point in the timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawState {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub preface: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl LawState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Iterate over all articles in document order.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.sections.iter().flat_map(|s| s.articles.iter())
    }

    /// Iterate over `(section, article)` pairs in document order.
    pub fn articles_with_sections(&self) -> impl Iterator<Item = (&Section, &Article)> {
        self.sections
            .iter()
            .flat_map(|s| s.articles.iter().map(move |a| (s, a)))
    }

    /// All article identifiers in document order.
    pub fn article_ids(&self) -> Vec<&str> {
        self.articles().map(|a| a.id.as_str()).collect()
    }

    pub fn article_count(&self) -> usize {
        self.sections.iter().map(|s| s.articles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.article_count() == 0
    }

    /// Find an article by identifier across all sections.
    pub fn find(&self, id: &str) -> Option<&Article> {
        self.articles().find(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Position of an article as `(section index, article index)`.
    pub fn position(&self, id: &str) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, s)| {
            s.articles
                .iter()
                .position(|a| a.id == id)
                .map(|ai| (si, ai))
        })
    }

    /// Index of the section with the given identifier.
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Identifiers that occur more than once. Empty for a well-formed state.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut dups = BTreeSet::new();
        for article in self.articles() {
            if !seen.insert(article.id.as_str()) {
                dups.insert(article.id.clone());
            }
        }
        dups.into_iter().collect()
    }

    /// Content equality.
    ///
    /// Two states are content-equal when their non-empty sections carry the
    /// same identifiers in the same order, each section holds the same set of
    /// article identifiers, and every article's text is equal after
    /// normalization. Titles, headings, and empty sections are not compared.
    pub fn content_eq(&self, other: &LawState) -> bool {
        let ours = content_view(self);
        let theirs = content_view(other);
        ours == theirs
    }

    /// BLAKE3 digest over the document content.
    pub fn digest(&self) -> DocumentDigest {
        DocumentDigest::of(self)
    }
}

type ContentView<'a> = Vec<(&'a str, BTreeMap<&'a str, String>)>;

fn content_view(law: &LawState) -> ContentView<'_> {
    law.sections
        .iter()
        .filter(|s| !s.articles.is_empty())
        .map(|s| {
            let texts = s
                .articles
                .iter()
                .map(|a| (a.id.as_str(), normalize_for_comparison(&a.content)))
                .collect();
            (s.id.as_str(), texts)
        })
        .collect()
}
