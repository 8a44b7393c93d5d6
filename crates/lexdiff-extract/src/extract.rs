//! The extraction fold.
//!
//! The tree is walked in pre-order. For every node the label is checked for
//! a structural division, then the node's text is classified line by line,
//! then the children are visited. All numbering state lives in [`Fold`],
//! created fresh for each call.

use std::collections::HashMap;

use lexdiff_types::{Article, ArticleNumber, LawState, Section};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ExtractConfig;
use crate::diagnostic::Diagnostic;
use crate::markers::{self, DivisionMarker, NumberedMarker, OrdinalMarker};
use crate::ordinal::{ordinal_to_number, slug};
use crate::source::{SourceDocument, SourceNode};

const TRANSITORY_SECTION_HEADING: &str = "Disposiciones Transitorias";

/// The result of extracting one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub law: LawState,
    pub diagnostics: Vec<Diagnostic>,
}

/// Extract articles with the default configuration.
pub fn extract(doc: &SourceDocument) -> Extraction {
    extract_with(doc, &ExtractConfig::default())
}

/// Extract articles from a text tree.
///
/// Never fails. Ambiguous lines are resolved by the rules documented on the
/// crate and reported as [`Diagnostic`]s.
pub fn extract_with(doc: &SourceDocument, config: &ExtractConfig) -> Extraction {
    let mut fold = Fold::new(config);
    for node in &doc.nodes {
        fold.visit(node);
    }
    let (sections, diagnostics) = fold.finish();

    let law = LawState {
        title: doc.title.clone(),
        preface: doc.preface.clone(),
        sections,
    };
    debug!(
        articles = law.article_count(),
        sections = law.sections.len(),
        diagnostics = diagnostics.len(),
        "extracted law state"
    );
    Extraction { law, diagnostics }
}

/// Where a section's identifier comes from.
enum SectionKind {
    General,
    Transitory,
    /// Division designators from the enclosing título down, e.g.
    /// `sec_titulo_ii_capitulo_i`.
    Division(String),
}

struct SectionDraft {
    kind: SectionKind,
    heading: String,
    articles: Vec<ArticleDraft>,
}

impl SectionDraft {
    fn new(kind: SectionKind, heading: impl Into<String>) -> Self {
        Self {
            kind,
            heading: heading.into(),
            articles: Vec::new(),
        }
    }

    fn is_transitory(&self) -> bool {
        matches!(self.kind, SectionKind::Transitory)
    }
}

struct ArticleDraft {
    id: String,
    num: String,
    heading: String,
    lines: Vec<String>,
}

impl ArticleDraft {
    fn into_article(self) -> Article {
        Article {
            id: self.id,
            num: self.num,
            heading: self.heading,
            content: self.lines.join("\n").trim().to_string(),
        }
    }
}

struct Fold<'c> {
    config: &'c ExtractConfig,
    sections: Vec<SectionDraft>,
    current_section: usize,
    current: Option<ArticleDraft>,
    /// Open divisions as `(level, designator)`, outermost first.
    divisions: Vec<(u8, String)>,
    last_permanent: Option<u32>,
    last_numbered_transitory: Option<u32>,
    /// Base added to ordinal transitory numbers in the current ordinal run.
    ordinal_offset: Option<u32>,
    used_ids: HashMap<String, u32>,
    in_transitory: bool,
    found_first_article: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'c> Fold<'c> {
    fn new(config: &'c ExtractConfig) -> Self {
        Self {
            config,
            sections: vec![SectionDraft::new(
                SectionKind::General,
                config.default_section_heading.clone(),
            )],
            current_section: 0,
            current: None,
            divisions: Vec::new(),
            last_permanent: None,
            last_numbered_transitory: None,
            ordinal_offset: None,
            used_ids: HashMap::new(),
            in_transitory: false,
            found_first_article: false,
            diagnostics: Vec::new(),
        }
    }

    fn visit(&mut self, node: &SourceNode) {
        if let Some(label) = node.label.as_deref() {
            self.label(label);
        }
        if let Some(text) = node.text.as_deref() {
            for line in text.lines() {
                self.line(line);
            }
        }
        for child in &node.children {
            self.visit(child);
        }
    }

    fn label(&mut self, label: &str) {
        if markers::is_transitory_label(label) {
            self.enter_transitory(markers::division_heading(label));
        } else if !self.in_transitory {
            if let Some(division) = markers::division(label) {
                self.open_section(division, markers::division_heading(label));
            }
        }
    }

    fn line(&mut self, line: &str) {
        if markers::is_quoted_article(line) {
            self.continuation(line);
            return;
        }

        if self.found_first_article && markers::is_transitory_line(line) {
            self.enter_transitory(TRANSITORY_SECTION_HEADING.to_string());
            return;
        }

        if !self.in_transitory {
            if let Some(division) = markers::division(line) {
                self.open_section(division, markers::division_heading(line));
                return;
            }
        }

        if let Some(marker) = markers::numbered(line) {
            if self.numbered(marker, line) {
                return;
            }
        } else if let Some(marker) = markers::ordinal(line) {
            if self.ordinal(marker, line) {
                return;
            }
        }

        self.continuation(line);
    }

    /// Returns `false` when the line is not an article start after all.
    fn numbered(&mut self, marker: NumberedMarker, line: &str) -> bool {
        if marker.transitory && !self.in_transitory {
            self.enter_transitory(TRANSITORY_SECTION_HEADING.to_string());
        }

        if self.in_transitory {
            self.last_numbered_transitory = Some(marker.number);
            self.ordinal_offset = None;
            let number = ArticleNumber::Transitory {
                number: marker.number,
            };
            self.start(number, line);
            return true;
        }

        if let Some(last) = self.last_permanent {
            if marker.number > last.saturating_add(self.config.max_article_jump) {
                warn!(number = marker.number, last, "numbered line read as embedded reference");
                self.diagnostics.push(Diagnostic::EmbeddedReference {
                    number: marker.number,
                    last,
                    line: line.trim().to_string(),
                });
                return false;
            }
        }

        self.last_permanent = Some(marker.number);
        self.start(
            ArticleNumber::Permanent {
                number: marker.number,
                suffix: marker.suffix,
            },
            line,
        );
        true
    }

    fn ordinal(&mut self, marker: OrdinalMarker, line: &str) -> bool {
        let unique = marker.is_unique();
        if !(self.in_transitory || marker.transitory || unique) {
            return false;
        }

        if unique && !self.in_transitory && !marker.transitory {
            self.start(ArticleNumber::Unique, line);
            return true;
        }

        if !self.in_transitory {
            self.enter_transitory(TRANSITORY_SECTION_HEADING.to_string());
        }

        let ordinal = if unique {
            Some(1)
        } else {
            ordinal_to_number(&marker.words)
        };

        match ordinal {
            Some(n) => {
                let offset = *self
                    .ordinal_offset
                    .get_or_insert(self.last_numbered_transitory.unwrap_or(0));
                self.start(
                    ArticleNumber::Transitory {
                        number: offset.saturating_add(n),
                    },
                    line,
                );
            }
            None => {
                let fallback_id = format!("art_t_{}", slug(&marker.words));
                warn!(ordinal = %marker.words, %fallback_id, "unknown ordinal");
                self.diagnostics.push(Diagnostic::UnknownOrdinal {
                    text: marker.words.clone(),
                    fallback_id: fallback_id.clone(),
                });
                self.flush();
                let id = self.claim_id(fallback_id);
                self.found_first_article = true;
                self.current = Some(ArticleDraft {
                    id,
                    num: marker.words.clone(),
                    heading: format!("Artículo {} transitorio", marker.words),
                    lines: vec![line.to_string()],
                });
            }
        }
        true
    }

    fn start(&mut self, number: ArticleNumber, line: &str) {
        self.flush();
        let id = self.claim_id(number.identifier());
        self.found_first_article = true;
        self.current = Some(ArticleDraft {
            id,
            num: number.label(),
            heading: number.heading(),
            lines: vec![line.to_string()],
        });
    }

    fn continuation(&mut self, line: &str) {
        if let Some(article) = self.current.as_mut() {
            article.lines.push(line.to_string());
        }
    }

    fn flush(&mut self) {
        if let Some(article) = self.current.take() {
            self.sections[self.current_section].articles.push(article);
        }
    }

    fn open_section(&mut self, division: DivisionMarker, heading: String) {
        self.flush();
        self.divisions.retain(|(level, _)| *level < division.level);
        self.divisions.push((division.level, division.designator));
        let path: Vec<&str> = self.divisions.iter().map(|(_, d)| d.as_str()).collect();
        let base = format!("sec_{}", path.join("_"));
        self.sections
            .push(SectionDraft::new(SectionKind::Division(base), heading));
        self.current_section = self.sections.len() - 1;
    }

    fn enter_transitory(&mut self, heading: String) {
        self.flush();
        self.in_transitory = true;
        match self.sections.iter().position(SectionDraft::is_transitory) {
            Some(index) => self.current_section = index,
            None => {
                self.sections
                    .push(SectionDraft::new(SectionKind::Transitory, heading));
                self.current_section = self.sections.len() - 1;
            }
        }
    }

    /// First occurrence keeps `base`; later ones get `_t<k>` with the
    /// smallest unused `k` at or above the occurrence count.
    fn claim_id(&mut self, base: String) -> String {
        let seen = self.used_ids.get(&base).copied().unwrap_or(0);
        self.used_ids.insert(base.clone(), seen + 1);
        if seen == 0 {
            return base;
        }

        let mut k = seen;
        let renamed = loop {
            let candidate = format!("{base}_t{k}");
            if !self.used_ids.contains_key(&candidate) {
                break candidate;
            }
            k += 1;
        };
        self.used_ids.insert(renamed.clone(), 1);
        warn!(id = %base, %renamed, "duplicate article identifier");
        self.diagnostics.push(Diagnostic::DuplicateIdentifier {
            id: base,
            renamed: renamed.clone(),
        });
        renamed
    }

    fn finish(mut self) -> (Vec<Section>, Vec<Diagnostic>) {
        self.flush();
        // A designator seen again (two `Capítulo I` under one título) gets
        // `_2`, `_3`, ... in document order.
        let mut seen: HashMap<String, u32> = HashMap::new();
        let sections = self
            .sections
            .into_iter()
            .filter(|s| !s.articles.is_empty())
            .map(|draft| {
                let id = match draft.kind {
                    SectionKind::General => Section::GENERAL_ID.to_string(),
                    SectionKind::Transitory => Section::TRANSITORY_ID.to_string(),
                    SectionKind::Division(base) => {
                        let count = seen.entry(base.clone()).or_insert(0);
                        *count += 1;
                        match *count {
                            1 => base,
                            k => format!("{base}_{k}"),
                        }
                    }
                };
                Section::new(id, draft.heading).with_articles(
                    draft
                        .articles
                        .into_iter()
                        .map(ArticleDraft::into_article)
                        .collect(),
                )
            })
            .collect();
        (sections, self.diagnostics)
    }
}
