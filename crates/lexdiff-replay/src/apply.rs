//! Change-set application.
//!
//! A change set is applied to a deep clone of its base state, change by
//! change, in order. Either every change applies and the result is returned,
//! or the first failing change aborts the whole application.

use std::collections::{BTreeSet, HashMap};

use lexdiff_types::{
    normalize_for_comparison, Article, ArticleChange, ArticleNumber, ChangeKind, ChangeSet,
    LawState, Section, SectionRef,
};
use tracing::{debug, warn};

use crate::error::{ApplyError, ChainError};

const DEFAULT_SECTION_HEADING: &str = "Disposiciones Generales";

/// The outcome of a successful application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub result: LawState,
    /// Identifiers of every article the applied changes touched.
    pub touched: BTreeSet<String>,
}

/// Apply a change set to `base`.
///
/// A `base` digest reference that does not match `base` only logs a warning;
/// the changes themselves decide whether the set applies.
pub fn apply_change_set(base: &LawState, change_set: &ChangeSet) -> Result<Applied, ApplyError> {
    if change_set.applies_to(base) == Some(false) {
        warn!(base = %change_set.base, "change set was computed from a different state");
    }
    let mut law = base.clone();
    let mut touched = BTreeSet::new();
    // anchor -> last article inserted after it, so that a run of inserts
    // sharing an anchor keeps its order.
    let mut cursors: HashMap<&str, &str> = HashMap::new();

    for change in &change_set.changes {
        match change {
            ArticleChange::Substitute {
                article,
                old_text,
                new_text,
            } => {
                let (si, ai) = locate(&law, article, ChangeKind::Substitute)?;
                let current = &mut law.sections[si].articles[ai];
                if normalize_for_comparison(&current.content) != normalize_for_comparison(old_text)
                {
                    warn!(article = %article, "substitute old text does not match current text");
                }
                current.content = new_text.clone();
            }
            ArticleChange::Repeal { article, .. } => {
                let (si, ai) = locate(&law, article, ChangeKind::Repeal)?;
                law.sections[si].articles.remove(ai);
            }
            ArticleChange::Insert {
                article,
                after,
                new_text,
                heading,
                section,
            } => {
                if law.contains(article) {
                    return Err(ApplyError::DuplicateArticle(article.clone()));
                }
                let predecessor = cursors.get(after.as_str()).copied();
                let (si, ai) =
                    insertion_point(&mut law, article, after, predecessor, section.as_ref())?;
                let number = ArticleNumber::parse(article);
                law.sections[si].articles.insert(
                    ai,
                    Article {
                        id: article.clone(),
                        num: number.label(),
                        heading: heading
                            .clone()
                            .filter(|h| !h.is_empty())
                            .unwrap_or_else(|| number.heading()),
                        content: new_text.clone(),
                    },
                );
                cursors.insert(after, article);
            }
        }
        debug!(kind = %change.kind(), article = change.article(), "applied change");
        touched.insert(change.article().to_string());
    }

    Ok(Applied {
        result: law,
        touched,
    })
}

/// Apply change sets in order, each to the result of the previous one.
///
/// Touched identifiers accumulate across the chain. The error names the
/// index of the failing change set.
pub fn apply_chain(base: &LawState, change_sets: &[ChangeSet]) -> Result<Applied, ChainError> {
    let mut applied = Applied {
        result: base.clone(),
        touched: BTreeSet::new(),
    };
    for (index, change_set) in change_sets.iter().enumerate() {
        let step = apply_change_set(&applied.result, change_set)
            .map_err(|source| ChainError { index, source })?;
        applied.result = step.result;
        applied.touched.extend(step.touched);
    }
    Ok(applied)
}

fn locate(law: &LawState, article: &str, change: ChangeKind) -> Result<(usize, usize), ApplyError> {
    law.position(article)
        .ok_or_else(|| ApplyError::ArticleNotFound {
            article: article.to_string(),
            change,
        })
}

/// Where an inserted article goes, as `(section index, article index)`.
///
/// The predecessor is the previous insert sharing the anchor if there is
/// one, otherwise the anchor itself. A section hint naming a different
/// section than the predecessor's moves the article to the start of that
/// section, created after the predecessor's section when absent.
fn insertion_point(
    law: &mut LawState,
    article: &str,
    anchor: &str,
    cursor: Option<&str>,
    hint: Option<&SectionRef>,
) -> Result<(usize, usize), ApplyError> {
    let predecessor = cursor.or((!anchor.is_empty()).then_some(anchor));

    let Some(predecessor) = predecessor else {
        let si = match hint {
            Some(hint) => section_or_create(law, hint, 0),
            None => {
                if law.sections.is_empty() {
                    law.sections
                        .push(Section::new(Section::GENERAL_ID, DEFAULT_SECTION_HEADING));
                }
                0
            }
        };
        return Ok((si, 0));
    };

    let (si, ai) = law
        .position(predecessor)
        .ok_or_else(|| ApplyError::AnchorNotFound {
            article: article.to_string(),
            anchor: anchor.to_string(),
        })?;

    match hint {
        Some(hint) if law.sections[si].id != hint.id => {
            Ok((section_or_create(law, hint, si + 1), 0))
        }
        _ => Ok((si, ai + 1)),
    }
}

fn section_or_create(law: &mut LawState, hint: &SectionRef, at: usize) -> usize {
    law.section_index(&hint.id).unwrap_or_else(|| {
        law.sections
            .insert(at, Section::new(&hint.id, &hint.heading));
        at
    })
}
