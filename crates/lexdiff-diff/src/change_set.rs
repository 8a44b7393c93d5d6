//! Article-level diff: compare two law states by article identifier.
//!
//! Identifiers present only in the old state are repealed, identifiers in
//! both whose normalized text differs are substituted, and identifiers
//! present only in the new state are inserted after the last surviving
//! identifier that precedes them. Moves are not detected.

use std::collections::HashMap;

use lexdiff_types::{
    normalize_for_comparison, Article, ArticleChange, ChangeSet, LawState, SectionRef,
};
use tracing::debug;

/// Compute the change set turning `old` into `new`, referencing both states
/// by content digest.
pub fn compute_change_set(old: &LawState, new: &LawState) -> ChangeSet {
    compute_change_set_with_refs(
        old,
        new,
        old.digest().to_reference(),
        new.digest().to_reference(),
    )
}

/// Compute the change set turning `old` into `new` with explicit document
/// references.
///
/// Changes are ordered repeals (old order), then substitutions (old order),
/// then inserts (new order).
pub fn compute_change_set_with_refs(
    old: &LawState,
    new: &LawState,
    base: impl Into<String>,
    result: impl Into<String>,
) -> ChangeSet {
    let old_ids: HashMap<&str, &Article> = old.articles().map(|a| (a.id.as_str(), a)).collect();
    let new_ids: HashMap<&str, &Article> = new.articles().map(|a| (a.id.as_str(), a)).collect();

    let mut changes = Vec::new();

    for article in old.articles() {
        if !new_ids.contains_key(article.id.as_str()) {
            changes.push(ArticleChange::repeal(&article.id, &article.content));
        }
    }

    for article in old.articles() {
        if let Some(updated) = new_ids.get(article.id.as_str()) {
            if normalize_for_comparison(&article.content)
                != normalize_for_comparison(&updated.content)
            {
                changes.push(ArticleChange::substitute(
                    &article.id,
                    &article.content,
                    &updated.content,
                ));
            }
        }
    }

    let mut anchor = "";
    for (section, article) in new.articles_with_sections() {
        if old_ids.contains_key(article.id.as_str()) {
            anchor = &article.id;
            continue;
        }
        changes.push(ArticleChange::Insert {
            article: article.id.clone(),
            after: anchor.to_string(),
            new_text: article.content.clone(),
            heading: (!article.heading.is_empty()).then(|| article.heading.clone()),
            section: Some(SectionRef::new(&section.id, &section.heading)),
        });
    }

    let change_set = ChangeSet::new(base, result, changes);
    debug!(
        repeals = change_set.repeals(),
        substitutions = change_set.substitutions(),
        inserts = change_set.inserts(),
        "computed change set"
    );
    change_set
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexdiff_types::{ChangeKind, Section};

    fn law(articles: &[(&str, &str)]) -> LawState {
        LawState::new("Ley").with_section(
            Section::new("sec_titulo_1", "Título I").with_articles(
                articles
                    .iter()
                    .map(|(id, text)| Article::new(*id, *text))
                    .collect(),
            ),
        )
    }

    #[test]
    fn identical_states_no_changes() {
        let state = law(&[("art_1", "A"), ("art_2", "B")]);
        let cs = compute_change_set(&state, &state);
        assert!(cs.is_empty());
        assert_eq!(cs.base, cs.result);
    }

    #[test]
    fn formatting_only_edits_are_not_changes() {
        let old = law(&[("art_1", "El \u{201C}Fondo\u{201D}  se crea.")]);
        let new = law(&[("art_1", "El \"Fondo\"\nse crea.")]);
        assert!(compute_change_set(&old, &new).is_empty());
    }

    #[test]
    fn repeal_and_insert_scenario() {
        let old = law(&[("art_1", "A"), ("art_2", "B")]);
        let new = law(&[("art_1", "A"), ("art_3", "C")]);

        let cs = compute_change_set_with_refs(&old, &new, "v1", "v2");
        assert_eq!(cs.base, "v1");
        assert_eq!(cs.result, "v2");
        assert_eq!(cs.len(), 2);
        assert_eq!(cs.changes[0], ArticleChange::repeal("art_2", "B"));
        match &cs.changes[1] {
            ArticleChange::Insert {
                article,
                after,
                new_text,
                heading,
                section,
            } => {
                assert_eq!(article, "art_3");
                assert_eq!(after, "art_1");
                assert_eq!(new_text, "C");
                assert_eq!(heading.as_deref(), Some("Artículo 3"));
                assert_eq!(section.as_ref().map(|s| s.id.as_str()), Some("sec_titulo_1"));
            }
            other => panic!("expected Insert, got {:?}", other),
        }
    }

    #[test]
    fn output_order_is_repeals_substitutions_inserts() {
        let old = law(&[("art_1", "A"), ("art_2", "B"), ("art_3", "C"), ("art_4", "D")]);
        let new = law(&[("art_5", "E"), ("art_1", "A2"), ("art_3", "C2")]);

        let cs = compute_change_set(&old, &new);
        let summary: Vec<_> = cs.changes.iter().map(|c| (c.kind(), c.article())).collect();
        assert_eq!(
            summary,
            vec![
                (ChangeKind::Repeal, "art_2"),
                (ChangeKind::Repeal, "art_4"),
                (ChangeKind::Substitute, "art_1"),
                (ChangeKind::Substitute, "art_3"),
                (ChangeKind::Insert, "art_5"),
            ]
        );
    }

    #[test]
    fn consecutive_inserts_share_anchor() {
        let old = law(&[("art_1", "A"), ("art_2", "B")]);
        let new = law(&[("art_1", "A"), ("art_1bis", "X"), ("art_1ter", "Y"), ("art_2", "B")]);

        let cs = compute_change_set(&old, &new);
        let anchors: Vec<_> = cs
            .changes
            .iter()
            .map(|c| match c {
                ArticleChange::Insert { article, after, .. } => (article.as_str(), after.as_str()),
                other => panic!("expected Insert, got {:?}", other),
            })
            .collect();
        assert_eq!(anchors, vec![("art_1bis", "art_1"), ("art_1ter", "art_1")]);
    }

    #[test]
    fn leading_insert_has_empty_anchor() {
        let old = law(&[("art_2", "B")]);
        let new = law(&[("art_1", "A"), ("art_2", "B")]);
        let cs = compute_change_set(&old, &new);
        match &cs.changes[0] {
            ArticleChange::Insert { after, .. } => assert!(after.is_empty()),
            other => panic!("expected Insert, got {:?}", other),
        }
    }

    #[test]
    fn pure_move_is_not_a_change() {
        let old = law(&[("art_1", "A"), ("art_2", "B")]);
        let new = law(&[("art_2", "B"), ("art_1", "A")]);
        assert!(compute_change_set(&old, &new).is_empty());
    }

    #[test]
    fn never_repeals_and_substitutes_same_article() {
        let old = law(&[("art_1", "A"), ("art_2", "B")]);
        let new = law(&[("art_2", "B2")]);
        let cs = compute_change_set(&old, &new);
        assert_eq!(cs.repeals(), 1);
        assert_eq!(cs.substitutions(), 1);
        assert_ne!(cs.changes[0].article(), cs.changes[1].article());
    }

    #[test]
    fn insert_into_new_section_carries_section_hint() {
        let old = law(&[("art_1", "A")]);
        let new = law(&[("art_1", "A")]).with_section(
            Section::new("sec_transitorio", "Disposiciones Transitorias")
                .with_articles(vec![Article::new("art_t1", "T")]),
        );
        let cs = compute_change_set(&old, &new);
        match &cs.changes[0] {
            ArticleChange::Insert { section, heading, .. } => {
                assert_eq!(
                    section.as_ref(),
                    Some(&SectionRef::new("sec_transitorio", "Disposiciones Transitorias"))
                );
                assert_eq!(heading.as_deref(), Some("Artículo 1° transitorio"));
            }
            other => panic!("expected Insert, got {:?}", other),
        }
    }
}
