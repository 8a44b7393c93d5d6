//! Non-fatal extraction findings.

use serde::Serialize;

/// An ambiguity resolved during extraction.
///
/// Extraction never fails; each diagnostic records a line that could have
/// been read more than one way and the reading that was chosen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A transitory heading whose ordinal words did not map to a number.
    #[error("unknown ordinal {text:?}, article kept as {fallback_id}")]
    #[serde(rename_all = "camelCase")]
    UnknownOrdinal { text: String, fallback_id: String },

    /// A numbered article line too far ahead of the running numbering,
    /// kept as text of the current article.
    #[error("article {number} after article {last} read as an embedded reference")]
    EmbeddedReference { number: u32, last: u32, line: String },

    /// A repeated identifier, renamed with an occurrence suffix.
    #[error("duplicate identifier {id}, renamed to {renamed}")]
    DuplicateIdentifier { id: String, renamed: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let d = Diagnostic::DuplicateIdentifier {
            id: "art_5".into(),
            renamed: "art_5_t1".into(),
        };
        assert_eq!(d.to_string(), "duplicate identifier art_5, renamed to art_5_t1");

        let d = Diagnostic::EmbeddedReference {
            number: 40,
            last: 3,
            line: "Artículo 40.- ...".into(),
        };
        assert!(d.to_string().contains("embedded reference"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let d = Diagnostic::UnknownOrdinal {
            text: "centésimo".into(),
            fallback_id: "art_t_centesimo".into(),
        };
        let value = serde_json::to_value(&d).unwrap();
        assert_eq!(value["kind"], "unknownOrdinal");
        assert_eq!(value["fallbackId"], "art_t_centesimo");
    }
}
