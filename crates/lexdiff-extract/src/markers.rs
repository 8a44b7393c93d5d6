//! Line patterns recognized during extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::ordinal::{fold_accents, slug};

/// `"Artículo …` quoted inside a modifying article.
static QUOTED_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*["\u{201C}\u{201D}\u{00AB}]\s*(?i:art[ií]culo)\b"#)
        .expect("Invalid quoted article regex")
});

static TRANSITORY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*["\u{201C}\u{201D}]?\s*disposici[oó]n(?:es)?\s+transitorias?\b"#)
        .expect("Invalid transitory line regex")
});

static TRANSITORY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdisposici[oó]n(?:es)?\s+transitorias?\b")
        .expect("Invalid transitory label regex")
});

/// `Título II`, `Capítulo 3°`, `Título I bis`, `Párrafo final`
static DIVISION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^\s*["\u{201C}\u{201D}]?\s*(t[ií]tulo|cap[ií]tulo|p[aá]rrafo)\b(?:\s+(\d+|[a-záéíóúñ]+)\s*[°º]?(?:\s+(bis|ter|qu[aá]ter|quinquies|sexies|septies|octies)\b)?)?"#,
    )
    .expect("Invalid division regex")
});

/// `Artículo 5 bis.-`, `Artículo 12°.-`, `Artículo 1o transitorio.-`
static PERMANENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*art[ií]culo\s+(\d+)\s*(?:[°º]|o\b)?\s*(bis|ter|qu[aá]ter|quinquies|sexies|septies|octies)?\s*(transitori[oa])?\s*(?:[.\-:]|$)",
    )
    .expect("Invalid permanent article regex")
});

/// `Artículo vigésimo primero.-`, `Artículo único.-`, `Artículo primero17.-`
static ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*art[ií]culo\s+([a-záéíóúñü]+(?:\s+[a-záéíóúñü]+)?(?:\s+transitori[oa])?)\d*\s*[°º]?\s*\.\s*[-\u{2013}]",
    )
    .expect("Invalid ordinal article regex")
});

/// A numbered article heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NumberedMarker {
    pub number: u32,
    /// Latin suffix, lowercase and unaccented (`bis`, `quater`).
    pub suffix: Option<String>,
    /// The heading itself says `transitorio`.
    pub transitory: bool,
}

/// An article heading written with ordinal words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OrdinalMarker {
    /// The ordinal words with any trailing `transitorio` removed.
    pub words: String,
    pub transitory: bool,
}

impl OrdinalMarker {
    pub fn is_unique(&self) -> bool {
        fold_accents(&self.words) == "unico"
    }
}

pub(crate) fn is_quoted_article(line: &str) -> bool {
    QUOTED_ARTICLE.is_match(line)
}

pub(crate) fn is_transitory_line(line: &str) -> bool {
    TRANSITORY_LINE.is_match(line)
}

pub(crate) fn is_transitory_label(label: &str) -> bool {
    TRANSITORY_LABEL.is_match(label)
}

/// A structural division heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DivisionMarker {
    /// 0 for `Título`, 1 for `Capítulo`, 2 for `Párrafo`.
    pub level: u8,
    /// Identifier-safe designator, e.g. `titulo_i_bis`.
    pub designator: String,
}

pub(crate) fn division(line: &str) -> Option<DivisionMarker> {
    let caps = DIVISION.captures(line)?;
    let kind = fold_accents(caps.get(1)?.as_str());
    let level = match kind.as_str() {
        "titulo" => 0,
        "capitulo" => 1,
        _ => 2,
    };
    let designator = [
        Some(kind.as_str()),
        caps.get(2).map(|m| m.as_str()),
        caps.get(3).map(|m| m.as_str()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ");
    Some(DivisionMarker {
        level,
        designator: slug(&designator),
    })
}

/// Section heading text for a division line.
pub(crate) fn division_heading(line: &str) -> String {
    line.trim()
        .trim_start_matches(['"', '\u{201C}', '\u{201D}'])
        .trim()
        .to_string()
}

pub(crate) fn numbered(line: &str) -> Option<NumberedMarker> {
    let caps = PERMANENT.captures(line)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    Some(NumberedMarker {
        number,
        suffix: caps.get(2).map(|m| fold_accents(m.as_str())),
        transitory: caps.get(3).is_some(),
    })
}

pub(crate) fn ordinal(line: &str) -> Option<OrdinalMarker> {
    let caps = ORDINAL.captures(line)?;
    let mut words: Vec<&str> = caps.get(1)?.as_str().split_whitespace().collect();
    let transitory = words
        .last()
        .is_some_and(|w| fold_accents(w).starts_with("transitori"));
    if transitory {
        words.pop();
    }
    if words.is_empty() {
        return None;
    }
    Some(OrdinalMarker {
        words: words.join(" "),
        transitory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_article_lines() {
        assert!(is_quoted_article("\"Artículo 12.- Sustitúyese"));
        assert!(is_quoted_article("\u{201C}Artículo 5 bis.- Texto"));
        assert!(!is_quoted_article("Artículo 12.- Texto"));
    }

    #[test]
    fn transitory_markers() {
        assert!(is_transitory_line("DISPOSICIONES TRANSITORIAS"));
        assert!(is_transitory_line("\"Disposiciones transitorias"));
        assert!(!is_transitory_line("conforme a las disposiciones transitorias"));
        assert!(is_transitory_label("Título Final. Disposiciones Transitorias"));
        assert!(!is_transitory_label("Título I"));
    }

    fn designator(line: &str) -> Option<(u8, String)> {
        division(line).map(|d| (d.level, d.designator))
    }

    #[test]
    fn divisions() {
        assert_eq!(designator("Título I"), Some((0, "titulo_i".into())));
        assert_eq!(designator("TÍTULO II De los fondos"), Some((0, "titulo_ii".into())));
        assert_eq!(designator("Título I bis"), Some((0, "titulo_i_bis".into())));
        assert_eq!(designator("\u{201C}Párrafo 3°"), Some((2, "parrafo_3".into())));
        assert_eq!(designator("Capitulo IV"), Some((1, "capitulo_iv".into())));
        assert_eq!(designator("Título"), Some((0, "titulo".into())));
        assert!(division("Titulares de cuentas").is_none());
        assert_eq!(division_heading("  \"Título I De la ley "), "Título I De la ley");
    }

    #[test]
    fn numbered_headings() {
        assert_eq!(
            numbered("Artículo 12°.- Texto"),
            Some(NumberedMarker {
                number: 12,
                suffix: None,
                transitory: false
            })
        );
        assert_eq!(
            numbered("ARTÍCULO 5 QUÁTER.- Texto").and_then(|m| m.suffix),
            Some("quater".to_string())
        );
        assert_eq!(numbered("Artículo 1o.- Texto").map(|m| m.number), Some(1));
        assert!(numbered("Artículo 3° transitorio.- Texto").is_some_and(|m| m.transitory));
        assert_eq!(numbered("Artículo 7").map(|m| m.number), Some(7));
    }

    #[test]
    fn numbered_rejects_references() {
        assert!(numbered("Artículo 2 de la ley N° 18.045").is_none());
        assert!(numbered("El artículo 2.- no empieza la línea").is_none());
        assert!(numbered("Artículo primero.- Texto").is_none());
    }

    #[test]
    fn ordinal_headings() {
        let m = ordinal("Artículo vigésimo primero.- Texto").unwrap();
        assert_eq!(m.words, "vigésimo primero");
        assert!(!m.transitory);

        let m = ordinal("Artículo primero transitorio.- Texto").unwrap();
        assert_eq!(m.words, "primero");
        assert!(m.transitory);

        let m = ordinal("Artículo primero17.- Texto").unwrap();
        assert_eq!(m.words, "primero");

        assert!(ordinal("Artículo único.- Texto").is_some_and(|m| m.is_unique()));
        let m = ordinal("Artículo vigésimo segundo transitorio.- Texto").unwrap();
        assert_eq!(m.words, "vigésimo segundo");
        assert!(m.transitory);

        assert!(ordinal("Artículo tercero de la ley").is_none());
        assert!(ordinal("Artículo tercero del Código.").is_none());
        assert!(ordinal("Artículo segundo: Texto").is_none());
        assert!(ordinal("Artículo primero.– Texto").is_some());
        assert!(ordinal("Artículo 3.- Texto").is_none());
    }
}
