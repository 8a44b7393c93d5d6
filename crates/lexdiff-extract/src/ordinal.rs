//! Spanish ordinal words to numbers.
//!
//! Transitory provisions are often headed with ordinal words instead of
//! digits (`Artículo vigésimo primero.-`). The mapping covers the forms that
//! occur in practice: units, tens, the special eleventh/twelfth, one-word
//! compounds (`decimotercero`, `vigesimoprimero`, `decimoctavo`) and two-word
//! compounds (`cuadragésimo segundo`).

const UNITS: &[(&str, u32)] = &[
    ("primero", 1),
    ("primer", 1),
    ("segundo", 2),
    ("tercero", 3),
    ("tercer", 3),
    ("cuarto", 4),
    ("quinto", 5),
    ("sexto", 6),
    ("septimo", 7),
    ("setimo", 7),
    ("octavo", 8),
    ("noveno", 9),
    ("nono", 9),
];

const TENS: &[(&str, u32)] = &[
    ("decimo", 10),
    ("vigesimo", 20),
    ("trigesimo", 30),
    ("cuadragesimo", 40),
    ("quincuagesimo", 50),
    ("sexagesimo", 60),
    ("septuagesimo", 70),
    ("octogesimo", 80),
    ("nonagesimo", 90),
];

const SPECIAL: &[(&str, u32)] = &[("undecimo", 11), ("duodecimo", 12)];

/// Map Spanish ordinal words to a number.
///
/// Matching is case- and accent-insensitive; trailing footnote digits
/// (`primero17`) are ignored. Returns `None` for anything unrecognized.
pub fn ordinal_to_number(text: &str) -> Option<u32> {
    let folded = fold_accents(text);
    let folded = folded.trim_end_matches(|c: char| c.is_ascii_digit());
    let words: Vec<&str> = folded.split_whitespace().collect();

    match words.as_slice() {
        [word] => single_word(word),
        [tens, unit] => Some(lookup(TENS, tens)? + lookup(UNITS, unit)?),
        _ => None,
    }
}

fn single_word(word: &str) -> Option<u32> {
    if let Some(n) = lookup(UNITS, word)
        .or_else(|| lookup(TENS, word))
        .or_else(|| lookup(SPECIAL, word))
    {
        return Some(n);
    }

    // One-word compound. The tens stem may lose its final vowel before a
    // unit starting with one (`decim` + `octavo`).
    TENS.iter().find_map(|&(stem, tens)| {
        let rest = word
            .strip_prefix(stem)
            .filter(|rest| !rest.is_empty())
            .and_then(|rest| lookup(UNITS, rest))
            .or_else(|| {
                word.strip_prefix(&stem[..stem.len() - 1])
                    .and_then(|rest| lookup(UNITS, rest))
            })?;
        Some(tens + rest)
    })
}

fn lookup(table: &[(&str, u32)], word: &str) -> Option<u32> {
    table.iter().find(|(w, _)| *w == word).map(|&(_, n)| n)
}

/// Lowercase and strip Spanish diacritics.
pub(crate) fn fold_accents(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Identifier-safe form of free text: folded, alphanumerics joined by `_`.
pub(crate) fn slug(text: &str) -> String {
    fold_accents(text)
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_and_tens() {
        assert_eq!(ordinal_to_number("primero"), Some(1));
        assert_eq!(ordinal_to_number("Noveno"), Some(9));
        assert_eq!(ordinal_to_number("décimo"), Some(10));
        assert_eq!(ordinal_to_number("trigésimo"), Some(30));
        assert_eq!(ordinal_to_number("NONAGÉSIMO"), Some(90));
    }

    #[test]
    fn specials() {
        assert_eq!(ordinal_to_number("undécimo"), Some(11));
        assert_eq!(ordinal_to_number("duodécimo"), Some(12));
    }

    #[test]
    fn one_word_compounds() {
        assert_eq!(ordinal_to_number("decimotercero"), Some(13));
        assert_eq!(ordinal_to_number("decimoséptimo"), Some(17));
        assert_eq!(ordinal_to_number("decimoctavo"), Some(18));
        assert_eq!(ordinal_to_number("vigesimoprimero"), Some(21));
        assert_eq!(ordinal_to_number("vigesimoctavo"), Some(28));
    }

    #[test]
    fn two_word_compounds() {
        assert_eq!(ordinal_to_number("vigésimo primero"), Some(21));
        assert_eq!(ordinal_to_number("cuadragésimo segundo"), Some(42));
        assert_eq!(ordinal_to_number("décimo  tercero"), Some(13));
    }

    #[test]
    fn strips_footnote_digits() {
        assert_eq!(ordinal_to_number("primero17"), Some(1));
        assert_eq!(ordinal_to_number("vigésimo segundo3"), Some(22));
    }

    #[test]
    fn unknown_forms() {
        assert_eq!(ordinal_to_number("centésimo"), None);
        assert_eq!(ordinal_to_number("primero segundo"), None);
        assert_eq!(ordinal_to_number("de la ley"), None);
        assert_eq!(ordinal_to_number(""), None);
        assert_eq!(ordinal_to_number("decimo"), Some(10));
        assert_eq!(ordinal_to_number("decim"), None);
    }

    #[test]
    fn slug_is_identifier_safe() {
        assert_eq!(slug("Centésimo  Único"), "centesimo_unico");
        assert_eq!(slug("bis-ter"), "bis_ter");
    }
}
