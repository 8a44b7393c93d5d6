use std::fmt;

/// Parsed form of a canonical article identifier.
///
/// Identifiers live in two disjoint numbering spaces: permanent articles
/// (`art_5`, `art_5bis`) and transitory articles (`art_t3`). A trailing
/// collision suffix (`art_5_t1`) assigned during extraction is ignored when
/// parsing, so a disambiguated duplicate still renders with its number.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArticleNumber {
    /// A numbered article of the main body, optionally with a Latin suffix.
    Permanent { number: u32, suffix: Option<String> },
    /// An article of the transitory provisions.
    Transitory { number: u32 },
    /// The sole article of a single-article law (`art_unico`).
    Unique,
    /// Anything not following the canonical scheme.
    Other(String),
}

impl ArticleNumber {
    /// Parse an article identifier.
    pub fn parse(id: &str) -> Self {
        let Some(rest) = id.strip_prefix("art_") else {
            return Self::Other(id.to_string());
        };

        if let Some(parsed) = parse_body(rest) {
            return parsed;
        }

        // Duplicate marker: `<base>_t<k>`.
        if let Some((base, occurrence)) = rest.rsplit_once("_t") {
            if is_digits(occurrence) {
                if let Some(parsed) = parse_body(base) {
                    return parsed;
                }
            }
        }

        Self::Other(id.to_string())
    }

    /// Canonical identifier for this number.
    pub fn identifier(&self) -> String {
        match self {
            Self::Permanent { number, suffix } => {
                format!("art_{number}{}", suffix.as_deref().unwrap_or(""))
            }
            Self::Transitory { number } => format!("art_t{number}"),
            Self::Unique => "art_unico".to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }

    /// Short display number (`5 bis`, `T3`, `único`).
    pub fn label(&self) -> String {
        match self {
            Self::Permanent {
                number,
                suffix: Some(suffix),
            } => format!("{number} {suffix}"),
            Self::Permanent {
                number,
                suffix: None,
            } => number.to_string(),
            Self::Transitory { number } => format!("T{number}"),
            Self::Unique => "único".to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }

    /// Heading synthesized from the number, as printed in the law.
    pub fn heading(&self) -> String {
        match self {
            Self::Transitory { number } => format!("Artículo {number}° transitorio"),
            Self::Other(raw) => raw.clone(),
            _ => format!("Artículo {}", self.label()),
        }
    }

    pub fn is_transitory(&self) -> bool {
        matches!(self, Self::Transitory { .. })
    }
}

impl fmt::Display for ArticleNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn parse_body(body: &str) -> Option<ArticleNumber> {
    if body == "unico" {
        return Some(ArticleNumber::Unique);
    }

    if let Some(digits) = body.strip_prefix('t') {
        if is_digits(digits) {
            return digits
                .parse()
                .ok()
                .map(|number| ArticleNumber::Transitory { number });
        }
        return None;
    }

    let split = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (digits, suffix) = body.split_at(split);
    if digits.is_empty() || !suffix.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    let number = digits.parse().ok()?;
    Some(ArticleNumber::Permanent {
        number,
        suffix: (!suffix.is_empty()).then(|| suffix.to_string()),
    })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
