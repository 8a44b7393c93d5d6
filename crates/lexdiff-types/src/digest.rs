use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::article::LawState;
use crate::error::TypeError;

const PREFIX: &str = "blake3:";

/// Content digest of a law state.
///
/// A `DocumentDigest` is the BLAKE3 hash of a law state's title, preface,
/// sections and articles, each field length-prefixed so that moving text
/// between fields changes the digest. Identical states always produce the
/// same digest; it serves as the default document reference of a computed
/// change set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentDigest([u8; 32]);

impl DocumentDigest {
    /// Compute the digest of a law state.
    pub fn of(law: &LawState) -> Self {
        let mut hasher = blake3::Hasher::new();
        update_field(&mut hasher, &law.title);
        update_field(&mut hasher, &law.preface);
        hasher.update(&(law.sections.len() as u64).to_le_bytes());
        for section in &law.sections {
            update_field(&mut hasher, &section.id);
            update_field(&mut hasher, &section.heading);
            hasher.update(&(section.articles.len() as u64).to_le_bytes());
            for article in &section.articles {
                update_field(&mut hasher, &article.id);
                update_field(&mut hasher, &article.num);
                update_field(&mut hasher, &article.heading);
                update_field(&mut hasher, &article.content);
            }
        }
        Self(*hasher.finalize().as_bytes())
    }

    fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Document reference form, `blake3:<hex>`.
    pub fn to_reference(&self) -> String {
        format!("{PREFIX}{}", self.to_hex())
    }
}

fn update_field(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

impl fmt::Debug for DocumentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentDigest({})", self.short_hex())
    }
}

impl fmt::Display for DocumentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_reference())
    }
}

impl FromStr for DocumentDigest {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix(PREFIX)
            .ok_or_else(|| TypeError::InvalidDigestReference(s.to_string()))?;
        Self::from_hex(hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{Article, Section};

    fn law(text: &str) -> LawState {
        LawState::new("Ley")
            .with_section(Section::new("sec_titulo_1", "Título I").with_articles(vec![
                Article::new("art_1", text),
            ]))
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(law("a").digest(), law("a").digest());
    }

    #[test]
    fn different_content_produces_different_digests() {
        assert_ne!(law("a").digest(), law("b").digest());
    }

    #[test]
    fn field_boundaries_matter() {
        let mut a = LawState::new("ab");
        a.preface = "c".into();
        let mut b = LawState::new("a");
        b.preface = "bc".into();
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn reference_roundtrip() {
        let digest = law("x").digest();
        let reference = digest.to_reference();
        assert!(reference.starts_with("blake3:"));
        let parsed: DocumentDigest = reference.parse().unwrap();
        assert_eq!(parsed, digest);
        assert_eq!(digest.to_string(), reference);
    }

    #[test]
    fn rejects_bad_references() {
        assert!(matches!(
            "sha256:00".parse::<DocumentDigest>(),
            Err(TypeError::InvalidDigestReference(_))
        ));
        assert!(matches!(
            "blake3:zz".parse::<DocumentDigest>(),
            Err(TypeError::InvalidHex(_))
        ));
        assert_eq!(
            "blake3:abcd".parse::<DocumentDigest>(),
            Err(TypeError::InvalidLength {
                expected: 32,
                actual: 2
            })
        );
    }
}
