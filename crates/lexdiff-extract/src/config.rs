use serde::{Deserialize, Serialize};

/// Extraction tunables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Largest forward jump in permanent numbering still read as a new
    /// article. A bigger jump is an article quoted inside a modifying article.
    pub max_article_jump: u32,
    /// Heading of the section collecting articles before any division.
    pub default_section_heading: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_article_jump: 10,
            default_section_heading: "Disposiciones Generales".to_string(),
        }
    }
}
