use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A movie in the recommendation corpus
///
/// Identity is positional: a movie is addressed by its index in the corpus,
/// not by its title. Two movies may share the same title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    /// Normalized genre text, separators already replaced by spaces
    pub genres: String,
}

impl Movie {
    pub fn new(title: impl Into<String>, genres: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genres: genres.into(),
        }
    }
}

// ============================================================================
// Ingestion Types
// ============================================================================

/// A dataset row that has not yet crossed into the corpus
///
/// Fields are optional because the dataset may leave them blank. The corpus
/// index refuses records with an absent field instead of patching them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MovieRecord {
    pub title: Option<String>,
    pub genres: Option<String>,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, genres: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            genres: Some(genres.into()),
        }
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// A single recommended movie with its similarity to the queried title
///
/// Scores lie in `[0, 1]`; `1.0` means the genre vectors point the same way,
/// `0.0` means no shared terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    title: String,
    score: f64,
}

impl Recommendation {
    pub(crate) fn new(title: String, score: f64) -> Self {
        Self { title, score }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (score={:.3})", self.title, self.score)
    }
}
