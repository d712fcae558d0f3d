/// Folds text for caseless comparison
///
/// Full Unicode default case folding, so "STRASSE", "Straße" and "strasse"
/// all compare equal, as do ligatures and their spelled-out letters.
pub fn casefold(text: &str) -> String {
    caseless::default_case_fold_str(text)
}

/// Case-folded copy of every corpus title, in corpus order
///
/// Queries are matched as literal text. Characters such as `(`, `.` or `*`
/// have no special meaning.
#[derive(Debug, Clone)]
pub struct TitleIndex {
    folded: Vec<String>,
}

impl TitleIndex {
    pub fn new<'a>(titles: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            folded: titles.into_iter().map(casefold).collect(),
        }
    }

    /// Lowest position whose title equals `query` ignoring case
    pub fn exact(&self, query: &str) -> Option<usize> {
        let query = casefold(query);
        self.folded.iter().position(|title| *title == query)
    }

    /// Positions whose title contains `query` ignoring case, ascending
    pub fn containing<'a>(&'a self, query: &str) -> impl Iterator<Item = usize> + 'a {
        let query = casefold(query);
        self.folded
            .iter()
            .enumerate()
            .filter(move |(_, title)| title.contains(query.as_str()))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> TitleIndex {
        TitleIndex::new([
            "Toy Story",
            "A Bug's Life",
            "Toy Story 2",
            "Se7en (1995)",
            "Straße",
        ])
    }

    #[test]
    fn test_casefold_handles_expansions() {
        assert_eq!(casefold("Straße"), "strasse");
        assert_eq!(casefold("STRASSE"), "strasse");
        assert_eq!(casefold("ΟΔΥΣΣΕΥΣ"), casefold("οδυσσευς"));
    }

    #[test]
    fn test_casefold_handles_ligatures_and_long_s() {
        assert_eq!(casefold("ﬁnding"), "finding");
        assert_eq!(casefold("miſsion"), "mission");
        assert_eq!(casefold("ẞ"), "ss");
    }

    #[test]
    fn test_folded_query_matches_plain_title() {
        let index = TitleIndex::new(["Finding Nemo", "Mission", "Heat"]);
        assert_eq!(index.exact("ﬁnding nemo"), Some(0));
        assert_eq!(index.exact("MIſSION"), Some(1));
        assert_eq!(index.containing("ﬁnd").collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_exact_ignores_case() {
        assert_eq!(index().exact("toy story"), Some(0));
        assert_eq!(index().exact("TOY STORY 2"), Some(2));
        assert_eq!(index().exact("strasse"), Some(4));
    }

    #[test]
    fn test_exact_requires_whole_title() {
        assert_eq!(index().exact("Toy"), None);
    }

    #[test]
    fn test_containing_preserves_order() {
        let hits: Vec<usize> = index().containing("story").collect();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_containing_is_literal() {
        assert_eq!(index().containing("(1995)").collect::<Vec<_>>(), vec![3]);
        assert!(index().containing(".*").next().is_none());
        assert!(index().containing("Toy.Story").next().is_none());
    }

    #[test]
    fn test_exact_picks_lowest_duplicate() {
        let index = TitleIndex::new(["Heat", "Drive", "heat"]);
        assert_eq!(index.exact("HEAT"), Some(0));
    }
}
