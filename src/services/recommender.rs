use thiserror::Error;

use crate::models::{Movie, MovieRecord, Recommendation};
use crate::services::corpus_index::{CorpusError, CorpusIndex, CorpusResult};
use crate::services::title_search::TitleIndex;

/// Error types for recommendation queries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Provide a non-empty movie title string")]
    InvalidQuery,
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

/// How a title query was resolved to a corpus position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleMatch {
    /// Caseless equality with a title
    Exact(usize),
    /// Caseless literal substring of a title
    Partial(usize),
}

impl TitleMatch {
    pub fn index(self) -> usize {
        match self {
            TitleMatch::Exact(index) | TitleMatch::Partial(index) => index,
        }
    }
}

/// Content-based recommender over genre TF-IDF similarity
///
/// Built once and read-only afterwards. Share it behind an `Arc` and swap the
/// whole handle to pick up a new dataset.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: CorpusIndex,
    titles: TitleIndex,
}

impl Recommender {
    pub fn new(corpus: CorpusIndex) -> Self {
        let titles = TitleIndex::new(corpus.movies().iter().map(|m| m.title.as_str()));
        Self { corpus, titles }
    }

    pub fn from_movies(movies: Vec<Movie>) -> CorpusResult<Self> {
        CorpusIndex::build(movies).map(Self::new)
    }

    pub fn from_records(records: Vec<MovieRecord>) -> CorpusResult<Self> {
        CorpusIndex::from_records(records).map(Self::new)
    }

    pub fn corpus(&self) -> &CorpusIndex {
        &self.corpus
    }

    pub fn movies(&self) -> &[Movie] {
        self.corpus.movies()
    }

    /// Resolves a query to a corpus position
    ///
    /// Tries caseless equality first, then caseless substring containment.
    /// The lowest matching position wins within each stage.
    pub fn match_title(&self, query: &str) -> Option<TitleMatch> {
        if let Some(index) = self.titles.exact(query) {
            return Some(TitleMatch::Exact(index));
        }
        self.titles.containing(query).next().map(TitleMatch::Partial)
    }

    /// Returns up to `top_n` movies most similar to the one matching `query`
    ///
    /// An unmatched query yields an empty list, not an error. The matched
    /// movie is never part of its own results. Equal scores keep corpus order.
    pub fn recommend(
        &self,
        query: &str,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        if query.is_empty() {
            return Err(RecommendError::InvalidQuery);
        }

        let Some(matched) = self.match_title(query) else {
            tracing::debug!(query = %query, "No title match");
            return Ok(vec![]);
        };
        let idx = matched.index();
        tracing::debug!(
            query = %query,
            matched = ?matched,
            title = %self.corpus.movies()[idx].title,
            "Resolved title"
        );

        let mut ranked: Vec<(usize, f64)> = self
            .corpus
            .similarity(idx)?
            .into_iter()
            .filter(|(i, _)| *i != idx)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let movies = self.corpus.movies();
        Ok(ranked
            .into_iter()
            .take(top_n)
            .map(|(i, score)| Recommendation::new(movies[i].title.clone(), score))
            .collect())
    }

    /// Titles containing `query` ignoring case, in corpus order, at most `limit`
    pub fn suggest_titles(&self, query: &str, limit: usize) -> Vec<String> {
        if query.is_empty() {
            return vec![];
        }
        let movies = self.corpus.movies();
        self.titles
            .containing(query)
            .take(limit)
            .map(|i| movies[i].title.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_recommender() -> Recommender {
        Recommender::from_movies(vec![
            Movie::new("Toy Story", "Animation Comedy Family"),
            Movie::new("A Bug's Life", "Animation Comedy"),
            Movie::new("Heat", "Action Crime Thriller"),
        ])
        .unwrap()
    }

    fn titles(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.title()).collect()
    }

    #[test]
    fn test_recommend_ranks_overlap_first() {
        let recs = example_recommender().recommend("Toy Story", 2).unwrap();
        assert_eq!(titles(&recs), vec!["A Bug's Life", "Heat"]);
        assert!(recs[0].score() > 0.0);
        assert!(recs[1].score().abs() < 1e-9);
    }

    #[test]
    fn test_recommend_exact_match_ignores_case() {
        let recommender = example_recommender();
        let lower = recommender.recommend("toy story", 1).unwrap();
        let exact = recommender.recommend("Toy Story", 1).unwrap();
        assert_eq!(lower, exact);
        assert_eq!(titles(&lower), vec!["A Bug's Life"]);
    }

    #[test]
    fn test_match_title_folds_ligatures_and_long_s() {
        let recommender = Recommender::from_movies(vec![
            Movie::new("Finding Nemo", "Animation Family"),
            Movie::new("Mission", "Drama"),
            Movie::new("Heat", "Action Crime"),
        ])
        .unwrap();
        assert_eq!(recommender.match_title("ﬁnding nemo"), Some(TitleMatch::Exact(0)));
        assert_eq!(recommender.match_title("miſsion"), Some(TitleMatch::Exact(1)));
        assert_eq!(recommender.suggest_titles("ﬁnding", 5), vec!["Finding Nemo"]);
    }

    #[test]
    fn test_recommend_substring_fallback() {
        let recommender = example_recommender();
        assert_eq!(recommender.match_title("Toy"), Some(TitleMatch::Partial(0)));
        let recs = recommender.recommend("Toy", 5).unwrap();
        assert_eq!(titles(&recs), vec!["A Bug's Life", "Heat"]);
    }

    #[test]
    fn test_recommend_no_match_is_empty() {
        let recs = example_recommender().recommend("Nonexistent Movie", 5).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_recommend_empty_query_is_invalid() {
        assert_eq!(
            example_recommender().recommend("", 5).unwrap_err(),
            RecommendError::InvalidQuery
        );
    }

    #[test]
    fn test_recommend_respects_top_n() {
        let recommender = example_recommender();
        assert_eq!(recommender.recommend("Heat", 1).unwrap().len(), 1);
        assert_eq!(recommender.recommend("Heat", 10).unwrap().len(), 2);
        assert!(recommender.recommend("Heat", 0).unwrap().is_empty());
    }

    #[test]
    fn test_recommend_excludes_query_movie() {
        let recommender = example_recommender();
        for movie in recommender.movies() {
            let recs = recommender.recommend(&movie.title, 10).unwrap();
            assert!(!titles(&recs).contains(&movie.title.as_str()));
        }
    }

    #[test]
    fn test_exact_stage_beats_earlier_substring() {
        let recommender = Recommender::from_movies(vec![
            Movie::new("Heat Wave", "Comedy"),
            Movie::new("Heat", "Action Crime"),
            Movie::new("Ronin", "Action Crime"),
        ])
        .unwrap();
        assert_eq!(recommender.match_title("heat"), Some(TitleMatch::Exact(1)));
        let recs = recommender.recommend("heat", 1).unwrap();
        assert_eq!(titles(&recs), vec!["Ronin"]);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let recommender = Recommender::from_movies(vec![
            Movie::new("Zulu", "War"),
            Movie::new("Query", "Drama"),
            Movie::new("Alpha", "Drama"),
            Movie::new("Beta", "Drama"),
            Movie::new("Gamma", "Western"),
            Movie::new("Delta", "Drama"),
        ])
        .unwrap();
        let recs = recommender.recommend("Query", 5).unwrap();
        assert_eq!(titles(&recs), vec!["Alpha", "Beta", "Delta", "Zulu", "Gamma"]);
    }

    #[test]
    fn test_scores_non_increasing() {
        let recommender = Recommender::from_movies(vec![
            Movie::new("Query", "Action Adventure Sci Fi"),
            Movie::new("One", "Action"),
            Movie::new("Two", "Action Adventure Sci Fi"),
            Movie::new("Three", "Drama"),
            Movie::new("Four", "Adventure Sci Fi"),
        ])
        .unwrap();
        let recs = recommender.recommend("Query", 10).unwrap();
        assert_eq!(titles(&recs)[0], "Two");
        assert!(recs.windows(2).all(|w| w[0].score() >= w[1].score()));
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let recommender = example_recommender();
        let first = recommender.recommend("Toy Story", 5).unwrap();
        let second = recommender.recommend("Toy Story", 5).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_duplicate_titles_resolve_to_lowest_index() {
        let recommender = Recommender::from_movies(vec![
            Movie::new("Heat", "Action Crime"),
            Movie::new("Ronin", "Action Crime"),
            Movie::new("Heat", "Romance"),
        ])
        .unwrap();
        assert_eq!(recommender.match_title("Heat"), Some(TitleMatch::Exact(0)));
        let recs = recommender.recommend("Heat", 1).unwrap();
        assert_eq!(titles(&recs), vec!["Ronin"]);
    }

    #[test]
    fn test_query_with_pattern_characters_is_literal() {
        let recommender = Recommender::from_movies(vec![
            Movie::new("Heat", "Action"),
            Movie::new("What's Up, Doc? (1972)", "Comedy"),
        ])
        .unwrap();
        assert_eq!(recommender.match_title("Doc? (1972"), Some(TitleMatch::Partial(1)));
        assert_eq!(recommender.match_title(".*"), None);
    }

    #[test]
    fn test_suggest_titles() {
        let recommender = example_recommender();
        assert_eq!(recommender.suggest_titles("bug", 5), vec!["A Bug's Life"]);
        assert!(recommender.suggest_titles("", 5).is_empty());
        assert!(recommender.suggest_titles("zzz", 5).is_empty());
    }

    #[test]
    fn test_suggest_titles_respects_limit_and_order() {
        let recommender = Recommender::from_movies(vec![
            Movie::new("Toy Story 3", "Animation"),
            Movie::new("Heat", "Action"),
            Movie::new("Toy Story", "Animation"),
            Movie::new("Toy Story 2", "Animation"),
        ])
        .unwrap();
        assert_eq!(
            recommender.suggest_titles("STORY", 2),
            vec!["Toy Story 3", "Toy Story"]
        );
    }
}
