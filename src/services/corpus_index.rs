use std::collections::HashMap;

use thiserror::Error;

use crate::models::{Movie, MovieRecord};
use crate::services::title_search::casefold;
use crate::services::vector_space::VectorSpace;

/// Error types for building and querying the corpus index
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorpusError {
    #[error("Corpus is empty: at least one movie is required")]
    EmptyCorpus,
    #[error("Invalid movie at position {position}: missing {field}")]
    InvalidMovie { position: usize, field: &'static str },
    #[error("Index {index} is out of bounds for a corpus of {len} movies")]
    IndexOutOfBounds { index: usize, len: usize },
}

pub type CorpusResult<T> = Result<T, CorpusError>;

/// Immutable movie list plus the TF-IDF space built over its genre text
///
/// Positions are assigned once at build time and never change.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    movies: Vec<Movie>,
    space: VectorSpace,
}

impl CorpusIndex {
    /// Builds the index from validated movies
    pub fn build(movies: Vec<Movie>) -> CorpusResult<Self> {
        if movies.is_empty() {
            return Err(CorpusError::EmptyCorpus);
        }

        let genres: Vec<&str> = movies.iter().map(|m| m.genres.as_str()).collect();
        let space = VectorSpace::fit(&genres);

        tracing::info!(
            movie_count = movies.len(),
            vocabulary_size = space.vocabulary().len(),
            "Corpus index built"
        );
        warn_on_duplicate_titles(&movies);

        Ok(Self { movies, space })
    }

    /// Builds the index from raw dataset rows, refusing any row with an absent field
    pub fn from_records(records: Vec<MovieRecord>) -> CorpusResult<Self> {
        if records.is_empty() {
            return Err(CorpusError::EmptyCorpus);
        }

        let movies = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                let title = record
                    .title
                    .ok_or(CorpusError::InvalidMovie { position, field: "title" })?;
                let genres = record
                    .genres
                    .ok_or(CorpusError::InvalidMovie { position, field: "genres" })?;
                Ok(Movie { title, genres })
            })
            .collect::<CorpusResult<Vec<Movie>>>()?;

        Self::build(movies)
    }

    /// Read-only view of the movies in corpus order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.space.vocabulary().len()
    }

    /// Cosine similarity of movie `index` against every movie, itself included
    ///
    /// Results are in ascending index order. The entry for `index` carries the
    /// maximum score; callers drop it themselves.
    pub fn similarity(&self, index: usize) -> CorpusResult<Vec<(usize, f64)>> {
        let scores = self
            .space
            .similarities(index)
            .ok_or(CorpusError::IndexOutOfBounds {
                index,
                len: self.movies.len(),
            })?;
        Ok(scores.into_iter().enumerate().collect())
    }
}

fn warn_on_duplicate_titles(movies: &[Movie]) {
    let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, movie) in movies.iter().enumerate() {
        positions.entry(casefold(&movie.title)).or_default().push(index);
    }

    let mut duplicates: Vec<Vec<usize>> = positions
        .into_values()
        .filter(|indices| indices.len() > 1)
        .collect();
    duplicates.sort();

    for indices in duplicates {
        tracing::warn!(
            title = %movies[indices[0]].title,
            positions = ?indices,
            "Duplicate title in dataset; lookups resolve to the lowest position"
        );
    }
}
