pub mod corpus_index;
pub mod recommender;
pub mod title_search;
pub mod vector_space;

pub use corpus_index::{CorpusError, CorpusIndex};
pub use recommender::{RecommendError, Recommender, TitleMatch};
