//! Content-based movie recommender
//!
//! Movies are compared by the TF-IDF vectors of their genre text. A title
//! query is resolved by caseless equality, then caseless literal substring,
//! and the matched movie's nearest neighbours are returned by cosine score.

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use dataset::build_default_recommender;
pub use models::{Movie, MovieRecord, Recommendation};
pub use services::{CorpusError, CorpusIndex, RecommendError, Recommender};
