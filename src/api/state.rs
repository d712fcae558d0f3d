use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::dataset;
use crate::error::{AppError, AppResult};
use crate::services::Recommender;

/// Shared application state
///
/// Readers clone the current `Arc<Recommender>` and release the lock before
/// computing. A reload builds a complete instance first and only then swaps
/// the handle, so no request ever sees a partial corpus.
#[derive(Clone)]
pub struct AppState {
    recommender: Arc<RwLock<Arc<Recommender>>>,
    dataset_path: Option<PathBuf>,
    pub suggestion_limit: usize,
    pub max_limit: usize,
}

impl AppState {
    /// Creates state around an already built recommender, without reload support
    pub fn new(recommender: Recommender) -> Self {
        let defaults = Config::default();
        Self {
            recommender: Arc::new(RwLock::new(Arc::new(recommender))),
            dataset_path: None,
            suggestion_limit: defaults.suggestion_limit,
            max_limit: defaults.max_limit,
        }
    }

    /// Creates state from configuration, remembering the dataset for reloads
    pub fn from_config(recommender: Recommender, config: &Config) -> Self {
        Self {
            recommender: Arc::new(RwLock::new(Arc::new(recommender))),
            dataset_path: Some(config.movies_csv.clone()),
            suggestion_limit: config.suggestion_limit,
            max_limit: config.max_limit,
        }
    }

    /// Current recommender handle
    pub async fn recommender(&self) -> Arc<Recommender> {
        self.recommender.read().await.clone()
    }

    /// Replaces the recommender handle wholesale
    pub async fn swap(&self, recommender: Recommender) -> Arc<Recommender> {
        let fresh = Arc::new(recommender);
        let mut guard = self.recommender.write().await;
        *guard = fresh.clone();
        fresh
    }

    /// Rebuilds the recommender from the configured dataset and swaps it in
    ///
    /// On failure the previous recommender keeps serving.
    pub async fn reload(&self) -> AppResult<Arc<Recommender>> {
        let path = self
            .dataset_path
            .clone()
            .ok_or_else(|| AppError::InvalidInput("No dataset configured for reload".to_string()))?;

        let recommender = tokio::task::spawn_blocking(move || -> AppResult<Recommender> {
            let records = dataset::load_movies(&path)?;
            Ok(Recommender::from_records(records)?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(self.swap(recommender).await)
    }
}
