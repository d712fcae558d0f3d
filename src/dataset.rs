use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::MovieRecord;
use crate::services::Recommender;

/// Columns every dataset must provide
pub const REQUIRED_COLUMNS: [&str; 2] = ["title", "genres"];

/// Dataset bundled with the repository, used when no path is given
pub fn default_dataset_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("movies.csv")
}

/// Error types for dataset ingestion
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Movie dataset not found at: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset missing required columns: {missing:?}. Available columns: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
}

/// Loads and normalizes movie rows from a CSV file
pub fn load_movies(path: &Path) -> Result<Vec<MovieRecord>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let records = load_movies_from_reader(file)?;

    tracing::info!(
        path = %path.display(),
        row_count = records.len(),
        "Loaded movie dataset"
    );
    Ok(records)
}

/// Loads and normalizes movie rows from any CSV source with a header row
///
/// `title` and `genres` are located ignoring header case. Extra columns are
/// ignored. A blank genres cell becomes an empty string and `|` separators
/// become spaces. A blank title cell is left absent for the corpus to reject.
pub fn load_movies_from_reader<R: Read>(reader: R) -> Result<Vec<MovieRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let columns = REQUIRED_COLUMNS.map(|name| find_column(&headers, name));
    let [Some(title_col), Some(genres_col)] = columns else {
        let missing = REQUIRED_COLUMNS
            .iter()
            .zip(columns)
            .filter(|(_, col)| col.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        return Err(DatasetError::MissingColumns {
            missing,
            available: headers,
        });
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let title = row
            .get(title_col)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let genres = normalize_genres(row.get(genres_col).unwrap_or_default());
        records.push(MovieRecord {
            title,
            genres: Some(genres),
        });
    }
    Ok(records)
}

/// Loads a dataset (the bundled one when `path` is `None`) and builds a recommender
pub fn build_default_recommender(path: Option<&Path>) -> anyhow::Result<Recommender> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_dataset_path);
    let records = load_movies(&path)?;
    let recommender = Recommender::from_records(records)?;
    Ok(recommender)
}

/// Exact header name first, then a case-insensitive match
fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name)))
}

fn normalize_genres(raw: &str) -> String {
    raw.replace('|', " ")
}
