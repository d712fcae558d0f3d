use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
    dataset, Recommender,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recommender=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Startup aborts on a bad dataset; there is no degraded mode
    let records = dataset::load_movies(&config.movies_csv)
        .with_context(|| format!("Failed to load dataset {}", config.movies_csv.display()))?;
    let recommender = Recommender::from_records(records).context("Failed to build corpus index")?;

    let state = AppState::from_config(recommender, &config);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
