//! Hard Rain API server entry point.

use std::sync::Arc;

use hardrain_api::build_router;
use hardrain_api::config::AppConfig;
use hardrain_api::error::AppError;
use hardrain_api::state::AppState;
use hardrain_core::clock::SystemClock;
use hardrain_core::rng::{DeterministicRng, SystemRng};
use hardrain_core::sink::LineSink;
use hardrain_generator::OpenAiLineGenerator;
use hardrain_stanza::application::sequencer::Sequencer;
use hardrain_store::{PgLineSink, TracingLineSink};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Hard Rain API server");

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr()?;

    let sink: Arc<dyn LineSink> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await?;
            sqlx::migrate!("../../migrations").run(&pool).await?;
            tracing::info!("persisting lines to PostgreSQL");
            Arc::new(PgLineSink::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; lines will only be logged");
            Arc::new(TracingLineSink)
        }
    };

    let rng: Box<dyn DeterministicRng> = match config.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "sampling stanza lengths from a fixed seed");
            Box::new(SystemRng::seeded(seed))
        }
        None => Box::new(SystemRng::from_entropy()),
    };

    let sequencer = Sequencer::seeded(
        Arc::new(OpenAiLineGenerator::new(config.generator)),
        sink,
        Arc::new(SystemClock),
        rng,
    );
    let app = build_router(AppState::new(Arc::new(sequencer)));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
