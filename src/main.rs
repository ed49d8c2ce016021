use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use medibook::api::server;
use medibook::app_state::AppState;
use medibook::config::{self, Config};
use medibook::db;
use medibook::recommend::DoctorRecommender;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    if let Err(e) = run() {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = Config::from_env();

    if let Some(dir) = config.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Cannot create data directory {}: {e}", dir.display()))?;
    }

    let mut conn = db::open_database(&config.db_path)
        .map_err(|e| format!("Cannot open database {}: {e}", config.db_path.display()))?;
    if db::seed_demo_roster(&mut conn).map_err(|e| format!("Cannot seed demo roster: {e}"))? {
        tracing::info!("Seeded demo doctor roster");
    }
    drop(conn);

    // The completion client blocks on HTTP; it must be built before the
    // async runtime starts.
    let recommender = DoctorRecommender::from_config(&config.openai);
    if recommender.ai_enabled() {
        tracing::info!(model = %config.openai.model, "AI recommendations enabled");
    } else {
        tracing::info!("No API key configured, recommendations use tag matching only");
    }

    let state = Arc::new(AppState::new(config.db_path.clone(), recommender));

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Cannot start async runtime: {e}"))?;
    runtime.block_on(server::serve(state, &config))
}
