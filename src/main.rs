use dotenvy::dotenv;
use std::env;
use stockvend::errors::{Error, Result};
use stockvend::{api, bot, config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load application settings (config.toml + environment overrides)
    let settings = config::Settings::load()
        .inspect_err(|e| error!("Failed to load application settings: {e}"))?;
    info!("Successfully processed application settings.");

    // 4. Connect the database shared by the bot and the admin API
    let db = config::database::create_connection(&settings.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to the database: {e}"))?;

    if settings.create_tables {
        config::database::create_tables(&db)
            .await
            .inspect(|_| info!("Database tables created."))
            .inspect_err(|e| error!("Failed to create database tables: {e}"))?;
    }

    // 5. Build the relay hub and API state up front; the hub lives for the
    // whole process and is passed by reference through AppState
    let state = api::AppState {
        db: db.clone(),
        relay: api::relay::RelayHub::new(),
        dashboard_token: settings.dashboard_token.clone(),
    };

    // 6. Run the admin API and the bot side by side; either one exiting
    // takes the process down
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in Settings
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    tokio::select! {
        result = api::serve(state, &settings.api_bind_addr) => {
            result.inspect_err(|e| error!("Admin API exited: {e}"))
        }
        result = bot::run_bot(token, db) => {
            result.inspect_err(|e| error!("Bot exited: {e}"))
        }
    }
}
