// main.rs - Anna Bingo server
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

use annabingo::logging::{setup_logging, Environment};
use annabingo::{BingoService, CardStore, WebUiConfig, WebUiServer};

#[derive(Parser, Debug)]
#[command(name = "annabingo", version, about)]
struct Config {
    /// Address the HTTP server binds to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port the HTTP server listens on
    #[arg(short = 'p', long, default_value_t = 8000)]
    port: u16,

    /// Path to the SQLite card store
    #[arg(long, default_value = "db/annabingo.db")]
    db_path: String,

    /// Directory of the built frontend
    #[arg(long, default_value = "ui/build")]
    static_dir: String,

    /// Deployment environment
    #[arg(long, value_enum, default_value = "dev")]
    env: Environment,

    /// Log directory, used in prod only
    #[arg(long, default_value = "logs")]
    log_dir: String,
}

// ============================================================================
// FONCTION PRINCIPALE
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    let _logger = setup_logging(config.env, &config.log_dir)?;

    // Ensure data directory exists
    if let Some(parent) = Path::new(&config.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let store = CardStore::open(&config.db_path)?;
    log::info!("card store opened (db: {})", config.db_path);

    let service = BingoService::new(store);
    if let Err(e) = service.rebuild_title_index() {
        log::warn!("index on field title not created: {}", e);
    }

    let web_config = WebUiConfig {
        port: config.port,
        host: config.host,
        static_dir: config.static_dir,
    };

    log::info!("starting in {:?} mode", config.env);
    WebUiServer::new(web_config, Arc::new(service)).start().await
}
