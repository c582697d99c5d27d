use std::env;
use std::path::Path;
use std::sync::Arc;

use log::{error, info, warn};

use pawfacts::configuration::config::Config;
use pawfacts::storage::database_storage::DatabaseStorage;
use pawfacts::storage::memory_storage::MemoryStorage;
use pawfacts::storage::storage_trait::Storage;
use pawfacts::web_interface::web_server::WebServer;

/// Configuration file looked up when no flags are given
const DEFAULT_CONFIG_FILE: &str = "pawfacts.toml";

fn main() {
    // Example how to log
    // https://docs.rs/env_logger/latest/env_logger/
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    println!(
        "
==============================================================================
                     pawfacts - animal fact store v0.1.0
==============================================================================
"
    );

    info!("Importing configuration");

    // Flags on the command line take precedence; otherwise the config file
    // in the working directory, otherwise defaults
    let config = if env::args().len() > 1 {
        Config::from_args()
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        Config::from_file(Path::new(DEFAULT_CONFIG_FILE))
    } else {
        Ok(Config::default())
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Unable to import configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration imported successfully");

    // Backend mode is decided once here; there is no later promotion back
    // to the database
    let storage: Arc<dyn Storage> = match DatabaseStorage::new_file(&config.database_path) {
        Ok(db) => {
            info!("Connected to SQLite at {}", config.database_path.display());
            Arc::new(db)
        }
        Err(e) => {
            warn!("Could not open the database: {}", e);
            warn!("Running in fallback mode with in-memory storage");
            Arc::new(MemoryStorage::new())
        }
    };

    // The database backend drives its own runtime, so storage is set up
    // before entering an async context and the server runtime is built
    // explicitly here
    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Unable to start the tokio runtime: {}, exiting...", e);
            std::process::exit(1);
        }
    };

    let server = WebServer::new(storage, config);
    if let Err(e) = rt.block_on(server.start()) {
        error!("Error occured in the web server: {}, exiting...", e);
        std::process::exit(1);
    }
}
