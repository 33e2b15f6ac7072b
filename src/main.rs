use std::net::TcpListener;
use std::sync::Arc;

use authgate::configuration::get_configuration;
use authgate::startup::run;
use authgate::telemetry::init_telemetry;
use authgate::user_store::{InMemoryUserStore, SharedUserStore};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    tracing::info!("Starting authentication service");

    // Configuration is loaded once; any missing or invalid secret/TTL is
    // fatal here, never at request time.
    let configuration = match get_configuration() {
        Ok(config) => {
            tracing::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    // The seeded in-memory store stands in for an external user store.
    let store: SharedUserStore = match InMemoryUserStore::seeded() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to seed user store: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "User store error",
            ));
        }
    };

    let address = format!("127.0.0.1:{}", configuration.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let server = run(listener, store, configuration.tokens)?;

    server.await
}
