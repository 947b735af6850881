//! MongoDB connection bootstrap.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use rest_api_core::{ConnectConfig, StorageConfig};

use super::{do_with_tries, ConnectError};

const APP_NAME: &str = "rest-api";

/// Connection string from config fields. Nothing is validated or escaped;
/// malformed values surface as connection failures.
pub fn connection_uri(config: &StorageConfig) -> String {
    if !config.has_credentials() {
        return format!("mongodb://{}:{}", config.host, config.port);
    }
    let auth_source =
        if config.auth_source.is_empty() { &config.database } else { &config.auth_source };
    format!(
        "mongodb://{}:{}@{}:{}/?authSource={}",
        config.username, config.password, config.host, config.port, auth_source
    )
}

/// Open a pooled client and return a handle to the configured database.
///
/// Client creation is lazy in the driver, so every attempt ends with a
/// `ping` to prove the server is reachable.
pub async fn connect(policy: ConnectConfig, config: &StorageConfig) -> Result<Database, ConnectError> {
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_attempts = policy.effective_attempts(),
        "connecting to MongoDB"
    );
    let uri = connection_uri(config);
    let uri = uri.as_str();

    let database = do_with_tries(policy, move || async move {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(APP_NAME.to_owned());
        options.server_selection_timeout = Some(policy.attempt_timeout);
        options.connect_timeout = Some(policy.attempt_timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }).await?;
        Ok::<_, mongodb::error::Error>(database)
    })
    .await?;

    tracing::info!(database = database.name(), "connected to MongoDB");
    Ok(database)
}
