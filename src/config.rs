use anyhow::Result;
use moka::future::Cache;
use sea_orm::Database;
use std::time::Duration;

use crate::auth::AuthConfig;
use crate::schemas::AppState;

/// Initialize application state against the given database URL.
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    // Short-lived cache for the dashboard aggregations
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    let auth = AuthConfig::from_env();

    Ok(AppState { db, cache, auth })
}
