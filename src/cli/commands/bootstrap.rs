use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, error, info, warn};

use crate::provision::{provision_admin, AdminSpec, ProvisionOutcome, ProvisionPolicy};

/// Deployment bootstrap: connect, migrate, provision the admin account.
///
/// Every step is fatal on failure and aborts the remaining sequence, so a
/// deploy pipeline invoking this command halts on the first broken step.
/// Re-running is safe: migrations are tracked, and provisioning converges
/// to the same account state.
pub async fn bootstrap(
    database_url: &str,
    spec: &AdminSpec,
    policy: ProvisionPolicy,
) -> Result<()> {
    info!("Running deployment bootstrap");
    debug!("Database URL: {}", database_url);
    debug!("Provisioning policy: {:?}", policy);

    if spec.password == "admin123" {
        warn!("Admin password is the built-in development default; set ADMIN_PASSWORD for real deployments");
    }

    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    info!("Running database migrations");
    match Migrator::up(&db, None).await {
        Ok(_) => info!("Database migrations completed successfully"),
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    info!("Provisioning administrative account '{}'", spec.username);
    match provision_admin(&db, spec, policy).await {
        Ok(ProvisionOutcome::Created) => {
            info!("Admin account '{}' created", spec.username);
        }
        Ok(ProvisionOutcome::Repaired) => {
            info!(
                "Admin account '{}' already existed; privileges and role re-asserted",
                spec.username
            );
        }
        Ok(ProvisionOutcome::AlreadyPresent) => {
            info!(
                "Admin account '{}' already exists; left untouched (create-only policy)",
                spec.username
            );
        }
        Err(e) => {
            error!("Failed to provision admin account '{}': {}", spec.username, e);
            return Err(e.into());
        }
    }

    info!("Bootstrap completed successfully!");
    Ok(())
}
