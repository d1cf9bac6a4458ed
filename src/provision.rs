use clap::ValueEnum;
use model::entities::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::auth::hash_password;

/// What to do when the administrative account already exists.
///
/// Deploy scripts historically disagreed here: one skipped provisioning
/// entirely for an existing account, another re-asserted privileges on
/// every run. Both behaviors are kept selectable; `create-or-repair` is
/// the default because it is the only one that upholds the "privileges are
/// correct after every deploy" invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProvisionPolicy {
    /// Create the account if missing; otherwise re-assert superuser/staff
    /// flags and the DISTRIBUTOR role. The password is never touched for
    /// an existing account.
    CreateOrRepair,
    /// Create the account if missing; otherwise leave it entirely alone,
    /// even if its privileges or role have drifted.
    CreateOnly,
}

/// Configured identity of the administrative account.
#[derive(Debug, Clone)]
pub struct AdminSpec {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// What provisioning actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// No account existed; one was created.
    Created,
    /// The account existed; privileges and role were re-asserted.
    Repaired,
    /// The account existed and was left untouched (create-only policy).
    AlreadyPresent,
}

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

/// Ensure exactly one account with `spec.username` exists, privileged as a
/// distributor admin. Looks the account up by username and either creates
/// it or converges it according to `policy`; never duplicates.
///
/// The lookup-then-write window is not guarded against a concurrent
/// bootstrap run; deploys are serialized by the pipeline, and a collision
/// surfaces as a unique-constraint error that fails the deploy.
#[instrument(skip(db, spec), fields(username = %spec.username))]
pub async fn provision_admin(
    db: &DatabaseConnection,
    spec: &AdminSpec,
    policy: ProvisionPolicy,
) -> Result<ProvisionOutcome, ProvisionError> {
    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(spec.username.as_str()))
        .one(db)
        .await?;

    match existing {
        None => {
            debug!("admin account missing, creating");
            let password_hash = hash_password(&spec.password)
                .map_err(|e| ProvisionError::PasswordHash(e.to_string()))?;

            user::ActiveModel {
                username: Set(spec.username.clone()),
                password_hash: Set(password_hash),
                email: Set(spec.email.clone()),
                is_staff: Set(true),
                is_superuser: Set(true),
                role: Set(user::Role::Distributor),
                shop_id: Set(None),
                ..Default::default()
            }
            .insert(db)
            .await?;

            info!("admin account created");
            Ok(ProvisionOutcome::Created)
        }
        Some(account) if policy == ProvisionPolicy::CreateOnly => {
            debug!(id = account.id, "admin account exists, create-only policy skips repair");
            Ok(ProvisionOutcome::AlreadyPresent)
        }
        Some(account) => {
            debug!(id = account.id, "admin account exists, re-asserting privileges");
            let mut active: user::ActiveModel = account.into();
            active.is_staff = Set(true);
            active.is_superuser = Set(true);
            active.role = Set(user::Role::Distributor);
            active.update(db).await?;

            info!("admin account privileges re-asserted");
            Ok(ProvisionOutcome::Repaired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use migration::{Migrator, MigratorTrait};
    use model::entities::prelude::*;
    use sea_orm::{ActiveModelTrait, Database, EntityTrait};

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        db
    }

    fn spec() -> AdminSpec {
        AdminSpec {
            username: "admin".to_string(),
            password: "s3cret-pw".to_string(),
            email: "admin@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_admin_on_empty_store() {
        let db = setup_db().await;

        let outcome = provision_admin(&db, &spec(), ProvisionPolicy::CreateOrRepair)
            .await
            .unwrap();
        assert_eq!(outcome, ProvisionOutcome::Created);

        let accounts = User::find().all(&db).await.unwrap();
        assert_eq!(accounts.len(), 1);
        let admin = &accounts[0];
        assert_eq!(admin.username, "admin");
        assert!(admin.is_superuser);
        assert!(admin.is_staff);
        assert_eq!(admin.role, model::entities::user::Role::Distributor);

        // Stored as a hash, not the plaintext
        assert_ne!(admin.password_hash, "s3cret-pw");
        assert!(verify_password("s3cret-pw", &admin.password_hash));
    }

    #[tokio::test]
    async fn second_run_leaves_exactly_one_account() {
        let db = setup_db().await;

        let first = provision_admin(&db, &spec(), ProvisionPolicy::CreateOrRepair)
            .await
            .unwrap();
        let second = provision_admin(&db, &spec(), ProvisionPolicy::CreateOrRepair)
            .await
            .unwrap();

        assert_eq!(first, ProvisionOutcome::Created);
        assert_eq!(second, ProvisionOutcome::Repaired);
        assert_eq!(User::find().all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn repairs_demoted_account_in_place() {
        let db = setup_db().await;

        // A same-named account exists but without privileges
        let demoted = model::entities::user::ActiveModel {
            username: sea_orm::Set("admin".to_string()),
            password_hash: sea_orm::Set("pre-existing-hash".to_string()),
            email: sea_orm::Set("old@example.com".to_string()),
            is_staff: sea_orm::Set(false),
            is_superuser: sea_orm::Set(false),
            role: sea_orm::Set(model::entities::user::Role::ShopOwner),
            shop_id: sea_orm::Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let outcome = provision_admin(&db, &spec(), ProvisionPolicy::CreateOrRepair)
            .await
            .unwrap();
        assert_eq!(outcome, ProvisionOutcome::Repaired);

        let accounts = User::find().all(&db).await.unwrap();
        assert_eq!(accounts.len(), 1);
        let repaired = &accounts[0];
        assert_eq!(repaired.id, demoted.id);
        assert!(repaired.is_superuser);
        assert!(repaired.is_staff);
        assert_eq!(repaired.role, model::entities::user::Role::Distributor);

        // Idempotent repair never rewrites the password
        assert_eq!(repaired.password_hash, "pre-existing-hash");
    }

    #[tokio::test]
    async fn create_only_policy_never_repairs() {
        let db = setup_db().await;

        model::entities::user::ActiveModel {
            username: sea_orm::Set("admin".to_string()),
            password_hash: sea_orm::Set("pre-existing-hash".to_string()),
            email: sea_orm::Set("old@example.com".to_string()),
            is_staff: sea_orm::Set(false),
            is_superuser: sea_orm::Set(false),
            role: sea_orm::Set(model::entities::user::Role::ShopOwner),
            shop_id: sea_orm::Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let outcome = provision_admin(&db, &spec(), ProvisionPolicy::CreateOnly)
            .await
            .unwrap();
        assert_eq!(outcome, ProvisionOutcome::AlreadyPresent);

        let account = User::find().one(&db).await.unwrap().unwrap();
        assert!(!account.is_superuser);
        assert_eq!(account.role, model::entities::user::Role::ShopOwner);
        assert_eq!(account.email, "old@example.com");
    }

    #[tokio::test]
    async fn create_only_policy_still_creates_when_missing() {
        let db = setup_db().await;

        let outcome = provision_admin(&db, &spec(), ProvisionPolicy::CreateOnly)
            .await
            .unwrap();
        assert_eq!(outcome, ProvisionOutcome::Created);
        assert_eq!(User::find().all(&db).await.unwrap().len(), 1);
    }
}
