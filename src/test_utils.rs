#[cfg(test)]
pub mod test_utils {
    use crate::auth::{hash_password, issue_token, AuthConfig};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use model::entities::{frame, shop, user};
    use moka::future::Cache;
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

    pub const TEST_SECRET: &str = "test-secret";
    pub const DISTRIBUTOR_PASSWORD: &str = "adminpass";
    pub const OWNER_PASSWORD: &str = "ownerpass";

    /// Seeded fixture handles: one distributor, one shop with its owner,
    /// and a two-frame catalog.
    pub struct TestSeed {
        pub distributor_token: String,
        pub owner_token: String,
        pub shop_id: i32,
        pub frame_a_id: i32,
        pub frame_b_id: i32,
    }

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState plus seeded fixtures for testing
    pub async fn setup_test_app_state() -> (AppState, TestSeed) {
        let db = setup_test_db().await;
        let now = Utc::now().naive_utc();

        let distributor = user::ActiveModel {
            username: Set("admin".to_string()),
            password_hash: Set(hash_password(DISTRIBUTOR_PASSWORD).unwrap()),
            email: Set("admin@example.com".to_string()),
            is_staff: Set(true),
            is_superuser: Set(true),
            role: Set(user::Role::Distributor),
            shop_id: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("Failed to create distributor");

        let test_shop = shop::ActiveModel {
            name: Set("Downtown Optics".to_string()),
            address: Set("12 High Street".to_string()),
            owner_name: Set("Maria Jensen".to_string()),
            phone: Set("555-0101".to_string()),
            email: Set("downtown@example.com".to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("Failed to create shop");

        let owner = user::ActiveModel {
            username: Set("maria".to_string()),
            password_hash: Set(hash_password(OWNER_PASSWORD).unwrap()),
            email: Set("maria@example.com".to_string()),
            is_staff: Set(false),
            is_superuser: Set(false),
            role: Set(user::Role::ShopOwner),
            shop_id: Set(Some(test_shop.id)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("Failed to create shop owner");

        let frame_a = frame::ActiveModel {
            product_id: Set("AV-001".to_string()),
            name: Set("Classic Aviator".to_string()),
            frame_type: Set("aviator".to_string()),
            color: Set("gold".to_string()),
            material: Set("metal".to_string()),
            price: Set(Decimal::new(12050, 2)),
            brand: Set("Skyline".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("Failed to create frame");

        let frame_b = frame::ActiveModel {
            product_id: Set("RN-010".to_string()),
            name: Set("Round Tortoise".to_string()),
            frame_type: Set("round".to_string()),
            color: Set("tortoise".to_string()),
            material: Set("acetate".to_string()),
            price: Set(Decimal::new(8000, 2)),
            brand: Set("Verve".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("Failed to create frame");

        let auth = AuthConfig::new(TEST_SECRET, 24);
        let distributor_token = issue_token(&auth, &distributor, Utc::now()).unwrap();
        let owner_token = issue_token(&auth, &owner, Utc::now()).unwrap();

        let cache = Cache::new(100);
        let state = AppState { db, cache, auth };

        (
            state,
            TestSeed {
                distributor_token,
                owner_token,
                shop_id: test_shop.id,
                frame_a_id: frame_a.id,
                frame_b_id: frame_b.id,
            },
        )
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> (Router, TestSeed) {
        let (state, seed) = setup_test_app_state().await;
        let router = create_router(state);
        (router, seed)
    }
}
