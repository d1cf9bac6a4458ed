//! Shared fixtures for ledger tests: an in-memory database with two shops,
//! a distributor, a shop owner and a small catalog.

use chrono::{NaiveDate, NaiveDateTime};
use migration::{Migrator, MigratorTrait};
use model::entities::{frame, shop, user};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

pub(crate) struct Context {
    pub db: DatabaseConnection,
    pub shop: shop::Model,
    pub other_shop: shop::Model,
    pub distributor: user::Model,
    pub owner: user::Model,
    pub frame_a: frame::Model,
    pub frame_b: frame::Model,
    pub now: NaiveDateTime,
}

pub(crate) fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub(crate) async fn seed() -> Context {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let now = ts(2025, 6, 15);

    let shop = shop::ActiveModel {
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
    .unwrap();

    let other_shop = shop::ActiveModel {
        name: Set("Eastside Vision".to_string()),
        address: Set("4 Market Lane".to_string()),
        owner_name: Set("Ben Okafor".to_string()),
        phone: Set("555-0102".to_string()),
        email: Set("eastside@example.com".to_string()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let distributor = user::ActiveModel {
        username: Set("admin".to_string()),
        password_hash: Set("$argon2id$stub".to_string()),
        email: Set("admin@example.com".to_string()),
        is_staff: Set(true),
        is_superuser: Set(true),
        role: Set(user::Role::Distributor),
        shop_id: Set(None),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let owner = user::ActiveModel {
        username: Set("maria".to_string()),
        password_hash: Set("$argon2id$stub".to_string()),
        email: Set("maria@example.com".to_string()),
        is_staff: Set(false),
        is_superuser: Set(false),
        role: Set(user::Role::ShopOwner),
        shop_id: Set(Some(shop.id)),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

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
    .unwrap();

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
    .unwrap();

    Context {
        db,
        shop,
        other_shop,
        distributor,
        owner,
        frame_a,
        frame_b,
        now,
    }
}
