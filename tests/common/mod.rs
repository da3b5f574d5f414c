#![allow(dead_code)]
#![allow(clippy::expect_used)]

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use round_store::entities::{RoundStatus, round, round_entry, round_size, user, user_username};
use round_store::services::RoundRepository;

/// Fresh in-memory database with all migrations applied.
pub async fn test_db() -> DatabaseConnection {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

/// Repository over a fresh in-memory database.
pub async fn test_repo() -> RoundRepository {
    test_repo_logging_to(tracing::Span::none()).await
}

/// Repository over a fresh in-memory database with `log` as its default span.
pub async fn test_repo_logging_to(log: tracing::Span) -> RoundRepository {
    RoundRepository::new(test_db().await, log)
}

/// Repository over a database without any tables, so every query fails.
pub async fn broken_repo() -> RoundRepository {
    broken_repo_logging_to(tracing::Span::none()).await
}

/// Same as [`broken_repo`] with `log` as the default span.
pub async fn broken_repo_logging_to(log: tracing::Span) -> RoundRepository {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("connect to sqlite");
    RoundRepository::new(db, log)
}

pub async fn insert_round_size(db: &DatabaseConnection, min: i32, max: i32) -> i32 {
    round_size::ActiveModel {
        min: Set(min),
        max: Set(max),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert round size")
    .id
}

pub async fn insert_round(
    db: &DatabaseConnection,
    name: &str,
    round_size_id: i32,
    status: RoundStatus,
    scheduled: bool,
) -> i32 {
    round::ActiveModel {
        name: Set(name.to_string()),
        wallpaper: Set(format!("{name}.png")),
        round_size_id: Set(round_size_id),
        starttime: Set(scheduled.then(|| Utc::now().fixed_offset())),
        status: Set(status),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert round")
    .id
}

pub async fn insert_user(db: &DatabaseConnection, username: &str) -> i32 {
    let user = user::ActiveModel {
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user");

    user_username::ActiveModel {
        user_id: Set(user.id),
        username: Set(username.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert username");

    user.id
}

pub async fn entries(db: &DatabaseConnection) -> Vec<round_entry::Model> {
    round_entry::Entity::find()
        .all(db)
        .await
        .expect("load round entries")
}
