// File: tests/test_helpers.rs

#![cfg(feature = "db_tests")]

use std::env;
use std::sync::Arc;

use api_gateway::{app, AppState};
use axum::Router;
use common::db::{init_db_pool, run_migrations, DbPool};
use fund_service::{FundService, PostgresFundRepository, StorageBackend};
use tracing::Level;

// Database test context: a migrated pool plus a router wired to it
pub struct DbTestContext {
    pub pool: DbPool,
    pub app: Router,
}

impl DbTestContext {
    // Returns None when TEST_DATABASE_URL is unset or unreachable
    pub async fn new() -> Option<Self> {
        dotenv::dotenv().ok();

        let db_url = match env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                println!("Skipping database test: TEST_DATABASE_URL not set");
                return None;
            }
        };

        let pool = match init_db_pool(&db_url, 5).await {
            Ok(pool) => pool,
            Err(err) => {
                println!("Skipping database test: could not connect to database: {}", err);
                return None;
            }
        };

        run_migrations(&pool)
            .await
            .expect("Failed to run database migrations");

        let repo = Arc::new(PostgresFundRepository::new(pool.clone()));
        let service = FundService::with_repository(repo, StorageBackend::Postgres);
        let app = app(Arc::new(AppState::new(service)), Level::DEBUG);

        Some(Self { pool, app })
    }

    // Clean up test data after tests
    pub async fn cleanup(&self) {
        sqlx::query("DELETE FROM funds")
            .execute(&self.pool)
            .await
            .expect("Failed to clean up funds table");
    }
}
