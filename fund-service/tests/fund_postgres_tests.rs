use common::error::Error;
use fund_service::{FundService, FundServiceConfig, StorageBackend};
use serde_json::json;
use tokio::test;

use dotenv::dotenv;

// PostgreSQL integration tests for the fund service
// These tests require a running PostgreSQL database
// Run with: cargo test --test fund_postgres_tests -- --ignored

async fn create_test_service() -> FundService {
    dotenv().ok(); // Load .env if it exists

    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run PostgreSQL tests");

    FundService::with_config(&FundServiceConfig::postgres(database_url, 5))
        .await
        .expect("Failed to create fund service with PostgreSQL repository")
}

// Names are unique per table, so every test run needs its own
fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_fund_lifecycle() {
    let service = create_test_service().await;
    assert_eq!(service.storage(), StorageBackend::Postgres);
    service.ping().await.unwrap();

    let name = unique_name("Tech Fund");
    let created = service
        .create_fund(&json!({
            "name": name,
            "manager_name": "Alice",
            "description": "Investing in tech companies",
            "nav": 500000,
            "performance": 12.5
        }))
        .await
        .unwrap();
    assert!(created.fund_id > 0);

    let fetched = service.get_fund(created.fund_id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = service
        .update_performance(created.fund_id, &json!({"performance": 15.0, "nav": 1}))
        .await
        .unwrap();
    assert_eq!(updated.performance, 15.0);
    assert_eq!(updated.nav, 500000.0);

    let listed = service.list_funds().await.unwrap();
    assert!(listed.iter().any(|f| f.fund_id == created.fund_id));
    assert!(listed.windows(2).all(|w| w[0].fund_id < w[1].fund_id));

    service.delete_fund(created.fund_id).await.unwrap();
    assert!(matches!(
        service.get_fund(created.fund_id).await,
        Err(Error::FundNotFound(_))
    ));
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_duplicate_name() {
    let service = create_test_service().await;
    let payload = json!({
        "name": unique_name("Energy Fund"),
        "manager_name": "Tom",
        "description": "Investing in renewable energy",
        "nav": 400000,
        "performance": 10.0,
        "date_of_creation": "2023-06-01"
    });

    let created = service.create_fund(&payload).await.unwrap();
    assert_eq!(created.date_of_creation.to_string(), "2023-06-01");

    let err = service.create_fund(&payload).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateFund(_)));

    service.delete_fund(created.fund_id).await.unwrap();
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_missing_fund() {
    let service = create_test_service().await;

    assert!(matches!(service.get_fund(-1).await, Err(Error::FundNotFound(-1))));
    assert!(matches!(service.delete_fund(-1).await, Err(Error::FundNotFound(-1))));
    assert!(matches!(
        service.update_performance(-1, &json!({"performance": 1})).await,
        Err(Error::FundNotFound(-1))
    ));
}
