use chrono::{Local, NaiveDate};
use common::error::Error;
use fund_service::{FundService, FundServiceConfig, StorageBackend};
use serde_json::json;

fn tech_fund() -> serde_json::Value {
    json!({
        "name": "Tech Fund",
        "manager_name": "Alice",
        "description": "Investing in tech companies",
        "nav": 500000,
        "performance": 12.5
    })
}

#[tokio::test]
async fn test_create_fund() {
    let service = FundService::new();
    let fund = service.create_fund(&tech_fund()).await.unwrap();

    assert_eq!(fund.fund_id, 1);
    assert_eq!(fund.name, "Tech Fund");
    assert_eq!(fund.manager_name, "Alice");
    assert_eq!(fund.nav, 500000.0);
    assert_eq!(fund.performance, 12.5);
    assert_eq!(fund.date_of_creation, Local::now().date_naive());
}

#[tokio::test]
async fn test_create_fund_keeps_supplied_date_and_ignores_id() {
    let service = FundService::new();
    let mut payload = tech_fund();
    payload["date_of_creation"] = json!("2020-02-29");
    payload["fund_id"] = json!(42);

    let fund = service.create_fund(&payload).await.unwrap();
    assert_eq!(fund.fund_id, 1);
    assert_eq!(fund.date_of_creation, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
}

#[tokio::test]
async fn test_create_fund_accepts_numeric_strings() {
    let service = FundService::new();
    let mut payload = tech_fund();
    payload["nav"] = json!("1250.75");
    payload["performance"] = json!("-2");

    let fund = service.create_fund(&payload).await.unwrap();
    assert_eq!(fund.nav, 1250.75);
    assert_eq!(fund.performance, -2.0);
}

#[tokio::test]
async fn test_create_fund_missing_fields() {
    let service = FundService::new();
    let payload = json!({
        "description": "Investing in renewable energy",
        "nav": 400000,
        "performance": 10.0
    });

    match service.create_fund(&payload).await {
        Err(Error::MissingFields(fields)) => assert_eq!(fields, vec!["name", "manager_name"]),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(service.list_funds().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_fund_invalid_numbers() {
    let service = FundService::new();
    let mut payload = tech_fund();
    payload["nav"] = json!("invalid_nav");
    payload["performance"] = json!("invalid_performance");

    let err = service.create_fund(&payload).await.unwrap_err();
    assert!(matches!(&err, Error::InvalidField { field, .. } if field == "nav"));
    assert!(err.to_string().contains("NAV and performance must be numbers"));
}

#[tokio::test]
async fn test_create_fund_invalid_date() {
    let service = FundService::new();
    let mut payload = tech_fund();
    payload["date_of_creation"] = json!("31/01/2024");

    let err = service.create_fund(&payload).await.unwrap_err();
    assert!(matches!(err, Error::InvalidField { field, .. } if field == "date_of_creation"));
}

#[tokio::test]
async fn test_create_fund_rejects_non_object_body() {
    let service = FundService::new();
    let err = service.create_fund(&json!(["Tech Fund"])).await.unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
}

#[tokio::test]
async fn test_create_fund_duplicate_name() {
    let service = FundService::new();
    service.create_fund(&tech_fund()).await.unwrap();

    let err = service.create_fund(&tech_fund()).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateFund(_)));
}

#[tokio::test]
async fn test_get_fund() {
    let service = FundService::new();
    let created = service.create_fund(&tech_fund()).await.unwrap();

    let fetched = service.get_fund(created.fund_id).await.unwrap();
    assert_eq!(fetched, created);

    let missing = service.get_fund(9999).await;
    assert!(matches!(missing, Err(Error::FundNotFound(9999))));
}

#[tokio::test]
async fn test_update_fund_only_performance() {
    let service = FundService::new();
    let created = service.create_fund(&tech_fund()).await.unwrap();

    let updated = service
        .update_performance(created.fund_id, &json!({"performance": 5, "nav": 1000, "name": "Renamed"}))
        .await
        .unwrap();

    assert_eq!(updated.performance, 5.0);
    assert_eq!(updated.nav, 500000.0);
    assert_eq!(updated.name, "Tech Fund");
    assert_eq!(updated.description, "Investing in tech companies");
    assert_eq!(updated.manager_name, "Alice");
}

#[tokio::test]
async fn test_update_fund_invalid_performance_leaves_record() {
    let service = FundService::new();
    let created = service.create_fund(&tech_fund()).await.unwrap();

    let err = service
        .update_performance(created.fund_id, &json!({"performance": "invalid"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid 'performance' value"));

    let stored = service.get_fund(created.fund_id).await.unwrap();
    assert_eq!(stored.performance, 12.5);
}

#[tokio::test]
async fn test_update_fund_missing_performance() {
    let service = FundService::new();
    let created = service.create_fund(&tech_fund()).await.unwrap();

    let err = service
        .update_performance(created.fund_id, &json!({"nav": 1}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingFields(fields) if fields == vec!["performance"]));
}

#[tokio::test]
async fn test_update_missing_fund_is_not_found_before_validation() {
    let service = FundService::new();

    let err = service
        .update_performance(9999, &json!({"performance": "invalid"}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::FundNotFound(9999)));
}

#[tokio::test]
async fn test_delete_fund() {
    let service = FundService::new();
    let created = service.create_fund(&tech_fund()).await.unwrap();

    service.delete_fund(created.fund_id).await.unwrap();
    assert!(matches!(service.get_fund(created.fund_id).await, Err(Error::FundNotFound(_))));
    assert!(matches!(service.delete_fund(created.fund_id).await, Err(Error::FundNotFound(_))));
}

#[tokio::test]
async fn test_with_in_memory_config() {
    let service = FundService::with_config(&FundServiceConfig::in_memory()).await.unwrap();
    assert_eq!(service.storage(), StorageBackend::InMemory);
    service.ping().await.unwrap();
}
