//! Handler tests for the products domain
//!
//! These drive the products router over HTTP against an in-memory repository:
//! - Request deserialization and validation
//! - Response serialization (`_id`, camelCase timestamps)
//! - HTTP status codes and error bodies

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{InMemoryProductRepository, app, body_bytes, empty_request, json_body, json_request};
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, assertions::assert_object_id_hex};
use tower::ServiceExt; // For oneshot()

const NEVER_ISSUED_ID: &str = "123456123456123456123456";

async fn create(router: &axum::Router, body: Value) -> Value {
    let response = router
        .clone()
        .oneshot(json_request("POST", "/products", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

fn sample(builder: &TestDataBuilder) -> Value {
    json!({
        "name": builder.name("product", "main"),
        "description": "blalblabla",
        "price": builder.price()
    })
}

#[tokio::test]
async fn test_create_product_returns_201_with_id() {
    let router = app(InMemoryProductRepository::default());
    let builder = TestDataBuilder::from_test_name("create_201");

    let created = create(&router, sample(&builder)).await;

    assert_object_id_hex(created["_id"].as_str().unwrap(), "created _id");
    assert_eq!(created["name"], builder.name("product", "main"));
    assert_eq!(created["description"], "blalblabla");
    assert_eq!(created["price"], builder.price());
    assert!(created["createdAt"].is_string());
    assert_eq!(created["createdAt"], created["updatedAt"]);
}

#[tokio::test]
async fn test_create_product_missing_field_is_400() {
    let repo = InMemoryProductRepository::default();
    let router = app(repo.clone());

    let response = router
        .oneshot(json_request(
            "POST",
            "/products",
            &json!({ "name": "A not valid product", "price": 100 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("description"));
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_create_product_without_content_type_is_400() {
    let repo = InMemoryProductRepository::default();
    let router = app(repo.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .body(Body::from(
            json!({ "name": "A not valid product", "price": 100 }).to_string(),
        ))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "INVALID_JSON");
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_create_product_empty_string_is_400() {
    let repo = InMemoryProductRepository::default();
    let router = app(repo.clone());

    let response = router
        .oneshot(json_request(
            "POST",
            "/products",
            &json!({ "name": "", "description": "blalblabla", "price": 20 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "name: must not be empty");
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_create_product_wrong_type_is_400() {
    let router = app(InMemoryProductRepository::default());

    for body in [
        json!({ "name": "lamp", "description": "desk lamp", "price": "twenty" }),
        json!({ "name": 7, "description": "desk lamp", "price": 20 }),
    ] {
        let response = router
            .clone()
            .oneshot(json_request("POST", "/products", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
    }
}

#[tokio::test]
async fn test_get_never_issued_id_is_404() {
    let router = app(InMemoryProductRepository::default());

    let response = router
        .oneshot(empty_request("GET", &format!("/products/{NEVER_ISSUED_ID}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(
        body["message"],
        format!("Product {NEVER_ISSUED_ID} not found")
    );
}

#[tokio::test]
async fn test_malformed_id_is_404_for_every_method() {
    let router = app(InMemoryProductRepository::default());

    for request in [
        empty_request("GET", "/products/123"),
        empty_request("PUT", "/products/not-an-object-id"),
        empty_request("DELETE", "/products/zzzzzzzzzzzzzzzzzzzzzzzz"),
    ] {
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_list_contains_created_product() {
    let router = app(InMemoryProductRepository::default());
    let builder = TestDataBuilder::from_test_name("list_contains");

    let first = create(&router, sample(&builder)).await;
    let second = create(
        &router,
        json!({ "name": builder.name("product", "second"), "description": "x", "price": 1.5 }),
    )
    .await;

    let response = router
        .oneshot(empty_request("GET", "/products"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = json_body(response).await;
    assert_eq!(listed, json!([first, second]));
}

#[tokio::test]
async fn test_list_empty_store_is_empty_array() {
    let router = app(InMemoryProductRepository::default());

    let response = router
        .oneshot(empty_request("GET", "/products"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_get_by_id_returns_product() {
    let router = app(InMemoryProductRepository::default());
    let builder = TestDataBuilder::from_test_name("get_by_id");
    let created = create(&router, sample(&builder)).await;
    let id = created["_id"].as_str().unwrap();

    let response = router
        .oneshot(empty_request("GET", &format!("/products/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);
}

#[tokio::test]
async fn test_update_replaces_supplied_fields_only() {
    let router = app(InMemoryProductRepository::default());
    let builder = TestDataBuilder::from_test_name("update_partial");
    let created = create(&router, sample(&builder)).await;
    let id = created["_id"].as_str().unwrap();

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/products/{id}"),
            &json!({ "name": "newName", "description": "newDescription" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert!(updated["name"].is_string());
    assert!(updated["description"].is_string());
    assert!(updated["price"].is_number());
    assert_eq!(updated["_id"], created["_id"]);
    assert_eq!(updated["name"], "newName");
    assert_eq!(updated["description"], "newDescription");
    assert_eq!(updated["price"], created["price"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_empty_body_keeps_fields() {
    let router = app(InMemoryProductRepository::default());
    let builder = TestDataBuilder::from_test_name("update_empty");
    let created = create(&router, sample(&builder)).await;
    let id = created["_id"].as_str().unwrap();

    let response = router
        .oneshot(empty_request("PUT", &format!("/products/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["name"], created["name"]);
    assert_eq!(updated["description"], created["description"]);
    assert_eq!(updated["price"], created["price"]);
}

#[tokio::test]
async fn test_update_non_existent_is_404() {
    let router = app(InMemoryProductRepository::default());

    let without_body = router
        .clone()
        .oneshot(empty_request("PUT", &format!("/products/{NEVER_ISSUED_ID}")))
        .await
        .unwrap();
    assert_eq!(without_body.status(), StatusCode::NOT_FOUND);

    let with_body = router
        .oneshot(json_request(
            "PUT",
            &format!("/products/{NEVER_ISSUED_ID}"),
            &json!({ "price": 10 }),
        ))
        .await
        .unwrap();
    assert_eq!(with_body.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_invalid_field_is_400() {
    let router = app(InMemoryProductRepository::default());
    let builder = TestDataBuilder::from_test_name("update_invalid");
    let created = create(&router, sample(&builder)).await;
    let id = created["_id"].as_str().unwrap();

    for patch in [json!({ "name": "" }), json!({ "price": "free" })] {
        let response = router
            .clone()
            .oneshot(json_request("PUT", &format!("/products/{id}"), &patch))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "patch {patch}");
    }

    let response = router
        .oneshot(empty_request("GET", &format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, created);
}

#[tokio::test]
async fn test_delete_then_get_and_delete_again_are_404() {
    let repo = InMemoryProductRepository::default();
    let router = app(repo.clone());
    let builder = TestDataBuilder::from_test_name("delete_twice");
    let created = create(&router, sample(&builder)).await;
    let uri = format!("/products/{}", created["_id"].as_str().unwrap());

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(repo.len(), 0);

    let response = router
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let router = app(InMemoryProductRepository::default());

    let response = router
        .oneshot(empty_request("PATCH", &format!("/products/{NEVER_ISSUED_ID}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_create_invalid_then_missing_lookup_scenario() {
    let repo = InMemoryProductRepository::default();
    let router = app(repo.clone());

    let created = create(
        &router,
        json!({ "name": "A valid product", "description": "balllablalblabl", "price": 100 }),
    )
    .await;
    assert!(created["_id"].is_string());

    let rejected = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/products",
            &json!({ "name": "A not valid product", "price": 100 }),
        ))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let missing = router
        .oneshot(empty_request("GET", &format!("/products/{NEVER_ISSUED_ID}")))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    assert_eq!(repo.len(), 1);
}
