//! End-to-end CRUD behavior over a real listener.

mod common;

use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn product_crud_round_trip() {
    let app = common::spawn_app(common::test_config(18080)).await;
    let client = reqwest::Client::new();

    // Empty table lists an empty page with hypermedia links.
    let res = client
        .get(format!("{}/products", app.base_url))
        .send()
        .await
        .expect("list request");
    assert_eq!(res.status(), StatusCode::OK);
    let listing: Value = res.json().await.expect("listing body");
    assert_eq!(listing["total"], 0);
    assert_eq!(listing["count"], 0);
    assert_eq!(listing["page"], 1);
    assert_eq!(listing["limit"], 10);
    assert!(listing["data"].as_array().expect("data array").is_empty());
    assert_eq!(listing["links"][0]["rel"], "first");

    // Create echoes the stored product with a generated id.
    let res = client
        .post(format!("{}/product", app.base_url))
        .body(r#"{"name":"test product","price":11.22}"#)
        .send()
        .await
        .expect("create request");
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.expect("created body");
    assert_eq!(created["name"], "test product");
    assert_eq!(created["price"], 11.22);
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(id.len(), 36);

    // Read it back.
    let res = client
        .get(format!("{}/product/{id}", app.base_url))
        .send()
        .await
        .expect("get request");
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.expect("fetched body");
    assert_eq!(fetched["name"], "test product");

    // Update keeps the id.
    let res = client
        .put(format!("{}/product/{id}", app.base_url))
        .body(r#"{"name":"test product - updated name","price":11.23}"#)
        .send()
        .await
        .expect("update request");
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.expect("updated body");
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "test product - updated name");

    // Delete, then the id is gone.
    let res = client
        .delete(format!("{}/product/{id}", app.base_url))
        .send()
        .await
        .expect("delete request");
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.expect("delete body");
    assert_eq!(body["result"], "success");

    let res = client
        .get(format!("{}/product/{id}", app.base_url))
        .send()
        .await
        .expect("get after delete");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    app.shutdown.trigger();
    let _ = app.handle.await;
}

#[tokio::test]
async fn missing_and_invalid_requests() {
    let app = common::spawn_app(common::test_config(18081)).await;
    let client = reqwest::Client::new();

    // Unknown (but well-formed) id.
    let missing = uuid::Uuid::new_v4();
    let res = client
        .get(format!("{}/product/{missing}", app.base_url))
        .send()
        .await
        .expect("get request");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.expect("error body");
    assert_eq!(body["error"], "Product not found");

    // Malformed payload.
    let res = client
        .post(format!("{}/product", app.base_url))
        .body("{not json")
        .send()
        .await
        .expect("create request");
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.expect("error body");
    assert_eq!(body["error"], "Invalid request payload");

    // Ids that are not UUIDv4 never reach storage.
    let res = client
        .get(format!("{}/product/not-a-uuid", app.base_url))
        .send()
        .await
        .expect("get request");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    app.shutdown.trigger();
    let _ = app.handle.await;
}

#[tokio::test]
async fn listing_pages_and_clamps() {
    let app = common::spawn_app(common::test_config(18082)).await;
    let client = reqwest::Client::new();

    for i in 0..12 {
        let res = client
            .post(format!("{}/product", app.base_url))
            .body(format!(r#"{{"name":"product {i}","price":1.5}}"#))
            .send()
            .await
            .expect("create request");
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    // Default paging: 10 per page, with a next link.
    let listing: Value = client
        .get(format!("{}/products", app.base_url))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("listing body");
    assert_eq!(listing["total"], 12);
    assert_eq!(listing["data"].as_array().expect("data").len(), 10);
    let rels: Vec<&str> = listing["links"]
        .as_array()
        .expect("links")
        .iter()
        .map(|l| l["rel"].as_str().expect("rel"))
        .collect();
    assert!(rels.contains(&"next"));

    // Second page has the remainder.
    let listing: Value = client
        .get(format!("{}/products?page=2&count=10", app.base_url))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("listing body");
    assert_eq!(listing["page"], 2);
    assert_eq!(listing["data"].as_array().expect("data").len(), 2);

    // Junk parameters fall back to defaults instead of failing.
    let listing: Value = client
        .get(format!("{}/products?page=abc&count=zzz", app.base_url))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("listing body");
    assert_eq!(listing["page"], 1);
    assert_eq!(listing["limit"], 10);

    app.shutdown.trigger();
    let _ = app.handle.await;
}
