//! Product CRUD handlers.
//!
//! Thin request/response translation around the storage layer; admission
//! and timeouts are applied as router layers before any of these run.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::http::listing::{Entry, Link, Listing};
use crate::http::response::{error_response, json_response};
use crate::http::server::AppState;
use crate::storage::{product::Product, StorageError};

const DEFAULT_PAGE_SIZE: u8 = 10;
const MAX_PAGE_SIZE: u8 = 250;

/// Raw paging parameters. Parsed leniently: junk values fall back to the
/// defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct PagingQuery {
    page: Option<String>,
    count: Option<String>,
}

impl PagingQuery {
    /// Normalize to a one-based page and a count in [1, 250].
    fn normalize(&self) -> (u64, u8) {
        let count = self
            .count
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        let page = self
            .page
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let count = if count < 1 {
            DEFAULT_PAGE_SIZE
        } else if count > u64::from(MAX_PAGE_SIZE) {
            MAX_PAGE_SIZE
        } else {
            count as u8
        };
        (page.max(1), count)
    }
}

/// Route ids must be UUIDv4, matching the original route pattern; anything
/// else behaves as an unknown resource.
fn parse_id(raw: &str) -> Option<String> {
    let id = Uuid::try_parse(raw).ok()?;
    (id.get_version_num() == 4).then(|| id.to_string())
}

/// `GET /products`
pub async fn list_products(
    State(state): State<AppState>,
    Query(paging): Query<PagingQuery>,
) -> Response {
    let (page, count) = paging.normalize();

    let products = match state.db.products(page, count).await {
        Ok(products) => products,
        Err(error) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
    };
    let total = state.db.product_count().await;

    let entries = products
        .into_iter()
        .map(|product| {
            let links = vec![Link {
                href: format!("/product/{}", product.id),
                rel: "self".to_string(),
                method: "GET".to_string(),
            }];
            Entry {
                object: product,
                links,
            }
        })
        .collect();

    json_response(
        StatusCode::OK,
        &Listing::new("/products", page, total, count, entries),
    )
}

/// `POST /product`
pub async fn create_product(State(state): State<AppState>, body: Bytes) -> Response {
    let mut product = match Product::from_json(&body) {
        Ok(product) => product,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid request payload"),
    };
    product.ensure_id();

    if let Err(error) = state.db.create_product(product.clone()).await {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string());
    }
    json_response(StatusCode::CREATED, &product)
}

/// `GET /product/{id}`
pub async fn get_product(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let Some(id) = parse_id(&raw_id) else {
        return error_response(StatusCode::NOT_FOUND, "Product not found");
    };
    match state.db.product(&id).await {
        Ok(product) => json_response(StatusCode::OK, &product),
        Err(StorageError::NotFound) => {
            error_response(StatusCode::NOT_FOUND, "Product not found")
        }
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error loading"),
    }
}

/// `PUT /product/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Response {
    let Some(id) = parse_id(&raw_id) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Product '{raw_id}' not found"),
        );
    };
    if state.db.product(&id).await.is_err() {
        return error_response(StatusCode::NOT_FOUND, format!("Product '{id}' not found"));
    }

    let update = match Product::from_json(&body) {
        Ok(product) => product,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid request payload"),
    };

    if let Err(error) = state.db.update_product(&id, &update).await {
        tracing::error!(%error, product_id = %id, "failed to save product");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unable to save product '{id}'"),
        );
    }

    match state.db.product(&id).await {
        Ok(product) => json_response(StatusCode::OK, &product),
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error loading"),
    }
}

/// `DELETE /product/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&raw_id) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Product '{raw_id}' not found"),
        );
    };
    if state.db.product(&id).await.is_err() {
        return error_response(StatusCode::NOT_FOUND, format!("Product '{id}' not found"));
    }

    if let Err(error) = state.db.delete_product(&id).await {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string());
    }
    json_response(StatusCode::OK, &serde_json::json!({ "result": "success" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paging(page: Option<&str>, count: Option<&str>) -> PagingQuery {
        PagingQuery {
            page: page.map(str::to_string),
            count: count.map(str::to_string),
        }
    }

    #[test]
    fn paging_defaults() {
        assert_eq!(paging(None, None).normalize(), (1, 10));
    }

    #[test]
    fn paging_clamps_count() {
        assert_eq!(paging(Some("2"), Some("0")).normalize(), (2, 10));
        assert_eq!(paging(Some("1"), Some("9000")).normalize(), (1, 250));
        assert_eq!(paging(Some("1"), Some("25")).normalize(), (1, 25));
    }

    #[test]
    fn paging_ignores_junk() {
        assert_eq!(paging(Some("abc"), Some("-3")).normalize(), (1, 10));
    }

    #[test]
    fn ids_must_be_uuid_v4() {
        assert!(parse_id("not-a-uuid").is_none());
        // v1-style uuid: valid syntax, wrong version
        assert!(parse_id("f47ac10b-58cc-1372-a567-0e02b2c3d479").is_none());

        let v4 = Uuid::new_v4().to_string();
        assert_eq!(parse_id(&v4).as_deref(), Some(v4.as_str()));
    }
}
