//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::{Result, ServerState};
use crate::models::{Product, ProductCreate, ProductUpdate};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Cap the result at this many products, from the front.
    pub limit: Option<usize>,
}

/// GET /api/products - 获取所有商品
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.catalog.list_products(query.limit).await;
    Ok(Json(products))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = state.catalog.get_product(&id).await?;
    Ok(Json(product))
}

/// POST /api/products - 创建商品 (201)
pub async fn create(
    State(state): State<ServerState>,
    Json(create): Json<ProductCreate>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.catalog.create_product(create).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id - 部分更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<Product>> {
    let product = state.catalog.update_product(&id, update).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - 删除商品 (204)
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.catalog.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
