//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::{Result, ServerState};
use crate::models::{Cart, LineItem};

/// POST /api/carts - 创建空购物车 (201)
pub async fn create(State(state): State<ServerState>) -> Result<(StatusCode, Json<Cart>)> {
    let cart = state.catalog.create_cart().await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// GET /api/carts/:id - 获取购物车的行项目列表
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LineItem>>> {
    let cart = state.catalog.get_cart(&id).await?;
    Ok(Json(cart.products))
}

/// POST /api/carts/:cid/product/:pid - 向购物车加入一件商品 (201)
pub async fn add_product(
    State(state): State<ServerState>,
    Path((cid, pid)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Cart>)> {
    let cart = state.catalog.add_product_to_cart(&cid, &pid).await?;
    Ok((StatusCode::CREATED, Json(cart)))
}
