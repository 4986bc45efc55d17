//! Product entity and its create/update payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::Document;

/// 商品实体
///
/// `id` 由存储层在创建时分配 (UUID v4)，之后不可变更。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub status: bool,
    pub stock: u32,
    pub category: String,
    pub thumbnails: Vec<String>,
}

/// Create payload. Required fields are `Option` so that a missing field
/// surfaces as a field-level validation error instead of a deserialization
/// failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(required)]
    pub title: Option<String>,
    #[validate(required)]
    pub description: Option<String>,
    #[validate(required)]
    pub code: Option<String>,
    #[validate(required, range(min = 0.0))]
    pub price: Option<f64>,
    /// Defaults to `true` when omitted.
    pub status: Option<bool>,
    #[validate(required)]
    pub stock: Option<u32>,
    #[validate(required)]
    pub category: Option<String>,
    /// Defaults to an empty list when omitted.
    pub thumbnails: Option<Vec<String>>,
}

/// Update payload - every field optional, merged over the existing entity.
///
/// There is deliberately no `id` field: an `id` in the request body is
/// ignored by serde, so the identifier can never be changed through an
/// update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub status: Option<bool>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

impl Document for Product {
    type Create = ProductCreate;
    type Update = ProductUpdate;

    const COLLECTION: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn from_create(id: String, create: Self::Create) -> Self {
        Self {
            id,
            title: create.title.unwrap_or_default(),
            description: create.description.unwrap_or_default(),
            code: create.code.unwrap_or_default(),
            price: create.price.unwrap_or_default(),
            status: create.status.unwrap_or(true),
            stock: create.stock.unwrap_or_default(),
            category: create.category.unwrap_or_default(),
            thumbnails: create.thumbnails.unwrap_or_default(),
        }
    }

    fn merge(&mut self, update: Self::Update) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(thumbnails) = update.thumbnails {
            self.thumbnails = thumbnails;
        }
    }
}
