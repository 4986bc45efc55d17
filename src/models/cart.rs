//! Cart entity: an id plus an ordered list of line items.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::Document;

/// 购物车行项目 `{productId, quantity}`
///
/// Wire format keeps the original camelCase field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: u32,
}

/// 购物车实体
///
/// Invariant: at most one line item per `product_id` - a repeated add
/// increments the quantity of the existing line instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    pub products: Vec<LineItem>,
}

impl Cart {
    /// Add one unit of `product_id`: increments the existing line or appends
    /// a new one with quantity 1.
    pub fn add_line(&mut self, product_id: &str) {
        match self
            .products
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => line.quantity += 1,
            None => self.products.push(LineItem {
                product_id: product_id.to_string(),
                quantity: 1,
            }),
        }
    }
}

/// Carts are created empty - nothing to validate.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CartCreate {}

/// Replace-style update for the line-item list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CartUpdate {
    pub products: Option<Vec<LineItem>>,
}

impl Document for Cart {
    type Create = CartCreate;
    type Update = CartUpdate;

    const COLLECTION: &'static str = "cart";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn from_create(id: String, _create: Self::Create) -> Self {
        Self {
            id,
            products: Vec::new(),
        }
    }

    fn merge(&mut self, update: Self::Update) {
        if let Some(products) = update.products {
            self.products = products;
        }
    }
}
