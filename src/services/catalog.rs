//! Catalog Service - composes the product and cart stores.
//!
//! 职责:
//!
//! - 跨集合规则: 购物车行项目引用的商品必须存在 (加入时校验)。
//! - 事件发布: 商品的每次成功 create/update/delete 在落盘之后、返回之前
//!   向变更总线发布 `ProductsChanged` (携带完整商品列表)。
//!   购物车变更不广播。
//!
//! 已知的一致性边界: 删除商品不会级联清理已有购物车行项目。

use std::sync::Arc;

use crate::message::{BusEvent, ChangeBus};
use crate::models::{Cart, CartCreate, Product, ProductCreate, ProductUpdate};
use crate::store::{DocumentStore, StoreError};

/// Composition layer over the two document stores.
///
/// Cheap to clone; all fields are shared handles.
#[derive(Debug, Clone)]
pub struct CatalogService {
    products: Arc<DocumentStore<Product>>,
    carts: Arc<DocumentStore<Cart>>,
    bus: ChangeBus,
}

impl CatalogService {
    pub fn new(
        products: Arc<DocumentStore<Product>>,
        carts: Arc<DocumentStore<Cart>>,
        bus: ChangeBus,
    ) -> Self {
        Self {
            products,
            carts,
            bus,
        }
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    // ========== Products ==========

    pub async fn list_products(&self, limit: Option<usize>) -> Vec<Product> {
        self.products.list(limit).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, StoreError> {
        self.products.get(id).await
    }

    pub async fn create_product(&self, create: ProductCreate) -> Result<Product, StoreError> {
        let product = self.products.create(create).await?;
        self.publish_products_changed().await;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Product, StoreError> {
        let product = self.products.update(id, update).await?;
        self.publish_products_changed().await;
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        self.products.delete(id).await?;
        self.publish_products_changed().await;
        Ok(())
    }

    // ========== Carts ==========

    pub async fn create_cart(&self) -> Result<Cart, StoreError> {
        self.carts.create(CartCreate::default()).await
    }

    pub async fn get_cart(&self, id: &str) -> Result<Cart, StoreError> {
        self.carts.get(id).await
    }

    /// Add one unit of a product to a cart.
    ///
    /// The product-existence check runs before anything touches the cart, so
    /// an unknown product leaves the cart unchanged. The line-item increment
    /// itself happens under the cart store's exclusive section: concurrent
    /// adds against the same cart never lose an increment.
    pub async fn add_product_to_cart(
        &self,
        cart_id: &str,
        product_id: &str,
    ) -> Result<Cart, StoreError> {
        // A product delete racing this gap leaves a dangling line item, the
        // same accepted non-cascade gap as deleting the product later.
        self.products.get(product_id).await?;

        let cart = self
            .carts
            .modify(cart_id, |cart| cart.add_line(product_id))
            .await?;

        tracing::debug!(cart_id, product_id, "product added to cart");
        Ok(cart)
    }

    async fn publish_products_changed(&self) {
        let products = self.products.list(None).await;
        self.bus.publish(BusEvent::ProductsChanged { products });
    }
}
