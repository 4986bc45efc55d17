//! 服务层
//!
//! - [`CatalogService`] - 商品/购物车组合服务 (跨集合规则 + 事件发布)

pub mod catalog;

pub use catalog::CatalogService;
