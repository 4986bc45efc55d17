//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品管理接口
//! - [`carts`] - 购物车管理接口

pub mod carts;
pub mod health;
pub mod products;
