//! 数据模型 - 商品和购物车
//!
//! # 结构
//!
//! - [`Product`] / [`ProductCreate`] / [`ProductUpdate`] - 商品及其载荷类型
//! - [`Cart`] / [`LineItem`] - 购物车和行项目

pub mod cart;
pub mod product;

pub use cart::{Cart, CartCreate, CartUpdate, LineItem};
pub use product::{Product, ProductCreate, ProductUpdate};
