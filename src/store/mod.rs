//! 文档存储 - 单个集合的并发内存存储 + 持久化
//!
//! # 结构
//!
//! - [`Document`] - 实体类型契约 (id、创建、合并)
//! - [`DocumentStore`] - 并发文档存储 (互斥变更 + 持久化回滚)
//! - [`PersistenceAdapter`] / [`JsonFileAdapter`] - 持久化适配器
//! - [`StoreError`] / [`PersistenceError`] - 错误类型

pub mod document;
pub mod document_store;
pub mod error;
pub mod persistence;

pub use document::Document;
pub use document_store::DocumentStore;
pub use error::{PersistenceError, StoreError};
pub use persistence::{JsonFileAdapter, PersistenceAdapter};
