//! Catalog Server - 带实时推送的商品目录服务
//!
//! # 架构概述
//!
//! - **文档存储** (`store`): 单集合并发存储，整集合 JSON 落盘，
//!   互斥变更 + 失败回滚
//! - **变更总线** (`message`): 提交变更的进程内广播
//! - **目录服务** (`services`): 商品/购物车组合服务，跨集合规则
//! - **HTTP API** (`api`): RESTful API 接口
//! - **实时通道** (`realtime`): socket.io 推送 `updateProducts`
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── models/        # 商品、购物车实体
//! ├── store/         # 文档存储 + 持久化适配器
//! ├── message/       # 变更总线
//! ├── services/      # 目录服务
//! ├── api/           # HTTP 路由和处理器
//! ├── realtime/      # socket.io 处理器
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod core;
pub mod message;
pub mod models;
pub mod realtime;
pub mod services;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState, build_app};
pub use message::{BusEvent, ChangeBus};
pub use models::{Cart, LineItem, Product};
pub use services::CatalogService;
pub use store::{Document, DocumentStore, JsonFileAdapter, PersistenceAdapter, StoreError};

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    utils::init_logger();
    Ok(())
}
