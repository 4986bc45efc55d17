use std::sync::Arc;

use crate::core::Config;
use crate::message::ChangeBus;
use crate::models::{Cart, Product};
use crate::services::CatalogService;
use crate::store::{DocumentStore, JsonFileAdapter, PersistenceError};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 两个文档存储在进程启动时构造一次并注入 CatalogService，
/// 没有环境级可变全局状态。使用 Arc 实现浅拷贝。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | catalog | 商品/购物车组合服务 |
#[derive(Debug, Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 目录服务 (两个文档存储 + 变更总线)
    pub catalog: CatalogService,
}

impl ServerState {
    /// 初始化服务器状态：从磁盘加载两个集合，组装变更总线和服务。
    pub async fn initialize(config: &Config) -> Result<Self, PersistenceError> {
        let products = Arc::new(
            DocumentStore::<Product>::open(Arc::new(JsonFileAdapter::new(config.products_file())))
                .await?,
        );
        let carts = Arc::new(
            DocumentStore::<Cart>::open(Arc::new(JsonFileAdapter::new(config.carts_file())))
                .await?,
        );

        let bus = ChangeBus::new(config.bus_capacity);
        let catalog = CatalogService::new(products, carts, bus);

        tracing::info!(work_dir = %config.work_dir.display(), "server state initialized");

        Ok(Self {
            config: config.clone(),
            catalog,
        })
    }
}
