use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | data | 工作目录 (存放 products.json / carts.json) |
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | BUS_CAPACITY | 1024 | 变更总线通道容量 |
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储持久化文件
    pub work_dir: PathBuf,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 变更总线广播容量
    pub bus_capacity: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            bus_capacity: std::env::var("BUS_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(crate::message::bus::DEFAULT_CAPACITY),
        }
    }

    /// Persisted product collection path.
    pub fn products_file(&self) -> PathBuf {
        self.work_dir.join("products.json")
    }

    /// Persisted cart collection path.
    pub fn carts_file(&self) -> PathBuf {
        self.work_dir.join("carts.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("data"),
            http_port: 8080,
            environment: "development".into(),
            bus_capacity: crate::message::bus::DEFAULT_CAPACITY,
        }
    }
}
