//! 实时通道 - socket.io
//!
//! 服务器在每次商品变更后向所有连接推送 `updateProducts`；
//! 客户端可以通过 `addProduct` / `deleteProduct` 走同一个
//! CatalogService 变更路径 (先持久化再广播，绝不广播未校验的原始载荷)。

pub mod socket;

pub use socket::register;
