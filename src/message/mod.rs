//! 变更总线 - 进程内发布/订阅
//!
//! # 结构
//!
//! - [`ChangeBus`] - 提交变更的广播通道
//! - [`BusEvent`] - 总线事件类型

pub mod bus;
pub mod events;

pub use bus::ChangeBus;
pub use events::BusEvent;
