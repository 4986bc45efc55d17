//! 变更总线核心实现
//!
//! # 消息流
//!
//! ```text
//! CatalogService ──▶ publish() ──▶ broadcast::Sender ──▶ 所有订阅者
//! ```
//!
//! 建立在 `tokio::sync::broadcast` 之上：
//!
//! - 发布是即发即弃的，从不等待订阅者。
//! - 每个订阅者按发布顺序收到事件。
//! - 慢订阅者只影响自己：超出容量时丢弃其最旧的事件
//!   (`RecvError::Lagged`)，不阻塞发布者也不影响其他订阅者。
//! - 发布后才订阅的观察者收不到历史事件 (无回放缓冲)。

use tokio::sync::broadcast;

use super::events::BusEvent;

/// 默认广播通道容量
pub const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out of committed mutation events.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<BusEvent>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to events published from this moment on.
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }

    /// Publish to every observer subscribed right now. Returns promptly
    /// regardless of subscriber liveness; having no subscribers is fine.
    pub fn publish(&self, event: BusEvent) {
        match self.tx.send(event) {
            Ok(subscribers) => {
                tracing::debug!(subscribers, "bus event published");
            }
            Err(_) => {
                tracing::trace!("bus event published with no subscribers");
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
