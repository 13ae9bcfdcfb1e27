//! Push-delivery port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GroupWatchResult;

/// One batched push notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Opaque device tokens, already deduplicated.
    pub tokens: Vec<String>,
}

/// Call-level outcome of a multicast send. Per-token failures stay with
/// the delivery service.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PushOutcome {
    pub delivered: usize,
    pub failed: usize,
}

/// Best-effort multicast push delivery.
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(&self, notification: &Notification) -> GroupWatchResult<PushOutcome>;
}
