//! `PushGateway` backed by a provider subprocess.

use async_trait::async_trait;

use crate::error::GroupWatchResult;
use crate::provider::Provider;
use crate::provider::protocol::SendPush;
use crate::push::{Notification, PushGateway, PushOutcome};

/// Push-delivery port speaking the provider protocol.
#[derive(Clone, Debug)]
pub struct ProviderPush {
    provider: Provider,
}

impl ProviderPush {
    pub fn new(provider: Provider) -> Self {
        ProviderPush { provider }
    }
}

#[async_trait]
impl PushGateway for ProviderPush {
    async fn send(&self, notification: &Notification) -> GroupWatchResult<PushOutcome> {
        self.provider
            .call(SendPush {
                title: notification.title.clone(),
                body: notification.body.clone(),
                tokens: notification.tokens.clone(),
            })
            .await
    }
}
