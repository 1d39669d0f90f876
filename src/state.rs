use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::ModerationService;
use crate::upstream::{HttpUpstream, Service};

/// Shared, immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub moderation: ModerationService,
}

impl AppState {
    pub fn new(config: AppConfig, moderation: ModerationService) -> Self {
        Self {
            config: Arc::new(config),
            moderation,
        }
    }

    /// Wire HTTP clients for both upstreams from the configuration.
    pub fn from_config(config: AppConfig) -> Result<Self, reqwest::Error> {
        let timeout = config.upstream.timeout();
        let delivery = HttpUpstream::new(Service::Delivery, &config.upstream.delivery_url, timeout)?;
        let submit = HttpUpstream::new(Service::Submit, &config.upstream.submit_url, timeout)?;

        let moderation = ModerationService::new(Arc::new(delivery), Arc::new(submit));
        Ok(Self::new(config, moderation))
    }
}
