//! Wallet deep links.
//!
//! A session URI is handed to the wallet app as
//! `<base>?uri=<url-encoded session URI>`, then either opened in a new
//! browsing context or used to navigate the current one after a delay.
//!
//! The value is form-encoded, so a space becomes `+`. Query parameters
//! already on the base are kept.

use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::{DeepLinkConfig, LinkStrategy};
use crate::observability::metrics;

/// Host capability for handing a URL to the OS or browser.
pub trait LinkOpener: Send + Sync {
    /// Open `url` in a new browsing context.
    fn open(&self, url: &Url);

    /// Navigate the current context to `url`.
    fn navigate(&self, url: &Url);
}

/// Parsed deep link settings.
#[derive(Debug, Clone)]
pub struct DeepLinkSettings {
    pub base: Url,
    pub strategy: LinkStrategy,
    pub navigate_delay: Duration,
}

impl DeepLinkSettings {
    pub fn from_config(config: &DeepLinkConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(&config.base_url)?,
            strategy: config.strategy,
            navigate_delay: Duration::from_millis(config.navigate_delay_ms),
        })
    }
}

/// Build the wallet deep link for a session URI.
pub fn build_deep_link(base: &Url, session_uri: &str) -> Url {
    let mut link = base.clone();
    link.query_pairs_mut().append_pair("uri", session_uri);
    link
}

/// Build the deep link and hand it to the opener according to the strategy.
///
/// Navigation is fire-and-forget: the spawned task is not tracked.
pub fn dispatch(opener: Arc<dyn LinkOpener>, settings: &DeepLinkSettings, session_uri: &str) -> Url {
    let link = build_deep_link(&settings.base, session_uri);
    metrics::record_deep_link(settings.strategy.as_str());

    match settings.strategy {
        LinkStrategy::Open => {
            tracing::info!(link = %link, "Opening wallet deep link");
            opener.open(&link);
        }
        LinkStrategy::Navigate => {
            let delay = settings.navigate_delay;
            let target = link.clone();
            tracing::info!(
                link = %link,
                delay_ms = delay.as_millis() as u64,
                "Scheduling navigation to wallet deep link"
            );
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                opener.navigate(&target);
            });
        }
    }

    link
}
