//! Finds the VSS base URL: the system default server from the store, cached
//! for a while, or the configured fallback.

use super::error::VssError;
use crate::store::{collections, DocumentStore, Filter};
use common::model::server::Server;
use log::{info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CachedUrl {
    url: String,
    expires_at: Instant,
}

pub struct VssResolver {
    store: Arc<DocumentStore>,
    fallback: Option<String>,
    ttl: Duration,
    cache: RwLock<Option<CachedUrl>>,
}

impl VssResolver {
    pub fn new(store: Arc<DocumentStore>, fallback: Option<String>, ttl: Duration) -> Self {
        Self {
            store,
            fallback: fallback.map(|url| with_scheme(&url)),
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// `{protocol}://{ipAddressWithPort}` of the system default server.
    pub async fn base_url(&self) -> Result<String, VssError> {
        if let Some(cached) = self.cache.read().await.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.url.clone());
            }
        }

        let defaults = self
            .store
            .list::<Server>(collections::SERVERS, &[Filter::eq("isSystemDefault", true)]);
        match defaults {
            Ok(servers) => {
                if let Some(server) = servers.into_iter().next() {
                    let url = server.data.base_url();
                    info!("Using system default VSS server {} at {url}", server.id);
                    *self.cache.write().await = Some(CachedUrl {
                        url: url.clone(),
                        expires_at: Instant::now() + self.ttl,
                    });
                    return Ok(url);
                }
                self.fallback_or_error("no system default server is marked")
            }
            Err(e) => {
                self.invalidate().await;
                self.fallback_or_error(&format!("reading servers failed: {e}"))
            }
        }
    }

    /// Drops the cached URL; the next call reads the store again.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    fn fallback_or_error(&self, reason: &str) -> Result<String, VssError> {
        match &self.fallback {
            Some(url) => {
                warn!("{reason}; using VSS_API_BASE_URL {url}");
                Ok(url.clone())
            }
            None => {
                warn!("{reason}; VSS API is not configured");
                Err(VssError::NotConfigured)
            }
        }
    }
}

fn with_scheme(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
