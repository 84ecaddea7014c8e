use std::sync::Mutex;

use crate::config::BackendConfig;

use super::BackendError;

/// Read side of the backend-connected flag. The orchestrator consults this
/// before attempting the primary channel; tests pin it to a fixed value.
pub trait ConnectivityProbe: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// Probes `GET /health` on the backend with a fixed timeout and caches the
/// boolean outcome until [`HealthMonitor::refresh`] is called again.
///
/// Before the first probe the monitor reports the backend as reachable.
pub struct HealthMonitor {
    http: reqwest::Client,
    health_url: String,
    state: Mutex<Option<bool>>,
}

impl HealthMonitor {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.health_timeout())
            .build()?;

        Ok(Self {
            http,
            health_url: format!("{}/health", config.base_url.trim_end_matches('/')),
            state: Mutex::new(None),
        })
    }

    /// Re-probes the backend and replaces the cached flag.
    pub async fn refresh(&self) -> bool {
        let reachable = match self.http.get(&self.health_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(error) => {
                tracing::warn!(%error, url = %self.health_url, "backend health probe failed");
                false
            }
        };

        *self.state.lock().expect("connectivity mutex poisoned") = Some(reachable);
        reachable
    }
}

impl ConnectivityProbe for HealthMonitor {
    fn is_connected(&self) -> bool {
        self.state
            .lock()
            .expect("connectivity mutex poisoned")
            .unwrap_or(true)
    }
}

impl std::fmt::Debug for HealthMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthMonitor")
            .field("health_url", &self.health_url)
            .finish_non_exhaustive()
    }
}
