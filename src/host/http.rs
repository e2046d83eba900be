use parking_lot::Mutex;

use super::Host;
use crate::error::{SpotlightError, SpotlightResult};

/// Host backed by a real HTTP client.
///
/// Outbound requests are spawned onto the ambient tokio runtime and never
/// awaited by the dispatcher; their URLs are recorded synchronously so the
/// effect is observable immediately. Navigation updates the tracked
/// location (the content script applies it to `window.location`).
pub struct HttpHost {
    client: reqwest::Client,
    location: Mutex<String>,
    requests: Mutex<Vec<String>>,
}

impl HttpHost {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            location: Mutex::new(location.into()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl Host for HttpHost {
    fn request(&self, url: &str) -> SpotlightResult<()> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|err| SpotlightError::Host(err.to_string()))?;
        self.requests.lock().push(url.to_string());

        let client = self.client.clone();
        let url = url.to_string();
        handle.spawn(async move {
            match client.get(&url).send().await {
                Ok(response) => {
                    tracing::debug!("outbound request to {url} returned {}", response.status());
                }
                Err(err) => {
                    tracing::warn!("outbound request to {url} failed: {err}");
                }
            }
        });
        Ok(())
    }

    fn location(&self) -> String {
        self.location.lock().clone()
    }

    fn navigate(&self, url: &str) -> SpotlightResult<()> {
        tracing::info!("navigating to {url}");
        *self.location.lock() = url.to_string();
        Ok(())
    }

    fn observed_requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_outside_runtime_is_a_host_error() {
        let host = HttpHost::new("https://org.crm.dynamics.com/main.aspx");
        let err = host.request("https://example.com").unwrap_err();
        assert!(matches!(err, SpotlightError::Host(_)));
        assert!(host.observed_requests().is_empty());
    }

    #[tokio::test]
    async fn request_inside_runtime_records_url() {
        let host = HttpHost::new("https://org.crm.dynamics.com/main.aspx");
        // The spawned request will fail to resolve; only the log matters here.
        host.request("http://127.0.0.1:1/EntityDefinitions").unwrap();
        assert_eq!(
            host.observed_requests(),
            vec!["http://127.0.0.1:1/EntityDefinitions"]
        );
    }
}
