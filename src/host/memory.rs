use parking_lot::Mutex;

use super::Host;
use crate::error::SpotlightResult;

/// In-memory host for tests and headless runs.
///
/// Requests are logged but never sent; navigation mutates a stored
/// location string.
#[derive(Debug)]
pub struct MemoryHost {
    location: Mutex<String>,
    requests: Mutex<Vec<String>>,
}

impl MemoryHost {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: Mutex::new(location.into()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new("https://org.crm.dynamics.com/main.aspx")
    }
}

impl Host for MemoryHost {
    fn request(&self, url: &str) -> SpotlightResult<()> {
        self.requests.lock().push(url.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        self.location.lock().clone()
    }

    fn navigate(&self, url: &str) -> SpotlightResult<()> {
        *self.location.lock() = url.to_string();
        Ok(())
    }

    fn observed_requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}
