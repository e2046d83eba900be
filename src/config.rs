use serde::{Deserialize, Serialize};

/// Web API resource requested by the metadata refresh command.
pub const METADATA_RESOURCE: &str = "api/data/v9.2/EntityDefinitions?$select=LogicalName";

/// Placeholder shown in the palette input when idle.
pub const IDLE_PROMPT: &str = "Search...";

/// Tunable settings for the palette engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotlightConfig {
    /// Base URL of the host CRM organization.
    pub api_base: String,
    /// Broadcast capacity of the message bus.
    pub bus_capacity: usize,
    /// Idle placeholder for the palette input.
    pub idle_placeholder: String,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            api_base: "https://org.crm.dynamics.com".to_string(),
            bus_capacity: 32,
            idle_placeholder: IDLE_PROMPT.to_string(),
        }
    }
}

impl SpotlightConfig {
    /// Full URL the metadata refresh command requests.
    pub fn metadata_refresh_url(&self) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), METADATA_RESOURCE)
    }
}
