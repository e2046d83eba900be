//! Ambient browser environment touched by special command effects.

pub mod http;
pub mod memory;

pub use http::HttpHost;
pub use memory::MemoryHost;

use std::sync::Arc;

use crate::error::SpotlightResult;

/// The slice of the host page's environment the dispatch engine can touch:
/// outbound requests and the current navigable location.
///
/// Implementations record every outbound request URL, so callers can await
/// an asynchronous effect by polling [`Host::observed_requests`] instead of
/// a return value.
pub trait Host: Send + Sync {
    /// Issue a fire-and-forget outbound request. The URL is recorded
    /// before this returns; the request itself completes asynchronously
    /// and is never awaited by the dispatcher.
    fn request(&self, url: &str) -> SpotlightResult<()>;

    /// Current navigable location.
    fn location(&self) -> String;

    /// Replace the current navigable location.
    fn navigate(&self, url: &str) -> SpotlightResult<()>;

    /// Every outbound request URL observed so far, in issue order.
    fn observed_requests(&self) -> Vec<String>;
}

pub type SharedHost = Arc<dyn Host>;
