pub mod bus;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod matcher;
pub mod message;
pub mod palette;

pub use crate::bus::{BusRecord, MessageBus};
pub use crate::catalog::{Catalog, Command};
pub use crate::config::SpotlightConfig;
pub use crate::dispatch::{
    DispatchEngine, DispatchOutcome, RoutingDecision, SpecialEffect, SpecialRules,
};
pub use crate::error::{SpotlightError, SpotlightResult};
pub use crate::host::{Host, HttpHost, MemoryHost, SharedHost};
pub use crate::message::{RuntimeMessage, MESSAGE_NAMESPACE};
pub use crate::palette::{PaletteController, PaletteMode, Surface};
