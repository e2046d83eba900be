//! Selection resolution and dispatch.

pub mod engine;
pub mod rules;

pub use engine::{DispatchEngine, DispatchOutcome, RoutingDecision};
pub use rules::{SpecialEffect, SpecialRules, ENTITY_PROMPT};
