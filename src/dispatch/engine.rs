use super::rules::{SpecialEffect, SpecialRules};
use crate::bus::MessageBus;
use crate::catalog::{Catalog, Command};
use crate::config::SpotlightConfig;
use crate::error::{SpotlightError, SpotlightResult};
use crate::host::SharedHost;
use crate::message::RuntimeMessage;

/// How a selected command id routes through the engine.
#[derive(Debug, Clone)]
pub enum RoutingDecision {
    /// Uniform contract: one message derived from the command.
    Default(Command),
    /// One of the bespoke special effects.
    Special(Command, SpecialEffect),
}

impl RoutingDecision {
    /// The command behind this decision.
    pub fn command(&self) -> &Command {
        match self {
            RoutingDecision::Default(command) | RoutingDecision::Special(command, _) => command,
        }
    }
}

/// Externally observable result of a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// A message was published on the bus.
    Published(RuntimeMessage),
    /// The palette should prompt for an entity name and stay open.
    AwaitingEntity,
    /// The palette should reveal its info panel and stay open.
    InfoRevealed,
    /// An outbound request was issued; its completion is asynchronous.
    RequestIssued { url: String },
    /// The navigable location was updated.
    LocationUpdated { url: String },
    /// The command completed with no observable effect.
    Completed,
}

/// Resolves selections against the catalog and executes routing decisions.
pub struct DispatchEngine {
    bus: MessageBus,
    host: SharedHost,
    rules: SpecialRules,
    metadata_url: String,
}

impl DispatchEngine {
    pub fn new(bus: MessageBus, host: SharedHost, rules: SpecialRules, config: &SpotlightConfig) -> Self {
        Self {
            bus,
            host,
            rules,
            metadata_url: config.metadata_refresh_url(),
        }
    }

    /// Resolve a command id to its routing decision.
    ///
    /// Ids produced by the query matcher always resolve; an unknown id is
    /// handled defensively rather than assumed unreachable.
    pub fn resolve(&self, catalog: &Catalog, id: &str) -> SpotlightResult<RoutingDecision> {
        let command = catalog
            .lookup(id)
            .ok_or_else(|| SpotlightError::UnknownCommand(id.to_string()))?;
        Ok(match self.rules.get(id) {
            Some(effect) => RoutingDecision::Special(command.clone(), effect.clone()),
            None => RoutingDecision::Default(command.clone()),
        })
    }

    /// Execute a routing decision.
    ///
    /// The default path publishes exactly one derived message, observable
    /// on the bus before this returns. Special handlers run their fallible
    /// work before anything is published or mutated, so a failure leaves
    /// the bus log and catalog untouched.
    pub fn dispatch(&self, decision: RoutingDecision) -> SpotlightResult<DispatchOutcome> {
        match decision {
            RoutingDecision::Default(command) => {
                let message = RuntimeMessage::derived(&command);
                tracing::info!("dispatching {} ({})", command.id, command.category);
                self.bus.publish(message.clone());
                Ok(DispatchOutcome::Published(message))
            }
            RoutingDecision::Special(command, effect) => self
                .dispatch_special(&command, &effect)
                .map_err(|err| match err {
                    err @ SpotlightError::DispatchFailed { .. } => err,
                    other => SpotlightError::DispatchFailed {
                        id: command.id.clone(),
                        reason: other.to_string(),
                    },
                }),
        }
    }

    /// Publish the deferred message for an entity-prompt command once the
    /// user has supplied an entity name.
    pub fn dispatch_entity(&self, command: &Command, entity: &str) -> DispatchOutcome {
        let message = RuntimeMessage::derived(command)
            .with_payload(serde_json::json!({ "entity": entity }));
        tracing::info!("dispatching {} for entity {entity}", command.id);
        self.bus.publish(message.clone());
        DispatchOutcome::Published(message)
    }

    fn dispatch_special(
        &self,
        command: &Command,
        effect: &SpecialEffect,
    ) -> SpotlightResult<DispatchOutcome> {
        tracing::info!("dispatching special command {}", command.id);
        match effect {
            SpecialEffect::Remap {
                message_type,
                category,
            } => {
                let message = RuntimeMessage::fixed(*message_type, *category);
                self.bus.publish(message.clone());
                Ok(DispatchOutcome::Published(message))
            }
            SpecialEffect::PromptEntity => Ok(DispatchOutcome::AwaitingEntity),
            SpecialEffect::RevealInfo => Ok(DispatchOutcome::InfoRevealed),
            SpecialEffect::MetadataRefresh => {
                self.host.request(&self.metadata_url)?;
                Ok(DispatchOutcome::RequestIssued {
                    url: self.metadata_url.clone(),
                })
            }
            SpecialEffect::LocationFlag { key, value } => {
                let url = append_query_flag(&self.host.location(), key, value);
                self.host.navigate(&url)?;
                Ok(DispatchOutcome::LocationUpdated { url })
            }
            SpecialEffect::Passive => Ok(DispatchOutcome::Completed),
        }
    }
}

/// Append `key=value` to a URL's query string. Already-flagged URLs are
/// returned unchanged, so repeated toggles stay idempotent.
fn append_query_flag(url: &str, key: &str, value: &str) -> String {
    let flag = format!("{}={}", urlencoding::encode(key), urlencoding::encode(value));
    if url.contains(&flag) {
        return url.to_string();
    }
    if url.contains('?') {
        format!("{url}&{flag}")
    } else {
        format!("{url}?{flag}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::host::{Host, MemoryHost};

    fn command(id: &str, title: &str, category: &str) -> Command {
        Command {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
        }
    }

    fn engine_with_host(host: SharedHost) -> (DispatchEngine, MessageBus) {
        let bus = MessageBus::new(8);
        let engine = DispatchEngine::new(
            bus.clone(),
            host,
            SpecialRules::standard(),
            &SpotlightConfig::default(),
        );
        (engine, bus)
    }

    fn engine() -> (DispatchEngine, MessageBus, Arc<MemoryHost>) {
        let host = Arc::new(MemoryHost::default());
        let (engine, bus) = engine_with_host(host.clone());
        (engine, bus, host)
    }

    #[test]
    fn resolve_unknown_id_errors() {
        let (engine, _bus, _host) = engine();
        let catalog = Catalog::load().unwrap();
        let err = engine.resolve(&catalog, "nope").unwrap_err();
        assert!(matches!(err, SpotlightError::UnknownCommand(id) if id == "nope"));
    }

    #[test]
    fn resolve_is_deterministic() {
        let (engine, _bus, _host) = engine();
        let catalog = Catalog::load().unwrap();
        for _ in 0..3 {
            assert!(matches!(
                engine.resolve(&catalog, "godMode").unwrap(),
                RoutingDecision::Default(_)
            ));
            assert!(matches!(
                engine.resolve(&catalog, "perfCenter").unwrap(),
                RoutingDecision::Special(_, SpecialEffect::LocationFlag { .. })
            ));
        }
    }

    #[test]
    fn default_dispatch_publishes_one_derived_message() {
        let (engine, bus, _host) = engine();
        let cmd = command("godMode", "God Mode", "Form");

        let outcome = engine
            .dispatch(RoutingDecision::Default(cmd))
            .unwrap();

        assert_eq!(bus.len(), 1);
        let latest = bus.latest().unwrap();
        assert_eq!(latest.kind, "sp:godMode");
        assert_eq!(latest.category, "Form");
        assert_eq!(outcome, DispatchOutcome::Published(latest));
    }

    #[test]
    fn remap_publishes_fixed_shape_regardless_of_category() {
        let (engine, bus, _host) = engine();
        let catalog = Catalog::load().unwrap();

        let decision = engine.resolve(&catalog, "impersonateUserSpotlight").unwrap();
        engine.dispatch(decision).unwrap();
        let latest = bus.latest().unwrap();
        assert_eq!(latest.kind, "sp:search");
        assert_eq!(latest.category, "Impersonation");

        let decision = engine
            .resolve(&catalog, "impersonationResetSpotlight")
            .unwrap();
        engine.dispatch(decision).unwrap();
        let latest = bus.latest().unwrap();
        assert_eq!(latest.kind, "sp:reset");
        assert_eq!(latest.category, "Impersonation");
    }

    #[test]
    fn metadata_refresh_records_marker_url_without_message() {
        let (engine, bus, host) = engine();
        let catalog = Catalog::load().unwrap();

        let decision = engine.resolve(&catalog, "refreshEntityMetadata").unwrap();
        let outcome = engine.dispatch(decision).unwrap();

        assert!(matches!(outcome, DispatchOutcome::RequestIssued { .. }));
        assert!(bus.is_empty());
        let requests = host.observed_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].contains("EntityDefinitions"));
    }

    #[test]
    fn location_flag_appends_perf_marker() {
        let (engine, bus, host) = engine();
        let catalog = Catalog::load().unwrap();

        let decision = engine.resolve(&catalog, "perfCenter").unwrap();
        engine.dispatch(decision).unwrap();

        assert!(bus.is_empty());
        assert!(host.location().contains("perf=true"));
    }

    #[test]
    fn location_flag_is_idempotent() {
        let (engine, _bus, host) = engine();
        let catalog = Catalog::load().unwrap();

        for _ in 0..3 {
            let decision = engine.resolve(&catalog, "perfCenter").unwrap();
            engine.dispatch(decision).unwrap();
        }

        assert_eq!(host.location().matches("perf=true").count(), 1);
    }

    #[test]
    fn passive_commands_complete_without_effects() {
        let (engine, bus, host) = engine();
        let catalog = Catalog::load().unwrap();

        for id in ["reloadData", "populateMin", "refresh"] {
            let decision = engine.resolve(&catalog, id).unwrap();
            assert_eq!(engine.dispatch(decision).unwrap(), DispatchOutcome::Completed);
        }
        assert!(bus.is_empty());
        assert!(host.observed_requests().is_empty());
    }

    #[test]
    fn entity_dispatch_carries_payload() {
        let (engine, bus, _host) = engine();
        let cmd = command("openRecordSpotlight", "Open Record", "Navigation");

        let outcome = engine.dispatch_entity(&cmd, "account");

        let latest = bus.latest().unwrap();
        assert_eq!(latest.kind, "sp:openRecordSpotlight");
        assert_eq!(latest.category, "Navigation");
        assert_eq!(
            latest.payload,
            Some(serde_json::json!({ "entity": "account" }))
        );
        assert_eq!(outcome, DispatchOutcome::Published(latest));
    }

    struct FailingHost;

    impl crate::host::Host for FailingHost {
        fn request(&self, _url: &str) -> SpotlightResult<()> {
            Err(SpotlightError::Host("request refused".to_string()))
        }

        fn location(&self) -> String {
            "https://org.crm.dynamics.com/main.aspx".to_string()
        }

        fn navigate(&self, _url: &str) -> SpotlightResult<()> {
            Err(SpotlightError::Host("navigation refused".to_string()))
        }

        fn observed_requests(&self) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn failed_handler_surfaces_dispatch_failed_and_leaves_bus_clean() {
        let (engine, bus) = engine_with_host(Arc::new(FailingHost));
        let catalog = Catalog::load().unwrap();

        for id in ["refreshEntityMetadata", "perfCenter"] {
            let decision = engine.resolve(&catalog, id).unwrap();
            let err = engine.dispatch(decision).unwrap_err();
            assert!(
                matches!(err, SpotlightError::DispatchFailed { id: failed, .. } if failed == id)
            );
        }
        assert!(bus.is_empty());
    }
}
