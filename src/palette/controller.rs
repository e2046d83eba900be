use super::state::{PaletteMode, Surface};
use crate::bus::MessageBus;
use crate::catalog::{Catalog, Command};
use crate::config::SpotlightConfig;
use crate::dispatch::{DispatchEngine, DispatchOutcome, SpecialRules, ENTITY_PROMPT};
use crate::error::{SpotlightError, SpotlightResult};
use crate::host::SharedHost;
use crate::matcher;

/// Orchestrates one open → query → select → effect cycle per invocation.
///
/// Lifecycle: `Closed → Open(query="") → Open(query=q) → Dispatched →
/// Closed`. Prompt-for-entity and info-panel commands keep the palette
/// open; everything else closes it once its effect has been applied. An
/// in-flight asynchronous effect survives the palette closing.
pub struct PaletteController {
    catalog: Catalog,
    engine: DispatchEngine,
    config: SpotlightConfig,
    mode: PaletteMode,
    query: String,
    candidates: Vec<Command>,
    surface: Surface,
    pending_entity: Option<Command>,
}

impl PaletteController {
    /// Build a controller over the embedded catalog and standard special
    /// set. Fails only if the catalog document is invalid.
    pub fn new(config: SpotlightConfig, bus: MessageBus, host: SharedHost) -> SpotlightResult<Self> {
        let catalog = Catalog::load()?;
        Ok(Self::with_catalog(catalog, config, bus, host))
    }

    /// Build a controller over an explicit catalog.
    pub fn with_catalog(
        catalog: Catalog,
        config: SpotlightConfig,
        bus: MessageBus,
        host: SharedHost,
    ) -> Self {
        let engine = DispatchEngine::new(bus, host, SpecialRules::standard(), &config);
        let surface = Surface::idle(&config.idle_placeholder);
        Self {
            catalog,
            engine,
            config,
            mode: PaletteMode::Closed,
            query: String::new(),
            candidates: Vec::new(),
            surface,
            pending_entity: None,
        }
    }

    /// Handle the external open trigger.
    ///
    /// Reopening after a completed dispatch resets the query, candidates,
    /// placeholder, and info panel; a pending entity prompt is cancelled.
    pub fn open(&mut self) {
        self.mode = PaletteMode::Open;
        self.query.clear();
        self.candidates = self.catalog.commands().to_vec();
        self.surface = Surface::idle(&self.config.idle_placeholder);
        self.pending_entity = None;
        tracing::debug!("palette opened ({} candidates)", self.candidates.len());
    }

    /// Close the palette. In-flight asynchronous effects are not
    /// cancelled; they remain observable through the host afterwards.
    pub fn close(&mut self) {
        self.mode = PaletteMode::Closed;
        self.query.clear();
        self.candidates.clear();
        self.pending_entity = None;
    }

    /// Re-run the matcher for the current input value.
    pub fn input(&mut self, query: &str) -> SpotlightResult<&[Command]> {
        if self.mode != PaletteMode::Open {
            return Err(SpotlightError::NotOpen);
        }
        self.query = query.to_string();
        self.candidates = matcher::filter(&self.catalog, query)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!("query {query:?} matched {} commands", self.candidates.len());
        Ok(&self.candidates)
    }

    /// Select a candidate by id: resolve its routing decision, execute it,
    /// and apply the outcome to the palette state.
    ///
    /// A failed dispatch leaves the palette open with its state intact, so
    /// the failure is observable and nothing is half-applied.
    pub fn select(&mut self, id: &str) -> SpotlightResult<DispatchOutcome> {
        if self.mode != PaletteMode::Open {
            return Err(SpotlightError::NotOpen);
        }
        let decision = self.engine.resolve(&self.catalog, id)?;
        let command = decision.command().clone();
        let outcome = self.engine.dispatch(decision).inspect_err(|err| {
            tracing::warn!("dispatch of {id} failed: {err}");
        })?;

        match &outcome {
            DispatchOutcome::AwaitingEntity => {
                self.mode = PaletteMode::EntityPrompt;
                self.query.clear();
                self.surface.placeholder = ENTITY_PROMPT.to_string();
                self.pending_entity = Some(command);
            }
            DispatchOutcome::InfoRevealed => {
                self.surface.info_visible = true;
            }
            _ => {
                // effect finished synchronously: pass through Dispatched
                // and settle Closed for the next open-trigger
                self.mode = PaletteMode::Dispatched;
                self.close();
            }
        }
        Ok(outcome)
    }

    /// Submit an entity name while in entity-prompt mode, publishing the
    /// deferred message for the originating command and closing.
    pub fn submit_entity(&mut self, name: &str) -> SpotlightResult<DispatchOutcome> {
        if self.mode != PaletteMode::EntityPrompt {
            return Err(SpotlightError::NotOpen);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(SpotlightError::InvalidInput(
                "entity name must not be empty".to_string(),
            ));
        }
        let command = match self.pending_entity.take() {
            Some(command) => command,
            None => return Err(SpotlightError::NotOpen),
        };
        let outcome = self.engine.dispatch_entity(&command, name);
        self.mode = PaletteMode::Dispatched;
        self.close();
        Ok(outcome)
    }

    pub fn mode(&self) -> &PaletteMode {
        &self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Candidates for the current query, in catalog order.
    pub fn candidates(&self) -> &[Command] {
        &self.candidates
    }

    /// Current input placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.surface.placeholder
    }

    /// Whether the auxiliary info panel is revealed.
    pub fn info_visible(&self) -> bool {
        self.surface.info_visible
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
