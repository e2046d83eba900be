use std::collections::HashMap;

use super::command::Command;
use crate::error::{SpotlightError, SpotlightResult};

/// The command catalog shipped with the extension.
pub const CATALOG_JSON: &str = include_str!("commands.json");

/// Ordered, read-only collection of every invocable command.
///
/// Loaded once at palette initialization; duplicate ids and blank titles
/// are rejected at load time so they can never surface mid-session.
#[derive(Debug, Clone)]
pub struct Catalog {
    commands: Vec<Command>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Load and validate the embedded catalog.
    pub fn load() -> SpotlightResult<Self> {
        let catalog = Self::from_json(CATALOG_JSON)?;
        tracing::debug!("loaded command catalog ({} commands)", catalog.len());
        Ok(catalog)
    }

    /// Parse a catalog document from JSON.
    pub fn from_json(raw: &str) -> SpotlightResult<Self> {
        let commands: Vec<Command> = serde_json::from_str(raw)?;
        Self::from_commands(commands)
    }

    /// Validate an in-memory command sequence, preserving its order.
    pub fn from_commands(commands: Vec<Command>) -> SpotlightResult<Self> {
        let mut by_id = HashMap::with_capacity(commands.len());
        for (position, command) in commands.iter().enumerate() {
            if command.title.trim().is_empty() {
                return Err(SpotlightError::EmptyTitle(command.id.clone()));
            }
            if by_id.insert(command.id.clone(), position).is_some() {
                return Err(SpotlightError::DuplicateCommandId(command.id.clone()));
            }
        }
        Ok(Self { commands, by_id })
    }

    /// Look up a command by id.
    pub fn lookup(&self, id: &str) -> Option<&Command> {
        self.by_id.get(id).map(|&position| &self.commands[position])
    }

    /// All commands in catalog order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
