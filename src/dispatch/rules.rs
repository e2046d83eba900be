//! Lookup table for commands that deviate from uniform message dispatch.

use std::collections::HashMap;

/// Fixed message type published when impersonation user search starts.
pub const IMPERSONATE_SEARCH_TYPE: &str = "sp:search";

/// Fixed message type published when impersonation is reset.
pub const IMPERSONATE_RESET_TYPE: &str = "sp:reset";

/// Category stamped on every impersonation message, regardless of the
/// originating command's own catalog category.
pub const IMPERSONATION_CATEGORY: &str = "Impersonation";

/// Prompt shown while the palette awaits an entity name.
pub const ENTITY_PROMPT: &str = "Search entity...";

/// Query flag appended to the location by the performance center toggle.
pub const PERF_FLAG_KEY: &str = "perf";
pub const PERF_FLAG_VALUE: &str = "true";

/// How a special command deviates from the uniform dispatch contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialEffect {
    /// Publish a fixed-shape message shared by a family of command ids.
    Remap {
        message_type: &'static str,
        category: &'static str,
    },
    /// Switch the palette input into entity-prompt mode; no message.
    PromptEntity,
    /// Reveal the palette's auxiliary info panel; no message.
    RevealInfo,
    /// Fire-and-forget refresh of cached entity metadata.
    MetadataRefresh,
    /// Append a fixed query flag to the current location.
    LocationFlag {
        key: &'static str,
        value: &'static str,
    },
    /// No observable effect; must complete cleanly.
    Passive,
}

/// Table mapping command ids to their special effect.
///
/// Fixed at build time alongside the catalog; ids absent from the table
/// follow the uniform derived-message contract.
#[derive(Debug, Clone, Default)]
pub struct SpecialRules {
    rules: HashMap<&'static str, SpecialEffect>,
}

impl SpecialRules {
    /// The special set shipped with the palette.
    pub fn standard() -> Self {
        let mut rules = HashMap::new();

        rules.insert(
            "impersonateUserSpotlight",
            SpecialEffect::Remap {
                message_type: IMPERSONATE_SEARCH_TYPE,
                category: IMPERSONATION_CATEGORY,
            },
        );
        rules.insert(
            "impersonationResetSpotlight",
            SpecialEffect::Remap {
                message_type: IMPERSONATE_RESET_TYPE,
                category: IMPERSONATION_CATEGORY,
            },
        );

        for id in ["openRecordSpotlight", "openList", "newRecord"] {
            rules.insert(id, SpecialEffect::PromptEntity);
        }

        for id in [
            "runFetchXmlSpotlight",
            "entityInfoSpotlight",
            "myRoles",
            "entityMetadata",
            "environmentDetails",
        ] {
            rules.insert(id, SpecialEffect::RevealInfo);
        }

        rules.insert("refreshEntityMetadata", SpecialEffect::MetadataRefresh);
        rules.insert(
            "perfCenter",
            SpecialEffect::LocationFlag {
                key: PERF_FLAG_KEY,
                value: PERF_FLAG_VALUE,
            },
        );

        for id in ["reloadData", "populateMin", "refresh"] {
            rules.insert(id, SpecialEffect::Passive);
        }

        Self { rules }
    }

    /// The effect bound to a command id, if it is special.
    pub fn get(&self, id: &str) -> Option<&SpecialEffect> {
        self.rules.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Every special command id. The set is exhaustively enumerable so it
    /// can be audited against the catalog.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
