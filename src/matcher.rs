//! Query matching over the command catalog.

use crate::catalog::{Catalog, Command};

/// Filter the catalog by case-insensitive substring containment on titles.
///
/// Catalog insertion order is preserved among matches, so ties are stable
/// and deterministic. A blank query returns the full catalog ("browse
/// all"); a query matching nothing returns an empty list, which is a
/// normal outcome rather than an error.
pub fn filter<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a Command> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.commands().iter().collect();
    }
    catalog
        .commands()
        .iter()
        .filter(|command| command.title.to_lowercase().contains(&needle))
        .collect()
}
