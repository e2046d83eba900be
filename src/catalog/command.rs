use serde::{Deserialize, Serialize};

/// An invocable palette command.
///
/// Records are immutable after catalog load. `id` is the stable identifier
/// used for selection and message derivation; `title` is what the query
/// matcher runs against; `category` is echoed into dispatched messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    pub title: String,
    pub category: String,
}
