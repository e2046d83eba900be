use serde::{Deserialize, Serialize};

/// Current mode of the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteMode {
    /// No palette on screen.
    Closed,
    /// Palette visible; the matcher runs against each keystroke.
    Open,
    /// A prompt-for-entity command was selected; the input now expects an
    /// entity name rather than a command query.
    EntityPrompt,
    /// A selection has been resolved and its effect executed.
    Dispatched,
}

/// Presentation state of the palette input and auxiliary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    /// Placeholder text shown in the input field.
    pub placeholder: String,
    /// Whether the auxiliary info panel is revealed.
    pub info_visible: bool,
}

impl Surface {
    /// The idle surface: default prompt, info panel hidden.
    pub fn idle(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            info_visible: false,
        }
    }
}
