//! Palette lifecycle and orchestration.

pub mod controller;
pub mod state;

pub use controller::PaletteController;
pub use state::{PaletteMode, Surface};
