//! Widgets for the orc TUI

pub mod input;
pub mod narrative;
pub mod portrait;

pub use input::InputWidget;
pub use narrative::NarrativeWidget;
pub use portrait::PortraitWidget;
