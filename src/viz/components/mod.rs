mod help;
mod log;
mod plot;
mod world;

use crossterm::event::Event;
use ratatui::widgets::WidgetRef;

pub use help::Help;
pub use log::Logs;
pub use plot::Plots;
pub use world::World;

/// A tab body that can react to terminal input
pub trait Component: WidgetRef {
    /// **Returns** `true` if the event was consumed
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
