//! Terminal visualizer for environment runs
//!
//! [`init`] routes the `log` facade into the TUI and starts the app on its own thread.
//! The driving loop pushes [`Update`]s through the returned channel; dropping the sender
//! marks the run as finished while the app stays open until the user quits.

use std::{
    sync::mpsc::{self, Sender},
    thread::{self, JoinHandle},
};

use log::LevelFilter;

pub use app::{App, Update};

mod app;
mod components;
mod tui;
mod util;

/// Start the visualizer
///
/// ### Parameters
/// - `keys` - Report keys, one plot is drawn per key in the order given
/// - `episodes` - Total number of episodes, used for the progress bar
///
/// **Returns** the app thread handle and the channel feeding it
pub fn init(keys: &[&'static str], episodes: u16) -> (JoinHandle<()>, Sender<Update>) {
    if tui_logger::init_logger(LevelFilter::Trace).is_ok() {
        tui_logger::set_default_level(LevelFilter::Debug);
    }

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(keys, episodes);
    let handle = thread::spawn(move || {
        if let Err(err) = app.run(rx) {
            log::error!("visualizer stopped: {err}");
        }
    });

    (handle, tx)
}
