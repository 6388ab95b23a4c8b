use std::{
    io,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::gym::Scene;

use super::{
    components::{Component, Help, Logs, Plots, World},
    tui,
    util::pressed_key,
};

const TABS: [&str; 3] = ["World", "Plots", "Logs"];

/// Messages from the driving loop to the app
pub enum Update {
    /// The scene after a step
    Frame(Scene),
    /// Report values of a finished episode, in report key order
    Episode { episode: u16, data: Vec<f64> },
}

#[derive(Default, PartialEq)]
enum State {
    #[default]
    Running,
    /// The sender was dropped, nothing more will arrive
    Finished,
    Quit,
}

/// The root TUI component which holds the app state and runs the render loop
pub struct App {
    state: State,
    episode: u16,
    total_episodes: u16,
    selected_tab: usize,
    show_help: bool,
    world: World,
    plots: Plots,
    logs: Logs,
}

impl App {
    pub fn new(keys: &[&'static str], episodes: u16) -> Self {
        Self {
            state: State::default(),
            episode: 0,
            total_episodes: episodes,
            selected_tab: 0,
            show_help: false,
            world: World::new(),
            plots: Plots::new(keys.to_vec(), episodes),
            logs: Logs::new(),
        }
    }

    /// Initialize the terminal and run the main loop until the user quits
    ///
    /// Restores the terminal on exit
    pub fn run(&mut self, rx: Receiver<Update>) -> io::Result<()> {
        let mut terminal = tui::init()?;

        while self.state != State::Quit {
            if self.state == State::Running {
                self.drain(&rx);
            }

            terminal.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(Duration::from_millis(16))? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }

        tui::restore()
    }

    fn drain(&mut self, rx: &Receiver<Update>) {
        loop {
            match rx.try_recv() {
                Ok(update) => self.apply(update),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::info!("run finished after {} episodes", self.episode + 1);
                    self.state = State::Finished;
                    break;
                }
            }
        }
    }

    fn apply(&mut self, update: Update) {
        match update {
            Update::Frame(scene) => self.world.update(scene),
            Update::Episode { episode, data } => {
                self.episode = episode;
                self.plots.update(episode, &data);
                self.world.clear_trail();
            }
        }
    }

    fn handle_event(&mut self, event: &Event) {
        match pressed_key(event) {
            Some(KeyCode::Char('q')) => self.state = State::Quit,
            Some(KeyCode::Char('h')) => self.show_help = !self.show_help,
            Some(KeyCode::Tab) => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ => {
                let component: &mut dyn Component = match self.selected_tab {
                    0 => &mut self.world,
                    1 => &mut self.plots,
                    _ => &mut self.logs,
                };
                component.handle_ui_event(event);
            }
        }
    }

    fn progress(&self) -> f64 {
        if self.state == State::Finished || self.total_episodes == 0 {
            1.0
        } else {
            (f64::from(self.episode) + 1.0).min(f64::from(self.total_episodes))
                / f64::from(self.total_episodes)
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area, progress_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        match self.selected_tab {
            0 => self.world.render_ref(main_area, buf),
            1 => self.plots.render_ref(main_area, buf),
            _ => self.logs.render_ref(main_area, buf),
        }

        let title = match self.state {
            State::Finished => "Progress (finished, press q to exit)",
            _ => "Progress",
        };
        Gauge::default()
            .block(Block::bordered().border_type(BorderType::Rounded).title(title))
            .gauge_style(Color::Cyan)
            .ratio(self.progress())
            .render(progress_area, buf);

        if self.show_help {
            Help {
                selected_tab: self.selected_tab,
            }
            .render_ref(area, buf);
        }
    }
}
