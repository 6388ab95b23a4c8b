use crossterm::event::{Event, KeyCode};
use log::LevelFilter;
use ratatui::{prelude::*, widgets::WidgetRef};
use tui_logger::{TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

use crate::viz::util::pressed_key;

use super::Component;

/// Captured `log` records, split by target
///
/// Records are shown from `Debug` up. Pressing `v` drops the threshold to `Trace` so
/// per-step environment records become visible, pressing it again restores `Debug`.
pub struct Logs {
    state: TuiWidgetState,
    level: LevelFilter,
}

impl Logs {
    pub fn new() -> Self {
        Self::with_level(LevelFilter::Debug)
    }

    fn with_level(level: LevelFilter) -> Self {
        Self {
            state: TuiWidgetState::new().set_default_display_level(level),
            level,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    fn toggle_verbose(&mut self) {
        let level = match self.level {
            LevelFilter::Trace => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        *self = Self::with_level(level);
    }
}

/// Map a key to the navigation event understood by the logger widget
fn widget_event(key: KeyCode) -> Option<TuiWidgetEvent> {
    let event = match key {
        KeyCode::Char(' ') => TuiWidgetEvent::SpaceKey,
        KeyCode::Esc => TuiWidgetEvent::EscapeKey,
        KeyCode::PageUp => TuiWidgetEvent::PrevPageKey,
        KeyCode::PageDown => TuiWidgetEvent::NextPageKey,
        KeyCode::Up => TuiWidgetEvent::UpKey,
        KeyCode::Down => TuiWidgetEvent::DownKey,
        KeyCode::Left => TuiWidgetEvent::LeftKey,
        KeyCode::Right => TuiWidgetEvent::RightKey,
        KeyCode::Char('+') | KeyCode::Char('=') => TuiWidgetEvent::PlusKey,
        KeyCode::Char('-') => TuiWidgetEvent::MinusKey,
        KeyCode::Char('s') => TuiWidgetEvent::HideKey,
        KeyCode::Char('f') => TuiWidgetEvent::FocusKey,
        _ => return None,
    };
    Some(event)
}

impl WidgetRef for Logs {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let title = format!("Environment log  [{}, v to toggle]", self.level);
        TuiLoggerSmartWidget::default()
            .title_log(title.as_str())
            .title_target("Targets")
            .style(Style::default().white())
            .style_error(Style::default().light_red())
            .style_warn(Style::default().light_yellow())
            .style_info(Style::default().cyan())
            .style_debug(Style::default().dark_gray())
            .style_trace(Style::default().gray())
            .output_separator(' ')
            .state(&self.state)
            .render(area, buf);
    }
}

impl Component for Logs {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match pressed_key(event) {
            Some(KeyCode::Char('v')) => self.toggle_verbose(),
            Some(key) => match widget_event(key) {
                Some(widget_event) => self.state.transition(widget_event),
                None => return false,
            },
            None => return false,
        }
        true
    }
}
