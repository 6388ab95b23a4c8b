use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::viz::util::pressed_key;

use super::Component;

/// A scatter plot of one report metric against the episode index
struct Plot {
    title: &'static str,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    data: Vec<(f64, f64)>,
}

impl Plot {
    fn new(title: &'static str, episodes: u16) -> Self {
        Self {
            title,
            x_bounds: [0.0, episodes.into()],
            y_bounds: [f64::MAX, f64::MIN],
            data: Vec::new(),
        }
    }

    fn push(&mut self, point: (f64, f64)) {
        let (x, y) = point;
        self.x_bounds = [self.x_bounds[0].min(x), self.x_bounds[1].max(x)];
        self.y_bounds = [self.y_bounds[0].min(y), self.y_bounds[1].max(y)];
        self.data.push(point);
    }

    /// Y bounds padded so a constant series is still drawn
    fn y_view(&self) -> [f64; 2] {
        match self.y_bounds {
            [lo, hi] if lo > hi => [0.0, 1.0],
            [lo, hi] if lo == hi => [lo - 1.0, hi + 1.0],
            bounds => bounds,
        }
    }
}

fn labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    bounds.iter().map(|b| format!("{b:.2}").bold()).collect()
}

impl WidgetRef for Plot {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .cyan()
            .data(&self.data);

        let y_view = self.y_view();
        let x_axis = Axis::default()
            .title("Episode")
            .dark_gray()
            .labels(labels(self.x_bounds))
            .bounds(self.x_bounds);
        let y_axis = Axis::default()
            .title(self.title)
            .dark_gray()
            .labels(labels(y_view))
            .bounds(y_view);

        Chart::new(vec![dataset])
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Plots")
                    .padding(Padding::uniform(3)),
            )
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

/// One plot per report key, switched with the arrow keys
pub struct Plots {
    names: Vec<&'static str>,
    plots: Vec<Plot>,
    selected: usize,
}

impl Plots {
    pub fn new(names: Vec<&'static str>, episodes: u16) -> Self {
        let plots = names.iter().map(|n| Plot::new(*n, episodes)).collect();
        Self {
            names,
            plots,
            selected: 0,
        }
    }

    /// Record the report values of one episode, in key order
    pub fn update(&mut self, episode: u16, data: &[f64]) {
        for (plot, value) in self.plots.iter_mut().zip(data) {
            plot.push((episode.into(), *value));
        }
    }

    fn shift(&mut self, by: usize) {
        if !self.plots.is_empty() {
            self.selected = (self.selected + by) % self.plots.len();
        }
    }
}

impl WidgetRef for Plots {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if let Some(plot) = self.plots.get(self.selected) {
            plot.render_ref(area, buf);
        }

        Tabs::new(self.names.iter().copied())
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .highlight_style(Style::default().light_green())
            .select(self.selected)
            .render(area, buf);
    }
}

impl Component for Plots {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match pressed_key(event) {
            Some(KeyCode::Right) => self.shift(1),
            Some(KeyCode::Left) => self.shift(self.plots.len().saturating_sub(1)),
            _ => return false,
        }
        true
    }
}
