use std::collections::VecDeque;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    prelude::*,
    widgets::{
        canvas::{Canvas, Points, Rectangle},
        *,
    },
};

use crate::{geom, gym::Scene, viz::util::pressed_key};

use super::Component;

const TRAIL_LEN: usize = 256;

/// Canvas drawing of the latest scene with a short trail of past object positions
pub struct World {
    scene: Option<Scene>,
    trail: VecDeque<(f64, f64)>,
    show_trail: bool,
}

impl World {
    pub fn new() -> Self {
        Self {
            scene: None,
            trail: VecDeque::with_capacity(TRAIL_LEN),
            show_trail: true,
        }
    }

    pub fn update(&mut self, scene: Scene) {
        let geom::Position { x, y } = scene.position;
        if self.trail.len() == TRAIL_LEN {
            self.trail.pop_front();
        }
        self.trail.push_back((x * scene.scale, y * scene.scale));
        self.scene = Some(scene);
    }

    /// Forget the trail, typically at an episode boundary
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

fn rectangle(rect: &geom::Rect, color: Color) -> Rectangle {
    Rectangle {
        x: rect.xmin,
        y: rect.ymin,
        width: rect.width(),
        height: rect.height(),
        color,
    }
}

impl WidgetRef for World {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_type(BorderType::Rounded);

        let Some(scene) = &self.scene else {
            Paragraph::new("Waiting for the first frame...")
                .block(block.title("World"))
                .render(area, buf);
            return;
        };

        Canvas::default()
            .block(block.title(format!("World  object at {}", scene.position)))
            .marker(Marker::Braille)
            .x_bounds([scene.region.xmin, scene.region.xmax])
            .y_bounds([scene.region.ymin, scene.region.ymax])
            .paint(|ctx| {
                ctx.draw(&rectangle(&scene.region, Color::DarkGray));
                ctx.draw(&rectangle(&scene.goal, Color::Green));
                for obstacle in &scene.obstacles {
                    ctx.draw(&rectangle(obstacle, Color::White));
                }
                ctx.layer();
                if self.show_trail {
                    let (older, newer) = self.trail.as_slices();
                    for coords in [older, newer] {
                        ctx.draw(&Points {
                            coords,
                            color: Color::Yellow,
                        });
                    }
                }
                ctx.draw(&rectangle(&scene.object, Color::Red));
            })
            .render(area, buf);
    }
}

impl Component for World {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match pressed_key(event) {
            Some(KeyCode::Char('t')) => self.show_trail = !self.show_trail,
            Some(KeyCode::Char('c')) => self.clear_trail(),
            _ => return false,
        }
        true
    }
}
