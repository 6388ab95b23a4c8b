use log::debug;
use strum::{Display, EnumIter, EnumString, VariantArray};

use crate::{
    geom::{Position, Rect},
    seeding::RandomSource,
};

use super::ObjectTransition;

pub const SCREEN_WIDTH: usize = 800;
pub const SCREEN_HEIGHT: usize = 400;
/// Side of the object square, in pixels
pub const OBJECT_SIZE: f64 = 40.0;

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const RED: Rgb = [255, 0, 0];
pub const GREEN: Rgb = [0, 255, 0];
pub const BLACK: Rgb = [0, 0, 0];

#[derive(Display, EnumString, EnumIter, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum RenderMode {
    /// Hand the scene to an external viewer
    Human,
    /// Rasterize the scene into an RGB frame
    RgbArray,
}

/// Static description of how the environment can be rendered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metadata {
    pub render_modes: &'static [RenderMode],
    pub frames_per_second: u32,
}

/// Screen-space geometry of the environment, in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    /// Pixels per world unit
    pub scale: f64,
    pub region: Rect,
    pub goal: Rect,
    pub obstacles: Vec<Rect>,
    /// The object square centered on the scaled position
    pub object: Rect,
    /// The object position in world units
    pub position: Position,
}

impl Scene {
    /// Rasterize into a row-major frame of `width * height` pixels with row 0 at the top
    ///
    /// Paint order is background, goal, obstacles, object.
    pub fn to_rgb_array(&self) -> Vec<Rgb> {
        let mut frame = vec![WHITE; self.width * self.height];
        let layers = std::iter::once((&self.goal, GREEN))
            .chain(self.obstacles.iter().map(|o| (o, BLACK)))
            .chain(std::iter::once((&self.object, RED)));
        for (rect, color) in layers {
            self.fill(&mut frame, rect, color);
        }
        frame
    }

    fn fill(&self, frame: &mut [Rgb], rect: &Rect, color: Rgb) {
        let origin_x = self.region.xmin;
        let origin_y = self.region.ymin;
        let cols = pixel_span(rect.xmin - origin_x, rect.xmax - origin_x, self.width);
        let rows = pixel_span(rect.ymin - origin_y, rect.ymax - origin_y, self.height);
        for y in rows {
            let row = self.height - 1 - y;
            for x in cols.clone() {
                frame[row * self.width + x] = color;
            }
        }
    }
}

/// Pixel indices covered by `[lo, hi)` after clipping to `[0, len)`
fn pixel_span(lo: f64, hi: f64, len: usize) -> std::ops::Range<usize> {
    let clip = |v: f64| v.floor().max(0.0).min(len as f64) as usize;
    let (start, end) = (clip(lo), clip(hi.ceil()));
    start..end.max(start)
}

impl<R: RandomSource> ObjectTransition<R> {
    pub fn metadata() -> Metadata {
        Metadata {
            render_modes: RenderMode::VARIANTS,
            frames_per_second: 30,
        }
    }

    /// Build the screen-space scene for the current state
    pub fn scene(&self) -> Scene {
        let region = self.region();
        let world_width = region.width();
        let scale = if world_width > 0.0 {
            SCREEN_WIDTH as f64 / world_width
        } else {
            1.0
        };
        let position = self.position();
        let center = Position::new(position.x * scale, position.y * scale);

        Scene {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            scale,
            region: region.scaled(scale),
            goal: self.goal().scaled(scale),
            obstacles: self.obstacles().iter().map(|o| o.scaled(scale)).collect(),
            object: Rect::centered(center, OBJECT_SIZE, OBJECT_SIZE),
            position,
        }
    }

    /// Render the current state
    ///
    /// **Returns** the scene, plus the rasterized frame when `mode` is [`RenderMode::RgbArray`]
    pub fn render(&self, mode: RenderMode) -> (Scene, Option<Vec<Rgb>>) {
        let scene = self.scene();
        debug!("render {mode}: object at {}", scene.position);
        let frame = match mode {
            RenderMode::Human => None,
            RenderMode::RgbArray => Some(scene.to_rgb_array()),
        };
        (scene, frame)
    }
}
