use std::fmt;

/// Location of the object in the 2-D world
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [f64; 2] {
    fn from(pos: Position) -> Self {
        pos.to_array()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// An axis-aligned rectangle `[xmin, xmax, ymin, ymax]`
///
/// Boundaries are inclusive: a point lying exactly on an edge is inside.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Rect {
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// A rectangle is well formed when neither axis is inverted (degenerate lines and points are allowed)
    pub fn is_well_formed(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }

    pub fn is_finite(&self) -> bool {
        [self.xmin, self.xmax, self.ymin, self.ymax]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Inclusive containment test
    pub fn contains(&self, pos: &Position) -> bool {
        pos.x >= self.xmin && pos.x <= self.xmax && pos.y >= self.ymin && pos.y <= self.ymax
    }

    /// Clamp each component of `pos` into the rectangle
    ///
    /// A NaN component is sent to the lower bound of its axis.
    pub fn clamp(&self, pos: Position) -> Position {
        let mut out = pos;
        if out.x.is_nan() || out.x < self.xmin {
            out.x = self.xmin;
        }
        if out.x > self.xmax {
            out.x = self.xmax;
        }
        if out.y.is_nan() || out.y < self.ymin {
            out.y = self.ymin;
        }
        if out.y > self.ymax {
            out.y = self.ymax;
        }
        out
    }

    /// Multiply every edge by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.xmin * factor,
            self.xmax * factor,
            self.ymin * factor,
            self.ymax * factor,
        )
    }

    /// A `width` by `height` rectangle centered on `center`
    pub fn centered(center: Position, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.x + width / 2.0,
            center.y - height / 2.0,
            center.y + height / 2.0,
        )
    }
}

impl From<[f64; 4]> for Rect {
    fn from([xmin, xmax, ymin, ymax]: [f64; 4]) -> Self {
        Self::new(xmin, xmax, ymin, ymax)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}
