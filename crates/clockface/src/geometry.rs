#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Delta from `previous` to `self`.
    pub fn delta_from(self, previous: Point) -> (f64, f64) {
        (self.x - previous.x, self.y - previous.y)
    }
}

/// Point on a circle around `center`. Zero degrees points straight up and angles grow
/// clockwise, so y is subtracted (screen coordinates grow downward).
pub fn polar(center: Point, radius: f64, degrees: f64) -> Point {
    let theta = degrees.to_radians();
    Point::new(
        center.x + radius * theta.sin(),
        center.y - radius * theta.cos(),
    )
}

/// Axis-aligned box. `contains` is half-open: the left and top edges are inside, the right
/// and bottom edges are not.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn square(center: Point, side: f64) -> Self {
        let half = side / 2.0;
        let (left, top) = (center.x - half, center.y - half);
        Self {
            left,
            top,
            right: left + side,
            bottom: top + side,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.left
            && point.x < self.right
            && point.y >= self.top
            && point.y < self.bottom
    }
}
