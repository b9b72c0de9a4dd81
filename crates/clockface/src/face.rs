use crate::geometry::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    pub fn uniform(padding: f64) -> Self {
        Self {
            left: padding,
            top: padding,
            right: padding,
            bottom: padding,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// The two concentric discs of the clock, sized to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClockFace {
    pub center: Point,
    pub background_diameter: f64,
    pub foreground_diameter: f64,
}

impl ClockFace {
    /// Fits the face into a widget of `width` x `height`. The background fills the smaller
    /// side of the area left after insets, the foreground covers two thirds of it. The center
    /// is the middle of the whole widget, insets included.
    pub fn fit(width: f64, height: f64, insets: Insets) -> Self {
        let draw_width = width - insets.horizontal();
        let draw_height = height - insets.vertical();
        let background_diameter = draw_width.min(draw_height).max(0.0);

        Self {
            center: Point::new(width / 2.0, height / 2.0),
            background_diameter,
            foreground_diameter: background_diameter / 3.0 * 2.0,
        }
    }

    pub fn background_radius(&self) -> f64 {
        self.background_diameter / 2.0
    }

    pub fn foreground_radius(&self) -> f64 {
        self.foreground_diameter / 2.0
    }

    /// Radius of the invisible track the dials run on, halfway across the ring between the
    /// two discs.
    pub fn control_radius(&self) -> f64 {
        let (bg, fg) = (self.background_radius(), self.foreground_radius());
        fg + (bg - fg) / 2.0
    }

    /// A dial fills the ring between foreground and background.
    pub fn control_diameter(&self) -> f64 {
        self.background_radius() - self.foreground_radius()
    }
}
