use crate::geometry::{Bounds, Point, polar};
use crate::layout::TextAnchor;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter};

/// Assigning an angle at or past this value resets the dial to zero.
pub const ANGLE_RESET_THRESHOLD: f64 = 720.0;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct DialLabel(String);

impl DialLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    /// Q4 catches everything the first three do not, negative angles and angles past a full
    /// turn included.
    pub fn of(degrees: f64) -> Self {
        if (0.0..90.0).contains(&degrees) {
            Self::Q1
        } else if (90.0..180.0).contains(&degrees) {
            Self::Q2
        } else if (180.0..270.0).contains(&degrees) {
            Self::Q3
        } else {
            Self::Q4
        }
    }
}

/// Host supplied description of a dial at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialSpec {
    pub label: DialLabel,
    #[serde(default)]
    pub angle: f64,
}

impl DialSpec {
    pub fn new(label: impl Into<String>, angle: f64) -> Self {
        Self {
            label: DialLabel::new(label),
            angle,
        }
    }

    pub fn start() -> Self {
        Self::new("S", 0.0)
    }
}

/// Text drawn on top of a dial. The anchor follows the dial and sits half the text height
/// below its position.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlLabel {
    pub text: DialLabel,
    pub anchor: Point,
    pub text_height: f64,
}

impl ControlLabel {
    fn new(text: DialLabel) -> Self {
        Self {
            text,
            anchor: Point::default(),
            text_height: 0.0,
        }
    }

    fn follow(&mut self, position: Point) {
        self.anchor = position.offset(0.0, self.text_height / 2.0);
    }

    pub fn as_text_anchor(&self) -> TextAnchor {
        TextAnchor {
            text: self.text.to_string(),
            anchor: self.anchor,
        }
    }
}

/// A draggable marker on the control track. Position and label anchor are cached and
/// recomputed on every angle change.
#[derive(Debug, Clone, PartialEq)]
pub struct Dial {
    angle: f64,
    diameter: f64,
    center: Point,
    control_radius: f64,
    position: Point,
    label: ControlLabel,
}

impl Dial {
    pub fn new(spec: &DialSpec) -> Self {
        let mut dial = Self {
            angle: 0.0,
            diameter: 0.0,
            center: Point::default(),
            control_radius: 0.0,
            position: Point::default(),
            label: ControlLabel::new(spec.label.clone()),
        };
        dial.set_angle(spec.angle);
        dial
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Stores `degrees` as given, except that anything at or past two full turns resets
    /// to zero. Values between one and two turns are kept unnormalized.
    pub fn set_angle(&mut self, degrees: f64) {
        self.angle = if degrees >= ANGLE_RESET_THRESHOLD {
            0.0
        } else {
            degrees
        };
        self.reposition();
    }

    pub fn rotate_by(&mut self, degrees: f64) {
        self.set_angle(self.angle + degrees);
    }

    /// Moves the dial onto a new control track, e.g. after the widget was resized. The
    /// angle is kept.
    pub fn place(&mut self, center: Point, control_radius: f64, diameter: f64, label_height: f64) {
        self.center = center;
        self.control_radius = control_radius;
        self.diameter = diameter;
        self.label.text_height = label_height;
        self.reposition();
    }

    fn reposition(&mut self) {
        self.position = polar(self.center, self.control_radius, self.angle);
        self.label.follow(self.position);
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn label(&self) -> &ControlLabel {
        &self.label
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.position, self.diameter)
    }

    /// Square hit box of side `diameter` around the dial, not the drawn circle.
    pub fn contains_point(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::of(self.angle)
    }
}
