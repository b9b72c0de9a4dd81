//! Tick and numeral placement for the clock face.
//!
//! Everything here is a pure function of its inputs: the same center, radius, parameters
//! and text metrics always produce the same layout.

use crate::geometry::{Point, polar};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};
use thiserror::Error;

pub const DEFAULT_TICK_COUNT: usize = 12;
pub const DEFAULT_TICK_LENGTH: f64 = 20.0;
pub const DEFAULT_TICK_PADDING: f64 = 10.0;
/// Extra gap between the inner end of the ticks and the numeral ring.
pub const NUMERAL_MARGIN: f64 = 20.0;
const SECTOR_DEGREES: f64 = 30.0;
const ANGLE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceParams {
    pub tick_count: usize,
    pub tick_length: f64,
    pub tick_padding: f64,
}

impl Default for FaceParams {
    fn default() -> Self {
        Self {
            tick_count: DEFAULT_TICK_COUNT,
            tick_length: DEFAULT_TICK_LENGTH,
            tick_padding: DEFAULT_TICK_PADDING,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("tick count must be at least 1")]
    NoTicks,
    #[error("{name} must be a finite, non-negative length (got {value})")]
    InvalidLength { name: &'static str, value: f64 },
}

impl FaceParams {
    /// Degrees between two neighbouring ticks.
    pub fn tick_step(&self) -> f64 {
        360.0 / self.tick_count as f64
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.tick_count == 0 {
            return Err(ParamsError::NoTicks);
        }
        for (name, value) in [
            ("tick_length", self.tick_length),
            ("tick_padding", self.tick_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::InvalidLength { name, value });
            }
        }
        Ok(())
    }

    pub fn tick_radius(&self, foreground_radius: f64) -> f64 {
        foreground_radius - self.tick_padding
    }

    /// Numerals sit inside the ticks, clear of both paddings and tick lengths.
    pub fn numeral_radius(&self, foreground_radius: f64) -> f64 {
        foreground_radius - (self.tick_padding * 2.0 + self.tick_length * 2.0) - NUMERAL_MARGIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum TextRole {
    Numeral,
    CenterLabel,
    ControlLabel,
}

/// Rendered text measurements, supplied by whoever draws the text.
pub trait TextMetrics {
    /// Height of the bounding box of `text` when drawn in the style of `role`.
    fn text_height(&self, role: TextRole, text: &str) -> f64;
}

/// Constant text heights, for headless layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedTextHeight {
    pub numeral: f64,
    pub center_label: f64,
    pub control_label: f64,
}

impl FixedTextHeight {
    pub fn uniform(height: f64) -> Self {
        Self {
            numeral: height,
            center_label: height,
            control_label: height,
        }
    }
}

impl TextMetrics for FixedTextHeight {
    fn text_height(&self, role: TextRole, _text: &str) -> f64 {
        match role {
            TextRole::Numeral => self.numeral,
            TextRole::CenterLabel => self.center_label,
            TextRole::ControlLabel => self.control_label,
        }
    }
}

/// Which way a tick's segment runs from its anchor on the tick ring. The pattern points
/// inward around the dial: twelve o'clock runs down, three o'clock runs left and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum TickDirection {
    Down,
    DownLeft,
    LeftDown,
    Left,
    LeftUp,
    UpLeft,
    Up,
    UpRight,
    RightUp,
    Right,
    RightDown,
    DownRight,
}

impl TickDirection {
    /// Table entry for the tick at `index` of `count`. On a twelve tick face this is
    /// simply the index; other counts use the 30 degree sector nearest the tick's angle.
    pub fn for_tick(index: usize, count: usize) -> Self {
        let degrees = index as f64 * (360.0 / count as f64);
        let sector = (degrees / SECTOR_DEGREES).round() as usize;
        Self::iter().nth(sector % 12).unwrap_or(Self::Down)
    }

    /// End point offset for a tick of `length`. Diagonals have a half-length minor leg.
    pub fn offset(self, length: f64) -> (f64, f64) {
        let half = length / 2.0;
        match self {
            Self::Down => (0.0, length),
            Self::DownLeft => (-half, length),
            Self::LeftDown => (-length, half),
            Self::Left => (-length, 0.0),
            Self::LeftUp => (-length, -half),
            Self::UpLeft => (-half, -length),
            Self::Up => (0.0, -length),
            Self::UpRight => (half, -length),
            Self::RightUp => (length, -half),
            Self::Right => (length, 0.0),
            Self::RightDown => (length, half),
            Self::DownRight => (half, length),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub index: usize,
    pub degrees: f64,
    pub direction: TickDirection,
    pub start: Point,
    pub end: Point,
}

/// Downward correction applied to a numeral anchor. Text is anchored on its baseline, so
/// numerals on the lower half of the face are pushed down to sit visually centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum BaselineShift {
    None,
    Half,
    Full,
}

impl BaselineShift {
    /// Horizontal extremes get half a text height, the lower half a full one. The order of
    /// the checks matters: 90 and 270 must not fall into the lower half range.
    pub fn for_angle(degrees: f64) -> Self {
        if (degrees - 90.0).abs() < ANGLE_EPSILON || (degrees - 270.0).abs() < ANGLE_EPSILON {
            Self::Half
        } else if degrees > 90.0 && degrees < 270.0 {
            Self::Full
        } else {
            Self::None
        }
    }

    pub fn amount(self, text_height: f64) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Half => text_height / 2.0,
            Self::Full => text_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Numeral {
    pub index: usize,
    pub text: String,
    pub degrees: f64,
    pub shift: BaselineShift,
    pub anchor: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextAnchor {
    pub text: String,
    pub anchor: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceLayout {
    pub ticks: Vec<Tick>,
    pub numerals: Vec<Numeral>,
}

pub fn layout(
    center: Point,
    foreground_radius: f64,
    params: &FaceParams,
    metrics: &dyn TextMetrics,
) -> FaceLayout {
    if params.tick_count == 0 {
        return FaceLayout::default();
    }

    FaceLayout {
        ticks: ticks(center, params.tick_radius(foreground_radius), params),
        numerals: numerals(
            center,
            params.numeral_radius(foreground_radius),
            params,
            metrics,
        ),
    }
}

fn ticks(center: Point, radius: f64, params: &FaceParams) -> Vec<Tick> {
    if radius.is_nan() || radius <= 0.0 {
        return Vec::new();
    }
    let step = params.tick_step();

    (0..params.tick_count)
        .map(|index| {
            let degrees = index as f64 * step;
            let direction = TickDirection::for_tick(index, params.tick_count);
            let start = polar(center, radius, degrees);
            let (dx, dy) = direction.offset(params.tick_length);
            Tick {
                index,
                degrees,
                direction,
                start,
                end: start.offset(dx, dy),
            }
        })
        .collect()
}

fn numerals(
    center: Point,
    radius: f64,
    params: &FaceParams,
    metrics: &dyn TextMetrics,
) -> Vec<Numeral> {
    if radius.is_nan() || radius <= 0.0 {
        return Vec::new();
    }
    let step = params.tick_step();

    (1..=params.tick_count)
        .map(|index| {
            let degrees = index as f64 * step;
            let text = index.to_string();
            let shift = BaselineShift::for_angle(degrees);
            let height = metrics.text_height(TextRole::Numeral, &text);
            let anchor = polar(center, radius, degrees).offset(0.0, shift.amount(height));
            Numeral {
                index,
                text,
                degrees,
                shift,
                anchor,
            }
        })
        .collect()
}

/// Anchor for text drawn at the middle of the face, lowered by half its height.
pub fn center_label(center: Point, text: &str, metrics: &dyn TextMetrics) -> TextAnchor {
    let height = metrics.text_height(TextRole::CenterLabel, text);
    TextAnchor {
        text: text.to_string(),
        anchor: center.offset(0.0, height / 2.0),
    }
}
