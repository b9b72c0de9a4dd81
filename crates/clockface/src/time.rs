use std::fmt;

const DEGREES_PER_HOUR: f64 = 30.0;
const MINUTES_PER_FACE: u32 = 12 * 60;

/// A time of day read off a twelve hour face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DialTime {
    pub hours: u32,
    pub minutes: u32,
}

impl DialTime {
    /// Thirty degrees per hour, half a degree per minute. Angles wrap, so 370 degrees reads
    /// the same as 10.
    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self::default();
        }
        let minutes = (degrees.rem_euclid(360.0) * 60.0 / DEGREES_PER_HOUR).round() as u32
            % MINUTES_PER_FACE;
        Self {
            hours: minutes / 60,
            minutes: minutes % 60,
        }
    }

    pub fn to_degrees(self) -> f64 {
        (self.hours % 12) as f64 * DEGREES_PER_HOUR + self.minutes as f64 / 2.0
    }
}

impl fmt::Display for DialTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}
