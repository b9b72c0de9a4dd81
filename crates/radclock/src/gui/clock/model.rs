use super::view::CairoTextMetrics;
use crate::config::{Config, TextConfig};
use crate::gui::theme::ThemeColors;
use clockface::{
    DialTime, FixedTextHeight, Insets, Point, PointerOutcome, RadialClock, TextMetrics, TextRole,
};
use std::time::Duration;

pub struct State {
    pub clock: RadialClock,
    pub colors: ThemeColors,
    pub text: TextConfig,
    pub insets: Insets,
    pub size: Option<(f64, f64)>,
}

impl State {
    pub fn new(config: &Config) -> Self {
        let mut state = Self {
            clock: RadialClock::new(
                config.face,
                &config.dial_specs(),
                config.animation.duration(),
                config.animation.easing,
            ),
            colors: ThemeColors::from_config(&config.colors, &config.dials),
            text: config.text.clone(),
            insets: config.insets,
            size: None,
        };
        state.sync_center_text();
        state
    }

    /// Swaps in a new configuration. Geometry is recomputed for the current size.
    pub fn reconfigure(&mut self, config: &Config) {
        let size = self.size;
        *self = Self::new(config);
        if let Some((width, height)) = size {
            self.resize(width, height);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = Some((width, height));
        match CairoTextMetrics::new(self.text.clone()) {
            Ok(metrics) => self.layout_with(width, height, &metrics),
            Err(e) => {
                log::error!("Text measurement unavailable, estimating from font size: {}", e);
                let estimate = FixedTextHeight {
                    numeral: self.text.size_for(TextRole::Numeral),
                    center_label: self.text.size_for(TextRole::CenterLabel),
                    control_label: self.text.size_for(TextRole::ControlLabel),
                };
                self.layout_with(width, height, &estimate);
            }
        }
    }

    fn layout_with(&mut self, width: f64, height: f64, metrics: &dyn TextMetrics) {
        self.clock.on_resize(width, height, self.insets, metrics);
    }

    pub fn pointer_down(&mut self, point: Point) {
        self.clock.on_pointer_down(point);
    }

    pub fn pointer_up(&mut self, point: Point) {
        self.clock.on_pointer_up(point);
    }

    pub fn pointer_move(&mut self, point: Point) -> PointerOutcome {
        self.clock.on_pointer_move(point)
    }

    /// Feeds host frame time into the running animation. Returns whether to redraw.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let moved = self.clock.on_animation_elapsed(elapsed);
        if moved {
            self.sync_center_text();
        }
        moved
    }

    pub fn is_animating(&self) -> bool {
        self.clock.is_animating()
    }

    /// The center shows the time the first dial points at.
    fn sync_center_text(&mut self) {
        let text = self
            .clock
            .dials()
            .first()
            .map(|dial| DialTime::from_degrees(dial.angle()).to_string())
            .unwrap_or_default();
        self.clock.set_center_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_text_follows_first_dial() {
        let mut state = State::new(&Config::default());
        state.layout_with(300.0, 300.0, &FixedTextHeight::uniform(10.0));
        assert_eq!(
            state.clock.layout().center_label.as_ref().map(|l| l.text.as_str()),
            Some("00:00")
        );

        state.pointer_down(Point::new(140.0, 25.0));
        assert!(state.pointer_move(Point::new(145.0, 25.0)).animation_started);
        assert!(state.tick(Duration::from_millis(10)));
        assert!(!state.is_animating());

        // one full accelerate/decelerate step adds a whole tick: 30 degrees, one hour
        assert_eq!(
            state.clock.layout().center_label.as_ref().map(|l| l.text.as_str()),
            Some("01:00")
        );
    }

    #[test]
    fn test_static_face_has_no_center_text() {
        let config = Config {
            dials: Vec::new(),
            ..Config::default()
        };
        let mut state = State::new(&config);
        state.layout_with(300.0, 300.0, &FixedTextHeight::uniform(10.0));
        assert_eq!(state.clock.layout().center_label, None);
        assert!(state.clock.dials().is_empty());
    }
}
