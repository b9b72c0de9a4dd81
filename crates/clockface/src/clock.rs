use crate::animator::{AngleAnimator, Easing};
use crate::controller::DragController;
use crate::dial::{Dial, DialSpec};
use crate::face::{ClockFace, Insets};
use crate::geometry::Point;
use crate::layout::{self, FaceParams, Numeral, TextAnchor, TextMetrics, TextRole, Tick};
use std::time::Duration;

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub face: ClockFace,
    pub ticks: Vec<Tick>,
    pub numerals: Vec<Numeral>,
    pub center_label: Option<TextAnchor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerOutcome {
    pub target: Option<usize>,
    pub animation_started: bool,
}

/// The clock widget minus the drawing: layout on resize, nudges on pointer movement and
/// the snap animation on host frame ticks.
#[derive(Debug, Clone)]
pub struct RadialClock {
    params: FaceParams,
    layout: Layout,
    center_text: String,
    center_text_height: f64,
    dials: Vec<Dial>,
    controller: DragController,
    animator: AngleAnimator,
}

impl RadialClock {
    pub fn new(params: FaceParams, specs: &[DialSpec], duration: Duration, easing: Easing) -> Self {
        Self {
            params,
            layout: Layout::default(),
            center_text: String::new(),
            center_text_height: 0.0,
            dials: specs.iter().map(Dial::new).collect(),
            controller: DragController::new(),
            animator: AngleAnimator::new(params.tick_step(), duration, easing),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn dials(&self) -> &[Dial] {
        &self.dials
    }

    /// Current dial positions, in dial order.
    pub fn dial_positions(&self) -> Vec<Point> {
        self.dials.iter().map(Dial::position).collect()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Recomputes the whole layout for a new widget size. Dial angles are kept.
    pub fn on_resize(
        &mut self,
        width: f64,
        height: f64,
        insets: Insets,
        metrics: &dyn TextMetrics,
    ) -> &Layout {
        let face = ClockFace::fit(width, height, insets);
        let layout::FaceLayout { ticks, numerals } =
            layout::layout(face.center, face.foreground_radius(), &self.params, metrics);

        for dial in &mut self.dials {
            let label_height = metrics.text_height(TextRole::ControlLabel, &dial.label().text);
            dial.place(
                face.center,
                face.control_radius(),
                face.control_diameter(),
                label_height,
            );
        }

        self.center_text_height = metrics.text_height(TextRole::CenterLabel, &self.center_text);
        self.layout = Layout {
            face,
            ticks,
            numerals,
            center_label: None,
        };
        self.refresh_center_label();

        log::debug!(
            "resized to {width}x{height}: background {}, foreground radius {}, {} ticks",
            face.background_diameter,
            face.foreground_radius(),
            self.layout.ticks.len()
        );
        &self.layout
    }

    /// Replaces the center text. The anchor keeps the text height measured at the last
    /// resize, the same way it is only measured when the size changes.
    pub fn set_center_text(&mut self, text: impl Into<String>) {
        self.center_text = text.into();
        self.refresh_center_label();
    }

    fn refresh_center_label(&mut self) {
        self.layout.center_label = (!self.center_text.is_empty()).then(|| TextAnchor {
            text: self.center_text.clone(),
            anchor: self
                .layout
                .face
                .center
                .offset(0.0, self.center_text_height / 2.0),
        });
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        self.controller.on_pointer_down(point, &self.dials);
    }

    pub fn on_pointer_up(&mut self, point: Point) {
        self.controller.on_pointer_up(point);
    }

    pub fn on_pointer_move(&mut self, point: Point) -> PointerOutcome {
        match self.controller.on_pointer_move(point, &self.dials) {
            Some(index) => PointerOutcome {
                target: Some(index),
                animation_started: self.animator.start(index),
            },
            None => PointerOutcome::default(),
        }
    }

    /// Advances a running animation. Returns whether the dial moved and a redraw is due.
    pub fn on_animation_tick(&mut self, fraction: f64) -> bool {
        let Some(step) = self.animator.on_tick(fraction) else {
            return false;
        };
        let Some(dial) = self.dials.get_mut(step.dial) else {
            return false;
        };

        dial.rotate_by(step.value);
        log::trace!(
            "dial {} +{:.3} -> {:.3}{}",
            step.dial,
            step.value,
            dial.angle(),
            if step.finished { " (done)" } else { "" }
        );
        true
    }

    pub fn on_animation_elapsed(&mut self, elapsed: Duration) -> bool {
        let fraction = self.animator.progress(elapsed);
        self.on_animation_tick(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FixedTextHeight;

    fn clock(specs: &[DialSpec]) -> RadialClock {
        let mut clock = RadialClock::new(
            FaceParams::default(),
            specs,
            Duration::from_millis(10),
            Easing::Linear,
        );
        clock.on_resize(
            300.0,
            300.0,
            Insets::default(),
            &FixedTextHeight::uniform(10.0),
        );
        clock
    }

    #[test]
    fn test_end_to_end_layout() {
        let clock = clock(&[DialSpec::start()]);
        let layout = clock.layout();
        assert_eq!(layout.face.background_diameter, 300.0);
        assert_eq!(layout.face.foreground_radius(), 100.0);
        assert_eq!(layout.face.control_radius(), 125.0);
        assert_eq!(layout.ticks.len(), 12);
        assert_eq!(layout.numerals.len(), 12);

        let dial = &clock.dials()[0];
        assert!((dial.position().x - 150.0).abs() < 1e-9);
        assert!((dial.position().y - 25.0).abs() < 1e-9);
        assert_eq!(dial.diameter(), 50.0);
        assert_eq!(dial.radius(), 25.0);
        assert_eq!(clock.dial_positions(), vec![dial.position()]);
    }

    #[test]
    fn test_center_label() {
        let mut clock = clock(&[DialSpec::start()]);
        assert_eq!(clock.layout().center_label, None);
        clock.set_center_text("12:00");
        let label = clock.layout().center_label.clone().unwrap();
        assert_eq!(label.text, "12:00");
        assert_eq!(label.anchor, Point::new(150.0, 155.0));
    }

    #[test]
    fn test_nudge_and_animation() {
        let mut clock = clock(&[DialSpec::start()]);
        clock.on_pointer_down(Point::new(140.0, 25.0));

        let outcome = clock.on_pointer_move(Point::new(145.0, 25.0));
        assert_eq!(outcome.target, Some(0));
        assert!(outcome.animation_started);
        assert!(clock.is_animating());

        // a second nudge while running does not start another animation
        let outcome = clock.on_pointer_move(Point::new(150.0, 25.0));
        assert_eq!(outcome.target, Some(0));
        assert!(!outcome.animation_started);

        assert!(clock.on_animation_tick(0.5));
        assert_eq!(clock.dials()[0].angle(), 15.0);
        assert!(clock.on_animation_tick(1.0));
        // cumulative: 15 + 30
        assert_eq!(clock.dials()[0].angle(), 45.0);
        assert!(!clock.is_animating());
        assert!(!clock.on_animation_tick(1.0));

        let dial = &clock.dials()[0];
        assert_eq!(dial.label().anchor, dial.position().offset(0.0, 5.0));
    }

    #[test]
    fn test_backward_drag_does_nothing() {
        let mut clock = clock(&[DialSpec::start()]);
        clock.on_pointer_down(Point::new(155.0, 30.0));
        let outcome = clock.on_pointer_move(Point::new(150.0, 25.0));
        assert_eq!(outcome, PointerOutcome::default());
        assert!(!clock.is_animating());
    }

    #[test]
    fn test_pointer_off_dial() {
        let mut clock = clock(&[DialSpec::start()]);
        clock.on_pointer_down(Point::new(0.0, 0.0));
        let outcome = clock.on_pointer_move(Point::new(150.0, 150.0));
        assert_eq!(outcome.target, None);
        assert!(!outcome.animation_started);
    }

    #[test]
    fn test_angle_survives_resize() {
        let mut clock = clock(&[DialSpec::new("S", 90.0)]);
        clock.on_resize(
            600.0,
            600.0,
            Insets::default(),
            &FixedTextHeight::uniform(10.0),
        );
        let dial = &clock.dials()[0];
        assert_eq!(dial.angle(), 90.0);
        assert!((dial.position().x - 550.0).abs() < 1e-9);
        assert!((dial.position().y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_second_dial_is_targeted() {
        let mut clock = clock(&[DialSpec::start(), DialSpec::new("E", 180.0)]);
        clock.on_pointer_down(Point::new(150.0, 270.0));
        let outcome = clock.on_pointer_move(Point::new(150.0, 272.0));
        assert_eq!(outcome.target, Some(1));
        assert!(outcome.animation_started);
        assert!(clock.on_animation_elapsed(Duration::from_millis(10)));
        assert_eq!(clock.dials()[1].angle(), 210.0);
        assert_eq!(clock.dials()[0].angle(), 0.0);
    }

    #[test]
    fn test_drag_does_not_switch_dials() {
        let mut clock = clock(&[DialSpec::start(), DialSpec::new("E", 180.0)]);
        clock.on_pointer_down(Point::new(150.0, 25.0));
        let outcome = clock.on_pointer_move(Point::new(150.0, 275.0));
        assert_eq!(outcome, PointerOutcome::default());
        assert!(!clock.is_animating());
        assert_eq!(clock.dials()[1].angle(), 180.0);
    }

    #[test]
    fn test_static_face_without_dials() {
        let mut clock = clock(&[]);
        assert!(clock.dials().is_empty());
        let outcome = clock.on_pointer_move(Point::new(150.0, 25.0));
        assert_eq!(outcome, PointerOutcome::default());
        assert!(!clock.on_animation_tick(1.0));
    }
}
