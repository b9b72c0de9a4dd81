use crate::dial::Dial;
use crate::geometry::Point;

/// Index of the first dial whose hit box contains `point`.
pub fn hit_test(point: Point, dials: &[Dial]) -> Option<usize> {
    dials.iter().position(|dial| dial.contains_point(point))
}

/// A drag nudges the dial forward when it moves right or down at all. Distance and the
/// exact direction are ignored; a move purely left and/or up does nothing.
pub fn is_nudge(dx: f64, dy: f64) -> bool {
    dx > 0.0 || dy > 0.0
}

/// Turns raw pointer positions into nudges. The previous position is updated on every
/// pointer event, whether or not it hit a dial.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    previous: Point,
    active: Option<usize>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> Point {
        self.previous
    }

    /// Dial the current interaction last targeted.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn on_pointer_down(&mut self, point: Point, dials: &[Dial]) {
        self.active = hit_test(point, dials);
        self.previous = point;
    }

    /// Returns the dial to nudge, if the pointer is on the active dial and moved right or
    /// down. The first dial hit during an interaction stays active until the pointer is
    /// released; other dials are ignored meanwhile.
    pub fn on_pointer_move(&mut self, point: Point, dials: &[Dial]) -> Option<usize> {
        let (dx, dy) = point.delta_from(self.previous);
        self.previous = point;

        let index = match self.active {
            Some(index) => index,
            None => {
                let hit = hit_test(point, dials)?;
                self.active = Some(hit);
                hit
            }
        };
        let on_active = dials.get(index).is_some_and(|dial| dial.contains_point(point));
        (on_active && is_nudge(dx, dy)).then_some(index)
    }

    pub fn on_pointer_up(&mut self, point: Point) {
        self.previous = point;
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dial::DialSpec;

    fn dials() -> Vec<Dial> {
        let center = Point::new(150.0, 150.0);
        [DialSpec::start(), DialSpec::new("E", 180.0)]
            .iter()
            .map(|spec| {
                let mut dial = Dial::new(spec);
                dial.place(center, 125.0, 50.0, 10.0);
                dial
            })
            .collect()
    }

    #[test]
    fn test_hit_test_picks_containing_dial() {
        let dials = dials();
        assert_eq!(hit_test(Point::new(150.0, 25.0), &dials), Some(0));
        assert_eq!(hit_test(Point::new(150.0, 275.0), &dials), Some(1));
        assert_eq!(hit_test(Point::new(150.0, 150.0), &dials), None);
        assert_eq!(hit_test(Point::new(150.0, 25.0), &[]), None);
    }

    #[test]
    fn test_nudge_rule() {
        assert!(is_nudge(5.0, 0.0));
        assert!(is_nudge(0.0, 5.0));
        assert!(is_nudge(-5.0, 1.0));
        assert!(!is_nudge(-5.0, -5.0));
        assert!(!is_nudge(0.0, 0.0));
    }

    #[test]
    fn test_move_right_on_dial_nudges() {
        let dials = dials();
        let mut controller = DragController::new();
        controller.on_pointer_down(Point::new(145.0, 25.0), &dials);
        assert_eq!(controller.active(), Some(0));
        assert_eq!(
            controller.on_pointer_move(Point::new(150.0, 25.0), &dials),
            Some(0)
        );
    }

    #[test]
    fn test_move_up_left_on_dial_does_not_nudge() {
        let dials = dials();
        let mut controller = DragController::new();
        controller.on_pointer_down(Point::new(155.0, 30.0), &dials);
        assert_eq!(controller.on_pointer_move(Point::new(150.0, 25.0), &dials), None);
        assert_eq!(controller.active(), Some(0));
    }

    #[test]
    fn test_drag_stays_on_first_dial() {
        let dials = dials();
        let mut controller = DragController::new();
        controller.on_pointer_down(Point::new(150.0, 25.0), &dials);
        assert_eq!(controller.active(), Some(0));

        // sliding onto the end dial neither nudges it nor switches the active dial
        assert_eq!(controller.on_pointer_move(Point::new(150.0, 275.0), &dials), None);
        assert_eq!(controller.active(), Some(0));
        assert_eq!(controller.on_pointer_move(Point::new(151.0, 276.0), &dials), None);

        // back on the start dial, moving right nudges it again
        controller.on_pointer_move(Point::new(140.0, 25.0), &dials);
        assert_eq!(
            controller.on_pointer_move(Point::new(145.0, 25.0), &dials),
            Some(0)
        );

        controller.on_pointer_up(Point::new(145.0, 25.0));
        controller.on_pointer_down(Point::new(150.0, 270.0), &dials);
        assert_eq!(
            controller.on_pointer_move(Point::new(150.0, 272.0), &dials),
            Some(1)
        );
    }

    #[test]
    fn test_drag_from_empty_space_picks_up_dial() {
        let dials = dials();
        let mut controller = DragController::new();
        controller.on_pointer_down(Point::new(140.0, 60.0), &dials);
        assert_eq!(controller.active(), None);
        assert_eq!(controller.on_pointer_move(Point::new(145.0, 25.0), &dials), Some(0));
        assert_eq!(controller.active(), Some(0));
        assert_eq!(controller.on_pointer_move(Point::new(150.0, 275.0), &dials), None);
    }

    #[test]
    fn test_move_off_dial_does_not_nudge_but_tracks_previous() {
        let dials = dials();
        let mut controller = DragController::new();
        controller.on_pointer_down(Point::new(10.0, 10.0), &dials);
        assert_eq!(controller.active(), None);
        assert_eq!(controller.on_pointer_move(Point::new(20.0, 20.0), &dials), None);
        assert_eq!(controller.previous(), Point::new(20.0, 20.0));

        controller.on_pointer_up(Point::new(21.0, 21.0));
        assert_eq!(controller.previous(), Point::new(21.0, 21.0));
        assert_eq!(controller.active(), None);
    }
}
