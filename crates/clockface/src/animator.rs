//! One-tick "snap" animation of a dial.
//!
//! The host owns the clock: it calls [`AngleAnimator::on_tick`] with the elapsed fraction
//! of the animation on every frame, and redraws after applying the returned step.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(10);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Maps a time fraction in [0, 1] to a value fraction. Both curves are monotonic and
    /// hit 0 and 1 at the ends.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum AnimatorState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    pub dial: usize,
    /// Animated value at this tick, between 0 and the increment. It is added to the dial
    /// angle as is, so the total rotation of a run is the sum of all tick values.
    pub value: f64,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct AngleAnimator {
    increment: f64,
    duration: Duration,
    easing: Easing,
    state: AnimatorState,
    target: Option<usize>,
}

impl AngleAnimator {
    pub fn new(increment: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            increment,
            duration,
            easing,
            state: AnimatorState::Idle,
            target: None,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Starts animating `dial`. A running animation is never restarted or retargeted; in
    /// that case this returns `false`.
    pub fn start(&mut self, dial: usize) -> bool {
        if self.is_running() {
            log::trace!("animator busy with dial {:?}, ignoring start", self.target);
            return false;
        }
        self.state = AnimatorState::Running;
        self.target = Some(dial);
        log::debug!("animating dial {dial} by {} degrees", self.increment);
        true
    }

    /// Fraction of the run covered after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn on_tick(&mut self, fraction: f64) -> Option<AnimationStep> {
        let dial = self.target.filter(|_| self.is_running())?;
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let finished = fraction >= 1.0;
        if finished {
            self.state = AnimatorState::Idle;
            self.target = None;
        }

        Some(AnimationStep {
            dial,
            value: self.increment * self.easing.apply(fraction),
            finished,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> AngleAnimator {
        AngleAnimator::new(30.0, DEFAULT_DURATION, Easing::Linear)
    }

    #[test]
    fn test_start_is_ignored_while_running() {
        let mut animator = linear();
        assert_eq!(animator.state(), AnimatorState::Idle);
        assert!(animator.start(0));
        assert!(!animator.start(1));
        assert_eq!(animator.target(), Some(0));
    }

    #[test]
    fn test_run_to_completion() {
        let mut animator = linear();
        assert!(animator.start(2));

        let first = animator.on_tick(0.5).unwrap();
        assert_eq!(first.dial, 2);
        assert_eq!(first.value, 15.0);
        assert!(!first.finished);
        assert!(animator.is_running());

        let last = animator.on_tick(1.0).unwrap();
        assert_eq!(last.value, 30.0);
        assert!(last.finished);
        assert_eq!(animator.state(), AnimatorState::Idle);
        assert_eq!(animator.target(), None);

        assert!(animator.on_tick(1.0).is_none());
        assert!(animator.start(0));
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut animator = linear();
        assert!(animator.on_tick(0.3).is_none());
    }

    #[test]
    fn test_fraction_is_clamped() {
        let mut animator = linear();
        animator.start(0);
        assert_eq!(animator.on_tick(-1.0).unwrap().value, 0.0);
        let step = animator.on_tick(3.0).unwrap();
        assert_eq!(step.value, 30.0);
        assert!(step.finished);
    }

    #[test]
    fn test_values_increase_monotonically() {
        for easing in [Easing::Linear, Easing::AccelerateDecelerate] {
            let samples: Vec<f64> = (0..=20).map(|i| easing.apply(i as f64 / 20.0)).collect();
            assert!(samples.windows(2).all(|w| w[0] <= w[1]), "{easing}");
            assert!(samples[0].abs() < 1e-12);
            assert!((samples[20] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_progress() {
        let animator = AngleAnimator::new(30.0, Duration::from_millis(100), Easing::Linear);
        assert_eq!(animator.progress(Duration::ZERO), 0.0);
        assert_eq!(animator.progress(Duration::from_millis(50)), 0.5);
        assert_eq!(animator.progress(Duration::from_secs(1)), 1.0);

        let instant = AngleAnimator::new(30.0, Duration::ZERO, Easing::Linear);
        assert_eq!(instant.progress(Duration::ZERO), 1.0);
    }

    #[test]
    fn test_easing_from_str() {
        assert_eq!("linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!(
            "accelerate_decelerate".parse::<Easing>().unwrap(),
            Easing::AccelerateDecelerate
        );
        assert_eq!(Easing::default(), Easing::AccelerateDecelerate);
    }
}
