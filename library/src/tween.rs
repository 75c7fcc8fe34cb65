use serde::{Deserialize, Serialize};

use crate::game::repr::Vector3;
use crate::Id;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    Power1Out,
}

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0., 1.);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1. - (1. - t) * (1. - t),
        }
    }
}

/// Where the orbit-control target is pointed on every tick of a camera tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Aim {
    Body(Id),
    Point(Vector3),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenStep {
    pub value: Vector3,
    pub finished: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub(crate) from: Vector3,
    pub(crate) to: Vector3,
    pub(crate) duration: f64,
    pub(crate) elapsed: f64,
    pub(crate) easing: Easing,
    pub(crate) aim: Aim,
}

impl Tween {
    pub fn new(from: Vector3, to: Vector3, duration: f64, easing: Easing, aim: Aim) -> Tween {
        Tween {
            from,
            to,
            duration,
            elapsed: 0.,
            easing,
            aim,
        }
    }

    pub fn tick(&mut self, delta: f64) -> TweenStep {
        self.elapsed += delta.max(0.);
        if self.is_finished() {
            return TweenStep {
                value: self.to,
                finished: true,
            };
        }
        let k = self.easing.apply(self.elapsed / self.duration);
        TweenStep {
            value: self.from + (self.to - self.from) * k,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn progress(&self) -> f64 {
        if self.duration <= 0. {
            return 1.;
        }
        (self.elapsed / self.duration).min(1.)
    }

    pub fn get_to(&self) -> Vector3 {
        self.to
    }
}

/// Single owner of one animated property.
///
/// Starting a tween supersedes whatever tween held the slot.
#[derive(Clone, Debug, Default)]
pub struct TweenSlot {
    current: Option<Tween>,
    generation: u64,
}

impl TweenSlot {
    pub fn start(&mut self, tween: Tween) -> u64 {
        self.generation += 1;
        self.current = Some(tween);
        self.generation
    }

    /// Advances the owning tween; the slot is released once it finishes.
    pub fn tick(&mut self, delta: f64) -> Option<(Aim, TweenStep)> {
        let tween = self.current.as_mut()?;
        let step = tween.tick(delta);
        let aim = tween.aim;
        if step.finished {
            self.current = None;
        }
        Some((aim, step))
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn borrow_current(&self) -> Option<&Tween> {
        self.current.as_ref()
    }
}
