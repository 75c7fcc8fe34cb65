use std::f64::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::catalog;
use super::celestial_body::CelestialBody;
use super::repr::{orbital_position, Angle, Vector3};
use crate::config::AnimationConfig;
use crate::error::Error;
use crate::focus::ViewState;
use crate::{Id, Result};

/// Mutable animation state of one body, stored at the body's id.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyState {
    pub(crate) angle: Angle,
    pub(crate) spin: Angle,
    pub(crate) position: Vector3,
    pub(crate) is_sun: bool,
}

impl BodyState {
    pub fn get_angle(&self) -> Angle {
        self.angle
    }

    pub fn get_spin(&self) -> Angle {
        self.spin
    }

    pub fn get_position(&self) -> Vector3 {
        self.position
    }

    pub fn is_sun(&self) -> bool {
        self.is_sun
    }
}

pub struct SolarSystem {
    pub(crate) bodies: Vec<CelestialBody>,
    pub(crate) states: Vec<BodyState>,
    pub(crate) sun: Id,
}

impl SolarSystem {
    pub fn new(bodies: Vec<CelestialBody>, seed: u64) -> Result<SolarSystem> {
        catalog::validate(&bodies)?;
        let sun = bodies
            .iter()
            .position(|b| b.is_sun())
            .ok_or_else(|| Error::InvalidCatalog("no body at distance 0".to_string()))?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let states = bodies
            .iter()
            .map(|body| {
                let angle = body
                    .initial_angle
                    .unwrap_or_else(|| rng.gen_range(0f64..TAU));
                BodyState {
                    angle,
                    spin: 0.,
                    position: orbital_position(body.orbit_distance, angle),
                    is_sun: body.is_sun(),
                }
            })
            .collect();

        Ok(SolarSystem {
            bodies,
            states,
            sun,
        })
    }

    /// One frame of orbital motion and self rotation.
    pub fn advance(&mut self, view: &ViewState, animation: &AnimationConfig) {
        if !view.paused {
            for (body, state) in self.bodies.iter().zip(self.states.iter_mut()) {
                if !state.is_sun {
                    state.angle += body.angular_speed * animation.speed_factor;
                    state.position = orbital_position(body.orbit_distance, state.angle);
                }
                state.spin += animation.spin_rate;
            }
        } else if let Some(focused) = view.focused_body {
            if let Some(state) = self.states.get_mut(focused) {
                state.spin += animation.paused_spin_rate;
            }
        }
    }

    pub fn borrow_bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn borrow_states(&self) -> &[BodyState] {
        &self.states
    }

    pub fn borrow_body(&self, id: Id) -> Option<&CelestialBody> {
        self.bodies.get(id)
    }

    pub fn borrow_state(&self, id: Id) -> Option<&BodyState> {
        self.states.get(id)
    }

    pub fn body_by_name(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn sun(&self) -> &CelestialBody {
        &self.bodies[self.sun]
    }

    pub fn get_sun_id(&self) -> Id {
        self.sun
    }

    pub fn world_position(&self, id: Id) -> Result<Vector3> {
        self.states
            .get(id)
            .map(|s| s.position)
            .ok_or(Error::UnknownBody(id))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
