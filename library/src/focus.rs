use log::{debug, info};

use crate::camera::Camera;
use crate::config::FocusConfig;
use crate::error::Error;
use crate::game::repr::Vector3;
use crate::game::solar_system::SolarSystem;
use crate::overlay::InfoOverlay;
use crate::tween::{Aim, Tween, TweenSlot};
use crate::{Id, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Idle,
    Focusing(Id),
    Focused(Id),
    Resetting,
}

/// Orbiting is suspended exactly while a body is focused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ViewState {
    pub(crate) focused_body: Option<Id>,
    pub(crate) paused: bool,
}

impl ViewState {
    pub fn focused(id: Id) -> ViewState {
        ViewState {
            focused_body: Some(id),
            paused: true,
        }
    }

    pub fn get_focused_body(&self) -> Option<Id> {
        self.focused_body
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

pub struct FocusController {
    state: FocusState,
    view: ViewState,
    camera_slot: TweenSlot,
    config: FocusConfig,
    home_position: Vector3,
    home_target: Vector3,
}

impl FocusController {
    pub fn new(config: FocusConfig, home: &Camera) -> FocusController {
        FocusController {
            state: FocusState::Idle,
            view: ViewState::default(),
            camera_slot: TweenSlot::default(),
            config,
            home_position: home.position,
            home_target: home.target,
        }
    }

    pub fn get_state(&self) -> FocusState {
        self.state
    }

    pub fn get_view(&self) -> ViewState {
        self.view
    }

    pub fn is_animating(&self) -> bool {
        self.camera_slot.is_active()
    }

    /// Camera standoff from a focused body's center, per axis.
    pub fn standoff(&self, display_radius: f64) -> Vector3 {
        let offset = display_radius * self.config.radius_factor + self.config.standoff;
        Vector3::new(offset, offset / 2., offset)
    }

    pub fn focus(
        &mut self,
        id: Id,
        system: &SolarSystem,
        camera: &Camera,
        overlay: &mut InfoOverlay,
    ) -> Result<()> {
        let body = system.borrow_body(id).ok_or(Error::UnknownBody(id))?;
        let position = system.world_position(id)?;
        let destination = position + self.standoff(body.display_radius);

        self.view = ViewState::focused(id);
        let generation = self.camera_slot.start(Tween::new(
            camera.position,
            destination,
            self.config.duration_secs,
            self.config.easing,
            Aim::Body(id),
        ));
        self.state = FocusState::Focusing(id);
        overlay.show(body);

        info!("Focusing on {}", body.name);
        debug!(
            "Camera tween #{} toward [{:.2}, {:.2}, {:.2}]",
            generation, destination.x, destination.y, destination.z
        );
        Ok(())
    }

    pub fn reset(&mut self, camera: &Camera, overlay: &mut InfoOverlay) {
        overlay.hide();
        let generation = self.camera_slot.start(Tween::new(
            camera.position,
            self.home_position,
            self.config.duration_secs,
            self.config.easing,
            Aim::Point(self.home_target),
        ));
        self.state = FocusState::Resetting;

        info!("Resetting view");
        debug!("Camera tween #{} toward home", generation);
    }

    /// Applies the camera tween for this frame and settles the state on completion.
    pub fn tick(&mut self, delta: f64, system: &SolarSystem, camera: &mut Camera) {
        let (aim, step) = match self.camera_slot.tick(delta) {
            Some(tick) => tick,
            None => return,
        };

        camera.position = step.value;
        camera.target = match aim {
            Aim::Body(id) => system.world_position(id).unwrap_or(camera.target),
            Aim::Point(point) => point,
        };

        if step.finished {
            match self.state {
                FocusState::Focusing(id) => {
                    debug!("Camera settled on body {}", id);
                    self.state = FocusState::Focused(id);
                }
                FocusState::Resetting => {
                    debug!("Camera back home, orbits resumed");
                    self.state = FocusState::Idle;
                    self.view = ViewState::default();
                }
                _ => {}
            }
        }
    }
}
