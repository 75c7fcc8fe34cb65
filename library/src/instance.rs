use log::{debug, info};

use crate::camera::{Camera, OrbitControls};
use crate::config::SceneConfig;
use crate::focus::{FocusController, FocusState, ViewState};
use crate::game::solar_system::SolarSystem;
use crate::overlay::InfoOverlay;
use crate::particles::ParticleField;
use crate::picking::{self, PickOutcome, PointerEvent, Viewport};
use crate::protocol::{BodyInfo, ViewAction};
use crate::starfield::Starfield;
use crate::Result;

pub struct Instance {
    pub(crate) config: SceneConfig,
    pub(crate) system: SolarSystem,
    pub(crate) camera: Camera,
    pub(crate) controls: OrbitControls,
    pub(crate) focus: FocusController,
    pub(crate) overlay: InfoOverlay,
    pub(crate) starfield: Starfield,
    pub(crate) particles: ParticleField,
    pub(crate) viewport: Viewport,
    pub(crate) hover: Option<(f64, f64)>,
    pub(crate) frame: u64,
}

impl Instance {
    pub fn new(config: SceneConfig) -> Result<Instance> {
        Self::with_viewport(config, Viewport::default())
    }

    pub fn with_viewport(config: SceneConfig, viewport: Viewport) -> Result<Instance> {
        config.validate()?;

        let system = SolarSystem::new(config.bodies(), config.seed)?;
        let mut camera = Camera::from_config(&config.camera);
        camera.set_viewport(&viewport);
        let controls = OrbitControls::from_config(&config.camera);
        let focus = FocusController::new(config.focus.clone(), &camera);
        let starfield = Starfield::generate(&config.starfield, config.seed);
        let particles = ParticleField::new(
            config.particles.clone(),
            viewport.area.width,
            viewport.area.height,
            config.seed.wrapping_add(1),
        );

        info!(
            "Scene ready: {} bodies, {} stars, {} particles",
            system.len(),
            starfield.len(),
            particles.borrow_particles().len()
        );

        Ok(Instance {
            config,
            system,
            camera,
            controls,
            focus,
            overlay: InfoOverlay::default(),
            starfield,
            particles,
            viewport,
            hover: None,
            frame: 0,
        })
    }

    pub fn handle(&mut self, action: ViewAction) -> Result<()> {
        match action {
            ViewAction::Click { x, y } => self.click(PointerEvent { x, y })?,
            ViewAction::Close => self.reset_view(),
            ViewAction::Resize(viewport) => {
                self.camera.set_viewport(&viewport);
                self.particles
                    .resize(viewport.area.width, viewport.area.height);
                self.viewport = viewport;
            }
            ViewAction::Drag { dx, dy } => {
                if !self.focus.is_animating() && self.viewport.area.height > 0. {
                    self.controls.rotate(
                        dx / self.viewport.area.height,
                        dy / self.viewport.area.height,
                    );
                }
            }
            ViewAction::Zoom(steps) => {
                if !self.focus.is_animating() {
                    self.controls.zoom(steps);
                }
            }
            ViewAction::Hover(position) => {
                self.hover = position.map(|(x, y)| self.to_local(x, y));
            }
        }
        Ok(())
    }

    fn to_local(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.viewport.area.x, y - self.viewport.area.y)
    }

    fn click(&mut self, pointer: PointerEvent) -> Result<()> {
        let local = self.to_local(pointer.x, pointer.y);
        match picking::pick(&self.camera, &self.system, &self.viewport, pointer) {
            PickOutcome::Ignored => {}
            PickOutcome::Hit(id) => {
                self.particles.push(local);
                self.controls.stop();
                self.focus
                    .focus(id, &self.system, &self.camera, &mut self.overlay)?;
            }
            PickOutcome::Miss => {
                self.particles.push(local);
                self.reset_view();
            }
        }
        Ok(())
    }

    pub fn reset_view(&mut self) {
        self.controls.stop();
        self.focus.reset(&self.camera, &mut self.overlay);
    }

    /// One rendered frame; `delta` is the wall time since the previous one, in seconds.
    pub fn update(&mut self, delta: f64) {
        self.focus.tick(delta, &self.system, &mut self.camera);
        self.system
            .advance(&self.focus.get_view(), &self.config.animation);
        self.controls.update(&mut self.camera);
        self.particles.update();
        self.frame += 1;

        if self.frame % 600 == 0 {
            debug!("Frame {} state {:?}", self.frame, self.focus.get_state());
        }
    }

    pub fn borrow_camera(&self) -> &Camera {
        &self.camera
    }

    pub fn borrow_system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn borrow_overlay(&self) -> &InfoOverlay {
        &self.overlay
    }

    pub fn borrow_starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn borrow_particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn borrow_viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn get_hover(&self) -> Option<(f64, f64)> {
        self.hover
    }

    pub fn view_state(&self) -> ViewState {
        self.focus.get_view()
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus.get_state()
    }

    pub fn body_infos(&self) -> Vec<BodyInfo> {
        let focused = self.focus.get_view().get_focused_body();
        self.system
            .borrow_bodies()
            .iter()
            .zip(self.system.borrow_states())
            .map(|(body, state)| BodyInfo {
                id: body.id,
                name: body.name.clone(),
                category: body.category,
                coords: [state.position.x, state.position.y, state.position.z],
                orbit_distance: body.orbit_distance,
                display_radius: body.display_radius,
                color: body.color,
                spin: state.spin,
                focused: focused == Some(body.id),
                ring: body.ring,
                glow: body.glow,
            })
            .collect()
    }
}
