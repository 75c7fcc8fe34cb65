use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::game::catalog;
use crate::game::celestial_body::CelestialBody;
use crate::tween::Easing;
use crate::Result;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub speed_factor: f64,
    pub spin_rate: f64,
    pub paused_spin_rate: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed_factor: 0.5,
            spin_rate: 0.005,
            paused_spin_rate: 0.002,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub damping_factor: f64,
    pub rotate_speed: f64,
    pub zoom_step: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0., 60., 120.],
            target: [0., 0., 0.],
            fov_y_deg: 45.,
            near: 0.1,
            far: 1000.,
            min_distance: 2.,
            max_distance: 800.,
            damping_factor: 0.05,
            rotate_speed: 1.,
            zoom_step: 1.1,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FocusConfig {
    pub duration_secs: f64,
    pub radius_factor: f64,
    pub standoff: f64,
    pub easing: Easing,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.5,
            radius_factor: 4.,
            standoff: 5.,
            easing: Easing::Power1Out,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub spread: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 10000,
            spread: 2000.,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ParticlesConfig {
    pub count: usize,
    pub density: bool,
    pub value_area: f64,
    pub max_size: f64,
    pub max_opacity: f64,
    pub speed: f64,
    pub link_distance: f64,
    pub link_opacity: f64,
    pub grab_distance: f64,
    pub grab_opacity: f64,
    pub push_count: usize,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            count: 50,
            density: true,
            value_area: 800.,
            max_size: 3.,
            max_opacity: 0.5,
            speed: 1.,
            link_distance: 150.,
            link_opacity: 0.2,
            grab_distance: 140.,
            grab_opacity: 0.5,
            push_count: 4,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub seed: u64,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub focus: FocusConfig,
    pub starfield: StarfieldConfig,
    pub particles: ParticlesConfig,
    pub bodies: Option<Vec<CelestialBody>>,
}

impl SceneConfig {
    pub fn from_path(path: &str) -> Result<SceneConfig> {
        let content =
            fs::read_to_string(path).map_err(|err| Error::ConfigRead(path.to_string(), err))?;
        Self::from_json(path, content.as_str())
    }

    pub fn from_json(origin: &str, json: &str) -> Result<SceneConfig> {
        let mut config: SceneConfig =
            serde_json::from_str(json).map_err(|err| Error::ConfigParse(origin.to_string(), err))?;

        if let Some(bodies) = &mut config.bodies {
            catalog::renumber(bodies);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.focus.duration_secs <= 0. {
            return Err(Error::InvalidConfig(
                "focus.duration_secs must be positive".to_string(),
            ));
        }
        if self.camera.fov_y_deg <= 0. || self.camera.fov_y_deg >= 180. {
            return Err(Error::InvalidConfig(format!(
                "camera.fov_y_deg {} is outside ]0, 180[",
                self.camera.fov_y_deg
            )));
        }
        if self.camera.near <= 0. || self.camera.near >= self.camera.far {
            return Err(Error::InvalidConfig(format!(
                "camera planes near={} far={} are inconsistent",
                self.camera.near, self.camera.far
            )));
        }
        if self.camera.min_distance > self.camera.max_distance {
            return Err(Error::InvalidConfig(
                "camera.min_distance is greater than camera.max_distance".to_string(),
            ));
        }
        if !(0. ..=1.).contains(&self.camera.damping_factor) {
            return Err(Error::InvalidConfig(
                "camera.damping_factor must be within [0, 1]".to_string(),
            ));
        }
        if let Some(bodies) = &self.bodies {
            catalog::validate(bodies)?;
        }
        Ok(())
    }

    pub fn bodies(&self) -> Vec<CelestialBody> {
        self.bodies.clone().unwrap_or_else(catalog::default_bodies)
    }
}
