use std::f64::consts::{PI, TAU};

use crate::config::CameraConfig;
use crate::game::repr::Vector3;
use crate::picking::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    pub fn at(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }

    /// Ray parameter at which the ray enters the sphere from outside.
    ///
    /// Only the outer face counts: a ray starting inside the sphere misses it.
    pub fn intersect_sphere(&self, center: Vector3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(&self.direction);
        let c = oc.dot(&oc) - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0. {
            return None;
        }
        let near = -b - discriminant.sqrt();
        if near > 0. {
            Some(near)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct Basis {
    pub forward: Vector3,
    pub right: Vector3,
    pub up: Vector3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vector3,
    pub target: Vector3,
    pub up: Vector3,
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Camera {
        Camera {
            position: Vector3::from(config.position),
            target: Vector3::from(config.target),
            up: Vector3::y(),
            fov_y_deg: config.fov_y_deg,
            aspect: 1.,
            near: config.near,
            far: config.far,
        }
    }

    pub fn set_viewport(&mut self, viewport: &Viewport) {
        if let Some(aspect) = viewport.aspect() {
            self.aspect = aspect;
        }
    }

    fn tan_half_fov(&self) -> f64 {
        (self.fov_y_deg.to_radians() / 2.).tan()
    }

    pub fn basis(&self) -> Basis {
        let forward = (self.target - self.position)
            .try_normalize(f64::EPSILON)
            .unwrap_or(-Vector3::z());
        let right = forward
            .cross(&self.up)
            .try_normalize(f64::EPSILON)
            .unwrap_or(Vector3::x());
        let up = right.cross(&forward);
        Basis { forward, right, up }
    }

    pub fn ray_from_ndc(&self, ndc: (f64, f64)) -> Ray {
        let basis = self.basis();
        let tan = self.tan_half_fov();
        let direction = basis.forward
            + basis.right * (ndc.0 * tan * self.aspect)
            + basis.up * (ndc.1 * tan);
        Ray {
            origin: self.position,
            direction: direction.normalize(),
        }
    }

    /// Normalized device coordinates of a world point, `None` when clipped by the frustum depth.
    pub fn project(&self, point: Vector3) -> Option<Projection> {
        let basis = self.basis();
        let relative = point - self.position;
        let depth = relative.dot(&basis.forward);
        if depth <= self.near || depth > self.far {
            return None;
        }
        let tan = self.tan_half_fov();
        Some(Projection {
            x: relative.dot(&basis.right) / (depth * tan * self.aspect),
            y: relative.dot(&basis.up) / (depth * tan),
            depth,
        })
    }

    /// Radius in vertical NDC units of a sphere seen at `depth`.
    pub fn projected_radius(&self, radius: f64, depth: f64) -> f64 {
        radius / (depth * self.tan_half_fov())
    }

    pub fn distance_to_target(&self) -> f64 {
        (self.position - self.target).norm()
    }
}

/// Drag to orbit around the target, scroll to dolly, with damping.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    damping_factor: f64,
    rotate_speed: f64,
    zoom_step: f64,
    min_distance: f64,
    max_distance: f64,
    delta_theta: f64,
    delta_phi: f64,
    scale: f64,
}

impl OrbitControls {
    const POLE_EPSILON: f64 = 1e-6;
    const REST_EPSILON: f64 = 1e-6;

    pub fn from_config(config: &CameraConfig) -> OrbitControls {
        OrbitControls {
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            zoom_step: config.zoom_step,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            delta_theta: 0.,
            delta_phi: 0.,
            scale: 1.,
        }
    }

    /// `dx`/`dy` are pointer motions as a fraction of the viewport height.
    pub fn rotate(&mut self, dx: f64, dy: f64) {
        self.delta_theta -= TAU * dx * self.rotate_speed;
        self.delta_phi -= TAU * dy * self.rotate_speed;
    }

    /// Positive steps move away from the target.
    pub fn zoom(&mut self, steps: f64) {
        self.scale *= self.zoom_step.powf(steps);
    }

    pub fn stop(&mut self) {
        self.delta_theta = 0.;
        self.delta_phi = 0.;
        self.scale = 1.;
    }

    pub fn is_moving(&self) -> bool {
        self.delta_theta != 0. || self.delta_phi != 0. || self.scale != 1.
    }

    pub fn update(&mut self, camera: &mut Camera) {
        if !self.is_moving() {
            return;
        }

        let offset = camera.position - camera.target;
        let radius = offset.norm();
        if radius < f64::EPSILON {
            self.stop();
            return;
        }

        let damping = if self.damping_factor > 0. {
            self.damping_factor
        } else {
            1.
        };

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1., 1.).acos();
        theta += self.delta_theta * damping;
        phi = (phi + self.delta_phi * damping).clamp(Self::POLE_EPSILON, PI - Self::POLE_EPSILON);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let offset = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.position = camera.target + offset;

        self.delta_theta *= 1. - damping;
        self.delta_phi *= 1. - damping;
        self.scale = 1.;

        if self.delta_theta.abs() < Self::REST_EPSILON {
            self.delta_theta = 0.;
        }
        if self.delta_phi.abs() < Self::REST_EPSILON {
            self.delta_phi = 0.;
        }
    }
}
