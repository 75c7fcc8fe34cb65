use log::trace;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::game::solar_system::SolarSystem;
use crate::Id;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Drawing surface in host pixel coordinates, plus the UI overlays laid on top of it.
///
/// `pixel_aspect` is the width/height ratio of one host pixel: 1 for a
/// browser canvas, about 0.5 for a terminal cell.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub pixel_aspect: f64,
    pub overlays: Vec<Rect>,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            area: Rect::new(0., 0., 800., 600.),
            pixel_aspect: 1.,
            overlays: Vec::new(),
        }
    }
}

impl Viewport {
    pub fn new(area: Rect, pixel_aspect: f64) -> Viewport {
        Viewport {
            area,
            pixel_aspect,
            overlays: Vec::new(),
        }
    }

    pub fn with_overlays(mut self, overlays: Vec<Rect>) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn aspect(&self) -> Option<f64> {
        if self.area.width <= 0. || self.area.height <= 0. {
            return None;
        }
        Some(self.area.width * self.pixel_aspect / self.area.height)
    }

    pub fn is_over_overlay(&self, x: f64, y: f64) -> bool {
        self.overlays.iter().any(|o| o.contains(x, y))
    }

    pub fn to_ndc(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.area.contains(x, y) {
            return None;
        }
        Some((
            (x - self.area.x) / self.area.width * 2. - 1.,
            -(y - self.area.y) / self.area.height * 2. + 1.,
        ))
    }

    pub fn from_ndc(&self, ndc: (f64, f64)) -> (f64, f64) {
        (
            self.area.x + (ndc.0 + 1.) / 2. * self.area.width,
            self.area.y + (1. - ndc.1) / 2. * self.area.height,
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickOutcome {
    /// The pointer landed on a UI overlay or outside the drawing surface.
    Ignored,
    Miss,
    Hit(Id),
}

pub fn pick(
    camera: &Camera,
    system: &SolarSystem,
    viewport: &Viewport,
    pointer: PointerEvent,
) -> PickOutcome {
    if viewport.is_over_overlay(pointer.x, pointer.y) {
        trace!("Pick ignored, pointer over overlay");
        return PickOutcome::Ignored;
    }

    let ndc = match viewport.to_ndc(pointer.x, pointer.y) {
        Some(ndc) => ndc,
        None => return PickOutcome::Ignored,
    };

    let ray = camera.ray_from_ndc(ndc);

    let nearest = system
        .borrow_bodies()
        .iter()
        .zip(system.borrow_states())
        .filter_map(|(body, state)| {
            ray.intersect_sphere(state.position, body.display_radius)
                .map(|t| (body.id, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match nearest {
        Some((id, t)) => {
            trace!("Pick hit body {} at t={}", id, t);
            PickOutcome::Hit(id)
        }
        None => {
            trace!("Pick missed at ndc {:?}", ndc);
            PickOutcome::Miss
        }
    }
}
