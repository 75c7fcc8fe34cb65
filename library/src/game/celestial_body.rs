use std::fmt;

use serde::{Deserialize, Serialize};

use super::repr::{Angle, Distance, Speed};
use crate::Id;

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Copy)]
pub enum Category {
    Star,
    Terrestrial,
    #[serde(rename = "Gas Giant")]
    GasGiant,
    #[serde(rename = "Ice Giant")]
    IceGiant,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Star => "Star",
            Category::Terrestrial => "Terrestrial",
            Category::GasGiant => "Gas Giant",
            Category::IceGiant => "Ice Giant",
        };
        write!(f, "{}", label)
    }
}

/// Splits a 0xRRGGBB color.
pub fn rgb(color: u32) -> (u8, u8, u8) {
    (
        (color >> 16 & 0xff) as u8,
        (color >> 8 & 0xff) as u8,
        (color & 0xff) as u8,
    )
}

/// Flat ring around a body, radii given as multiples of its display radius.
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone, Copy)]
pub struct Ring {
    pub inner: f64,
    pub outer: f64,
    pub color: u32,
}

/// Immutable reference data of a sun or planet.
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct CelestialBody {
    #[serde(default)]
    pub(crate) id: Id,
    pub(crate) name: String,
    pub(crate) display_radius: Distance,
    pub(crate) orbit_distance: Distance,
    pub(crate) angular_speed: Speed,
    pub(crate) color: u32,
    pub(crate) category: Category,
    pub(crate) real_radius_km: String,
    pub(crate) orbital_period_days: String,
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) ring: Option<Ring>,
    #[serde(default)]
    pub(crate) glow: Option<f64>,
    /// Orbital phase at startup, random when absent.
    #[serde(default)]
    pub(crate) initial_angle: Option<Angle>,
}

impl CelestialBody {
    pub fn new(
        id: Id,
        name: &str,
        display_radius: Distance,
        orbit_distance: Distance,
        angular_speed: Speed,
        color: u32,
        category: Category,
    ) -> CelestialBody {
        CelestialBody {
            id,
            name: name.to_string(),
            display_radius,
            orbit_distance,
            angular_speed,
            color,
            category,
            real_radius_km: String::default(),
            orbital_period_days: String::default(),
            description: String::default(),
            ring: None,
            glow: None,
            initial_angle: None,
        }
    }

    pub fn with_facts(mut self, real_radius_km: &str, orbital_period_days: &str, description: &str) -> Self {
        self.real_radius_km = real_radius_km.to_string();
        self.orbital_period_days = orbital_period_days.to_string();
        self.description = description.to_string();
        self
    }

    pub fn with_ring(mut self, ring: Ring) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn with_glow(mut self, glow: f64) -> Self {
        self.glow = Some(glow);
        self
    }

    pub fn with_initial_angle(mut self, angle: Angle) -> Self {
        self.initial_angle = Some(angle);
        self
    }

    pub fn is_sun(&self) -> bool {
        self.orbit_distance == 0.
    }

    pub fn get_id(&self) -> Id {
        self.id
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_display_radius(&self) -> Distance {
        self.display_radius
    }

    pub fn get_orbit_distance(&self) -> Distance {
        self.orbit_distance
    }

    pub fn get_angular_speed(&self) -> Speed {
        self.angular_speed
    }

    pub fn get_rgb(&self) -> (u8, u8, u8) {
        rgb(self.color)
    }

    pub fn get_category(&self) -> Category {
        self.category
    }

    pub fn get_real_radius_km(&self) -> &str {
        &self.real_radius_km
    }

    pub fn get_orbital_period_days(&self) -> &str {
        &self.orbital_period_days
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_ring(&self) -> Option<Ring> {
        self.ring
    }

    pub fn get_glow(&self) -> Option<f64> {
        self.glow
    }
}
