use serde::{Deserialize, Serialize};

use crate::game::celestial_body::{Category, Ring};
use crate::picking::Viewport;
use crate::Id;

/// Input from the host, in viewport pixel coordinates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum ViewAction {
    Click { x: f64, y: f64 },
    Close,
    Resize(Viewport),
    Drag { dx: f64, dy: f64 },
    Zoom(f64),
    Hover(Option<(f64, f64)>),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BodyInfo {
    pub id: Id,
    pub name: String,
    pub category: Category,
    pub coords: [f64; 3],
    pub orbit_distance: f64,
    pub display_radius: f64,
    pub color: u32,
    pub spin: f64,
    pub focused: bool,
    pub ring: Option<Ring>,
    pub glow: Option<f64>,
}
