use serde::{Deserialize, Serialize};

use crate::game::celestial_body::CelestialBody;

/// The five descriptive fields shown for a focused body.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct BodyCard {
    pub name: String,
    pub category: String,
    pub radius_km: String,
    pub period_days: String,
    pub description: String,
}

impl From<&CelestialBody> for BodyCard {
    fn from(body: &CelestialBody) -> Self {
        BodyCard {
            name: body.name.clone(),
            category: body.category.to_string(),
            radius_km: body.real_radius_km.clone(),
            period_days: body.orbital_period_days.clone(),
            description: body.description.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct InfoOverlay {
    card: Option<BodyCard>,
}

impl InfoOverlay {
    pub fn show(&mut self, body: &CelestialBody) {
        self.card = Some(BodyCard::from(body));
    }

    pub fn hide(&mut self) {
        self.card = None;
    }

    pub fn is_visible(&self) -> bool {
        self.card.is_some()
    }

    pub fn borrow_card(&self) -> Option<&BodyCard> {
        self.card.as_ref()
    }
}
