use std::collections::HashSet;

use super::celestial_body::{Category, CelestialBody, Ring};
use crate::error::Error;
use crate::Result;

pub fn default_bodies() -> Vec<CelestialBody> {
    vec![
        CelestialBody::new(0, "Sun", 5., 0., 0., 0xffaa00, Category::Star)
            .with_facts(
                "696,340",
                "0",
                "The star at the center of our Solar System. It is a nearly perfect sphere of hot plasma.",
            )
            .with_glow(1.2),
        CelestialBody::new(1, "Mercury", 0.8, 10., 0.04, 0xa5a5a5, Category::Terrestrial)
            .with_facts(
                "2,439",
                "88",
                "The smallest planet in the Solar System and the closest to the Sun.",
            ),
        CelestialBody::new(2, "Venus", 1.2, 15., 0.015, 0xe3bb76, Category::Terrestrial)
            .with_facts(
                "6,051",
                "225",
                "Venus is the second planet from the Sun. It has a thick, toxic atmosphere that traps heat.",
            ),
        CelestialBody::new(3, "Earth", 1.3, 22., 0.01, 0x2233ff, Category::Terrestrial)
            .with_facts(
                "6,371",
                "365",
                "Our home planet is the third planet from the Sun, and the only place we know of so far that's inhabited by living things.",
            ),
        CelestialBody::new(4, "Mars", 1.0, 30., 0.008, 0xdd4422, Category::Terrestrial)
            .with_facts(
                "3,389",
                "687",
                "Mars is a dusty, cold, desert world with a very thin atmosphere. It is also a dynamic planet with seasons.",
            ),
        CelestialBody::new(5, "Jupiter", 3.5, 45., 0.002, 0xd9a066, Category::GasGiant)
            .with_facts(
                "69,911",
                "4,333",
                "Jupiter is the largest planet in the Solar System. It is a gas giant with a mass more than two and a half times that of all the other planets combined.",
            ),
        CelestialBody::new(6, "Saturn", 3.0, 60., 0.0009, 0xf4d03f, Category::GasGiant)
            .with_facts(
                "58,232",
                "10,759",
                "Saturn is the sixth planet from the Sun and the second-largest in the Solar System, after Jupiter. It is famous for its rings.",
            )
            .with_ring(Ring {
                inner: 1.4,
                outer: 2.2,
                color: 0xaa8866,
            }),
        CelestialBody::new(7, "Uranus", 2.0, 75., 0.0004, 0x73c6b6, Category::IceGiant)
            .with_facts(
                "25,362",
                "30,687",
                "Uranus is the seventh planet from the Sun. It has the third-largest planetary radius and fourth-largest planetary mass in the Solar System.",
            ),
        CelestialBody::new(8, "Neptune", 1.9, 90., 0.0001, 0x3498db, Category::IceGiant)
            .with_facts(
                "24,622",
                "60,190",
                "Neptune is the eighth and farthest-known Solar planet from the Sun. In the Solar System, it is the fourth-largest planet by diameter.",
            ),
    ]
}

pub fn validate(bodies: &[CelestialBody]) -> Result<()> {
    let suns = bodies.iter().filter(|b| b.is_sun()).count();
    if suns != 1 {
        return Err(Error::InvalidCatalog(format!(
            "expected exactly one body at distance 0, found {}",
            suns
        )));
    }

    let mut names = HashSet::new();
    for (index, body) in bodies.iter().enumerate() {
        if body.id != index {
            return Err(Error::InvalidCatalog(format!(
                "body '{}' has id {} but sits at index {}",
                body.name, body.id, index
            )));
        }
        if body.display_radius <= 0. {
            return Err(Error::InvalidCatalog(format!(
                "body '{}' has a non-positive radius",
                body.name
            )));
        }
        if body.orbit_distance < 0. {
            return Err(Error::InvalidCatalog(format!(
                "body '{}' has a negative orbit distance",
                body.name
            )));
        }
        if !names.insert(body.name.as_str()) {
            return Err(Error::InvalidCatalog(format!(
                "duplicated body name '{}'",
                body.name
            )));
        }
    }

    Ok(())
}

/// Ids follow the order of the table.
pub fn renumber(bodies: &mut [CelestialBody]) {
    for (index, body) in bodies.iter_mut().enumerate() {
        body.id = index;
    }
}
