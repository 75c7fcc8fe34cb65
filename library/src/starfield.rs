use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::StarfieldConfig;
use crate::game::repr::Vector3;

/// Static background stars scattered in a cube centred on the sun.
#[derive(Clone, Debug, Default)]
pub struct Starfield {
    stars: Vec<Vector3>,
}

impl Starfield {
    pub fn generate(config: &StarfieldConfig, seed: u64) -> Starfield {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let half = config.spread / 2.;
        let stars = (0..config.count)
            .map(|_| {
                Vector3::new(
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                )
            })
            .collect();
        Starfield { stars }
    }

    pub fn borrow_stars(&self) -> &[Vector3] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
