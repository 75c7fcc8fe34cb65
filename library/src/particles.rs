use itertools::Itertools;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::ParticlesConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f64,
}

/// Segment between two points of the background layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub opacity: f64,
}

/// Screen-space drifting particles behind the scene, linked when close.
pub struct ParticleField {
    config: ParticlesConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
}

impl ParticleField {
    pub fn new(config: ParticlesConfig, width: f64, height: f64, seed: u64) -> ParticleField {
        let mut field = ParticleField {
            config,
            width: width.max(0.),
            height: height.max(0.),
            particles: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        let count = field.target_count();
        for _ in 0..count {
            let x = field.rng.gen_range(0f64..=field.width);
            let y = field.rng.gen_range(0f64..=field.height);
            let particle = field.spawn(x, y);
            field.particles.push(particle);
        }
        field
    }

    fn target_count(&self) -> usize {
        if !self.config.density || self.config.value_area <= 0. {
            return self.config.count;
        }
        let area = self.width * self.height / 1000.;
        (area * self.config.count as f64 / self.config.value_area).round() as usize
    }

    fn spawn(&mut self, x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            vx: self.rng.gen_range(-0.5..0.5),
            vy: self.rng.gen_range(-0.5..0.5),
            size: self.rng.gen_range(0f64..=1.) * self.config.max_size,
            opacity: self.rng.gen_range(0f64..=1.) * self.config.max_opacity,
        }
    }

    pub fn update(&mut self) {
        let step = self.config.speed / 2.;
        for index in 0..self.particles.len() {
            let mut p = self.particles[index];
            p.x += p.vx * step;
            p.y += p.vy * step;

            // particles leaving one side come back on the opposite side
            if p.x - p.size > self.width {
                p.x = -p.size;
                p.y = self.rng.gen_range(0f64..=self.height);
            } else if p.x + p.size < 0. {
                p.x = self.width + p.size;
                p.y = self.rng.gen_range(0f64..=self.height);
            }
            if p.y - p.size > self.height {
                p.y = -p.size;
                p.x = self.rng.gen_range(0f64..=self.width);
            } else if p.y + p.size < 0. {
                p.y = self.height + p.size;
                p.x = self.rng.gen_range(0f64..=self.width);
            }
            self.particles[index] = p;
        }
    }

    pub fn links(&self) -> Vec<Link> {
        let max = self.config.link_distance;
        self.particles
            .iter()
            .tuple_combinations()
            .filter_map(|(a, b)| {
                let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                if distance > max {
                    return None;
                }
                Some(Link {
                    from: (a.x, a.y),
                    to: (b.x, b.y),
                    opacity: self.config.link_opacity * (1. - distance / max),
                })
            })
            .collect()
    }

    pub fn grab_links(&self, cursor: (f64, f64)) -> Vec<Link> {
        let max = self.config.grab_distance;
        self.particles
            .iter()
            .filter_map(|p| {
                let distance = ((p.x - cursor.0).powi(2) + (p.y - cursor.1).powi(2)).sqrt();
                if distance > max {
                    return None;
                }
                Some(Link {
                    from: cursor,
                    to: (p.x, p.y),
                    opacity: self.config.grab_opacity * (1. - distance / max),
                })
            })
            .collect()
    }

    pub fn push(&mut self, at: (f64, f64)) {
        for _ in 0..self.config.push_count {
            let particle = self.spawn(at.0, at.1);
            self.particles.push(particle);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        let (width, height) = (width.max(0.), height.max(0.));
        if self.width > 0. && self.height > 0. {
            for p in &mut self.particles {
                p.x = p.x / self.width * width;
                p.y = p.y / self.height * height;
            }
        }
        self.width = width;
        self.height = height;

        if self.config.density {
            let count = self.target_count();
            self.particles.truncate(count);
            while self.particles.len() < count {
                let x = self.rng.gen_range(0f64..=self.width);
                let y = self.rng.gen_range(0f64..=self.height);
                let particle = self.spawn(x, y);
                self.particles.push(particle);
            }
        }
    }

    pub fn borrow_particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
