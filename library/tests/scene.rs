#[cfg(test)]
use test_helpers_async::*;

#[before_all]
#[cfg(test)]
mod solarscope_tests_scene {
    use common::trace;
    use log::info;
    use solarscope::{
        config::{ParticlesConfig, StarfieldConfig},
        particles::ParticleField,
        starfield::Starfield,
    };

    pub fn before_all() {
        trace::init(Some(".*(solarscope.*)".to_string()));
        info!("Scene tests");
    }

    #[tokio::test]
    async fn case_01_starfield_in_cube() -> anyhow::Result<()> {
        let config = StarfieldConfig::default();
        let stars = Starfield::generate(&config, 17);

        assert_eq!(10000, stars.len());
        for star in stars.borrow_stars() {
            assert!(star.iter().all(|c| c.abs() <= 1000.));
        }

        let again = Starfield::generate(&config, 17);
        assert_eq!(stars.borrow_stars(), again.borrow_stars());

        let other = Starfield::generate(&config, 18);
        assert_ne!(stars.borrow_stars(), other.borrow_stars());

        let empty = Starfield::generate(
            &StarfieldConfig {
                count: 0,
                ..Default::default()
            },
            17,
        );
        assert!(empty.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn case_02_particle_density() -> anyhow::Result<()> {
        let field = ParticleField::new(ParticlesConfig::default(), 800., 600., 1);
        assert_eq!(30, field.borrow_particles().len());

        let field = ParticleField::new(ParticlesConfig::default(), 1600., 1200., 1);
        assert_eq!(120, field.borrow_particles().len());

        let fixed = ParticleField::new(
            ParticlesConfig {
                density: false,
                ..Default::default()
            },
            1600.,
            1200.,
            1,
        );
        assert_eq!(50, fixed.borrow_particles().len());

        for p in field.borrow_particles() {
            assert!(p.x >= 0. && p.x <= 1600.);
            assert!(p.y >= 0. && p.y <= 1200.);
            assert!(p.size >= 0. && p.size <= 3.);
            assert!(p.opacity >= 0. && p.opacity <= 0.5);
        }

        Ok(())
    }

    #[tokio::test]
    async fn case_03_links_fade_with_distance() -> anyhow::Result<()> {
        let field = ParticleField::new(ParticlesConfig::default(), 800., 600., 4);

        for link in field.links() {
            let distance = ((link.from.0 - link.to.0).powi(2) + (link.from.1 - link.to.1).powi(2)).sqrt();
            assert!(distance <= 150.);
            assert!((link.opacity - 0.2 * (1. - distance / 150.)).abs() < 1e-9);
        }

        let cursor = (400., 300.);
        for link in field.grab_links(cursor) {
            assert_eq!(cursor, link.from);
            let distance = ((link.to.0 - cursor.0).powi(2) + (link.to.1 - cursor.1).powi(2)).sqrt();
            assert!(distance <= 140.);
            assert!(link.opacity <= 0.5);
        }

        Ok(())
    }

    #[tokio::test]
    async fn case_04_push_and_resize() -> anyhow::Result<()> {
        let mut field = ParticleField::new(ParticlesConfig::default(), 800., 600., 2);
        field.push((100., 100.));
        assert_eq!(34, field.borrow_particles().len());
        assert!(field.borrow_particles()[30..]
            .iter()
            .all(|p| p.x == 100. && p.y == 100.));

        field.resize(1600., 1200.);
        assert_eq!((1600., 1200.), field.get_size());
        assert_eq!(120, field.borrow_particles().len());

        field.resize(800., 600.);
        assert_eq!(30, field.borrow_particles().len());

        Ok(())
    }

    #[tokio::test]
    async fn case_05_particles_wrap_around() -> anyhow::Result<()> {
        let config = ParticlesConfig {
            speed: 40.,
            ..Default::default()
        };
        let mut field = ParticleField::new(config, 800., 600., 3);
        let count = field.borrow_particles().len();

        for _ in 0..1000 {
            field.update();
            for p in field.borrow_particles() {
                assert!(p.x >= -p.size - 10. && p.x <= 800. + p.size + 10.);
                assert!(p.y >= -p.size - 10. && p.y <= 600. + p.size + 10.);
            }
        }
        assert_eq!(count, field.borrow_particles().len());

        Ok(())
    }
}
