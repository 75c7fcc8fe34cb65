#[cfg(test)]
use test_helpers_async::*;

#[before_all]
#[cfg(test)]
mod solarscope_tests_focus {
    use std::f64::consts::PI;

    use anyhow::anyhow;
    use common::trace;
    use log::info;
    use solarscope::{
        config::{SceneConfig, StarfieldConfig},
        focus::FocusState,
        game::{
            celestial_body::{Category, CelestialBody},
            repr::Vector3,
        },
        instance::Instance,
        picking::{Rect, Viewport},
        protocol::ViewAction,
        Id,
    };

    pub fn before_all() {
        trace::init(Some(".*(solarscope.*)".to_string()));
        info!("Focus tests");
    }

    const FRAME: f64 = 1. / 60.;
    const EPSILON: f64 = 1e-6;
    const SUN: Id = 0;
    const EARTH: Id = 1;
    const MARS: Id = 2;

    fn instance() -> anyhow::Result<Instance> {
        let config = SceneConfig {
            starfield: StarfieldConfig {
                count: 100,
                ..Default::default()
            },
            bodies: Some(vec![
                CelestialBody::new(SUN, "Sun", 5., 0., 0., 0xffaa00, Category::Star),
                CelestialBody::new(EARTH, "Earth", 1.3, 22., 0.01, 0x2233ff, Category::Terrestrial)
                    .with_facts("6,371", "365", "Our home planet.")
                    .with_initial_angle(0.),
                CelestialBody::new(MARS, "Mars", 1., 30., 0.008, 0xff3300, Category::Terrestrial)
                    .with_initial_angle(PI),
            ]),
            ..Default::default()
        };
        Ok(Instance::new(config)?)
    }

    /// Pixel under which the center of a body is drawn.
    fn body_pixel(instance: &Instance, id: Id) -> anyhow::Result<(f64, f64)> {
        let position = instance.borrow_system().world_position(id)?;
        let projection = instance
            .borrow_camera()
            .project(position)
            .ok_or(anyhow!("body {} is not in front of the camera", id))?;
        Ok(instance
            .borrow_viewport()
            .from_ndc((projection.x, projection.y)))
    }

    fn click_body(instance: &mut Instance, id: Id) -> anyhow::Result<()> {
        let (x, y) = body_pixel(instance, id)?;
        instance.handle(ViewAction::Click { x, y })?;
        Ok(())
    }

    fn click_sky(instance: &mut Instance) -> anyhow::Result<()> {
        let (x, y) = instance.borrow_viewport().from_ndc((0., 0.99));
        instance.handle(ViewAction::Click { x, y })?;
        Ok(())
    }

    fn run(instance: &mut Instance, frames: usize) {
        for _ in 0..frames {
            instance.update(FRAME);
            let view = instance.view_state();
            assert_eq!(view.is_paused(), view.get_focused_body().is_some());
        }
    }

    fn assert_close(expected: Vector3, actual: Vector3) {
        assert!(
            (expected - actual).norm() < EPSILON,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[tokio::test]
    async fn case_01_click_focuses_body() -> anyhow::Result<()> {
        let mut instance = instance()?;
        assert_eq!(FocusState::Idle, instance.focus_state());

        click_body(&mut instance, EARTH)?;

        assert_eq!(FocusState::Focusing(EARTH), instance.focus_state());
        assert_eq!(Some(EARTH), instance.view_state().get_focused_body());
        assert!(instance.view_state().is_paused());

        let card = instance
            .borrow_overlay()
            .borrow_card()
            .ok_or(anyhow!("overlay hidden"))?;
        assert_eq!("Earth", card.name);
        assert_eq!("Terrestrial", card.category);
        assert_eq!("6,371", card.radius_km);
        assert_eq!("365", card.period_days);
        assert_eq!("Our home planet.", card.description);

        let infos = instance.body_infos();
        assert!(infos[EARTH].focused);
        assert!(!infos[SUN].focused && !infos[MARS].focused);

        Ok(())
    }

    #[tokio::test]
    async fn case_02_camera_settles_at_standoff() -> anyhow::Result<()> {
        let mut instance = instance()?;
        click_body(&mut instance, EARTH)?;

        run(&mut instance, 30);
        assert_eq!(FocusState::Focusing(EARTH), instance.focus_state());
        // target follows the body from the first frame
        assert_close(Vector3::new(22., 0., 0.), instance.borrow_camera().target);

        run(&mut instance, 70);
        assert_eq!(FocusState::Focused(EARTH), instance.focus_state());

        // orbits are paused, so the body did not move
        let earth = instance.borrow_system().world_position(EARTH)?;
        assert_close(Vector3::new(22., 0., 0.), earth);
        assert_close(earth + Vector3::new(10.2, 5.1, 10.2), instance.borrow_camera().position);
        assert_close(earth, instance.borrow_camera().target);

        // the focused body keeps turning slowly
        let spin = instance.body_infos()[EARTH].spin;
        run(&mut instance, 10);
        assert!((instance.body_infos()[EARTH].spin - spin - 0.02).abs() < 1e-9);

        Ok(())
    }

    #[tokio::test]
    async fn case_03_miss_resets_home() -> anyhow::Result<()> {
        let mut instance = instance()?;
        click_body(&mut instance, EARTH)?;
        run(&mut instance, 100);

        click_sky(&mut instance)?;
        assert_eq!(FocusState::Resetting, instance.focus_state());
        assert!(!instance.borrow_overlay().is_visible());

        run(&mut instance, 30);
        // orbits stay frozen while the camera travels home
        assert_close(
            Vector3::new(22., 0., 0.),
            instance.borrow_system().world_position(EARTH)?,
        );

        run(&mut instance, 70);
        assert_eq!(FocusState::Idle, instance.focus_state());
        assert!(!instance.view_state().is_paused());
        assert_eq!(None, instance.view_state().get_focused_body());
        assert_eq!(Vector3::new(0., 60., 120.), instance.borrow_camera().position);
        assert_eq!(Vector3::zeros(), instance.borrow_camera().target);

        run(&mut instance, 1);
        let earth = instance.borrow_system().world_position(EARTH)?;
        assert!((earth - Vector3::new(22., 0., 0.)).norm() > 1e-3);

        Ok(())
    }

    #[tokio::test]
    async fn case_04_last_request_wins() -> anyhow::Result<()> {
        let mut instance = instance()?;
        click_body(&mut instance, EARTH)?;
        run(&mut instance, 5);

        click_body(&mut instance, MARS)?;
        assert_eq!(FocusState::Focusing(MARS), instance.focus_state());
        assert_eq!(
            "Mars",
            instance
                .borrow_overlay()
                .borrow_card()
                .ok_or(anyhow!("overlay hidden"))?
                .name
        );

        run(&mut instance, 100);
        assert_eq!(FocusState::Focused(MARS), instance.focus_state());
        assert_close(Vector3::new(-21., 4.5, 9.), instance.borrow_camera().position);
        assert_close(Vector3::new(-30., 0., 0.), instance.borrow_camera().target);

        Ok(())
    }

    #[tokio::test]
    async fn case_05_focus_interrupted_by_miss() -> anyhow::Result<()> {
        let mut instance = instance()?;
        click_body(&mut instance, EARTH)?;
        run(&mut instance, 10);

        click_sky(&mut instance)?;
        assert_eq!(FocusState::Resetting, instance.focus_state());

        run(&mut instance, 100);
        assert_eq!(FocusState::Idle, instance.focus_state());
        assert_eq!(Vector3::new(0., 60., 120.), instance.borrow_camera().position);

        Ok(())
    }

    #[tokio::test]
    async fn case_06_close_action_resets() -> anyhow::Result<()> {
        let mut instance = instance()?;
        click_body(&mut instance, MARS)?;
        run(&mut instance, 100);
        assert!(instance.borrow_overlay().is_visible());

        instance.handle(ViewAction::Close)?;
        assert_eq!(FocusState::Resetting, instance.focus_state());
        assert!(!instance.borrow_overlay().is_visible());

        run(&mut instance, 100);
        assert_eq!(FocusState::Idle, instance.focus_state());

        Ok(())
    }

    #[tokio::test]
    async fn case_07_miss_while_idle_keeps_orbiting() -> anyhow::Result<()> {
        let mut instance = instance()?;
        click_sky(&mut instance)?;
        assert_eq!(FocusState::Resetting, instance.focus_state());
        assert!(!instance.view_state().is_paused());

        run(&mut instance, 100);
        assert_eq!(FocusState::Idle, instance.focus_state());
        assert_eq!(Vector3::new(0., 60., 120.), instance.borrow_camera().position);

        let angle = 100. * 0.01 * 0.5;
        let expected = Vector3::new(22. * f64::cos(angle), 0., 22. * f64::sin(angle));
        assert_close(expected, instance.borrow_system().world_position(EARTH)?);

        Ok(())
    }

    #[tokio::test]
    async fn case_08_click_on_overlay_is_ignored() -> anyhow::Result<()> {
        let mut instance = instance()?;
        let (x, y) = body_pixel(&instance, EARTH)?;

        let viewport = Viewport::default().with_overlays(vec![Rect::new(0., 0., 800., 600.)]);
        instance.handle(ViewAction::Resize(viewport))?;
        instance.handle(ViewAction::Click { x, y })?;

        assert_eq!(FocusState::Idle, instance.focus_state());
        assert!(!instance.borrow_overlay().is_visible());

        instance.handle(ViewAction::Resize(Viewport::default()))?;
        instance.handle(ViewAction::Click { x, y })?;
        assert_eq!(FocusState::Focusing(EARTH), instance.focus_state());

        Ok(())
    }

    #[tokio::test]
    async fn case_09_controls_locked_while_animating() -> anyhow::Result<()> {
        let mut instance = instance()?;
        click_body(&mut instance, EARTH)?;
        instance.handle(ViewAction::Zoom(5.))?;
        instance.handle(ViewAction::Drag { dx: 200., dy: 40. })?;

        run(&mut instance, 100);
        assert_close(
            Vector3::new(32.2, 5.1, 10.2),
            instance.borrow_camera().position,
        );

        Ok(())
    }

    #[tokio::test]
    async fn case_10_orbit_controls_when_idle() -> anyhow::Result<()> {
        let mut instance = instance()?;
        let home_distance = instance.borrow_camera().distance_to_target();

        instance.handle(ViewAction::Drag { dx: 80., dy: 0. })?;
        run(&mut instance, 1);
        let camera = instance.borrow_camera();
        assert!((camera.position - Vector3::new(0., 60., 120.)).norm() > 1e-3);
        assert!((camera.distance_to_target() - home_distance).abs() < EPSILON);
        assert!((camera.position.y - 60.).abs() < EPSILON);

        instance.handle(ViewAction::Zoom(1.))?;
        run(&mut instance, 1);
        assert!(
            (instance.borrow_camera().distance_to_target() - home_distance * 1.1).abs() < EPSILON
        );

        Ok(())
    }

    #[tokio::test]
    async fn case_11_resize_reshapes_view() -> anyhow::Result<()> {
        let mut instance = instance()?;
        assert!((instance.borrow_camera().aspect - 4. / 3.).abs() < EPSILON);
        assert_eq!((800., 600.), instance.borrow_particles().get_size());

        let wide = Viewport::new(Rect::new(0., 0., 1600., 600.), 1.);
        instance.handle(ViewAction::Resize(wide.clone()))?;

        assert!((instance.borrow_camera().aspect - 8. / 3.).abs() < EPSILON);
        assert_eq!((1600., 600.), instance.borrow_particles().get_size());
        assert_eq!(&wide, instance.borrow_viewport());

        // picking follows the new projection
        click_body(&mut instance, EARTH)?;
        assert_eq!(FocusState::Focusing(EARTH), instance.focus_state());

        // a degenerate area keeps the last usable aspect
        instance.handle(ViewAction::Resize(Viewport::new(Rect::default(), 1.)))?;
        assert!((instance.borrow_camera().aspect - 8. / 3.).abs() < EPSILON);
        assert_eq!((0., 0.), instance.borrow_particles().get_size());

        Ok(())
    }
}
