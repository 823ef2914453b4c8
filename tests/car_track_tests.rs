use box_scenes::draw::DrawList;
use box_scenes::frame::ProgramState;
use box_scenes::geometry::{ShapeKind, Topology};
use box_scenes::math::max_abs_diff;
use box_scenes::scenes::{chase_view, world_view, Action, CarTrack, Scene, ViewMode, CAR_STEP};
use glam::{Mat4, Vec3};

fn run_frame(scene: &mut CarTrack, state: &mut ProgramState) -> DrawList {
    let mut draws = DrawList::new();
    scene.display(state, &mut draws);
    draws
}

fn start_state() -> ProgramState {
    let mut state = ProgramState::new();
    state.set_camera(Mat4::from_translation(Vec3::new(5.0, -10.0, -30.0)));
    state
}

#[cfg(test)]
mod car_track_tests {
    use super::*;

    #[test]
    fn test_moves_are_additive() {
        let mut car = CarTrack::new(0.1).unwrap();
        car.move_forward();
        car.move_forward();
        car.move_right();
        car.move_backward();
        car.move_left();
        car.move_left();
        let p = car.position();
        assert!((p - Vec3::new(-CAR_STEP, 0.0, -CAR_STEP)).length() < 1e-6, "{:?}", p);
    }

    #[test]
    fn test_reset_returns_to_origin() {
        let mut car = CarTrack::new(0.1).unwrap();
        for _ in 0..3 {
            car.trigger(Action::MoveRight);
        }
        assert!((car.position().x - 0.3).abs() < 1e-6);
        car.trigger(Action::ResetCar);
        assert_eq!(car.position(), Vec3::ZERO);
    }

    #[test]
    fn test_toggle_view_flips_mode() {
        let mut car = CarTrack::new(0.1).unwrap();
        assert_eq!(car.view_mode(), ViewMode::World);
        car.trigger(Action::ToggleView);
        assert_eq!(car.view_mode(), ViewMode::Chase);
        car.trigger(Action::ToggleView);
        assert_eq!(car.view_mode(), ViewMode::World);
    }

    #[test]
    fn test_draws_track_then_car() {
        let mut car = CarTrack::new(0.1).unwrap();
        car.move_backward();
        let mut state = start_state();
        let draws = run_frame(&mut car, &mut state);

        assert_eq!(draws.len(), 2);
        assert!(draws.iter().all(|c| c.shape == ShapeKind::Cube && c.primitive == Topology::TriangleList));

        let car_center = draws.calls()[1].model.transform_point3(Vec3::ZERO);
        assert!((car_center.z - CAR_STEP).abs() < 1e-6);
        assert!(car_center.y > 0.0);
        assert_ne!(draws.calls()[0].material.color, draws.calls()[1].material.color);
    }

    #[test]
    fn test_camera_never_jumps() {
        let mut car = CarTrack::new(0.1).unwrap();
        let mut state = start_state();
        let desired = world_view().inverse();

        let before = state.camera_transform();
        run_frame(&mut car, &mut state);
        let after = state.camera_transform();

        let remaining = max_abs_diff(before, desired);
        let moved = max_abs_diff(before, after);
        assert!(moved > 0.0);
        assert!(moved <= 0.1 * remaining + 1e-4, "moved {} of {}", moved, remaining);
    }

    #[test]
    fn test_camera_converges_geometrically() {
        let mut car = CarTrack::new(0.1).unwrap();
        let mut state = start_state();
        let desired = world_view().inverse();

        let mut remaining = max_abs_diff(state.camera_transform(), desired);
        for _ in 0..20 {
            run_frame(&mut car, &mut state);
            let next = max_abs_diff(state.camera_transform(), desired);
            assert!((next - 0.9 * remaining).abs() < 1e-3, "{} after {}", next, remaining);
            remaining = next;
        }
        for _ in 0..200 {
            run_frame(&mut car, &mut state);
        }
        assert!(max_abs_diff(state.camera_transform(), desired) < 1e-3);
    }

    #[test]
    fn test_toggling_view_eases_toward_chase() {
        let mut car = CarTrack::new(0.1).unwrap();
        let mut state = start_state();
        for _ in 0..300 {
            run_frame(&mut car, &mut state);
        }
        assert!(max_abs_diff(state.camera_transform(), world_view().inverse()) < 1e-3);

        for _ in 0..5 {
            car.move_forward();
        }
        car.toggle_view();
        let desired = chase_view(car.position()).inverse();

        let before = state.camera_transform();
        let remaining = max_abs_diff(before, desired);
        run_frame(&mut car, &mut state);
        let after = state.camera_transform();

        let moved = max_abs_diff(before, after);
        assert!(remaining > 1.0, "World and chase framings differ");
        assert!(moved > 0.0);
        assert!(moved <= 0.1 * remaining + 1e-4, "moved {} of {}", moved, remaining);
        assert!(max_abs_diff(after, desired) >= 0.9 * remaining - 1e-3);
    }

    #[test]
    fn test_chase_view_tracks_the_car() {
        let mut car = CarTrack::new(0.1).unwrap();
        car.trigger(Action::ToggleView);
        for _ in 0..10 {
            car.trigger(Action::MoveForward);
        }
        let mut state = start_state();
        for _ in 0..300 {
            run_frame(&mut car, &mut state);
        }

        let desired = chase_view(car.position());
        assert!(max_abs_diff(state.camera_inverse(), desired) < 1e-2);
        let eye = state.camera_position();
        assert!(eye.z > car.position().z, "Camera sits behind the car");
        assert!(eye.y > 0.0, "Camera sits above the track");
    }

    #[test]
    fn test_bindings_cover_all_controls() {
        let car = CarTrack::new(0.1).unwrap();
        let actions: Vec<_> = car.bindings().iter().map(|b| b.action).collect();
        assert_eq!(
            actions,
            vec![
                Action::MoveForward,
                Action::MoveBackward,
                Action::MoveLeft,
                Action::MoveRight,
                Action::ResetCar,
                Action::ToggleView,
            ]
        );
        assert!(car.drives_camera());
    }
}
