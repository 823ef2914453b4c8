use box_scenes::draw::DrawList;
use box_scenes::frame::ProgramState;
use box_scenes::geometry::{ShapeKind, Topology};
use box_scenes::material::ShaderKind;
use box_scenes::math::{box_transform, max_abs_diff, sway_angle, SWAY_MAX_ANGLE};
use box_scenes::scenes::{Action, Scene, SwayingBoxes, BOX_COUNT};
use glam::{Mat4, Vec3};

fn scene(seed: u64) -> SwayingBoxes {
    SwayingBoxes::new(fastrand::Rng::with_seed(seed))
}

fn frame_at(scene: &mut SwayingBoxes, time: f32) -> DrawList {
    let mut state = ProgramState::new();
    state.animation_time = time;
    let mut draws = DrawList::new();
    scene.display(&mut state, &mut draws);
    draws
}

#[cfg(test)]
mod swaying_boxes_tests {
    use super::*;

    #[test]
    fn test_sway_angle_stays_in_range() {
        for step in 0..2000 {
            let t = step as f32 * 0.013 - 5.0;
            let angle = sway_angle(t, true);
            assert!(angle >= -1e-6 && angle <= SWAY_MAX_ANGLE + 1e-6, "t={} angle={}", t, angle);
        }
    }

    #[test]
    fn test_sway_angle_pinned_when_still() {
        for t in [0.0, 0.5, 3.7, 100.0] {
            assert_eq!(sway_angle(t, false), SWAY_MAX_ANGLE);
        }
    }

    #[test]
    fn test_base_box_is_plain_scale() {
        for angle in [0.0, 0.05, SWAY_MAX_ANGLE] {
            let base = box_transform(0, angle);
            assert_eq!(base, Mat4::from_scale(Vec3::new(1.0, 1.5, 1.0)));
            assert_eq!(base.w_axis.truncate(), Vec3::ZERO);
        }
    }

    #[test]
    fn test_draws_eight_boxes_per_frame() {
        let mut boxes = scene(3);
        let draws = frame_at(&mut boxes, 2.0);
        assert_eq!(draws.len(), BOX_COUNT);
        assert_eq!(draws.calls()[0].model, Mat4::from_scale(Vec3::new(1.0, 1.5, 1.0)));
    }

    #[test]
    fn test_alternating_shapes_with_box_colors() {
        let mut boxes = scene(5);
        let colors = *boxes.colors();
        let draws = frame_at(&mut boxes, 1.0);

        for (i, call) in draws.iter().enumerate() {
            assert_eq!(call.material.shader, ShaderKind::Phong);
            assert_eq!(call.material.color, colors[i]);
            if i % 2 == 0 {
                assert_eq!(call.shape, ShapeKind::TriangleStrip);
                assert_eq!(call.primitive, Topology::TriangleStrip);
            } else {
                assert_eq!(call.shape, ShapeKind::Cube);
                assert_eq!(call.primitive, Topology::TriangleList);
            }
        }
    }

    #[test]
    fn test_outline_mode_draws_white_lines() {
        let mut boxes = scene(5);
        boxes.trigger(Action::ToggleOutline);
        let draws = frame_at(&mut boxes, 1.0);

        assert!(draws.iter().all(|call| call.shape == ShapeKind::Outline
            && call.primitive == Topology::LineList
            && call.material.shader == ShaderKind::Basic));

        boxes.trigger(Action::ToggleOutline);
        let draws = frame_at(&mut boxes, 1.0);
        assert!(draws.iter().all(|call| call.shape != ShapeKind::Outline));
    }

    #[test]
    fn test_sit_still_freezes_the_stack() {
        let mut boxes = scene(1);
        boxes.trigger(Action::ToggleSway);
        assert!(!boxes.swaying());

        let early = frame_at(&mut boxes, 0.3);
        let late = frame_at(&mut boxes, 7.9);
        for (a, b) in early.iter().zip(late.iter()) {
            assert!(max_abs_diff(a.model, b.model) < 1e-6);
        }
        assert_eq!(boxes.angle(), SWAY_MAX_ANGLE);
    }

    #[test]
    fn test_stack_moves_while_swaying() {
        let mut boxes = scene(1);
        let a = frame_at(&mut boxes, 0.0);
        let b = frame_at(&mut boxes, 1.0);
        assert!(max_abs_diff(a.calls()[7].model, b.calls()[7].model) > 1e-3);
        // the base never moves
        assert_eq!(a.calls()[0].model, b.calls()[0].model);
    }

    #[test]
    fn test_change_colors_replaces_colors() {
        let mut boxes = scene(9);
        let before = *boxes.colors();
        boxes.trigger(Action::ChangeColors);
        assert_ne!(before, *boxes.colors());
        assert!(boxes.colors().iter().all(|c| c.is_opaque()));
    }

    #[test]
    fn test_same_seed_same_colors() {
        assert_eq!(scene(42).colors(), scene(42).colors());
    }

    #[test]
    fn test_bindings_labels_and_keys() {
        let labels: Vec<_> = scene(0)
            .bindings()
            .iter()
            .map(|b| format!("{} {}", b.label, b.combo))
            .collect();
        assert_eq!(labels, vec!["Change Colors c", "Outline o", "Sit still m"]);
    }
}
