use glam::{Mat4, Vec3};
use std::f32::consts::PI;

/// Largest hinge angle of a swaying box, radians
pub const SWAY_MAX_ANGLE: f32 = 0.04 * PI;
/// Angular frequency of the sway, radians per second
pub const SWAY_FREQUENCY: f32 = 0.5 * PI;

/// Unit cube stretched into a 2x3x2 box
pub const BOX_SCALE: Vec3 = Vec3::new(1.0, 1.5, 1.0);
/// Hinge edge of a box in its unscaled frame: top left
pub const HINGE_POINT: Vec3 = Vec3::new(-1.0, 1.5, 0.0);
/// Height of one box in the stack
pub const STACK_STEP: f32 = 3.0;

/// Hinge angle at `time` seconds. Pinned to the maximum while sitting still.
pub fn sway_angle(time: f32, swaying: bool) -> f32 {
    if !swaying {
        return SWAY_MAX_ANGLE;
    }
    let amplitude = 0.5 * SWAY_MAX_ANGLE;
    amplitude + amplitude * (SWAY_FREQUENCY * (time - 1.0)).sin()
}

/// Moves one box up the stack: rotate about the hinge edge, then lift by a box height
pub fn hinge_step(angle: f32) -> Mat4 {
    Mat4::from_translation(HINGE_POINT)
        * Mat4::from_rotation_z(angle)
        * Mat4::from_translation(-HINGE_POINT)
        * Mat4::from_translation(Vec3::new(0.0, STACK_STEP, 0.0))
}

/// Unscaled frame of the next box given the frame of the one below it
pub fn stack_frame(base: Mat4, angle: f32) -> Mat4 {
    base * hinge_step(angle)
}

/// The bottom box never sways
pub fn base_box_transform() -> Mat4 {
    Mat4::from_scale(BOX_SCALE)
}

/// Model matrix of box `index` in a stack hinged at `angle`
pub fn box_transform(index: usize, angle: f32) -> Mat4 {
    if index == 0 {
        return base_box_transform();
    }
    let frame = (0..index).fold(Mat4::IDENTITY, |frame, _| stack_frame(frame, angle));
    frame * Mat4::from_scale(BOX_SCALE)
}

/// Moves `current` a `factor` fraction of the way toward `desired`, entry by entry
pub fn blend_matrices(current: Mat4, desired: Mat4, factor: f32) -> Mat4 {
    Mat4::from_cols(
        current.x_axis.lerp(desired.x_axis, factor),
        current.y_axis.lerp(desired.y_axis, factor),
        current.z_axis.lerp(desired.z_axis, factor),
        current.w_axis.lerp(desired.w_axis, factor),
    )
}

/// Largest absolute entry-wise difference between two matrices
pub fn max_abs_diff(a: Mat4, b: Mat4) -> f32 {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}
