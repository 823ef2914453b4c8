mod color;
mod transform;

pub use color::Color;
pub use transform::{
    base_box_transform, blend_matrices, box_transform, hinge_step, max_abs_diff, stack_frame,
    sway_angle, BOX_SCALE, HINGE_POINT, STACK_STEP, SWAY_FREQUENCY, SWAY_MAX_ANGLE,
};
