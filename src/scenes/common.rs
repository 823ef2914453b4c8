use glam::{Mat4, Vec3, Vec4};

use crate::camera::FlyCamera;
use crate::config::AppConfig;
use crate::frame::{Light, ProgramState};
use crate::math::Color;

/// Where the free camera starts: the view is a plain translation by (5, -10, -30)
pub fn initial_camera() -> FlyCamera {
    FlyCamera::looking_down_z(Vec3::new(-5.0, 10.0, 30.0))
}

pub fn scene_light(config: &AppConfig) -> Light {
    Light::new(
        Vec4::from_array(config.light.position),
        Color::from_array(config.light.color),
        config.light.size,
    )
}

/// Projection and lighting every scene shares, refreshed each frame for the current aspect
pub fn prepare_frame(state: &mut ProgramState, config: &AppConfig, aspect: f32) {
    state.projection_transform = Mat4::perspective_rh(
        config.fov_radians(),
        aspect.max(f32::EPSILON),
        config.camera.near,
        config.camera.far,
    );
    state.lights = vec![scene_light(config)];
}
