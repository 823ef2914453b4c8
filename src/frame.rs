use glam::{Mat4, Vec3, Vec4};

use crate::math::Color;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Infinite iterator that yields frame information
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    start_time: std::time::Instant,
    last_frame_time: std::time::Instant,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = std::time::Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn time(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let now = std::time::Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

/// Point light (w = 1) or directional light (w = 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec4,
    pub color: Color,
    /// Distance scale of the falloff; attenuation is 1 / (1 + d² / size)
    pub size: f32,
}

impl Light {
    pub fn new(position: Vec4, color: Color, size: f32) -> Self {
        Self { position, color, size }
    }

    pub fn attenuation(&self) -> f32 {
        if self.size > 0.0 {
            1.0 / self.size
        } else {
            0.0
        }
    }
}

/// Per-frame state shared between the scene and the renderer
#[derive(Debug, Clone)]
pub struct ProgramState {
    camera_transform: Mat4,
    camera_inverse: Mat4,
    pub projection_transform: Mat4,
    pub lights: Vec<Light>,
    /// Seconds since start
    pub animation_time: f32,
}

impl ProgramState {
    pub fn new() -> Self {
        Self {
            camera_transform: Mat4::IDENTITY,
            camera_inverse: Mat4::IDENTITY,
            projection_transform: Mat4::IDENTITY,
            lights: Vec::new(),
            animation_time: 0.0,
        }
    }

    /// Sets the view matrix; the camera's world matrix is kept alongside it
    pub fn set_camera(&mut self, view: Mat4) {
        self.camera_inverse = view;
        self.camera_transform = view.inverse();
    }

    /// World-to-camera matrix
    pub fn camera_inverse(&self) -> Mat4 {
        self.camera_inverse
    }

    /// Camera-to-world matrix
    pub fn camera_transform(&self) -> Mat4 {
        self.camera_transform
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera_transform.w_axis.truncate()
    }

    pub fn advance(&mut self, frame: &FrameInfo) {
        self.animation_time = frame.time;
    }
}

impl Default for ProgramState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_iterator_counts_up() {
        let mut frames = FrameIterator::new();
        let a = frames.next().unwrap();
        let b = frames.next().unwrap();
        assert_eq!(a.number, 0);
        assert_eq!(b.number, 1);
        assert!(b.time >= a.time);
        assert_eq!(frames.frame_number(), 2);
    }

    #[test]
    fn set_camera_keeps_inverse_pair() {
        let mut state = ProgramState::new();
        state.set_camera(Mat4::from_translation(Vec3::new(5.0, -10.0, -30.0)));
        assert!((state.camera_position() - Vec3::new(-5.0, 10.0, 30.0)).length() < 1e-5);
        let product = state.camera_transform() * state.camera_inverse();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn advance_copies_frame_time() {
        let mut state = ProgramState::new();
        state.advance(&FrameInfo::new(3, 1.5, 0.016));
        assert_eq!(state.animation_time, 1.5);
    }

    #[test]
    fn light_attenuation_from_size() {
        let light = Light::new(Vec4::new(0.0, 5.0, 5.0, 1.0), Color::WHITE, 1000.0);
        assert!((light.attenuation() - 0.001).abs() < 1e-9);
        let unbounded = Light::new(Vec4::ZERO, Color::WHITE, 0.0);
        assert_eq!(unbounded.attenuation(), 0.0);
    }
}
