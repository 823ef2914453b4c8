use glam::{Mat4, Vec3};

use crate::core::{Button, Controller};

pub const CAMERA_SPEED: f32 = 0.1;
pub const CAMERA_ROTATION_SPEED: f32 = 0.02;

/// Free camera steered by held keys: W/S thrust, A/D strafe, Space/Shift rise and sink, Q/E turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl FlyCamera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Level camera at `position` facing -Z
    pub fn looking_down_z(position: Vec3) -> Self {
        Self::new(position, std::f32::consts::PI, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    /// Applies one frame of movement for the buttons currently held
    pub fn update(&mut self, controller: &dyn Controller) {
        let axis = |positive: Button, negative: Button| -> f32 {
            match (controller.is_down(positive), controller.is_down(negative)) {
                (true, false) => 1.0,
                (false, true) => -1.0,
                _ => 0.0,
            }
        };

        let thrust = axis(Button::KeyW, Button::KeyS);
        let strafe = axis(Button::KeyD, Button::KeyA);
        let lift = axis(Button::Space, Button::Shift);
        let turn = axis(Button::KeyE, Button::KeyQ);

        let displacement = self.forward() * thrust * CAMERA_SPEED
            + self.right() * strafe * CAMERA_SPEED
            + Vec3::Y * lift * CAMERA_SPEED;

        self.position += displacement;
        // Yaw is measured from +Z, so turning right decreases it
        self.yaw -= turn * CAMERA_ROTATION_SPEED;
    }
}
