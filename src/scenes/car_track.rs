use anyhow::{Context, Result};
use glam::{Mat4, Vec3};

use crate::core::{Button, KeyBinding, KeyCombo};
use crate::draw::DrawList;
use crate::frame::ProgramState;
use crate::geometry::{ShapeKind, Topology};
use crate::material::Material;
use crate::math::{blend_matrices, Color};

use super::{Action, Scene};

/// Distance the car moves per key press
pub const CAR_STEP: f32 = 0.1;

const TRACK_SCALE: Vec3 = Vec3::new(3.0, 0.1, 20.0);
const CAR_SCALE: Vec3 = Vec3::new(0.75, 0.5, 1.25);
const TRACK_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);
const CAR_HEX: &str = "#1a9ffa";

const WORLD_EYE: Vec3 = Vec3::new(0.0, 12.0, 30.0);
const CHASE_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 8.0);
const CHASE_AIM: Vec3 = Vec3::new(0.0, 0.5, -6.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ViewMode {
    #[default]
    World = 0,
    Chase = 1,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::World => ViewMode::Chase,
            ViewMode::Chase => ViewMode::World,
        }
    }
}

/// Fixed overview of the whole track
pub fn world_view() -> Mat4 {
    Mat4::look_at_rh(WORLD_EYE, Vec3::ZERO, Vec3::Y)
}

/// Behind and above the car, aimed down the track ahead of it
pub fn chase_view(car: Vec3) -> Mat4 {
    Mat4::look_at_rh(car + CHASE_OFFSET, car + CHASE_AIM, Vec3::Y)
}

/// A car that slides around a flat track, watched by a camera that eases between two framings
pub struct CarTrack {
    position: Vec3,
    view_mode: ViewMode,
    blend: f32,
    car_material: Material,
}

impl CarTrack {
    pub fn new(blend: f32) -> Result<Self> {
        let car_color = Color::from_hex(CAR_HEX).context("Invalid car color")?;
        Ok(Self {
            position: Vec3::ZERO,
            view_mode: ViewMode::World,
            blend,
            car_material: Material::plastic().with_color(car_color),
        })
    }

    pub fn move_forward(&mut self) {
        self.position.z -= CAR_STEP;
    }

    pub fn move_backward(&mut self) {
        self.position.z += CAR_STEP;
    }

    pub fn move_left(&mut self) {
        self.position.x -= CAR_STEP;
    }

    pub fn move_right(&mut self) {
        self.position.x += CAR_STEP;
    }

    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        log::debug!("Car reset");
    }

    pub fn toggle_view(&mut self) {
        self.view_mode = self.view_mode.toggled();
        log::debug!("View mode: {:?}", self.view_mode);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// View matrix the camera is easing toward
    pub fn desired_view(&self) -> Mat4 {
        match self.view_mode {
            ViewMode::World => world_view(),
            ViewMode::Chase => chase_view(self.position),
        }
    }

    fn track_transform() -> Mat4 {
        // top face flush with y = 0
        Mat4::from_translation(Vec3::new(0.0, -TRACK_SCALE.y, 0.0)) * Mat4::from_scale(TRACK_SCALE)
    }

    fn car_transform(&self) -> Mat4 {
        Mat4::from_translation(self.position + Vec3::new(0.0, CAR_SCALE.y, 0.0)) * Mat4::from_scale(CAR_SCALE)
    }
}

impl Scene for CarTrack {
    fn name(&self) -> &str {
        "Car Track"
    }

    fn bindings(&self) -> Vec<KeyBinding<Action>> {
        vec![
            KeyBinding::new("Forward", KeyCombo::key(Button::ArrowUp), Action::MoveForward),
            KeyBinding::new("Backward", KeyCombo::key(Button::ArrowDown), Action::MoveBackward),
            KeyBinding::new("Left", KeyCombo::key(Button::ArrowLeft), Action::MoveLeft),
            KeyBinding::new("Right", KeyCombo::key(Button::ArrowRight), Action::MoveRight),
            KeyBinding::new("Reset", KeyCombo::key(Button::KeyR), Action::ResetCar),
            KeyBinding::new("Toggle View", KeyCombo::key(Button::KeyV), Action::ToggleView),
        ]
    }

    fn trigger(&mut self, action: Action) {
        match action {
            Action::MoveForward => self.move_forward(),
            Action::MoveBackward => self.move_backward(),
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::ResetCar => self.reset(),
            Action::ToggleView => self.toggle_view(),
            _ => {}
        }
    }

    fn display(&mut self, state: &mut ProgramState, draws: &mut DrawList) {
        draws.draw(
            ShapeKind::Cube,
            Self::track_transform(),
            Material::plastic().with_color(TRACK_COLOR),
            Topology::TriangleList,
        );
        draws.draw(
            ShapeKind::Cube,
            self.car_transform(),
            self.car_material,
            Topology::TriangleList,
        );

        // blend camera world matrices, then hand back the view
        let desired = self.desired_view().inverse();
        let blended = blend_matrices(state.camera_transform(), desired, self.blend);
        state.set_camera(blended.inverse());
    }

    fn readouts(&self) -> Vec<(&'static str, String)> {
        let p = self.position;
        vec![
            ("Car", format!("({:.1}, {:.1}, {:.1})", p.x, p.y, p.z)),
            ("View", format!("{:?}", self.view_mode)),
        ]
    }

    fn drives_camera(&self) -> bool {
        true
    }
}
