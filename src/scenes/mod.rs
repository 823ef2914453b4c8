mod car_track;
mod common;
mod swaying_boxes;

pub use car_track::{chase_view, world_view, CarTrack, ViewMode, CAR_STEP};
pub use common::{initial_camera, prepare_frame, scene_light};
pub use swaying_boxes::{box_style, BoxStyle, SwayingBoxes, BOX_COUNT};

use anyhow::Result;

use crate::config::AppConfig;
use crate::core::KeyBinding;
use crate::draw::DrawList;
use crate::frame::ProgramState;

/// Everything a key binding or panel button can ask a scene to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ChangeColors,
    ToggleOutline,
    ToggleSway,
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    ResetCar,
    ToggleView,
}

/// Scene construction and per-frame drawing
pub trait Scene {
    fn name(&self) -> &str;

    /// Controls to register once at setup
    fn bindings(&self) -> Vec<KeyBinding<Action>>;

    /// Apply an action; actions the scene did not bind are ignored
    fn trigger(&mut self, action: Action);

    /// Issue this frame's draw calls. May also move the camera.
    fn display(&mut self, state: &mut ProgramState, draws: &mut DrawList);

    /// Live measurements for the control panel
    fn readouts(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Whether the scene places the camera itself, suspending free movement
    fn drives_camera(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SceneKind {
    SwayingBoxes,
    CarTrack,
}

pub fn create_scene(kind: SceneKind, config: &AppConfig) -> Result<Box<dyn Scene>> {
    let scene: Box<dyn Scene> = match kind {
        SceneKind::SwayingBoxes => {
            let rng = match config.seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            Box::new(SwayingBoxes::new(rng))
        }
        SceneKind::CarTrack => Box::new(CarTrack::new(config.camera_blend)?),
    };
    Ok(scene)
}
