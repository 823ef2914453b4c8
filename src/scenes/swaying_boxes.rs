use crate::core::{Button, KeyBinding, KeyCombo};
use crate::draw::DrawList;
use crate::frame::ProgramState;
use crate::geometry::{ShapeKind, Topology};
use crate::material::Material;
use crate::math::{box_transform, sway_angle, Color};

use super::{Action, Scene};

pub const BOX_COUNT: usize = 8;

/// How one box of the stack is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxStyle {
    pub shape: ShapeKind,
    pub primitive: Topology,
    /// Tinted by the box's entry in the color array, otherwise plain white lines
    pub tinted: bool,
}

/// Outlines win over everything; otherwise even boxes are strips and odd boxes solid cubes
pub fn box_style(index: usize, outlined: bool) -> BoxStyle {
    if outlined {
        BoxStyle {
            shape: ShapeKind::Outline,
            primitive: Topology::LineList,
            tinted: false,
        }
    } else if index % 2 == 0 {
        BoxStyle {
            shape: ShapeKind::TriangleStrip,
            primitive: Topology::TriangleStrip,
            tinted: true,
        }
    } else {
        BoxStyle {
            shape: ShapeKind::Cube,
            primitive: Topology::TriangleList,
            tinted: true,
        }
    }
}

/// Stack of eight hinged boxes rocking back and forth
pub struct SwayingBoxes {
    colors: [Color; BOX_COUNT],
    outlined: bool,
    swaying: bool,
    angle: f32,
    rng: fastrand::Rng,
}

impl SwayingBoxes {
    pub fn new(mut rng: fastrand::Rng) -> Self {
        let colors = std::array::from_fn(|_| Color::random_opaque(&mut rng));
        Self {
            colors,
            outlined: false,
            swaying: true,
            angle: sway_angle(0.0, true),
            rng,
        }
    }

    /// Fresh random color for every box
    pub fn set_colors(&mut self) {
        for color in &mut self.colors {
            *color = Color::random_opaque(&mut self.rng);
        }
        log::debug!("Box colors changed");
    }

    pub fn toggle_outline(&mut self) {
        self.outlined = !self.outlined;
        log::debug!("Outline: {}", self.outlined);
    }

    pub fn toggle_sway(&mut self) {
        self.swaying = !self.swaying;
        log::debug!("Sway: {}", self.swaying);
    }

    pub fn colors(&self) -> &[Color; BOX_COUNT] {
        &self.colors
    }

    pub fn outlined(&self) -> bool {
        self.outlined
    }

    pub fn swaying(&self) -> bool {
        self.swaying
    }

    /// Hinge angle used by the most recent frame
    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl Scene for SwayingBoxes {
    fn name(&self) -> &str {
        "Swaying Boxes"
    }

    fn bindings(&self) -> Vec<KeyBinding<Action>> {
        vec![
            KeyBinding::new("Change Colors", KeyCombo::key(Button::KeyC), Action::ChangeColors),
            KeyBinding::new("Outline", KeyCombo::key(Button::KeyO), Action::ToggleOutline),
            KeyBinding::new("Sit still", KeyCombo::key(Button::KeyM), Action::ToggleSway),
        ]
    }

    fn trigger(&mut self, action: Action) {
        match action {
            Action::ChangeColors => self.set_colors(),
            Action::ToggleOutline => self.toggle_outline(),
            Action::ToggleSway => self.toggle_sway(),
            _ => {}
        }
    }

    fn display(&mut self, state: &mut ProgramState, draws: &mut DrawList) {
        self.angle = sway_angle(state.animation_time, self.swaying);

        for (index, color) in self.colors.iter().enumerate() {
            let style = box_style(index, self.outlined);
            let material = if style.tinted {
                Material::plastic().with_color(*color)
            } else {
                Material::basic()
            };
            draws.draw(style.shape, box_transform(index, self.angle), material, style.primitive);
        }
    }

    fn readouts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Angle", format!("{:.2}°", self.angle.to_degrees())),
            ("Swaying", self.swaying.to_string()),
            ("Outlined", self.outlined.to_string()),
        ]
    }
}
