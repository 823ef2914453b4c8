use crate::math::Color;

/// Which shader program a material is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Lit by the scene lights, tinted by the material color
    Phong,
    /// Unlit, per-vertex color
    Basic,
}

/// Shader choice plus its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shader: ShaderKind,
    pub color: Color,
    pub ambient: f32,
    pub diffusivity: f32,
    pub specularity: f32,
    pub smoothness: f32,
}

impl Material {
    pub const fn phong(color: Color) -> Self {
        Self {
            shader: ShaderKind::Phong,
            color,
            ambient: 0.0,
            diffusivity: 1.0,
            specularity: 1.0,
            smoothness: 40.0,
        }
    }

    /// White plastic: strong ambient term so unlit faces keep their hue
    pub const fn plastic() -> Self {
        Self {
            ambient: 0.4,
            diffusivity: 0.6,
            ..Self::phong(Color::WHITE)
        }
    }

    /// Material for shapes that carry their own vertex colors
    pub const fn basic() -> Self {
        Self {
            shader: ShaderKind::Basic,
            color: Color::WHITE,
            ambient: 1.0,
            diffusivity: 0.0,
            specularity: 0.0,
            smoothness: 0.0,
        }
    }

    /// Same material, different color
    pub const fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub(crate) fn params(&self) -> [f32; 4] {
        [self.ambient, self.diffusivity, self.specularity, self.smoothness]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_color_keeps_lighting() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let m = Material::plastic().with_color(red);
        assert_eq!(m.color, red);
        assert_eq!(m.ambient, 0.4);
        assert_eq!(m.diffusivity, 0.6);
        assert_eq!(m.shader, ShaderKind::Phong);
    }

    #[test]
    fn test_basic_is_unlit() {
        let m = Material::basic();
        assert_eq!(m.shader, ShaderKind::Basic);
        assert_eq!(m.params(), [1.0, 0.0, 0.0, 0.0]);
    }
}
