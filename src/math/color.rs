use anyhow::{bail, ensure, Context, Result};

/// Linear RGBA color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`; the leading `#` is optional
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        ensure!(digits.is_ascii(), "hex color {hex:?} must be ASCII");
        if digits.len() != 6 && digits.len() != 8 {
            bail!("hex color {hex:?} must have 6 or 8 digits");
        }

        let channel = |i: usize| -> Result<f32> {
            let byte = u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("invalid hex color {hex:?}"))?;
            Ok(byte as f32 / 255.0)
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Random RGB with full opacity
    pub fn random_opaque(rng: &mut fastrand::Rng) -> Self {
        Self::new(rng.f32(), rng.f32(), rng.f32(), 1.0)
    }

    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
