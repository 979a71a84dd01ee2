/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const DARK:   Self = Self { r: 0.118, g: 0.118, b: 0.180, a: 1.0 }; // #1e1e2e
    pub const WHITE:  Self = Self { r: 0.804, g: 0.839, b: 0.957, a: 1.0 }; // #cdd6f4
    pub const PURPLE: Self = Self { r: 0.796, g: 0.651, b: 0.969, a: 1.0 }; // #cba6f7
    pub const GREY:   Self = Self { r: 0.424, g: 0.439, b: 0.525, a: 1.0 }; // #6c7086

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        let alpha = match hex.len() {
            6 => 255,
            8 => byte(hex.get(6..8)?)?,
            _ => return None,
        };

        Some(Self {
            r: byte(hex.get(0..2)?)? as f32 / 255.0,
            g: byte(hex.get(2..4)?)? as f32 / 255.0,
            b: byte(hex.get(4..6)?)? as f32 / 255.0,
            a: alpha as f32 / 255.0,
        })
    }

    /// Convert to a 24-bit terminal colour.
    ///
    /// Terminals have no alpha channel; the colour is pre-multiplied onto
    /// black so translucent theme colours come out darker rather than
    /// ignored.
    #[inline]
    pub fn to_ratatui(self) -> ratatui::style::Color {
        let channel = |c: f32| (c * self.a * 255.0).round().clamp(0.0, 255.0) as u8;
        ratatui::style::Color::Rgb(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}
