use ratatui::style::Color;

/// Runtime palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey1: Color,
    pub grey2: Color,

    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,
    pub blue: Color,
    pub purple: Color,

    /// Trigger highlight while a hold is active
    pub active: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            green: Color::Rgb(0xa9, 0xb6, 0x65),
            aqua: Color::Rgb(0x89, 0xb4, 0x82),
            blue: Color::Rgb(0x7d, 0xae, 0xa3),
            purple: Color::Rgb(0xd3, 0x86, 0x9b),
            active: Color::Rgb(0xe7, 0x8a, 0x4e),
        }
    }
}

/// Mix `fg` over `bg` at `opacity` (0 = bg, 1 = fg)
///
/// Terminals have no alpha, so non-RGB colors snap at the midpoint.
pub fn blend(fg: Color, bg: Color, opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| -> u8 {
                (b as f64 + (f as f64 - b as f64) * opacity).round() as u8
            };
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if opacity >= 0.5 => fg,
        _ => bg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 100);
        assert_eq!(blend(fg, bg, 1.0), fg);
        assert_eq!(blend(fg, bg, 0.0), bg);
        assert_eq!(blend(fg, bg, 0.5), Color::Rgb(100, 50, 50));
    }

    #[test]
    fn test_blend_clamps_overshoot() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 100);
        assert_eq!(blend(fg, bg, 1.4), fg);
        assert_eq!(blend(fg, bg, -0.2), bg);
    }

    #[test]
    fn test_blend_named_colors_snap() {
        assert_eq!(blend(Color::White, Color::Black, 0.7), Color::White);
        assert_eq!(blend(Color::White, Color::Black, 0.2), Color::Black);
    }
}
