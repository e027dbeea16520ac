// THEORY:
// The formatter is the last stage: it renders the dominant `Color` as the CSS value the
// consuming UI stores next to a review. The alpha is a fixed presentation convention of
// that UI, not a value derived from the image.

pub mod formatter {
    use crate::core_modules::color::color::Color;
    use std::fmt;

    pub const ACCENT_ALPHA: f32 = 0.8;

    /// Displays a color as a CSS `rgba(...)` value with the fixed accent alpha.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct AccentRgba(pub Color);

    impl fmt::Display for AccentRgba {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let Color { red, green, blue } = self.0;
            write!(f, "rgba({red}, {green}, {blue}, {ACCENT_ALPHA})")
        }
    }

    pub fn to_rgba_string(color: Color) -> String {
        AccentRgba(color).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::formatter::*;
    use crate::core_modules::color::color::Color;

    #[test]
    fn renders_css_rgba() {
        assert_eq!(to_rgba_string(Color::new(1, 0, 0)), "rgba(1, 0, 0, 0.8)");
        assert_eq!(
            to_rgba_string(Color::new(255, 128, 7)),
            "rgba(255, 128, 7, 0.8)"
        );
    }
}
