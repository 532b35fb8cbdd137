//! Color scheme for form inputs

use eframe::egui::{self, Color32};

/// Palette used by form inputs (`c0` background through `c3` text)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    pub c0: Color32,
    pub c1: Color32,
    pub c2: Color32,
    pub c3: Color32,
    pub dark: bool,
}

impl ColorScheme {
    pub fn dark() -> Self {
        Self {
            c0: Color32::from_rgb(40, 40, 40),
            c1: Color32::from_rgb(45, 45, 45),
            c2: Color32::from_rgb(60, 60, 60),
            c3: Color32::from_rgb(220, 220, 220),
            dark: true,
        }
    }

    pub fn light() -> Self {
        Self {
            c0: Color32::from_rgb(255, 255, 255),
            c1: Color32::from_rgb(246, 246, 246),
            c2: Color32::from_rgb(209, 213, 219),
            c3: Color32::from_rgb(30, 30, 30),
            dark: false,
        }
    }

    /// Palette for a configured theme name
    pub fn for_theme(theme: &str) -> Self {
        match theme {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Matching egui visuals
    pub fn visuals(&self) -> egui::Visuals {
        if self.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup() {
        assert_eq!(ColorScheme::for_theme("light"), ColorScheme::light());
        assert_eq!(ColorScheme::for_theme("dark"), ColorScheme::dark());
        assert_eq!(ColorScheme::for_theme("solarized"), ColorScheme::dark());
    }
}
