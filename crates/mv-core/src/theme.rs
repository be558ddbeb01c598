//! Theme query injected into UI components

/// Answers whether the viewer is currently drawn with the dark theme
pub trait ThemeProvider {
    fn is_dark_mode(&self) -> bool;
}
