//! Global constants for mv-core

/// Name substring that marks an object as translatable/rotatable
pub const MOVABLE_MARKER: &str = "_mov";

/// Objects at or below this material opacity are treated as invisible
pub const VISIBILITY_THRESHOLD: f32 = 0.01;

/// Hover pulse base emissive intensity
pub const HOVER_BASE_INTENSITY: f32 = 0.3;

/// Hover pulse amplitude
pub const HOVER_PULSE_AMPLITUDE: f32 = 0.2;

/// Hover pulse angular frequency (rad/s), one period is ~1.26 s
pub const HOVER_PULSE_FREQUENCY: f32 = 5.0;

/// Emissive colour applied to a hovered object (full-bright white)
pub const HOVER_HIGHLIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Default colour for objects without an explicit material colour (RGBA)
pub const DEFAULT_COLOR: [f32; 4] = [0.7, 0.7, 0.7, 1.0];
