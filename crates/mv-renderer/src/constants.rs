//! Renderer constants

/// Transform gizmo handle geometry, in units of the gizmo size
pub mod gizmo {
    /// Length of a translate arrow
    pub const ARROW_LENGTH: f32 = 1.0;
    /// Pick radius around a translate arrow
    pub const HIT_RADIUS: f32 = 0.08;
    /// Radius of a rotate ring
    pub const RING_RADIUS: f32 = 0.9;
    /// Pick half-width of a rotate ring
    pub const RING_HIT_THICKNESS: f32 = 0.06;
}
