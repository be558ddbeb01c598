//! Orbit camera for the 3D viewport

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::{Mat4, Vec2, Vec3, Vec4};

use mv_core::{OrbitToggle, Ray};

/// Pointer position in viewport pixels plus the viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Horizontal position, pixels from the left edge
    pub x: f32,
    /// Vertical position, pixels from the top edge
    pub y: f32,
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
}

impl PointerEvent {
    /// Create a pointer event
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized device coordinates, `[-1, 1]` with +Y up
    pub fn ndc(&self) -> Vec2 {
        let width = self.width.max(1.0);
        let height = self.height.max(1.0);
        Vec2::new((2.0 * self.x / width) - 1.0, 1.0 - (2.0 * self.y / height))
    }
}

/// Orbit camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Orbit pivot
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Orbit yaw in radians
    pub yaw: f32,
    /// Orbit pitch in radians
    pub pitch: f32,
    /// Distance from the target
    pub distance: f32,
}

impl Camera {
    /// Create a new camera with default parameters
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Z,
            fov: 40.0_f32.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
            yaw: 45.0_f32.to_radians(),
            pitch: 30.0_f32.to_radians(),
            distance: 5.0,
        };
        camera.update_position_from_orbit();
        camera
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(1e-3);
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch =
            (self.pitch + delta_pitch).clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
        self.update_position_from_orbit();
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * 0.002;
        self.target += right * (-delta_x * scale) + up * (delta_y * scale);
        self.update_position_from_orbit();
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(0.1, 500.0);
        self.update_position_from_orbit();
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.cos();
        let y = self.distance * self.pitch.cos() * self.yaw.sin();
        let z = self.distance * self.pitch.sin();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Fit camera to show the given bounding sphere
    pub fn fit_all(&mut self, center: Vec3, radius: f32) {
        self.target = center;
        self.distance = (radius * 2.5).max(1.0);
        self.update_position_from_orbit();
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix (depth range `[0, 1]`)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Convert screen coordinates to world ray
    pub fn screen_to_ray(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> Ray {
        self.pointer_ray(&PointerEvent::new(
            screen_x,
            screen_y,
            screen_width,
            screen_height,
        ))
    }

    /// World ray through the pointer position
    pub fn pointer_ray(&self, pointer: &PointerEvent) -> Ray {
        let ndc = pointer.ndc();
        let inv_view_proj = (self.projection_matrix() * self.view_matrix()).inverse();

        let near = inv_view_proj * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Ray::new(near, far - near)
    }

    /// Project a world point to viewport pixels. `None` if behind the camera.
    pub fn world_to_screen(&self, point: Vec3, screen_width: f32, screen_height: f32) -> Option<Vec2> {
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen_width,
            (1.0 - ndc.y) * 0.5 * screen_height,
        ))
    }
}

/// Enable switch for camera orbiting, shared with the gizmo adapter
#[derive(Debug, Clone)]
pub struct OrbitControls {
    enabled: Arc<AtomicBool>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl OrbitControls {
    /// Create enabled controls
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether pointer drags may orbit the camera
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

impl OrbitToggle for OrbitControls {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new(16.0 / 9.0);
        let ray = camera.screen_to_ray(800.0, 450.0, 1600.0, 900.0);
        assert!(ray.direction.abs_diff_eq(camera.forward(), 1e-3));
    }

    #[test]
    fn test_world_to_screen_inverts_pointer_ray() {
        let camera = Camera::new(1.0);
        let ray = camera.screen_to_ray(120.0, 340.0, 500.0, 500.0);
        let screen = camera.world_to_screen(ray.at(4.0), 500.0, 500.0).unwrap();
        assert!(screen.abs_diff_eq(Vec2::new(120.0, 340.0), 0.5));
    }

    #[test]
    fn test_point_behind_camera_not_projected() {
        let camera = Camera::new(1.0);
        let behind = camera.position - camera.forward() * 2.0;
        assert!(camera.world_to_screen(behind, 100.0, 100.0).is_none());
    }

    #[test]
    fn test_ndc_corners() {
        let top_left = PointerEvent::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(top_left.ndc(), Vec2::new(-1.0, 1.0));
        let bottom_right = PointerEvent::new(200.0, 100.0, 200.0, 100.0);
        assert_eq!(bottom_right.ndc(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_orbit_controls_toggle_is_shared() {
        let controls = OrbitControls::new();
        let handle: Box<dyn OrbitToggle> = Box::new(controls.clone());
        assert!(controls.is_enabled());
        handle.set_enabled(false);
        assert!(!controls.is_enabled());
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new(1.0);
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch <= 89.0_f32.to_radians() + 1e-6);
    }
}
