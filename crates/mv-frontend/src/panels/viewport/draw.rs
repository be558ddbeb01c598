//! Painter-based scene and gizmo drawing
//!
//! Meshes are drawn as the screen-space hull of their bounding box,
//! far to near, tinted by material colour and emissive highlight.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use uuid::Uuid;

use mv_core::{Material, Scene};
use mv_renderer::{Camera, GizmoAxis, GizmoOperation, GizmoWidget, TransformGizmo};
use mv_renderer::constants::gizmo as gizmo_constants;

use crate::theme::palette;

const RING_SEGMENTS: usize = 48;

/// Screen mapping for one frame
pub struct ViewTransform<'a> {
    pub camera: &'a Camera,
    pub rect: egui::Rect,
}

impl ViewTransform<'_> {
    pub fn project(&self, point: Vec3) -> Option<egui::Pos2> {
        let screen: Vec2 = self
            .camera
            .world_to_screen(point, self.rect.width(), self.rect.height())?;
        Some(self.rect.min + egui::vec2(screen.x, screen.y))
    }

    fn depth(&self, point: Vec3) -> f32 {
        (point - self.camera.position).length()
    }
}

/// Visible fill colour of a material, emissive added on top
pub fn material_color(material: &Material) -> egui::Color32 {
    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let lit = material.color[i] + material.emissive[i] * material.emissive_intensity;
        *channel = (lit.clamp(0.0, 1.0) * 255.0) as u8;
    }
    let alpha = (material.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    egui::Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], alpha)
}

/// Convex hull of screen points (monotone chain)
fn convex_hull(mut points: Vec<egui::Pos2>) -> Vec<egui::Pos2> {
    if points.len() < 3 {
        return points;
    }
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let cross = |o: egui::Pos2, a: egui::Pos2, b: egui::Pos2| {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let mut lower: Vec<egui::Pos2> = Vec::with_capacity(points.len());
    for &p in &points {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<egui::Pos2> = Vec::with_capacity(points.len());
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    // Endpoints are shared between the two chains
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Draw every mesh reachable from `roots`
pub fn draw_scene(
    painter: &egui::Painter,
    view: &ViewTransform,
    scene: &Scene,
    roots: &[Uuid],
    selected: Option<Uuid>,
) {
    let mut shapes = Vec::new();

    for &root in roots {
        for id in scene.subtree(root) {
            let Some(object) = scene.get(id) else {
                continue;
            };
            let (Some(bounds), Some(material)) = (object.bounds, object.material.as_ref()) else {
                continue;
            };
            let Some(world) = scene.world_matrix(id) else {
                continue;
            };

            let corners: Option<Vec<egui::Pos2>> = bounds
                .corners()
                .iter()
                .map(|&c| view.project(world.transform_point3(c)))
                .collect();
            let Some(corners) = corners else {
                continue;
            };

            let depth = view.depth(world.transform_point3(bounds.center()));
            shapes.push((depth, id, convex_hull(corners), material_color(material)));
        }
    }

    shapes.sort_by(|a, b| b.0.total_cmp(&a.0));
    for (_, id, hull, fill) in shapes {
        let stroke = if Some(id) == selected {
            egui::Stroke::new(2.0, palette::SELECTION_OUTLINE)
        } else {
            egui::Stroke::new(1.0, palette::with_alpha(fill, fill.a() / 2))
        };
        painter.add(egui::Shape::convex_polygon(hull, fill, stroke));
    }
}

fn axis_color(axis: GizmoAxis, active: Option<GizmoAxis>) -> egui::Color32 {
    if active == Some(axis) {
        return palette::AXIS_ACTIVE;
    }
    match axis {
        GizmoAxis::X => palette::AXIS_X,
        GizmoAxis::Y => palette::AXIS_Y,
        GizmoAxis::Z => palette::AXIS_Z,
    }
}

/// Draw arrows or rings around the gizmo origin
pub fn draw_gizmo(painter: &egui::Painter, view: &ViewTransform, gizmo: &TransformGizmo) {
    if !gizmo.is_visible() || gizmo.attached().is_none() {
        return;
    }
    let origin = gizmo.position();
    let size = gizmo.size();
    let active = gizmo.drag_axis();

    for axis in GizmoAxis::ALL {
        let stroke = egui::Stroke::new(2.5, axis_color(axis, active));
        match gizmo.operation() {
            GizmoOperation::Translate => {
                let tip = origin + axis.direction() * gizmo_constants::ARROW_LENGTH * size;
                if let (Some(a), Some(b)) = (view.project(origin), view.project(tip)) {
                    painter.line_segment([a, b], stroke);
                    painter.circle_filled(b, 4.0, stroke.color);
                }
            }
            GizmoOperation::Rotate => {
                let normal = axis.direction();
                let u = normal.any_orthonormal_vector();
                let v = normal.cross(u);
                let radius = gizmo_constants::RING_RADIUS * size;
                let points: Option<Vec<egui::Pos2>> = (0..RING_SEGMENTS)
                    .map(|i| {
                        let t = i as f32 / RING_SEGMENTS as f32 * TAU;
                        view.project(origin + (u * t.cos() + v * t.sin()) * radius)
                    })
                    .collect();
                if let Some(points) = points {
                    painter.add(egui::Shape::closed_line(points, stroke));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_color_adds_emissive() {
        let mut material = Material::with_color([0.5, 0.0, 0.0, 1.0]);
        material.emissive = [1.0, 1.0, 1.0];
        material.emissive_intensity = 0.5;

        let color = material_color(&material);
        assert_eq!(color.r(), 255);
        assert_eq!(color.g(), 127);
        assert_eq!(color.g(), color.b());
        assert_eq!(color.a(), 255);
    }

    #[test]
    fn test_material_color_alpha_from_opacity() {
        let material = Material::default().opacity(0.0);
        assert_eq!(material_color(&material).a(), 0);
    }

    #[test]
    fn test_convex_hull_of_square_with_interior_point() {
        let points = vec![
            egui::pos2(0.0, 0.0),
            egui::pos2(1.0, 0.0),
            egui::pos2(0.5, 0.5),
            egui::pos2(1.0, 1.0),
            egui::pos2(0.0, 1.0),
        ];
        let hull = convex_hull(points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&egui::pos2(0.5, 0.5)));
    }
}
