//! Zoom/pan viewport
//!
//! Zoom is applied around the screen center, so panning moves the
//! viewport origin and scrolling never shifts what sits in the middle.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, SCROLL_ZOOM_DIVISOR};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World position shown at the screen's top-left corner at zoom 1
    pub viewport_origin: Vec2,
    pub zoom: f32,
    /// Screen size in pixels
    pub screen_size: Vec2,
}

impl Camera {
    /// Camera centered on the level
    pub fn new(screen_size: Vec2, level_size: Vec2) -> Self {
        Self {
            viewport_origin: level_size / 2.0 - screen_size / 2.0,
            zoom: DEFAULT_ZOOM,
            screen_size,
        }
    }

    fn half_screen(&self) -> Vec2 {
        self.screen_size / 2.0
    }

    /// World position currently under the middle of the screen
    pub fn center(&self) -> Vec2 {
        self.viewport_origin + self.half_screen()
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let half = self.half_screen();
        (world - self.viewport_origin - half) * self.zoom + half
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let half = self.half_screen();
        (screen - half) / self.zoom + self.viewport_origin + half
    }

    /// Apply a scroll wheel delta (positive scrolls out)
    pub fn zoom_by_scroll(&mut self, delta: f32) {
        self.set_zoom(self.zoom - delta / SCROLL_ZOOM_DIVISOR);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Move the view by a screen-space drag
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.viewport_origin -= screen_delta / self.zoom;
    }

    pub fn resize(&mut self, screen_size: Vec2) {
        let center = self.center();
        self.screen_size = screen_size;
        self.viewport_origin = center - self.half_screen();
    }

    /// World to clip space, y down on screen
    pub fn view_proj(&self) -> Mat4 {
        let half = self.half_screen();
        let proj = Mat4::orthographic_rh(0.0, self.screen_size.x, self.screen_size.y, 0.0, -1.0, 1.0);
        let view = Mat4::from_translation(half.extend(0.0))
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
            * Mat4::from_translation((-self.viewport_origin - half).extend(0.0));
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec2::new(1280.0, 720.0), Vec2::new(3200.0, 3200.0))
    }

    #[test]
    fn test_screen_center_is_level_center() {
        let cam = camera();
        let world = cam.screen_to_world(Vec2::new(640.0, 360.0));
        assert!((world - Vec2::new(1600.0, 1600.0)).length() < 1e-3);
        assert_eq!(cam.center(), Vec2::new(1600.0, 1600.0));
    }

    #[test]
    fn test_round_trip() {
        let mut cam = camera();
        cam.pan(Vec2::new(37.0, -12.0));
        cam.zoom_by_scroll(600.0);
        for p in [Vec2::ZERO, Vec2::new(100.0, 650.0), Vec2::new(1279.0, 3.0)] {
            let back = cam.world_to_screen(cam.screen_to_world(p));
            assert!((back - p).length() < 1e-2, "{p} -> {back}");
        }
    }

    #[test]
    fn test_zoom_scales_distance_from_center() {
        let mut cam = camera();
        cam.set_zoom(2.0);
        let world = cam.screen_to_world(Vec2::new(740.0, 360.0));
        assert!((world - Vec2::new(1650.0, 1600.0)).length() < 1e-3);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut cam = camera();
        cam.zoom_by_scroll(1_000_000.0);
        assert_eq!(cam.zoom, MIN_ZOOM);
        cam.zoom_by_scroll(-1_000_000.0);
        assert_eq!(cam.zoom, MAX_ZOOM);
        cam.zoom = 1.0;
        cam.zoom_by_scroll(-2400.0);
        assert_eq!(cam.zoom, 2.0);
    }

    #[test]
    fn test_pan_moves_world_under_cursor() {
        let mut cam = camera();
        cam.set_zoom(1.0);
        let before = cam.screen_to_world(Vec2::new(100.0, 100.0));
        cam.pan(Vec2::new(50.0, 0.0));
        let after = cam.screen_to_world(Vec2::new(150.0, 100.0));
        assert!((before - after).length() < 1e-3);
    }

    #[test]
    fn test_view_proj_maps_center_to_origin() {
        let cam = camera();
        let clip = cam.view_proj().project_point3(Vec3::new(1600.0, 1600.0, 0.0));
        assert!(clip.x.abs() < 1e-4 && clip.y.abs() < 1e-4);
        let corner = cam.world_to_screen(Vec2::ZERO);
        let clip = cam.view_proj().project_point3(Vec3::new(0.0, 0.0, 0.0));
        assert!((clip.x - (corner.x / 640.0 - 1.0)).abs() < 1e-3);
        assert!((clip.y - (1.0 - corner.y / 360.0)).abs() < 1e-3);
    }
}
