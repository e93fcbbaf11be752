//! Orbit camera controller.
//!
//! Keeps the camera on a sphere around `target`. Primary drag orbits,
//! secondary drag pans the target, middle drag and the wheel dolly.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::input::event::{InputEvent, PointerButton};
use crate::renderer::camera::PerspectiveCamera;

/// Keeps phi away from the poles where the view basis degenerates.
const PHI_EPSILON: f32 = 1e-6;

/// Floor for the orbit radius. Dollying is multiplicative, so a radius that
/// reached zero could never grow again.
const MIN_RADIUS: f32 = 1e-3;

/// Spherical coordinates, Y-up: theta around +Y from +Z, phi down from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius <= 0.0 {
            return Self { radius: 0.0, theta: 0.0, phi: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Rotate,
    Pan,
    Dolly,
}

/// Tuning knobs for `OrbitControls`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
        }
    }
}

/// Pointer-driven orbit controller for a `PerspectiveCamera`.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub settings: OrbitSettings,
    spherical: Spherical,
    state: DragState,
    last_pointer: Vec2,
}

impl OrbitControls {
    /// Start from the camera's current position, orbiting the origin.
    pub fn new(camera: &PerspectiveCamera, settings: OrbitSettings) -> Self {
        Self::with_target(camera, Vec3::ZERO, settings)
    }

    /// Orbit an arbitrary point instead of the origin.
    pub fn with_target(camera: &PerspectiveCamera, target: Vec3, settings: OrbitSettings) -> Self {
        Self {
            target,
            settings,
            spherical: Spherical::from_vec3(camera.position - target),
            state: DragState::Idle,
            last_pointer: Vec2::ZERO,
        }
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    /// Distance from camera to target.
    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// True between a pointer-down on an enabled button and its pointer-up.
    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Feed one input event. `viewport_height` scales drag deltas so a full
    /// drag across the surface height is one full turn.
    /// Returns true when the camera needs `update`.
    pub fn handle(&mut self, event: &InputEvent, camera: &PerspectiveCamera, viewport_height: f32) -> bool {
        let height = viewport_height.max(1.0);
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                self.state = match button {
                    PointerButton::Primary if self.settings.enable_rotate => DragState::Rotate,
                    PointerButton::Secondary if self.settings.enable_pan => DragState::Pan,
                    PointerButton::Middle if self.settings.enable_zoom => DragState::Dolly,
                    _ => DragState::Idle,
                };
                self.last_pointer = Vec2::new(x, y);
                false
            }
            InputEvent::PointerMove { x, y } => {
                let pos = Vec2::new(x, y);
                let delta = pos - self.last_pointer;
                self.last_pointer = pos;
                match self.state {
                    DragState::Idle => false,
                    DragState::Rotate => {
                        self.rotate_left(TAU * delta.x / height * self.settings.rotate_speed);
                        self.rotate_up(TAU * delta.y / height * self.settings.rotate_speed);
                        true
                    }
                    DragState::Pan => {
                        self.pan(delta, camera, height);
                        true
                    }
                    DragState::Dolly => {
                        if delta.y > 0.0 {
                            self.dolly_out(self.zoom_scale());
                        } else if delta.y < 0.0 {
                            self.dolly_in(self.zoom_scale());
                        }
                        true
                    }
                }
            }
            InputEvent::PointerUp { .. } => {
                self.state = DragState::Idle;
                false
            }
            InputEvent::Wheel { delta_y } => {
                if !self.settings.enable_zoom || delta_y == 0.0 {
                    return false;
                }
                if delta_y > 0.0 {
                    self.dolly_out(self.zoom_scale());
                } else {
                    self.dolly_in(self.zoom_scale());
                }
                true
            }
        }
    }

    /// Orbit horizontally by `angle` radians.
    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical.theta -= angle;
    }

    /// Orbit vertically by `angle` radians; clamped short of the poles.
    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical.phi = (self.spherical.phi - angle).clamp(PHI_EPSILON, PI - PHI_EPSILON);
    }

    /// Move closer by `scale` (< 1 moves in).
    pub fn dolly_in(&mut self, scale: f32) {
        self.set_distance(self.spherical.radius * scale);
    }

    /// Move away by `1 / scale`.
    pub fn dolly_out(&mut self, scale: f32) {
        self.set_distance(self.spherical.radius / scale);
    }

    fn set_distance(&mut self, radius: f32) {
        self.spherical.radius = radius
            .max(self.settings.min_distance)
            .max(MIN_RADIUS)
            .min(self.settings.max_distance);
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.settings.zoom_speed)
    }

    /// Shift the target in the camera plane by a screen-space delta.
    fn pan(&mut self, delta: Vec2, camera: &PerspectiveCamera, height: f32) {
        let target_distance = self.spherical.radius * (camera.fov_deg.to_radians() / 2.0).tan();
        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        let scale = 2.0 * target_distance / height * self.settings.pan_speed;
        self.target += -right * delta.x * scale + up * delta.y * scale;
    }

    /// Write the orbit state into the camera position and aim.
    pub fn update(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.target + self.spherical.to_vec3();
        camera.look_at(self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0).with_position(Vec3::new(-90.0, 140.0, 140.0))
    }

    #[test]
    fn spherical_round_trip_keeps_position() {
        let v = Vec3::new(-90.0, 140.0, 140.0);
        let back = Spherical::from_vec3(v).to_vec3();
        assert!((back - v).length() < 1e-3, "got {:?}", back);
    }

    #[test]
    fn initial_update_keeps_camera_in_place() {
        let mut cam = camera();
        let controls = OrbitControls::new(&cam, OrbitSettings::default());
        controls.update(&mut cam);
        assert!((cam.position - Vec3::new(-90.0, 140.0, 140.0)).length() < 1e-3);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn drag_orbits_preserving_distance() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam, OrbitSettings::default());
        let before = controls.distance();

        controls.handle(&InputEvent::PointerDown { x: 100.0, y: 100.0, button: PointerButton::Primary }, &cam, 600.0);
        assert!(controls.is_dragging());
        let moved = controls.handle(&InputEvent::PointerMove { x: 160.0, y: 130.0 }, &cam, 600.0);
        assert!(moved);
        controls.update(&mut cam);
        controls.handle(&InputEvent::PointerUp { x: 160.0, y: 130.0 }, &cam, 600.0);
        assert!(!controls.is_dragging());

        assert!((cam.position.length() - before).abs() < 1e-2);
        assert!((cam.position - Vec3::new(-90.0, 140.0, 140.0)).length() > 1.0);
    }

    #[test]
    fn move_without_drag_does_nothing() {
        let cam = camera();
        let mut controls = OrbitControls::new(&cam, OrbitSettings::default());
        let before = controls.spherical();
        assert!(!controls.handle(&InputEvent::PointerMove { x: 500.0, y: 10.0 }, &cam, 600.0));
        assert_eq!(before, controls.spherical());
    }

    #[test]
    fn phi_is_clamped_short_of_poles() {
        let cam = camera();
        let mut controls = OrbitControls::new(&cam, OrbitSettings::default());
        controls.rotate_up(100.0);
        assert!(controls.spherical().phi > 0.0);
        controls.rotate_up(-100.0);
        assert!(controls.spherical().phi < PI);
    }

    #[test]
    fn wheel_dollies_and_clamps() {
        let cam = camera();
        let settings = OrbitSettings { min_distance: 50.0, max_distance: 400.0, ..OrbitSettings::default() };
        let mut controls = OrbitControls::new(&cam, settings);
        let start = controls.distance();

        controls.handle(&InputEvent::Wheel { delta_y: 100.0 }, &cam, 600.0);
        assert!(controls.distance() > start);

        for _ in 0..200 {
            controls.handle(&InputEvent::Wheel { delta_y: -100.0 }, &cam, 600.0);
        }
        assert!((controls.distance() - 50.0).abs() < 1e-4);

        for _ in 0..200 {
            controls.handle(&InputEvent::Wheel { delta_y: 100.0 }, &cam, 600.0);
        }
        assert!((controls.distance() - 400.0).abs() < 1e-3);
    }

    #[test]
    fn wheel_out_recovers_after_deep_zoom() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam, OrbitSettings::default());

        for _ in 0..10_000 {
            controls.handle(&InputEvent::Wheel { delta_y: -100.0 }, &cam, 600.0);
        }
        let closest = controls.distance();
        assert_eq!(closest, MIN_RADIUS);
        controls.update(&mut cam);
        assert!(cam.view_matrix().to_cols_array().iter().all(|v| v.is_finite()));

        for _ in 0..100 {
            controls.handle(&InputEvent::Wheel { delta_y: 100.0 }, &cam, 600.0);
        }
        assert!(controls.distance() > closest * 100.0);
        controls.update(&mut cam);
        assert!(cam.view_matrix().to_cols_array().iter().all(|v| v.is_finite()));
        assert!(cam.view_projection().to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn secondary_drag_pans_target() {
        let mut cam = camera();
        cam.look_at(Vec3::ZERO);
        let mut controls = OrbitControls::new(&cam, OrbitSettings::default());
        let offset_before = cam.position - controls.target;

        controls.handle(&InputEvent::PointerDown { x: 0.0, y: 0.0, button: PointerButton::Secondary }, &cam, 600.0);
        controls.handle(&InputEvent::PointerMove { x: 40.0, y: 0.0 }, &cam, 600.0);
        controls.update(&mut cam);

        assert!(controls.target.length() > 1.0);
        let offset_after = cam.position - controls.target;
        assert!((offset_after - offset_before).length() < 1e-3);
    }
}
