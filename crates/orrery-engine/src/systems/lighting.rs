//! Scene lighting: one ambient term plus persistent point lights.
//!
//! Lights stay until explicitly removed. Each frame the renderer reads the
//! packed light array for its lighting pass.

use glam::Vec3;

use crate::api::types::Color;

/// Floats per packed point light.
pub const LIGHT_FLOATS: usize = 8;
/// Upper bound on point lights a backend must support.
pub const DEFAULT_MAX_LIGHTS: usize = 4;

/// Uniform light applied to every lit surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    /// Ambient light of `color` scaled by `intensity`.
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Color premultiplied by intensity.
    pub fn radiance(&self) -> [f32; 3] {
        [
            self.color.r * self.intensity,
            self.color.g * self.intensity,
            self.color.b * self.intensity,
        ]
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(Color::from_hex(0x333333), 1.0)
    }
}

/// Omnidirectional light with optional range cutoff.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, distance, r·intensity, g·intensity, b·intensity, decay]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    /// Range beyond which the light contributes nothing. 0 = unlimited.
    pub distance: f32,
    /// Falloff exponent applied within `distance`:
    /// `clamp(1 - d / distance, 0, 1) ^ decay`.
    pub decay: f32,
}

impl PointLight {
    /// Create a point light at the origin.
    pub fn new(color: Color, intensity: f32, distance: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            color,
            intensity,
            distance,
            decay: 1.0,
        }
    }

    /// Pack into the 8-float wire format.
    pub fn to_floats(&self) -> [f32; LIGHT_FLOATS] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.distance,
            self.color.r * self.intensity,
            self.color.g * self.intensity,
            self.color.b * self.intensity,
            self.decay,
        ]
    }
}

/// Ambient term plus active point lights.
#[derive(Debug, Clone)]
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: AmbientLight,
    /// Packed copy of `lights`, rebuilt by `pack`.
    packed: Vec<f32>,
}

impl LightState {
    /// No point lights; full-white ambient so unlit scenes stay visible.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_LIGHTS)
    }

    /// Pre-size for `max_lights` point lights.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: AmbientLight::new(Color::WHITE, 1.0),
            packed: Vec::with_capacity(max_lights * LIGHT_FLOATS),
        }
    }

    /// Add a point light. Lights persist until the state is dropped.
    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Number of point lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Replace the ambient term.
    pub fn set_ambient(&mut self, ambient: AmbientLight) {
        self.ambient = ambient;
    }

    /// Current ambient term.
    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    /// Repack lights into the flat wire buffer and return it.
    /// The runner calls this once per frame before rendering.
    pub fn pack(&mut self) -> &[f32] {
        self.packed.clear();
        for light in &self.lights {
            self.packed.extend_from_slice(&light.to_floats());
        }
        &self.packed
    }

    /// Packed lights as of the last `pack`; what render backends upload.
    pub fn packed(&self) -> &[f32] {
        &self.packed
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
