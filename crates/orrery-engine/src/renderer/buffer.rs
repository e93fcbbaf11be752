use bytemuck::{Pod, Zeroable};

use crate::components::mesh::{Geometry, Side};
use crate::core::scene::Background;
use crate::renderer::camera::CameraUniform;
use crate::renderer::traits::{DrawItem, FrameData, Renderer};

/// Geometry kind codes in the packed format.
pub const GEOMETRY_SPHERE: f32 = 0.0;
pub const GEOMETRY_RING: f32 = 1.0;
/// Texture slot value for "no texture".
pub const NO_TEXTURE: f32 = -1.0;

/// Per-mesh draw data in flat form.
/// 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct DrawInstance {
    /// Column-major world matrix.
    pub model: [f32; 16],
    /// `GEOMETRY_SPHERE` or `GEOMETRY_RING`.
    pub geometry: f32,
    /// Sphere: radius, width segments, height segments.
    /// Ring: inner radius, outer radius, theta segments.
    pub params: [f32; 3],
    /// Texture id, or `NO_TEXTURE`.
    pub texture: f32,
    /// 1.0 when the material reacts to lights.
    pub lit: f32,
    /// 1.0 when both faces are drawn.
    pub double_sided: f32,
    pub _pad: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_item(item: &DrawItem) -> Self {
        let (geometry, params) = match item.mesh.geometry {
            Geometry::Sphere { radius, width_segments, height_segments } => {
                (GEOMETRY_SPHERE, [radius, width_segments as f32, height_segments as f32])
            }
            Geometry::Ring { inner_radius, outer_radius, theta_segments } => {
                (GEOMETRY_RING, [inner_radius, outer_radius, theta_segments as f32])
            }
        };
        let material = &item.mesh.material;
        Self {
            model: item.model.to_cols_array(),
            geometry,
            params,
            texture: material.texture.map(|t| t.0 as f32).unwrap_or(NO_TEXTURE),
            lit: if material.is_lit() { 1.0 } else { 0.0 },
            double_sided: if material.side == Side::Double { 1.0 } else { 0.0 },
            _pad: 0.0,
        }
    }
}

/// Headless backend: packs every frame into flat buffers.
///
/// Nothing is drawn; each frame's draw instances, lights, camera and
/// background are kept for inspection until the next `render`.
pub struct BufferRenderer {
    instances: Vec<DrawInstance>,
    lights: Vec<f32>,
    ambient: [f32; 3],
    camera: Option<CameraUniform>,
    background: Background,
    width: u32,
    height: u32,
    frames: u64,
}

impl BufferRenderer {
    /// Headless surface of `width`×`height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_capacity(width, height, 64)
    }

    /// Pre-size the instance buffer for `max_instances` meshes.
    pub fn with_capacity(width: u32, height: u32, max_instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            lights: Vec::new(),
            ambient: [1.0, 1.0, 1.0],
            camera: None,
            background: Background::default(),
            width,
            height,
            frames: 0,
        }
    }

    /// Draw instances of the last rendered frame, in scene order.
    pub fn instances(&self) -> &[DrawInstance] {
        &self.instances
    }

    /// Number of meshes drawn in the last frame.
    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Packed point lights of the last frame, `LIGHT_FLOATS` per light.
    pub fn lights(&self) -> &[f32] {
        &self.lights
    }

    /// Ambient radiance of the last frame.
    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    /// Camera of the last rendered frame.
    pub fn camera(&self) -> Option<&CameraUniform> {
        self.camera.as_ref()
    }

    /// Background of the last frame.
    pub fn background(&self) -> Background {
        self.background
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for BufferRenderer {
    fn backend(&self) -> &'static str {
        "buffer"
    }

    fn render(&mut self, frame: &FrameData) {
        self.instances.clear();
        self.instances.extend(frame.items.iter().map(DrawInstance::from_item));
        self.lights.clear();
        self.lights.extend_from_slice(frame.lighting.packed());
        self.ambient = frame.lighting.ambient().radiance();
        self.camera = Some(frame.camera);
        self.background = frame.background;
        self.frames += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
