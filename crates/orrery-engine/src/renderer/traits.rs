//! Renderer contract.
//!
//! The engine never talks to a GPU directly. Each frame it hands a
//! `FrameData` snapshot to whatever backend the host installed: WebGL2 in
//! the browser, `BufferRenderer` in tests and captures.

use glam::Mat4;

use crate::api::types::{Color, NodeId};
use crate::components::mesh::MeshComponent;
use crate::core::scene::Background;
use crate::renderer::camera::CameraUniform;
use crate::systems::lighting::LightState;

/// One mesh to draw, with its world matrix resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub node: NodeId,
    pub model: Mat4,
    pub mesh: MeshComponent,
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Meshes in scene order (parents before children).
    pub items: &'a [DrawItem],
    pub camera: CameraUniform,
    pub lighting: &'a LightState,
    pub background: Background,
    /// Used when the background is a color or its cube map is still loading.
    pub clear_color: Color,
}

/// Renderer trait for GPU backends.
pub trait Renderer {
    /// Backend identifier (e.g., "webgl2", "buffer").
    fn backend(&self) -> &'static str;

    /// Draw one complete frame.
    fn render(&mut self, frame: &FrameData);

    /// Resize the drawing surface, in pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Current drawing surface size, in pixels.
    fn surface_size(&self) -> (u32, u32);
}
