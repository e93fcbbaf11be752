pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod systems;
pub mod ui;

// Re-export key types at crate root for convenience
pub use api::app::{App, AppConfig, EngineContext};
pub use api::types::{Color, CubeTextureId, NodeId, TextureId};
pub use assets::manifest::AssetManifest;
pub use assets::registry::TextureRegistry;
pub use components::geometry::MeshData;
pub use components::mesh::{Geometry, Material, MaterialKind, MeshComponent, Side};
pub use components::node::{LocalTransform, Node, NodeKind};
pub use core::frame_loop::{FrameLoop, LoopState};
pub use core::scene::{Background, SceneGraph};
pub use core::viewport::{apply_resize, Viewport};
pub use error::AssetError;
pub use input::event::{InputEvent, PointerButton};
pub use input::orbit::{OrbitControls, OrbitSettings};
pub use renderer::buffer::{BufferRenderer, DrawInstance};
pub use renderer::camera::{CameraUniform, PerspectiveCamera};
pub use renderer::draw_list::build_draw_list;
pub use renderer::traits::{DrawItem, FrameData, Renderer};
pub use systems::lighting::{AmbientLight, LightState, PointLight, LIGHT_FLOATS};
pub use ui::panel::{ControlPanel, ControlState, SliderSpec};
