use glam::Vec3;

use crate::api::types::Color;
use crate::assets::registry::TextureRegistry;
use crate::core::scene::SceneGraph;
use crate::core::viewport::Viewport;
use crate::input::orbit::OrbitSettings;
use crate::systems::lighting::LightState;
use crate::ui::panel::{ControlState, SliderSpec};

/// Configuration for the engine, provided by the app.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Vertical field of view in degrees (default: 75).
    pub fov_deg: f32,
    /// Near clip plane (default: 0.1).
    pub near: f32,
    /// Far clip plane (default: 1000).
    pub far: f32,
    /// Initial camera position; the orbit target is the origin.
    pub camera_position: Vec3,
    pub orbit: OrbitSettings,
    /// Descriptor of the speed slider (range 0.1–10, default 1).
    pub speed: SliderSpec,
    /// Surface size used until the host reports the real window size.
    pub viewport: Viewport,
    /// Painted while the background cube map is unavailable.
    pub clear_color: Color,
    /// Expected node count, used to pre-size the scene arena.
    pub max_nodes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_position: Vec3::new(-90.0, 140.0, 140.0),
            orbit: OrbitSettings::default(),
            speed: SliderSpec::speed(),
            viewport: Viewport::default(),
            clear_color: Color::BLACK,
            max_nodes: 64,
        }
    }
}

/// The contract every scene app fulfils.
pub trait App {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> AppConfig {
        AppConfig::default()
    }

    /// Build the scene graph, lights and background. Called exactly once.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One animation step. `control` is read-only here; only the control
    /// panel writes it.
    fn update(&mut self, ctx: &mut EngineContext, control: &ControlState);
}

/// Mutable access to engine state, passed to `App::init` and `App::update`.
pub struct EngineContext {
    pub scene: SceneGraph,
    pub lights: LightState,
    pub textures: TextureRegistry,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_textures(TextureRegistry::new())
    }

    pub fn with_textures(textures: TextureRegistry) -> Self {
        Self {
            scene: SceneGraph::new(),
            lights: LightState::new(),
            textures,
        }
    }

    /// Pre-size the scene arena from the app config.
    pub fn from_config(config: &AppConfig, textures: TextureRegistry) -> Self {
        Self {
            scene: SceneGraph::with_capacity(config.max_nodes),
            lights: LightState::new(),
            textures,
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
