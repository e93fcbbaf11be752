use glam::Vec3;
use orrery_engine::{
    apply_resize, build_draw_list, App, AppConfig, ControlPanel, DrawItem, EngineContext,
    FrameData, FrameLoop, InputEvent, OrbitControls, PerspectiveCamera, Renderer, SliderSpec,
    TextureRegistry, Viewport,
};

/// Clamp a slider value the way a fresh panel would. Answers the speed
/// hooks before any runner exists.
pub fn clamp_speed(value: f32) -> f32 {
    ControlPanel::new(SliderSpec::speed()).set_speed(value)
}

/// Speed reported before any runner exists.
pub fn idle_speed() -> f32 {
    ControlPanel::new(SliderSpec::speed()).speed()
}

/// Generic runner that wires an `App` to a render backend.
///
/// Each concrete app keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct AppRunner<A: App, R: Renderer> {
    app: A,
    ctx: EngineContext,
    renderer: R,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    panel: ControlPanel,
    viewport: Viewport,
    frame_loop: FrameLoop,
    draw_list: Vec<DrawItem>,
    config: AppConfig,
    initialized: bool,
}

impl<A: App, R: Renderer> AppRunner<A, R> {
    /// The camera starts at `config.camera_position` looking at the origin,
    /// with the renderer's current surface as the viewport.
    pub fn new(app: A, renderer: R, textures: TextureRegistry) -> Self {
        let config = app.config();
        let (width, height) = renderer.surface_size();
        let viewport = Viewport::new(width, height);

        let mut camera = PerspectiveCamera::new(config.fov_deg, viewport.aspect(), config.near, config.far)
            .with_position(config.camera_position);
        camera.look_at(Vec3::ZERO);
        let controls = OrbitControls::new(&camera, config.orbit);
        controls.update(&mut camera);

        Self {
            ctx: EngineContext::from_config(&config, textures),
            panel: ControlPanel::new(config.speed.clone()),
            draw_list: Vec::with_capacity(config.max_nodes),
            app,
            renderer,
            camera,
            controls,
            viewport,
            frame_loop: FrameLoop::new(),
            config,
            initialized: false,
        }
    }

    /// Build the scene. Only the first call has any effect.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.app.init(&mut self.ctx);
        self.ctx.scene.propagate();
        self.initialized = true;
        log::info!(
            "scene built: {} nodes, {} point lights, backend {}",
            self.ctx.scene.len(),
            self.ctx.lights.count(),
            self.renderer.backend()
        );
    }

    /// Run one refresh cycle: animate, then draw.
    /// Returns whether another frame should be scheduled.
    pub fn frame(&mut self) -> bool {
        if !self.initialized || !self.frame_loop.is_running() {
            return false;
        }

        self.app.update(&mut self.ctx, self.panel.state());
        self.ctx.scene.propagate();
        build_draw_list(&self.ctx.scene, &mut self.draw_list);
        self.ctx.lights.pack();

        self.renderer.render(&FrameData {
            items: &self.draw_list,
            camera: self.camera.uniform(),
            lighting: &self.ctx.lights,
            background: self.ctx.scene.background(),
            clear_color: self.config.clear_color,
        });

        self.frame_loop.advance()
    }

    /// Stop the animation loop. No frames run afterwards.
    pub fn stop(&mut self) {
        if self.frame_loop.is_running() {
            log::info!("frame loop stopped after {} frames", self.frame_loop.frames());
        }
        self.frame_loop.stop();
    }

    /// False once `stop` has been called.
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Route a pointer or wheel event to the orbit controls.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.controls.handle(&event, &self.camera, self.viewport.height as f32) {
            self.controls.update(&mut self.camera);
        }
    }

    /// Apply a new surface size to the viewport, camera aspect and backend.
    pub fn resize(&mut self, width: u32, height: u32) {
        apply_resize(&mut self.viewport, &mut self.camera, &mut self.renderer, width, height);
    }

    /// Slider input. Returns the clamped speed now in effect.
    pub fn set_speed(&mut self, value: f32) -> f32 {
        self.panel.set_speed(value)
    }

    /// Current animation speed multiplier.
    pub fn speed(&self) -> f32 {
        self.panel.speed()
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    /// The app, for inspecting its node handles.
    pub fn app(&self) -> &A {
        &self.app
    }

    /// Scene graph, lights and textures as the app last left them.
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// The backend. Tests read captured frames through this.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Completed refresh cycles.
    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }
}
