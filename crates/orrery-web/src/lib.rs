pub mod dom;
pub mod error;
pub mod runner;
pub mod shaders;
pub mod webgl;

pub use dom::Hooks;
pub use error::{WebError, WebResult};
pub use runner::AppRunner;
pub use webgl::WebGlRenderer;

/// Generate all `#[wasm_bindgen]` exports for a scene app.
///
/// Generates:
/// - `thread_local!` storage for the `AppRunner`
/// - `with_runner()` helper function
/// - `orrery_start`, `orrery_stop`, `orrery_set_speed`, `orrery_speed`
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod app;
/// use app::MyScene;
///
/// orrery_web::export_app!(MyScene, "my-scene", include_str!("../assets/manifest.json"));
/// ```
///
/// # Arguments
///
/// - `$app_type`: a type implementing `orrery_engine::App` with a `new()` constructor
/// - `$app_name`: string literal used in log messages
/// - `$manifest`: asset manifest JSON (`&str`)
#[macro_export]
macro_rules! export_app {
    ($app_type:ty, $app_name:literal, $manifest:expr) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::AppRunner<$app_type, $crate::WebGlRenderer>>> =
                RefCell::new(None);
        }

        /// Run `f` against the runner; `None` before `orrery_start`.
        fn with_runner<R>(
            f: impl FnOnce(&mut $crate::AppRunner<$app_type, $crate::WebGlRenderer>) -> R,
        ) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        const HOOKS: $crate::Hooks = $crate::Hooks {
            input: |event| {
                with_runner(|r| r.push_input(event));
            },
            resize: |width, height| {
                with_runner(|r| r.resize(width, height));
            },
            set_speed: |value| {
                with_runner(|r| r.set_speed(value))
                    .unwrap_or_else(|| $crate::runner::clamp_speed(value))
            },
            frame: || with_runner(|r| r.frame()).unwrap_or(false),
        };

        /// Build the page and start animating.
        #[wasm_bindgen]
        pub fn orrery_start() -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            if RUNNER.with(|cell| cell.borrow().is_some()) {
                return Err($crate::WebError::AlreadyStarted.into());
            }

            let (runner, canvas) = $crate::dom::mount(<$app_type>::new(), $manifest)?;
            let slider = runner.panel().slider();
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            $crate::dom::create_slider(&$crate::dom::page()?, &slider, HOOKS)?;
            $crate::dom::attach(&canvas, HOOKS)?;
            $crate::dom::run_frames(HOOKS)?;
            log::info!("{}: started", $app_name);
            Ok(())
        }

        /// Stop the frame loop. The last frame stays on screen.
        #[wasm_bindgen]
        pub fn orrery_stop() {
            with_runner(|r| r.stop());
            log::info!("{}: stopped", $app_name);
        }

        /// Set the animation speed; returns the clamped value in effect.
        #[wasm_bindgen]
        pub fn orrery_set_speed(value: f32) -> f32 {
            (HOOKS.set_speed)(value)
        }

        #[wasm_bindgen]
        pub fn orrery_speed() -> f32 {
            with_runner(|r| r.speed()).unwrap_or_else($crate::runner::idle_speed)
        }
    };
}
