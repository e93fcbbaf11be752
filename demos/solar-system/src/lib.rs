use wasm_bindgen::prelude::*;

mod app;
mod bodies;
mod planet;
use app::SolarSystem;

orrery_web::export_app!(SolarSystem, "solar-system", include_str!("../assets/manifest.json"));
