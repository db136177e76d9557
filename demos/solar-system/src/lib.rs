use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod scene;
use scene::SolarSystem;

orrery_web::export_scene!(SolarSystem, "solar-system");
