//! `#[wasm_bindgen]` surface of the gravity toy.
//!
//! The host page calls `sim_init()` once, forwards DOM pointer and key
//! events in pixel coordinates, calls `sim_tick(dt)` every animation frame
//! and reads the frame back through the pointer accessors.

pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use gravity_engine::SimConfig;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

fn install(runner: SimRunner) {
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

#[wasm_bindgen]
pub fn sim_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    install(SimRunner::new(SimConfig::default()));
    log::info!("gravity: initialized");
}

/// Initialize with a JSON configuration. Falls back to defaults on a parse error.
#[wasm_bindgen]
pub fn sim_init_with_config(json: &str) {
    sim_init();
    with_runner(|r| r.load_config(json));
}

#[wasm_bindgen]
pub fn sim_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn sim_pointer_down(button: u32, x: f32, y: f32) {
    with_runner(|r| r.pointer_down(button, x, y));
}

#[wasm_bindgen]
pub fn sim_pointer_up(button: u32, x: f32, y: f32) {
    with_runner(|r| r.pointer_up(button, x, y));
}

#[wasm_bindgen]
pub fn sim_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.pointer_move(x, y));
}

#[wasm_bindgen]
pub fn sim_key_down(key_code: u32) {
    with_runner(|r| r.key_down(key_code));
}

/// Spawn a particle from raw parameters at a pixel position.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn sim_spawn_custom(
    x: f32,
    y: f32,
    mass: f32,
    radius: f32,
    randomize_color: bool,
    launch_x: f32,
    launch_y: f32,
) {
    with_runner(|r| r.spawn_custom(x, y, mass, radius, randomize_color, launch_x, launch_y));
}

#[wasm_bindgen]
pub fn sim_is_terminated() -> bool {
    with_runner(|r| r.is_terminated())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_circles_ptr() -> *const f32 {
    with_runner(|r| r.circles_ptr())
}

#[wasm_bindgen]
pub fn get_circle_count() -> u32 {
    with_runner(|r| r.circle_count())
}

#[wasm_bindgen]
pub fn get_drag_line() -> js_sys::Float32Array {
    let line = with_runner(|r| r.drag_line());
    js_sys::Float32Array::from(&line[..])
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

/// Label strings for this frame, in the same order as the layout array.
#[wasm_bindgen]
pub fn get_label_texts() -> js_sys::Array {
    with_runner(|r| r.labels().texts().map(JsValue::from_str).collect())
}

#[wasm_bindgen]
pub fn get_label_layout_ptr() -> *const f32 {
    with_runner(|r| r.label_layout_ptr())
}

#[wasm_bindgen]
pub fn get_label_count() -> u32 {
    with_runner(|r| r.label_count())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_vector_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vector_vertices_ptr())
}

#[wasm_bindgen]
pub fn get_vector_vertex_count() -> u32 {
    with_runner(|r| r.vector_vertex_count())
}

#[wasm_bindgen]
pub fn get_viewport_width() -> f32 {
    with_runner(|r| r.viewport_width())
}

#[wasm_bindgen]
pub fn get_viewport_height() -> f32 {
    with_runner(|r| r.viewport_height())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_circles() -> u32 {
    with_runner(|r| r.max_circles())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}
