pub mod runner;

pub use runner::ViewerRunner;

use std::cell::RefCell;

use orrery_engine::{BodyId, UserIntent, ViewerConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<ViewerRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut ViewerRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Viewer not initialized. Call viewer_init() first.");
        f(runner)
    })
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Create the viewer and queue the startup messages for the worker.
/// `config_json` may be empty or a partial `ViewerConfig` object.
#[wasm_bindgen]
pub fn viewer_init(config_json: &str, width: f64, height: f64, dpr: f64) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        ViewerConfig::default()
    } else {
        ViewerConfig::from_json(config_json).unwrap_or_else(|e| {
            log::warn!("orrery: bad viewer config, using defaults: {e}");
            ViewerConfig::default()
        })
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(ViewerRunner::new(config));
    });

    with_runner(|r| r.init(width, height, dpr));
    log::info!("orrery: initialized");
}

/// Feed one message from the simulation worker (JSON text).
#[wasm_bindgen]
pub fn viewer_on_message(json: &str) {
    let now = now_ms();
    with_runner(|r| r.on_message(json, now));
}

/// Draw one frame. Returns 0 (idle), 1 (direct) or 2 (interpolated).
#[wasm_bindgen]
pub fn viewer_frame() -> u32 {
    let now = now_ms();
    with_runner(|r| r.frame(now))
}

// ---- Intents (pointer coordinates in CSS pixels) ----

#[wasm_bindgen]
pub fn viewer_pick(x: f64, y: f64) {
    with_runner(|r| r.push_intent(UserIntent::Pick { x, y }));
}

#[wasm_bindgen]
pub fn viewer_pan(dx: f64, dy: f64) {
    with_runner(|r| r.push_intent(UserIntent::Pan { dx, dy }));
}

#[wasm_bindgen]
pub fn viewer_zoom_at(x: f64, y: f64, factor: f64) {
    with_runner(|r| r.push_intent(UserIntent::ZoomAt { x, y, factor }));
}

/// Select a body by id; an empty id clears the selection.
#[wasm_bindgen]
pub fn viewer_select(id: &str) {
    let id = (!id.is_empty()).then(|| BodyId::from(id));
    with_runner(|r| r.push_intent(UserIntent::Select(id)));
}

#[wasm_bindgen]
pub fn viewer_set_follow(enabled: bool) {
    with_runner(|r| r.push_intent(UserIntent::SetFollow(enabled)));
}

#[wasm_bindgen]
pub fn viewer_toggle_pause() {
    with_runner(|r| r.push_intent(UserIntent::TogglePause));
}

#[wasm_bindgen]
pub fn viewer_set_time_scale(time_scale: f64) {
    with_runner(|r| r.push_intent(UserIntent::SetTimeScale(time_scale)));
}

#[wasm_bindgen]
pub fn viewer_reset_camera() {
    with_runner(|r| r.push_intent(UserIntent::ResetCamera));
}

#[wasm_bindgen]
pub fn viewer_center_on_selected() {
    with_runner(|r| r.push_intent(UserIntent::CenterOnSelected));
}

/// Surface size in device pixels.
#[wasm_bindgen]
pub fn viewer_resize(width: f64, height: f64, dpr: f64) {
    with_runner(|r| r.push_intent(UserIntent::Resize { width, height, dpr }));
}

// ---- Outbound ----

/// Pending messages for the simulation worker, as a JSON array.
#[wasm_bindgen]
pub fn viewer_take_outbound() -> String {
    with_runner(|r| r.take_outbound_json())
}

#[wasm_bindgen]
pub fn viewer_take_events() -> String {
    with_runner(|r| r.take_events_json())
}

// ---- Frame accessors ----

#[wasm_bindgen]
pub fn get_under_vertices_ptr() -> *const f32 {
    with_runner(|r| r.under_vertices_ptr())
}

#[wasm_bindgen]
pub fn get_under_vertex_count() -> u32 {
    with_runner(|r| r.under_vertex_count())
}

#[wasm_bindgen]
pub fn get_disc_instances_ptr() -> *const f32 {
    with_runner(|r| r.disc_instances_ptr())
}

#[wasm_bindgen]
pub fn get_disc_instance_count() -> u32 {
    with_runner(|r| r.disc_instance_count())
}

#[wasm_bindgen]
pub fn get_over_vertices_ptr() -> *const f32 {
    with_runner(|r| r.over_vertices_ptr())
}

#[wasm_bindgen]
pub fn get_over_vertex_count() -> u32 {
    with_runner(|r| r.over_vertex_count())
}

#[wasm_bindgen]
pub fn get_labels_json() -> String {
    with_runner(|r| r.labels_json())
}

#[wasm_bindgen]
pub fn get_backdrop_json() -> String {
    with_runner(|r| r.backdrop_json())
}

// ---- UI readouts ----

#[wasm_bindgen]
pub fn get_status_text() -> String {
    with_runner(|r| r.status_text())
}

#[wasm_bindgen]
pub fn get_inspector_text() -> String {
    with_runner(|r| r.inspector_text())
}

#[wasm_bindgen]
pub fn get_body_groups_json() -> String {
    with_runner(|r| r.body_groups_json())
}

#[wasm_bindgen]
pub fn get_zoom() -> f64 {
    with_runner(|r| r.zoom())
}

#[wasm_bindgen]
pub fn get_last_alpha() -> f64 {
    with_runner(|r| r.last_alpha())
}

#[wasm_bindgen]
pub fn get_follow_id() -> Option<String> {
    with_runner(|r| r.follow_id())
}

#[wasm_bindgen]
pub fn get_selected_id() -> Option<String> {
    with_runner(|r| r.selected_id())
}
