use orrery_engine::{
    FrameBuffer, FrameOutcome, Outbox, UserIntent, Viewer, ViewerConfig, ViewerEvent,
};

/// Owns the viewer and the CPU-side frame the page reads back.
///
/// The page holds exactly one runner inside a `thread_local!` and reaches it
/// through free `#[wasm_bindgen]` functions, because wasm-bindgen cannot
/// export generic structs directly.
pub struct ViewerRunner {
    viewer: Viewer<Outbox>,
    frame: FrameBuffer,
    last_outcome: FrameOutcome,
}

impl ViewerRunner {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            viewer: Viewer::new(config, Outbox::new()),
            frame: FrameBuffer::new(),
            last_outcome: FrameOutcome::Idle,
        }
    }

    /// Size the surface and ask the simulation for its world.
    pub fn init(&mut self, width: f64, height: f64, dpr: f64) {
        self.viewer.apply_intent(UserIntent::Resize { width, height, dpr });
        self.viewer.start();
    }

    pub fn on_message(&mut self, json: &str, now: f64) {
        self.viewer.handle_json(json, now);
    }

    pub fn push_intent(&mut self, intent: UserIntent) {
        self.viewer.push_intent(intent);
    }

    /// Run one display frame. Returns 0 when idle, 1 for a direct render and
    /// 2 for an interpolated one.
    pub fn frame(&mut self, now: f64) -> u32 {
        self.last_outcome = self.viewer.frame(now, &mut self.frame);
        match self.last_outcome {
            FrameOutcome::Idle => 0,
            FrameOutcome::Direct => 1,
            FrameOutcome::Interpolated { .. } => 2,
        }
    }

    /// Alpha of the last interpolated frame, else 1.
    pub fn last_alpha(&self) -> f64 {
        match self.last_outcome {
            FrameOutcome::Interpolated { alpha } => alpha,
            _ => 1.0,
        }
    }

    pub fn viewer(&self) -> &Viewer<Outbox> {
        &self.viewer
    }

    // ---- Outbound ----

    /// Messages for the simulation worker as a JSON array, oldest first.
    pub fn take_outbound_json(&mut self) -> String {
        match self.viewer.channel_mut().drain_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("runner: could not encode outbound messages: {e}");
                "[]".to_owned()
            }
        }
    }

    /// UI events since the last call, as a JSON array.
    pub fn take_events_json(&mut self) -> String {
        let events: Vec<serde_json::Value> = self
            .viewer
            .take_events()
            .into_iter()
            .map(|event| match event {
                ViewerEvent::Picked(id) => serde_json::json!({ "type": "picked", "id": id }),
                ViewerEvent::BodiesChanged => serde_json::json!({ "type": "bodiesChanged" }),
            })
            .collect();
        serde_json::Value::Array(events).to_string()
    }

    // ---- Frame buffers for zero-copy reads ----

    pub fn under_vertices_ptr(&self) -> *const f32 {
        self.frame.under.buffer_ptr()
    }

    pub fn under_vertex_count(&self) -> u32 {
        self.frame.under.vertex_count() as u32
    }

    pub fn disc_instances_ptr(&self) -> *const f32 {
        self.frame.discs.instances_ptr()
    }

    pub fn disc_instance_count(&self) -> u32 {
        self.frame.discs.instance_count() as u32
    }

    pub fn over_vertices_ptr(&self) -> *const f32 {
        self.frame.over.buffer_ptr()
    }

    pub fn over_vertex_count(&self) -> u32 {
        self.frame.over.vertex_count() as u32
    }

    // ---- Text and JSON accessors ----

    pub fn labels_json(&self) -> String {
        self.frame.labels_json().unwrap_or_else(|e| {
            log::warn!("runner: could not encode labels: {e}");
            "[]".to_owned()
        })
    }

    pub fn backdrop_json(&self) -> String {
        self.frame.backdrop_json().unwrap_or_else(|e| {
            log::warn!("runner: could not encode backdrop: {e}");
            "null".to_owned()
        })
    }

    pub fn body_groups_json(&self) -> String {
        self.viewer.groups().to_json().unwrap_or_else(|e| {
            log::warn!("runner: could not encode body groups: {e}");
            "null".to_owned()
        })
    }

    pub fn status_text(&self) -> String {
        self.viewer.status().to_owned()
    }

    pub fn inspector_text(&self) -> String {
        self.viewer.inspector().to_owned()
    }

    pub fn zoom(&self) -> f64 {
        self.viewer.camera().zoom
    }

    pub fn follow_id(&self) -> Option<String> {
        self.viewer.camera().follow_id().map(|id| id.to_string())
    }

    pub fn selected_id(&self) -> Option<String> {
        self.viewer.selected().map(|id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{"type":"SNAPSHOT","snapshot":{"seed":"demo-seed-001",
        "timeSeconds":0,"paused":false,"timeScale":1,"bodies":[
          {"id":"star-0","type":"star","name":"Sol","mass":1.989e30,"radius":6.9634e8,
           "position":{"x":0,"y":0,"z":0}},
          {"id":"p1","type":"planet","name":"Terra","mass":5.972e24,"radius":6.371e6,
           "position":{"x":1.0e11,"y":0,"z":0},
           "orbit":{"parentId":"star-0","semiMajorAxis":1.0e11,"eccentricity":0.0}}
        ]}}"#;

    #[test]
    fn init_queues_startup_messages() {
        let mut runner = ViewerRunner::new(ViewerConfig::default());
        runner.init(1200.0, 800.0, 2.0);
        assert_eq!(
            runner.take_outbound_json(),
            r#"[{"type":"INIT","seed":"demo-seed-001"},{"type":"SET_TIMESCALE","timeScale":1.0}]"#
        );
        assert_eq!(runner.take_outbound_json(), "[]");
    }

    #[test]
    fn frame_fills_buffers_after_first_snapshot() {
        let mut runner = ViewerRunner::new(ViewerConfig::default());
        runner.init(1200.0, 800.0, 1.0);
        assert_eq!(runner.frame(0.0), 0);

        runner.on_message(SNAPSHOT, 10.0);
        assert_eq!(runner.frame(20.0), 1);
        assert_eq!(runner.disc_instance_count(), 2);
        assert!(runner.under_vertex_count() > 0);
        assert!(runner.over_vertex_count() > 0);
        assert!(runner.labels_json().contains("Terra"));
        assert!(runner.backdrop_json().contains("inner_radius"));
        assert!(runner.body_groups_json().contains(r#""selected":"p1""#));
        assert_eq!(runner.selected_id().as_deref(), Some("p1"));
        assert_eq!(runner.take_events_json(), r#"[{"type":"bodiesChanged"}]"#);
    }
}
