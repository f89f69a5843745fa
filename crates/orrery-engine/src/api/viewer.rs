//! The viewer: owns every piece of presentation state and ties the
//! simulation channel, the camera, the scene renderer and the picker into
//! one frame loop.
//!
//! The host drives it with three kinds of calls:
//! - `handle_message` / `handle_json` whenever the simulation sends something
//! - `push_intent` for user input, applied at the start of the next frame
//! - `frame(now, surface)` once per display refresh
//!
//! `now` is wall-clock milliseconds from whatever monotonic source the host
//! has; the viewer never reads a clock itself.

use std::sync::Arc;

use glam::DVec2;

use crate::api::config::ViewerConfig;
use crate::api::readout::{inspector_text, status_text, BodyGroups};
use crate::api::types::{BodyId, BodyKind, Snapshot};
use crate::bridge::protocol::{InboundMessage, OutboundMessage, SimChannel};
use crate::core::interpolate::interpolate;
use crate::core::orbit_cache::OrbitCache;
use crate::core::time::ReceiptWindow;
use crate::input::queue::{IntentQueue, UserIntent};
use crate::renderer::camera::Camera2D;
use crate::renderer::traits::DrawSurface;
use crate::systems::pick::{Footprint, Picker};
use crate::systems::scene::SceneRenderer;

/// Selected when the first snapshot has no planet.
const FALLBACK_SELECTION: &str = "star-0";

/// Notifications for the host UI, drained with [`Viewer::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// A pointer pick landed on a body, which is now selected.
    Picked(BodyId),
    /// A snapshot arrived; the body grouping was rebuilt.
    BodiesChanged,
}

/// What a call to [`Viewer::frame`] drew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Nothing received yet; the surface was not touched.
    Idle,
    /// The newest snapshot was drawn as-is.
    Direct,
    /// A blend of the two held snapshots was drawn.
    Interpolated { alpha: f64 },
}

pub struct Viewer<C: SimChannel> {
    config: ViewerConfig,
    channel: C,
    camera: Camera2D,
    scene: SceneRenderer,
    orbits: OrbitCache,
    picker: Picker,
    previous: Option<Arc<Snapshot>>,
    next: Option<Arc<Snapshot>>,
    window: ReceiptWindow,
    paused: bool,
    time_scale: f64,
    selected: Option<BodyId>,
    follow_enabled: bool,
    intents: IntentQueue,
    events: Vec<ViewerEvent>,
    groups: BodyGroups,
    status: String,
    inspector: String,
}

impl<C: SimChannel> Viewer<C> {
    pub fn new(config: ViewerConfig, channel: C) -> Self {
        Self {
            camera: Camera2D::new(&config),
            scene: SceneRenderer::new(&config),
            orbits: OrbitCache::new(config.orbit_samples),
            picker: Picker::new(config.pick_radius_px),
            time_scale: config.default_time_scale,
            config,
            channel,
            previous: None,
            next: None,
            window: ReceiptWindow::default(),
            paused: false,
            selected: None,
            follow_enabled: false,
            intents: IntentQueue::new(),
            events: Vec::new(),
            groups: BodyGroups::default(),
            status: String::new(),
            inspector: String::new(),
        }
    }

    /// Ask the simulation to build its world and set the initial speed.
    pub fn start(&mut self) {
        log::info!(
            "viewer: starting simulation (seed {}, time scale {})",
            self.config.default_seed,
            self.time_scale
        );
        self.channel.post(OutboundMessage::Init {
            seed: self.config.default_seed.clone(),
        });
        self.channel.post(OutboundMessage::SetTimescale {
            time_scale: self.time_scale,
        });
    }

    // -- Inbound --

    /// Parse and handle one raw message. Malformed input is logged and
    /// dropped; the held snapshots are untouched.
    pub fn handle_json(&mut self, json: &str, now: f64) {
        match InboundMessage::from_json(json) {
            Ok(message) => self.handle_message(message, now),
            Err(e) => log::warn!("viewer: ignoring malformed simulation message: {e}"),
        }
    }

    pub fn handle_message(&mut self, message: InboundMessage, now: f64) {
        match message {
            InboundMessage::Ready => log::info!("viewer: simulation ready"),
            InboundMessage::Log { message } => log::info!("[sim] {message}"),
            InboundMessage::Snapshot { snapshot } => self.ingest(Arc::new(snapshot), now),
        }
    }

    /// Install a freshly received snapshot.
    ///
    /// The first one fills both slots and picks a default selection; later
    /// ones shift `next → previous`. Slots are only ever reassigned, never
    /// mutated, so a frame always sees a consistent pair.
    pub fn ingest(&mut self, snapshot: Arc<Snapshot>, now: f64) {
        self.orbits.ingest(&snapshot);

        match self.next.take() {
            None => {
                log::info!(
                    "viewer: first snapshot ({} bodies, t={}s)",
                    snapshot.bodies.len(),
                    snapshot.time_seconds
                );
                self.previous = Some(Arc::clone(&snapshot));
                self.next = Some(Arc::clone(&snapshot));
                self.window = ReceiptWindow::starting_at(now);
                self.rebuild_groups(&snapshot);

                let default = snapshot
                    .bodies
                    .iter()
                    .find(|b| b.kind == BodyKind::Planet)
                    .map(|b| b.id.clone())
                    .unwrap_or_else(|| BodyId::from(FALLBACK_SELECTION));
                self.select(Some(default));
            }
            Some(held) => {
                log::debug!(
                    "viewer: snapshot t={}s ({} bodies)",
                    snapshot.time_seconds,
                    snapshot.bodies.len()
                );
                self.previous = Some(held);
                self.next = Some(Arc::clone(&snapshot));
                self.window.advance(now);
                self.rebuild_groups(&snapshot);
            }
        }
        self.events.push(ViewerEvent::BodiesChanged);
    }

    fn rebuild_groups(&mut self, snapshot: &Snapshot) {
        let current = self.groups.selected.take();
        self.groups = BodyGroups::build(snapshot, current.as_ref(), self.selected.as_ref());
    }

    // -- Frame --

    pub fn push_intent(&mut self, intent: UserIntent) {
        self.intents.push(intent);
    }

    /// Apply pending intents, then draw one frame onto `surface`.
    pub fn frame(&mut self, now: f64, surface: &mut impl DrawSurface) -> FrameOutcome {
        for intent in self.intents.drain() {
            self.apply_intent(intent);
        }

        let (Some(previous), Some(next)) = (self.previous.clone(), self.next.clone()) else {
            return FrameOutcome::Idle;
        };

        // Blending towards an older simulated time would run the clock
        // backwards on screen; show the newest snapshot as-is instead.
        let ordered = next.time_seconds >= previous.time_seconds;
        let (shown, outcome) = match self.window.alpha(now).filter(|_| ordered) {
            Some(alpha) => (
                Arc::new(interpolate(&previous, &next, alpha)),
                FrameOutcome::Interpolated { alpha },
            ),
            None => (next, FrameOutcome::Direct),
        };

        self.scene.render(
            &shown,
            &mut self.camera,
            &self.orbits,
            self.selected.as_ref(),
            surface,
        );
        self.status = status_text(&shown, &self.camera);
        self.inspector = inspector_text(&shown, self.selected.as_ref());
        outcome
    }

    // -- Intents --

    pub fn apply_intent(&mut self, intent: UserIntent) {
        let dpr = self.camera.dpr;
        match intent {
            UserIntent::Pick { x, y } => self.pick(DVec2::new(x, y) * dpr),
            UserIntent::Pan { dx, dy } => self.camera.pan(dx * dpr, dy * dpr),
            UserIntent::ZoomAt { x, y, factor } => {
                self.camera.zoom_at(DVec2::new(x, y) * dpr, factor)
            }
            UserIntent::Select(id) => self.select(id),
            UserIntent::SetFollow(enabled) => self.set_follow_enabled(enabled),
            UserIntent::TogglePause => {
                self.paused = !self.paused;
                self.channel.post(OutboundMessage::SetPaused {
                    paused: self.paused,
                });
            }
            UserIntent::SetTimeScale(time_scale) => {
                if !time_scale.is_finite() {
                    log::warn!("viewer: ignoring non-finite time scale {time_scale}");
                    return;
                }
                self.time_scale = time_scale;
                self.channel.post(OutboundMessage::SetTimescale { time_scale });
            }
            UserIntent::ResetCamera => self.camera.reset(),
            UserIntent::CenterOnSelected => self.center_on_selected(),
            UserIntent::Resize { width, height, dpr } => self.camera.resize(width, height, dpr),
        }
    }

    /// Hit-test a device-pixel point against the last frame. A miss keeps
    /// the current selection.
    fn pick(&mut self, point: DVec2) {
        let Some(event) = self
            .picker
            .pick(self.scene.footprints(), point, self.camera.dpr)
        else {
            return;
        };
        log::debug!("viewer: picked {}", event.id);
        self.select(Some(event.id.clone()));
        self.events.push(ViewerEvent::Picked(event.id));
    }

    /// Change the selection. With follow enabled the camera retargets too.
    pub fn select(&mut self, id: Option<BodyId>) {
        self.groups.selected = id.clone();
        if self.follow_enabled {
            self.camera.set_follow(id.clone());
        }
        self.selected = id;
    }

    fn set_follow_enabled(&mut self, enabled: bool) {
        self.follow_enabled = enabled;
        let target = if enabled { self.selected.clone() } else { None };
        self.camera.set_follow(target);
    }

    /// Recentre once on the selected body's position in the newest snapshot.
    fn center_on_selected(&mut self) {
        let (Some(next), Some(id)) = (&self.next, &self.selected) else {
            return;
        };
        match next.body(id).and_then(|b| b.position) {
            Some(p) => {
                let ppm = self.camera.px_per_meter();
                self.camera.center_on_world(p.x, p.y, ppm);
            }
            None => log::warn!("viewer: cannot centre on {id}, not in the latest snapshot"),
        }
    }

    // -- Accessors --

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn selected(&self) -> Option<&BodyId> {
        self.selected.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn follow_enabled(&self) -> bool {
        self.follow_enabled
    }

    pub fn previous(&self) -> Option<&Snapshot> {
        self.previous.as_deref()
    }

    pub fn next(&self) -> Option<&Snapshot> {
        self.next.as_deref()
    }

    pub fn orbit_cache(&self) -> &OrbitCache {
        &self.orbits
    }

    pub fn footprints(&self) -> &[Footprint] {
        self.scene.footprints()
    }

    pub fn groups(&self) -> &BodyGroups {
        &self.groups
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn inspector(&self) -> &str {
        &self.inspector
    }

    pub fn take_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }
}
