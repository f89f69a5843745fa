pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::ViewerConfig;
pub use api::readout::{inspector_text, status_text, BodyEntry, BodyGroups};
pub use api::types::{Body, BodyId, BodyKind, Orbit, Snapshot, Vector3};
pub use api::viewer::{FrameOutcome, Viewer, ViewerEvent};
pub use bridge::protocol::{InboundMessage, OutboundMessage, Outbox, SimChannel};
pub use core::interpolate::interpolate;
pub use core::orbit_cache::{sample_orbit, OrbitCache};
pub use core::time::ReceiptWindow;
pub use input::queue::{IntentQueue, UserIntent};
pub use renderer::camera::Camera2D;
pub use renderer::disc::{DiscBuffer, DiscInstance};
pub use renderer::traits::{Backdrop, Color, Disc, DrawSurface, Label};
pub use systems::pick::{Footprint, PickEvent, Picker};
pub use systems::scene::SceneRenderer;
pub use systems::starfield::Starfield;

#[cfg(feature = "vectors")]
pub use renderer::frame::FrameBuffer;
#[cfg(feature = "vectors")]
pub use systems::vector::{VectorLayer, VectorVertex};
