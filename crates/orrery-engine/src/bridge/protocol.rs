//! Messages exchanged with the external simulation process.
//!
//! Wire format is JSON with a `type` discriminator:
//!
//! ```text
//! inbound:  { "type": "READY" }
//!           { "type": "LOG", "message": "..." }
//!           { "type": "SNAPSHOT", "snapshot": { ... } }
//! outbound: { "type": "INIT", "seed": "..." }
//!           { "type": "SET_PAUSED", "paused": true }
//!           { "type": "SET_TIMESCALE", "timeScale": 3600 }
//! ```

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::api::types::Snapshot;

/// Messages from the simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InboundMessage {
    Ready,
    Log { message: String },
    Snapshot { snapshot: Snapshot },
}

impl InboundMessage {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Messages to the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    Init {
        seed: String,
    },
    SetPaused {
        paused: bool,
    },
    SetTimescale {
        #[serde(rename = "timeScale")]
        time_scale: f64,
    },
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Outbound half of the simulation link. Fire-and-forget; implementations
/// decide whether messages cross a thread, a process or an event loop.
pub trait SimChannel {
    fn post(&mut self, message: OutboundMessage);
}

/// Buffered channel drained by the host once per frame.
#[derive(Debug, Default)]
pub struct Outbox {
    pending: Vec<OutboundMessage>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[OutboundMessage] {
        &self.pending
    }

    /// Drain as a JSON array for hosts that relay strings.
    pub fn drain_json(&mut self) -> Result<String, serde_json::Error> {
        let messages = self.drain();
        serde_json::to_string(&messages)
    }
}

impl SimChannel for Outbox {
    fn post(&mut self, message: OutboundMessage) {
        self.pending.push(message);
    }
}

impl SimChannel for Sender<OutboundMessage> {
    fn post(&mut self, message: OutboundMessage) {
        if self.send(message).is_err() {
            log::warn!("simulation channel closed; outbound message dropped");
        }
    }
}
