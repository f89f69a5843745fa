use crate::api::types::BodyId;

/// User intents the viewer understands. Pointer coordinates are CSS pixels;
/// the viewer scales them by the device pixel ratio.
#[derive(Debug, Clone, PartialEq)]
pub enum UserIntent {
    /// Click/tap at a point; hit-tests the last rendered frame.
    Pick { x: f64, y: f64 },
    /// Drag by a delta.
    Pan { dx: f64, dy: f64 },
    /// Wheel/pinch zoom around a point.
    ZoomAt { x: f64, y: f64, factor: f64 },
    /// Selection from the body list; `None` clears it.
    Select(Option<BodyId>),
    /// Follow checkbox.
    SetFollow(bool),
    TogglePause,
    SetTimeScale(f64),
    ResetCamera,
    CenterOnSelected,
    /// Surface resize, in device pixels.
    Resize { width: f64, height: f64, dpr: f64 },
}

/// Intents collected between frames. The host pushes; the viewer drains at
/// the start of each frame.
pub struct IntentQueue {
    intents: Vec<UserIntent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self {
            intents: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, intent: UserIntent) {
        self.intents.push(intent);
    }

    /// Take all pending intents, oldest first.
    pub fn drain(&mut self) -> Vec<UserIntent> {
        std::mem::take(&mut self.intents)
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }
}

impl Default for IntentQueue {
    fn default() -> Self {
        Self::new()
    }
}
