use rand::Rng;

use crate::anchor::AnchorSet;
use crate::config::SimConfig;
use crate::event::{EventLog, RoundEvent, RoundEventKind};

/// Shared state passed to each stage of a frame.
pub struct StepContext<'a, R: Rng + ?Sized> {
    /// Physics and timing parameters.
    pub config: &'a SimConfig,
    /// Face anchors shared by all bodies.
    pub anchors: &'a AnchorSet,
    /// Log that receives this frame's events.
    pub events: &'a mut EventLog,
    /// Source of nudge directions.
    pub rng: &'a mut R,
    /// Frame number since the throw.
    pub frame: u64,
    /// Host timestamp of this frame in milliseconds.
    pub now_ms: f64,
}

impl<R: Rng + ?Sized> StepContext<'_, R> {
    /// Emit a round event at the current frame.
    pub fn emit(&mut self, kind: RoundEventKind, description: impl Into<String>) {
        self.events
            .push(RoundEvent::new(self.frame, self.now_ms, kind, description));
    }
}
