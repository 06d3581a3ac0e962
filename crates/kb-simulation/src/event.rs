/// What kind of round event occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEventKind {
    // Round lifecycle
    /// All five bodies were launched.
    Thrown,
    /// Every body is resolved and the outcome was scored.
    Completed {
        /// Sum of the five values.
        sum: i32,
    },
    /// The round was discarded and bodies returned to the neutral layout.
    Reset,
    /// The table bounds changed.
    Resized,

    // Rest detection
    /// A body's speed dropped under the rest threshold.
    Settled {
        /// Body index.
        body: usize,
    },
    /// A body started moving again before it was read.
    Unsettled {
        /// Body index.
        body: usize,
    },

    // Face resolution
    /// A body resting on an edge was knocked over.
    Nudged {
        /// Body index.
        body: usize,
        /// Best face alignment at the time, if any anchor exists.
        best_dot: Option<f32>,
    },
    /// A body locked a face and began snapping onto it.
    SnapStarted {
        /// Body index.
        body: usize,
        /// Face name.
        face: String,
    },
    /// A body was resolved to a value.
    Resolved {
        /// Body index.
        body: usize,
        /// Face name, if an anchor was found.
        face: Option<String>,
        /// Scored value.
        value: i32,
        /// Whether the timeout forced the resolution.
        forced: bool,
    },
    /// The timeout fired with bodies still unresolved.
    ForceSnap {
        /// Number of bodies that were still unresolved.
        pending: usize,
    },
}

impl RoundEventKind {
    /// Check whether a given body is involved in this event.
    pub fn involves(&self, index: usize) -> bool {
        match self {
            Self::Settled { body }
            | Self::Unsettled { body }
            | Self::Nudged { body, .. }
            | Self::SnapStarted { body, .. }
            | Self::Resolved { body, .. } => *body == index,
            Self::Thrown
            | Self::Completed { .. }
            | Self::Reset
            | Self::Resized
            | Self::ForceSnap { .. } => false,
        }
    }

    /// Short lowercase label, e.g. `"settled"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Thrown => "thrown",
            Self::Completed { .. } => "completed",
            Self::Reset => "reset",
            Self::Resized => "resized",
            Self::Settled { .. } => "settled",
            Self::Unsettled { .. } => "unsettled",
            Self::Nudged { .. } => "nudged",
            Self::SnapStarted { .. } => "snap",
            Self::Resolved { .. } => "resolved",
            Self::ForceSnap { .. } => "force-snap",
        }
    }
}

/// A record of something that happened during a round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundEvent {
    /// Frame number since the throw (0 for throw/reset events).
    pub frame: u64,
    /// Host timestamp in milliseconds.
    pub at_ms: f64,
    /// The specific kind of event that occurred.
    pub kind: RoundEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl RoundEvent {
    /// Create a new round event.
    pub fn new(frame: u64, at_ms: f64, kind: RoundEventKind, description: impl Into<String>) -> Self {
        Self {
            frame,
            at_ms,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a round.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<RoundEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: RoundEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[RoundEvent] {
        &self.events
    }

    /// Return all events recorded at the given frame.
    pub fn events_at_frame(&self, frame: u64) -> Vec<&RoundEvent> {
        self.events.iter().filter(|e| e.frame == frame).collect()
    }

    /// Return all events involving the given body.
    pub fn events_for_body(&self, index: usize) -> Vec<&RoundEvent> {
        self.events.iter().filter(|e| e.kind.involves(index)).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
