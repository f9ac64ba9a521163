/// Single-slot supervisor: at most one scoring pass is in flight.
#[derive(Debug, Clone, Default)]
pub struct FrameSupervisor {
    in_flight: Option<u64>,
    started: u64,
    completed: u64,
    dropped: u64,
    abandoned: u64,
}

impl FrameSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `frame`. A frame arriving while the slot is busy
    /// is dropped and `false` is returned.
    pub fn try_begin(&mut self, frame: u64) -> bool {
        if self.in_flight.is_some() {
            self.dropped += 1;
            return false;
        }
        self.in_flight = Some(frame);
        self.started += 1;
        true
    }

    pub fn complete(&mut self, frame: u64) {
        if self.in_flight == Some(frame) {
            self.in_flight = None;
            self.completed += 1;
        }
    }

    pub fn abandon(&mut self) {
        if self.in_flight.take().is_some() {
            self.abandoned += 1;
        }
    }

    /// Counts a frame dropped before it reached the slot.
    pub fn record_drop(&mut self) {
        self.dropped += 1;
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn started(&self) -> u64 {
        self.started
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn abandoned(&self) -> u64 {
        self.abandoned
    }
}
