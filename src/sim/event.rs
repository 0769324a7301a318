use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Discrete flight events
// ---------------------------------------------------------------------------

/// Kinds of discrete occurrences during a flight attempt.
/// Each is delivered at most once per logical occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    StageSeparation { stage: usize },
    FuelExhausted,
    SpaceReached,
    OrbitAchieved,
    Crash,
    Abort,
}

/// An immutable record of a discrete occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightEvent {
    pub kind: EventKind,
    /// Mission clock at the occurrence, s.
    pub mission_time: f64,
    /// Altitude at the occurrence, m.
    pub altitude: f64,
}

// ---------------------------------------------------------------------------
// Bounded append-only event log
// ---------------------------------------------------------------------------

/// Append-only log kept for replay and telemetry. Bounded: once the cap is
/// reached the oldest entries are discarded.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<FlightEvent>,
    cap: usize,
}

pub const DEFAULT_EVENT_CAP: usize = 1_000;

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAP)
    }
}

impl EventLog {
    pub fn with_capacity(cap: usize) -> Self {
        Self { entries: VecDeque::new(), cap: cap.max(1) }
    }

    pub fn push(&mut self, event: FlightEvent) {
        if self.entries.len() == self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Snapshot of the log in arrival order.
    pub fn to_vec(&self) -> Vec<FlightEvent> {
        self.entries.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: EventKind, t: f64) -> FlightEvent {
        FlightEvent { kind, mission_time: t, altitude: 0.0 }
    }

    #[test]
    fn log_keeps_arrival_order() {
        let mut log = EventLog::default();
        log.push(event(EventKind::StageSeparation { stage: 1 }, 10.0));
        log.push(event(EventKind::SpaceReached, 20.0));
        let entries = log.to_vec();
        assert_eq!(entries[0].kind, EventKind::StageSeparation { stage: 1 });
        assert_eq!(entries[1].kind, EventKind::SpaceReached);
    }

    #[test]
    fn log_discards_oldest_beyond_cap() {
        let mut log = EventLog::with_capacity(3);
        for i in 0..5 {
            log.push(event(EventKind::FuelExhausted, i as f64));
        }
        let entries = log.to_vec();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].mission_time, 2.0);
        assert_eq!(entries[2].mission_time, 4.0);
    }
}
