use std::time::Instant;
use uuid::Uuid;

use common::types::{PositionFix, Track};

/// Whether position fixes are being recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingState {
    Idle,
    Tracking,
}

/// Whether sensor readings are being delivered for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectingState {
    Idle,
    Collecting,
}

/// How a save attempt ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveOutcome {
    /// `fixes` records were written to `destination`.
    Saved { destination: String, fixes: usize },
    /// The user dismissed the destination picker. Nothing was written.
    Cancelled,
}

/// One tracking session. Owns the track recorded since `start_tracking`.
#[derive(Debug)]
pub(crate) struct TrackingSession {
    id: Uuid,
    listener_id: Uuid,
    started_at: Instant,
    track: Track,
}

impl TrackingSession {
    pub(crate) fn new(listener_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            listener_id,
            started_at: Instant::now(),
            track: Track::new(),
        }
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    /// Registration id of the location listener feeding this session.
    pub(crate) fn listener_id(&self) -> Uuid {
        self.listener_id
    }

    pub(crate) fn record(&mut self, fix: PositionFix) {
        self.track.push(fix);
    }

    pub(crate) fn track(&self) -> &Track {
        &self.track
    }

    pub(crate) fn into_track(self) -> Track {
        log::debug!(
            "Session {} closed after {:.1}s with {} fixes",
            self.id,
            self.started_at.elapsed().as_secs_f64(),
            self.track.len()
        );
        self.track
    }
}

/// Listener registrations of an active collecting session.
#[derive(Debug, Default)]
pub(crate) struct CollectingSession {
    listener_ids: Vec<Uuid>,
}

impl CollectingSession {
    pub(crate) fn new(listener_ids: Vec<Uuid>) -> Self {
        Self { listener_ids }
    }

    pub(crate) fn owns(&self, listener_id: &Uuid) -> bool {
        self.listener_ids.contains(listener_id)
    }

    pub(crate) fn into_listener_ids(self) -> Vec<Uuid> {
        self.listener_ids
    }
}
