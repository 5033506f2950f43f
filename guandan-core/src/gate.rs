//! The version gate.
//!
//! Events are applied only when they are the immediate successor of the
//! last applied version. Anything else - a gap, a duplicate, an
//! out-of-order arrival - is discarded outright and a resynchronization is
//! requested, rather than buffered or reordered. The server is the sole
//! source of truth and a full snapshot is always obtainable, so the gate
//! trades cleverness for certainty.

use guandan_types::Version;

/// Outcome of offering an event version to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The event is the immediate successor; apply it.
    Apply,
    /// The event is not the successor; drop it.
    Discard {
        /// True exactly once per discontinuity run: the caller should
        /// request a fresh snapshot. Subsequent discards while the request
        /// is outstanding stay quiet.
        request_resync: bool,
    },
}

/// Tracks the last applied version and gates event application.
#[derive(Debug, Clone, Default)]
pub struct VersionGate {
    current: Version,
    resync_pending: bool,
}

impl VersionGate {
    /// Create a gate at version zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gate at a specific version.
    pub fn with_version(version: Version) -> Self {
        Self {
            current: version,
            resync_pending: false,
        }
    }

    /// The last applied version.
    pub fn current(&self) -> Version {
        self.current
    }

    /// Whether a resynchronization request is outstanding.
    pub fn resync_pending(&self) -> bool {
        self.resync_pending
    }

    /// Offer an event's version. On `Apply` the gate has already advanced.
    pub fn offer(&mut self, event_version: Version) -> GateDecision {
        if event_version == self.current.next() {
            self.current = event_version;
            self.resync_pending = false;
            GateDecision::Apply
        } else {
            let request_resync = !self.resync_pending;
            self.resync_pending = true;
            GateDecision::Discard { request_resync }
        }
    }

    /// Accept a snapshot's version unconditionally.
    ///
    /// Snapshots are idempotent truth: they are never compared for
    /// staleness against the local version - the server's snapshot wins.
    pub fn accept_snapshot(&mut self, version: Version) {
        self.current = version;
        self.resync_pending = false;
    }
}
