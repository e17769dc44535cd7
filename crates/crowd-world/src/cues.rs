//! Audio/visual cue interface.
//!
//! The AI core and the alert cone fire cues outward — short sounds and
//! indicator toggles — with no return contract.  Hosts inject an
//! implementation at construction time; there is no process-wide cue
//! manager.  All methods have default no-op implementations so hosts only
//! override what they render.

use crowd_core::EntityId;

/// Fire-and-forget audio and indicator cues.
pub trait CueSink {
    // ── Audio ─────────────────────────────────────────────────────────────

    /// An alert reached a witnessing agent, or the cone was released.
    fn play_alert(&mut self) {}

    /// An abduction started (fired on the victim entering its taken state).
    fn play_take_away(&mut self) {}

    /// The host declared the run won.
    fn play_victory(&mut self) {}

    /// The host declared the run lost.
    fn play_defeat(&mut self) {}

    // ── Indicators ────────────────────────────────────────────────────────

    /// Toggle the witness indicator above `entity`.
    fn set_witness_sign(&mut self, _entity: EntityId, _visible: bool) {}

    /// Toggle the violence indicator above `entity`.
    fn set_violence_sign(&mut self, _entity: EntityId, _visible: bool) {}

    /// Toggle the player's post-release alert indicator.
    fn set_alert_sign(&mut self, _visible: bool) {}
}

/// A [`CueSink`] that does nothing.  Use for headless runs and tests that
/// don't assert on cues.
pub struct NoopCues;

impl CueSink for NoopCues {}
