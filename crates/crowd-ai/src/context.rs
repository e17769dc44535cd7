//! Collaborator bundle passed to every controller tick.

use crowd_core::AiConfig;
use crowd_world::{CueSink, EntityStore, ExitProvider, OppressionRegistry, PatrolProvider};

/// Everything one controller tick reads and mutates.
///
/// Built fresh by the orchestrator for each agent's slot in the sequential
/// loop.  Fields are `&mut` where the controller mutates in place (entity
/// conviction/position, the registry's taken-away set, cue firing) — the
/// single-threaded tick contract makes this safe without locking.
pub struct AiContext<'a> {
    /// Simulated seconds since the run started.
    pub now: f64,

    /// Seconds this tick represents.
    pub dt: f32,

    /// Read-only tuning bounds.
    pub config: &'a AiConfig,

    /// All entity positions and convictions.
    pub entities: &'a mut EntityStore,

    /// Taken-away set, oppression-target resolution, controller lookup.
    pub registry: &'a mut OppressionRegistry,

    /// Patrol waypoint source.
    pub patrol: &'a dyn PatrolProvider,

    /// Exit waypoint source.
    pub exits: &'a dyn ExitProvider,

    /// Outward audio/visual cues.
    pub cues: &'a mut dyn CueSink,
}

impl<'a> AiContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        now:      f64,
        dt:       f32,
        config:   &'a AiConfig,
        entities: &'a mut EntityStore,
        registry: &'a mut OppressionRegistry,
        patrol:   &'a dyn PatrolProvider,
        exits:    &'a dyn ExitProvider,
        cues:     &'a mut dyn CueSink,
    ) -> Self {
        Self { now, dt, config, entities, registry, patrol, exits, cues }
    }
}
