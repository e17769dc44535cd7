//! Fluent builder for constructing a [`Sim`].

use crowd_core::{AgentRng, AiConfig, AlertConfig, EntityId, SimClock, SimConfig};
use crowd_world::{CueSink, EntityStore, ExitProvider, OppressionRegistry, PatrolProvider};

use crowd_ai::AgentAi;
use crowd_alert::AlertCone;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P, E, C>`].
///
/// # Required inputs
///
/// - [`SimConfig`], [`AiConfig`], [`AlertConfig`] — all validated by `build`
/// - [`EntityStore`] — positions and move speed for the whole crowd
/// - `P: PatrolProvider`, `E: ExitProvider` — waypoint sources
/// - `C: CueSink` — audio/visual cue receiver
///
/// # Optional inputs
///
/// | Method       | Default                                               |
/// |--------------|-------------------------------------------------------|
/// | `.player(e)` | No player: every entity gets a controller, cone inert |
///
/// Every entity except the player receives an [`AgentAi`] controller and a
/// deterministic [`AgentRng`] seeded from `SimConfig::seed`; the registry
/// records each controller's slot for cross-agent lookup.
pub struct SimBuilder<P: PatrolProvider, E: ExitProvider, C: CueSink> {
    config:       SimConfig,
    ai_config:    AiConfig,
    alert_config: AlertConfig,
    entities:     EntityStore,
    patrol:       P,
    exits:        E,
    cues:         C,
    player:       Option<EntityId>,
}

impl<P: PatrolProvider, E: ExitProvider, C: CueSink> SimBuilder<P, E, C> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:       SimConfig,
        ai_config:    AiConfig,
        alert_config: AlertConfig,
        entities:     EntityStore,
        patrol:       P,
        exits:        E,
        cues:         C,
    ) -> Self {
        Self {
            config,
            ai_config,
            alert_config,
            entities,
            patrol,
            exits,
            cues,
            player: None,
        }
    }

    /// Mark `entity` as the player: it gets no controller and owns the
    /// alert cone.
    pub fn player(mut self, entity: EntityId) -> Self {
        self.player = Some(entity);
        self
    }

    /// Validate configuration, build the controllers and their RNGs, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, E, C>> {
        self.config.validate()?;
        self.ai_config.validate()?;
        self.alert_config.validate()?;

        if let Some(player) = self.player
            && player.index() >= self.entities.count
        {
            return Err(SimError::PlayerOutOfRange(player, self.entities.count));
        }

        // ── Build one controller per non-player entity ────────────────────
        let mut registry = OppressionRegistry::new();
        let mut agents = Vec::with_capacity(self.entities.count);
        let mut rngs = Vec::with_capacity(self.entities.count);

        for entity in self.entities.entity_ids() {
            if Some(entity) == self.player {
                continue;
            }
            registry.register_controller(entity, agents.len());
            agents.push(AgentAi::new(entity));
            rngs.push(AgentRng::new(self.config.seed, entity));
        }

        Ok(Sim {
            clock: SimClock::new(self.config.dt_secs),
            cone: AlertCone::new(self.alert_config),
            config: self.config,
            ai_config: self.ai_config,
            entities: self.entities,
            registry,
            agents,
            rngs,
            patrol: self.patrol,
            exits: self.exits,
            cues: self.cues,
            player: self.player,
        })
    }
}
