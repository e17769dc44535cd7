//! Behavior tests for the agent controller.

use crowd_core::{AgentRng, AiConfig, EntityId, Vec2};
use crowd_world::{
    COMPROMISED_CONVICTION, CueSink, EntityStore, ExitPoints, OppressionRegistry, PatrolPoints,
};

use crate::{AgentAi, AiContext, AiState, ExitOrder};

// ── Test doubles ──────────────────────────────────────────────────────────────

/// Cue sink that records everything it is asked to play or toggle.
#[derive(Default)]
struct RecordingCues {
    alerts:         usize,
    take_aways:     usize,
    witness_signs:  Vec<(EntityId, bool)>,
    violence_signs: Vec<(EntityId, bool)>,
}

impl CueSink for RecordingCues {
    fn play_alert(&mut self) {
        self.alerts += 1;
    }
    fn play_take_away(&mut self) {
        self.take_aways += 1;
    }
    fn set_witness_sign(&mut self, entity: EntityId, visible: bool) {
        self.witness_signs.push((entity, visible));
    }
    fn set_violence_sign(&mut self, entity: EntityId, visible: bool) {
        self.violence_signs.push((entity, visible));
    }
}

// ── Harness ───────────────────────────────────────────────────────────────────

/// A tiny world plus a manual clock: ticks one controller at a time so tests
/// can interleave assertions between steps.
struct World {
    config:   AiConfig,
    entities: EntityStore,
    registry: OppressionRegistry,
    patrol:   PatrolPoints,
    exits:    ExitPoints,
    cues:     RecordingCues,
    now:      f64,
    dt:       f32,
}

impl World {
    fn new(positions: &[(f32, f32)]) -> Self {
        Self {
            // Zeroed delays keep the transition gate always open; individual
            // tests override the ranges they exercise.
            config: AiConfig {
                max_pursuit_secs:             0.5,
                minimum_speed_ratio:          0.4,
                max_delay_before_next_target: 0.0,
                target_reached_distance:      0.25,
                take_away_speed_ratio:        0.75,
                conviction_after_take_away:   0.25,
                taken_away_cooldown:          [0.0, 0.0],
                re_pursuit_cooldown:          [0.0, 0.0],
            },
            entities: EntityStore::new(
                positions.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
                /*move_speed=*/ 1.0,
            ),
            registry: OppressionRegistry::new(),
            patrol:   PatrolPoints::new(vec![Vec2::new(5.0, 0.0)]),
            exits:    ExitPoints::new(vec![Vec2::new(10.0, 0.0)]),
            cues:     RecordingCues::default(),
            now:      0.0,
            dt:       0.1,
        }
    }

    fn tick(&mut self, agent: &mut AgentAi, rng: &mut AgentRng) -> Option<ExitOrder> {
        let mut ctx = AiContext::new(
            self.now,
            self.dt,
            &self.config,
            &mut self.entities,
            &mut self.registry,
            &self.patrol,
            &self.exits,
            &mut self.cues,
        );
        let order = agent.tick(rng, &mut ctx);
        self.now += self.dt as f64;
        order
    }

    fn compromise(&mut self, entity: EntityId) {
        self.entities
            .set_conviction(entity, COMPROMISED_CONVICTION, true);
    }

    fn convert(&mut self, entity: EntityId, conviction: f32) {
        self.entities.add_conviction(entity, conviction);
    }
}

fn rng_for(entity: EntityId) -> AgentRng {
    AgentRng::new(42, entity)
}

// ── Alert entry point ─────────────────────────────────────────────────────────

#[cfg(test)]
mod alert {
    use super::*;

    #[test]
    fn rejected_outside_witness() {
        let mut world = World::new(&[(0.0, 0.0)]);
        let mut agent = AgentAi::new(EntityId(0));

        let accepted = agent.alert(0.3, &mut world.entities, &mut world.cues);

        assert!(!accepted);
        assert_eq!(world.entities.conviction(EntityId(0)), 0.0);
        assert_eq!(world.cues.alerts, 0);
        assert_eq!(agent.state(), AiState::RoamingPatrol);
    }

    #[test]
    fn accepted_while_witnessing_adds_exactly_intensity() {
        let mut world = World::new(&[(0.0, 0.0)]);
        let mut agent = AgentAi::new(EntityId(0));
        agent.set_witness(5.0, world.now, &world.entities, &mut world.cues);

        let accepted = agent.alert(0.3, &mut world.entities, &mut world.cues);

        assert!(accepted);
        assert!((world.entities.conviction(EntityId(0)) - 0.3).abs() < 1e-6);
        assert_eq!(world.cues.alerts, 1);
    }
}

// ── Witness state ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod witness {
    use super::*;

    #[test]
    fn entering_shows_sign_and_switches_state() {
        let mut world = World::new(&[(0.0, 0.0)]);
        let mut agent = AgentAi::new(EntityId(0));

        agent.set_witness(2.0, world.now, &world.entities, &mut world.cues);

        assert_eq!(agent.state(), AiState::Witness);
        assert_eq!(world.cues.witness_signs, vec![(EntityId(0), true)]);
    }

    #[test]
    fn rejected_while_compromised() {
        let mut world = World::new(&[(0.0, 0.0)]);
        let mut agent = AgentAi::new(EntityId(0));
        world.compromise(EntityId(0));

        agent.set_witness(2.0, world.now, &world.entities, &mut world.cues);

        assert_eq!(agent.state(), AiState::RoamingPatrol);
        assert!(world.cues.witness_signs.is_empty());
    }

    #[test]
    fn expires_back_to_patrol_and_hides_sign() {
        let mut world = World::new(&[(0.0, 0.0)]);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));
        agent.set_witness(0.35, world.now, &world.entities, &mut world.cues);

        // now = 0.0, 0.1, 0.2, 0.3: still within the 0.35 s window.
        for _ in 0..4 {
            world.tick(&mut agent, &mut rng);
            assert_eq!(agent.state(), AiState::Witness);
        }

        // now = 0.4: expired.
        world.tick(&mut agent, &mut rng);
        assert_eq!(agent.state(), AiState::RoamingPatrol);
        assert_eq!(
            world.cues.witness_signs,
            vec![(EntityId(0), true), (EntityId(0), false)]
        );
    }

    #[test]
    fn witnessing_agent_does_not_move() {
        let mut world = World::new(&[(1.0, 2.0)]);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));
        agent.set_witness(10.0, world.now, &world.entities, &mut world.cues);

        for _ in 0..5 {
            world.tick(&mut agent, &mut rng);
        }
        // Witness resolves no movement target.
        assert_eq!(world.entities.position(EntityId(0)), Vec2::new(1.0, 2.0));
    }
}

// ── Oppressor sync and pursuit ────────────────────────────────────────────────

#[cfg(test)]
mod oppression {
    use super::*;

    #[test]
    fn compromised_entity_becomes_pursuing_oppressor() {
        // Entity 1 is converted, so a pursuit target resolves immediately.
        let mut world = World::new(&[(0.0, 0.0), (3.0, 0.0)]);
        world.convert(EntityId(1), 0.5);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));

        world.compromise(EntityId(0));
        world.tick(&mut agent, &mut rng);

        assert!(agent.is_oppressor());
        assert_eq!(agent.state(), AiState::GoToTarget);
        assert_eq!(agent.target_entity(), Some(EntityId(1)));
    }

    #[test]
    fn oppressor_without_candidates_falls_back_to_patrol() {
        let mut world = World::new(&[(0.0, 0.0), (3.0, 0.0)]);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));

        world.compromise(EntityId(0));
        world.tick(&mut agent, &mut rng);

        // Still flagged, but nobody qualifies — back to patrol.
        assert!(agent.is_oppressor());
        assert_eq!(agent.state(), AiState::RoamingPatrol);
        assert_eq!(agent.target_entity(), None);
    }

    #[test]
    fn restored_conviction_interrupts_oppression() {
        let mut world = World::new(&[(0.0, 0.0), (3.0, 0.0)]);
        world.convert(EntityId(1), 0.5);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));

        world.compromise(EntityId(0));
        world.tick(&mut agent, &mut rng);
        assert_eq!(agent.state(), AiState::GoToTarget);

        // External force-reset mid-pursuit.
        world.entities.set_conviction(EntityId(0), 0.0, true);
        world.tick(&mut agent, &mut rng);

        assert!(!agent.is_oppressor());
        assert_eq!(agent.state(), AiState::RoamingPatrol);
    }

    #[test]
    fn pursuit_timeout_abandons_target() {
        // Victim is converted but 100 units away — unreachable before the
        // 0.5 s pursuit maximum elapses at dt = 0.1.
        let mut world = World::new(&[(0.0, 0.0), (100.0, 0.0)]);
        world.convert(EntityId(1), 0.5);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));

        world.compromise(EntityId(0));
        for _ in 0..4 {
            world.tick(&mut agent, &mut rng);
            assert_eq!(agent.state(), AiState::GoToTarget);
        }

        // Fifth tick accumulates pursuit_secs to the 0.5 s maximum.
        world.tick(&mut agent, &mut rng);
        assert_eq!(agent.state(), AiState::RoamingPatrol);
        assert_eq!(agent.target_entity(), None);
    }
}

// ── Capture, take-away, and the cross-agent order ─────────────────────────────

#[cfg(test)]
mod take_away {
    use super::*;

    /// Abductor at the origin, victim already in reach, exit at (10, 0).
    /// Entity 2 is a second converted candidate so pursuit can re-arm after
    /// the first victim is taken.
    fn capture_world() -> (World, AgentAi, AgentAi, AgentRng, AgentRng) {
        let mut world = World::new(&[(0.0, 0.0), (0.1, 0.0), (2.0, 0.0)]);
        world.convert(EntityId(1), 0.5);
        world.convert(EntityId(2), 0.6);
        world.compromise(EntityId(0));
        let abductor = AgentAi::new(EntityId(0));
        let victim = AgentAi::new(EntityId(1));
        (world, abductor, victim, rng_for(EntityId(0)), rng_for(EntityId(1)))
    }

    #[test]
    fn capture_registers_and_orders_victim_to_exit() {
        let (mut world, mut abductor, mut victim, mut rng_a, mut rng_v) = capture_world();

        let order = world.tick(&mut abductor, &mut rng_a).expect("capture order");

        assert_eq!(abductor.state(), AiState::TakeAwayTarget);
        assert!(world.registry.is_taken(EntityId(1)));
        assert_eq!(world.registry.abductor_of(EntityId(1)), Some(EntityId(0)));
        assert_eq!(order.victim, EntityId(1));
        assert_eq!(order.exit, Some(Vec2::new(10.0, 0.0)));
        assert!(world.cues.violence_signs.contains(&(EntityId(0), true)));

        // Orchestrator applies the order: victim enters the taken-away state
        // with the identical exit target and delay, at the take-away speed.
        victim.set_exit_target(order.exit, order.delay, world.now, &world.config, &mut world.cues);
        assert_eq!(victim.state(), AiState::BeingTakenAway);
        assert_eq!(victim.speed_ratio(), world.config.take_away_speed_ratio);
        assert_eq!(victim.delay_before_next_target(), order.delay);
        assert_eq!(world.cues.take_aways, 1);

        // Both converge on the exit from here on.
        let before = world.entities.position(EntityId(1)).distance(Vec2::new(10.0, 0.0));
        world.tick(&mut victim, &mut rng_v);
        let after = world.entities.position(EntityId(1)).distance(Vec2::new(10.0, 0.0));
        assert!(after < before, "victim should approach the exit");
    }

    #[test]
    fn delivered_victim_returns_to_patrol_and_is_released() {
        let (mut world, mut abductor, mut victim, mut rng_a, mut rng_v) = capture_world();

        let order = world.tick(&mut abductor, &mut rng_a).expect("capture order");
        victim.set_exit_target(order.exit, order.delay, world.now, &world.config, &mut world.cues);

        // Teleport the victim to the exit and let it arrive.
        world.entities.set_position(EntityId(1), Vec2::new(10.0, 0.0));
        world.tick(&mut victim, &mut rng_v);

        assert_eq!(victim.state(), AiState::RoamingPatrol);
        // Conviction forced back to the neutral baseline.
        assert_eq!(world.entities.conviction(EntityId(1)), 0.0);
        // Release happens on the next reach event (previous-state cleanup).
        assert!(world.registry.is_taken(EntityId(1)));
        world.tick(&mut victim, &mut rng_v);
        assert!(!world.registry.is_taken(EntityId(1)));
    }

    #[test]
    fn abductor_completes_and_rearms_pursuit() {
        let (mut world, mut abductor, _victim, mut rng_a, _rng_v) = capture_world();

        world.tick(&mut abductor, &mut rng_a);

        // Teleport the abductor to the exit: next tick completes the
        // take-away leg.
        world.entities.set_position(EntityId(0), Vec2::new(10.0, 0.0));
        world.tick(&mut abductor, &mut rng_a);

        assert_eq!(abductor.state(), AiState::RoamingPatrol);
        assert_eq!(abductor.target_entity(), None);
        // Conviction forced to the configured post-abduction value.
        assert!((world.entities.conviction(EntityId(0)) - 0.25).abs() < 1e-6);

        // The zero-length re-pursuit cooldown re-arms on the following tick;
        // the post-abduction conviction also cleared the oppressor flag.
        world.tick(&mut abductor, &mut rng_a);
        assert_eq!(abductor.state(), AiState::GoToTarget);
        assert!(!abductor.is_oppressor());
    }

    #[test]
    fn violence_sign_clears_after_return() {
        let (mut world, mut abductor, _victim, mut rng_a, _rng_v) = capture_world();

        world.tick(&mut abductor, &mut rng_a);
        world.entities.set_position(EntityId(0), Vec2::new(10.0, 0.0));
        world.tick(&mut abductor, &mut rng_a);

        // The reach event that completed the take-away cleared the sign the
        // capture turned on.
        let last = world
            .cues
            .violence_signs
            .iter()
            .rev()
            .find(|(e, _)| *e == EntityId(0))
            .copied();
        assert_eq!(last, Some((EntityId(0), false)));
    }
}

// ── Pathfinding and resampling ────────────────────────────────────────────────

#[cfg(test)]
mod pathfinding {
    use super::*;

    #[test]
    fn roaming_agent_approaches_its_waypoint() {
        let mut world = World::new(&[(0.0, 0.0)]);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));

        // First tick assigns the single patrol point (5, 0); subsequent
        // ticks close in on it.
        world.tick(&mut agent, &mut rng);
        let mut previous = world.entities.position(EntityId(0)).distance(Vec2::new(5.0, 0.0));
        for _ in 0..10 {
            world.tick(&mut agent, &mut rng);
            let current = world.entities.position(EntityId(0)).distance(Vec2::new(5.0, 0.0));
            assert!(current < previous, "agent should close in on the waypoint");
            previous = current;
        }
    }

    #[test]
    fn no_patrol_points_means_no_movement() {
        let mut world = World::new(&[(1.0, 1.0)]);
        world.patrol = PatrolPoints::new(vec![]);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));

        for _ in 0..5 {
            world.tick(&mut agent, &mut rng);
        }
        assert_eq!(world.entities.position(EntityId(0)), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn transition_gate_holds_until_delay_expires() {
        let mut world = World::new(&[(0.0, 0.0)]);
        // Non-zero delay range arms the gate after the first (vacuous) reach.
        world.config.max_delay_before_next_target = 0.5;
        world.config.minimum_speed_ratio = 1.0;
        // Far-away patrol point: the target is never reached, so the only
        // transitions are the vacuous first reach.
        world.patrol = PatrolPoints::new(vec![Vec2::new(100.0, 0.0)]);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));

        world.tick(&mut agent, &mut rng);
        let delay = agent.delay_before_next_target();
        assert!((0.0..=0.5).contains(&delay));

        // Movement continues during the gate window.
        let x0 = world.entities.position(EntityId(0)).x;
        world.tick(&mut agent, &mut rng);
        let x1 = world.entities.position(EntityId(0)).x;
        assert!(x1 > x0, "gated ticks still move toward the target");
    }

    #[test]
    fn resampled_values_stay_in_bounds() {
        let mut world = World::new(&[(0.0, 0.0)]);
        world.config.max_delay_before_next_target = 0.3;
        // Patrol point under the reach threshold keeps every gate-open tick
        // a reach event, resampling speed and delay each time.
        world.patrol = PatrolPoints::new(vec![Vec2::new(0.1, 0.0)]);
        let mut agent = AgentAi::new(EntityId(0));
        let mut rng = rng_for(EntityId(0));

        for _ in 0..200 {
            world.tick(&mut agent, &mut rng);
            let speed = agent.speed_ratio();
            let delay = agent.delay_before_next_target();
            assert!(
                (world.config.minimum_speed_ratio..=1.0).contains(&speed),
                "speed ratio {speed} out of bounds"
            );
            assert!(
                (0.0..=world.config.max_delay_before_next_target).contains(&delay),
                "delay {delay} out of bounds"
            );
        }
    }
}
