//! Integration tests for crowd-sim.

use crowd_core::{AiConfig, AlertConfig, EntityId, ResponseCurve, SimConfig, Tick, Vec2};
use crowd_world::{EntityStore, ExitPoints, NoopCues, PatrolPoints};

use crowd_ai::AiState;

use crate::{NoopObserver, Sim, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_configs() -> (SimConfig, AiConfig, AlertConfig) {
    (
        SimConfig { dt_secs: 0.1, seed: 42 },
        AiConfig {
            max_pursuit_secs:             5.0,
            minimum_speed_ratio:          0.4,
            max_delay_before_next_target: 0.0,
            target_reached_distance:      0.25,
            take_away_speed_ratio:        0.75,
            conviction_after_take_away:   0.25,
            taken_away_cooldown:          [0.0, 0.0],
            re_pursuit_cooldown:          [0.0, 0.0],
        },
        AlertConfig {
            minimum_size:         5.0,
            maximum_size:         5.0,
            growth_per_sec:       1.0,
            minimum_angle_deg:    90.0,
            maximum_angle_deg:    90.0,
            angle_growth_per_sec: 10.0,
            cooldown_secs:        1.0,
            sign_secs:            0.5,
            conviction_impact:    ResponseCurve::constant(0.6),
        },
    )
}

fn build_sim(
    positions: &[(f32, f32)],
    player: Option<EntityId>,
) -> Sim<PatrolPoints, ExitPoints, NoopCues> {
    let (sim_cfg, ai_cfg, alert_cfg) = test_configs();
    let entities = EntityStore::new(
        positions.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        /*move_speed=*/ 10.0,
    );
    let builder = SimBuilder::new(
        sim_cfg,
        ai_cfg,
        alert_cfg,
        entities,
        PatrolPoints::new(vec![Vec2::new(3.0, 0.0)]),
        ExitPoints::new(vec![Vec2::new(6.0, 0.0)]),
        NoopCues,
    );
    let builder = match player {
        Some(p) => builder.player(p),
        None => builder,
    };
    builder.build().unwrap()
}

/// Observer that records take-away pairs and counts ticks.
#[derive(Default)]
struct Recorder {
    starts:     usize,
    ends:       usize,
    take_aways: Vec<(EntityId, EntityId)>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _t: Tick) {
        self.starts += 1;
    }
    fn on_tick_end(&mut self, _t: Tick, _taken: usize) {
        self.ends += 1;
    }
    fn on_take_away(&mut self, _t: Tick, abductor: EntityId, victim: EntityId) {
        self.take_aways.push((abductor, victim));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn player_gets_no_controller() {
        let sim = build_sim(&[(0.0, -5.0), (0.0, 0.0), (1.0, 0.0)], Some(EntityId(0)));
        assert_eq!(sim.agents.len(), 2);
        assert_eq!(sim.agent_state(EntityId(0)), None);
        assert_eq!(sim.agent_state(EntityId(1)), Some(AiState::RoamingPatrol));
        assert_eq!(sim.agent_state(EntityId(2)), Some(AiState::RoamingPatrol));
    }

    #[test]
    fn headless_crowd_controls_everyone() {
        let sim = build_sim(&[(0.0, 0.0), (1.0, 0.0)], None);
        assert_eq!(sim.agents.len(), 2);
    }

    #[test]
    fn invalid_config_rejected() {
        let (mut sim_cfg, ai_cfg, alert_cfg) = test_configs();
        sim_cfg.dt_secs = 0.0;
        let result = SimBuilder::new(
            sim_cfg,
            ai_cfg,
            alert_cfg,
            EntityStore::new(vec![Vec2::ZERO], 1.0),
            PatrolPoints::new(vec![]),
            ExitPoints::new(vec![]),
            NoopCues,
        )
        .build();
        assert!(result.is_err());
    }

    #[test]
    fn player_out_of_range_rejected() {
        let (sim_cfg, ai_cfg, alert_cfg) = test_configs();
        let result = SimBuilder::new(
            sim_cfg,
            ai_cfg,
            alert_cfg,
            EntityStore::new(vec![Vec2::ZERO], 1.0),
            PatrolPoints::new(vec![]),
            ExitPoints::new(vec![]),
            NoopCues,
        )
        .player(EntityId(5))
        .build();
        assert!(result.is_err());
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn observer_called_once_per_tick() {
        let mut sim = build_sim(&[(0.0, 0.0), (1.0, 0.0)], None);
        let mut recorder = Recorder::default();
        sim.run_ticks(7, &mut recorder);
        assert_eq!(recorder.starts, 7);
        assert_eq!(recorder.ends, 7);
        assert_eq!(sim.clock.current_tick, Tick(7));
    }

    #[test]
    fn same_seed_replays_identically() {
        let positions = [(0.0, -5.0), (0.0, 0.0), (0.1, 0.0), (2.0, 1.0), (-1.0, 2.0)];
        let setup = |sim: &mut Sim<PatrolPoints, ExitPoints, NoopCues>| {
            sim.entities.add_conviction(EntityId(2), 0.5);
            sim.compromise(EntityId(1));
        };

        let mut a = build_sim(&positions, Some(EntityId(0)));
        let mut b = build_sim(&positions, Some(EntityId(0)));
        setup(&mut a);
        setup(&mut b);

        a.run_ticks(100, &mut NoopObserver);
        b.run_ticks(100, &mut NoopObserver);

        assert_eq!(a.entities.positions, b.entities.positions);
        for entity in a.entities.entity_ids() {
            assert_eq!(
                a.entities.conviction(entity),
                b.entities.conviction(entity),
                "conviction diverged for {entity}"
            );
        }
    }
}

// ── Abduction through the orchestrator ────────────────────────────────────────

#[cfg(test)]
mod abduction_tests {
    use super::*;

    #[test]
    fn capture_applies_to_victim_within_the_same_tick() {
        let mut sim = build_sim(&[(0.0, -5.0), (0.0, 0.0), (0.1, 0.0)], Some(EntityId(0)));
        sim.entities.add_conviction(EntityId(2), 0.5);
        sim.compromise(EntityId(1));

        let mut recorder = Recorder::default();
        sim.tick(&mut recorder);

        // Abductor captured on its first tick; the victim's controller was
        // forced into the taken-away state before the tick ended.
        assert_eq!(sim.agent_state(EntityId(1)), Some(AiState::TakeAwayTarget));
        assert_eq!(sim.agent_state(EntityId(2)), Some(AiState::BeingTakenAway));
        assert_eq!(recorder.take_aways, vec![(EntityId(1), EntityId(2))]);
        assert_eq!(sim.registry.taken_count(), 1);
    }

    #[test]
    fn full_cycle_releases_victim_and_resets_convictions() {
        let mut sim = build_sim(&[(0.0, -5.0), (0.0, 0.0), (0.1, 0.0)], Some(EntityId(0)));
        sim.entities.add_conviction(EntityId(2), 0.5);
        sim.compromise(EntityId(1));

        let mut recorder = Recorder::default();
        sim.run_ticks(100, &mut recorder);

        // One abduction happened, ran to completion, and was cleaned up.
        assert_eq!(recorder.take_aways, vec![(EntityId(1), EntityId(2))]);
        assert_eq!(sim.registry.taken_count(), 0);
        // Victim re-educated to the neutral baseline; abductor left at the
        // configured post-abduction conviction.
        assert_eq!(sim.entities.conviction(EntityId(2)), 0.0);
        assert!((sim.entities.conviction(EntityId(1)) - 0.25).abs() < 1e-6);
        // With nobody converted any more, both are back on patrol.
        assert_eq!(sim.agent_state(EntityId(1)), Some(AiState::RoamingPatrol));
        assert_eq!(sim.agent_state(EntityId(2)), Some(AiState::RoamingPatrol));
    }
}

// ── Cone through the orchestrator ─────────────────────────────────────────────

#[cfg(test)]
mod cone_tests {
    use super::*;

    #[test]
    fn released_cone_alerts_witness_and_pays_caller() {
        let mut sim = build_sim(&[(0.0, 0.0), (2.0, 0.0)], Some(EntityId(0)));
        sim.set_witness(EntityId(1), 60.0);

        sim.grow_cone();
        sim.aim_cone(Vec2::new(1.0, 0.0));
        let outcome = sim.release_cone(false);

        assert_eq!(outcome.qualifying, 1);
        assert!((outcome.accepted_total - 0.6).abs() < 1e-6);
        assert!((sim.entities.conviction(EntityId(1)) - 0.6).abs() < 1e-6);
        assert!((sim.entities.conviction(EntityId(0)) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn cooldown_blocks_regrowth_until_it_expires() {
        let mut sim = build_sim(&[(0.0, 0.0), (2.0, 0.0)], Some(EntityId(0)));

        sim.grow_cone();
        assert!(sim.cone.is_active());
        sim.aim_cone(Vec2::new(1.0, 0.0));
        sim.release_cone(false);
        assert!(!sim.cone.is_active());

        // Still inside the 1 s cooldown at t = 0.
        sim.grow_cone();
        assert!(!sim.cone.is_active());

        // 1.5 simulated seconds later the cooldown has expired.
        sim.run_ticks(15, &mut NoopObserver);
        sim.grow_cone();
        assert!(sim.cone.is_active());
    }

    #[test]
    fn headless_sim_cone_is_inert() {
        let mut sim = build_sim(&[(0.0, 0.0), (2.0, 0.0)], None);
        sim.grow_cone();
        assert!(!sim.cone.is_active());
        let outcome = sim.release_cone(false);
        assert_eq!(outcome.qualifying, 0);
    }
}
