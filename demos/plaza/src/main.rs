//! plaza — smallest runnable scenario for the rust_crowd simulation.
//!
//! A dozen entities patrol a small plaza.  The player alerts a few nearby
//! witnesses with the cone, raising their conviction; one entity is then
//! compromised and starts abducting the converted toward the plaza exits.

use std::io::Cursor;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crowd_core::{AiConfig, AlertConfig, EntityId, SimConfig, SimRng, Tick, Vec2};
use crowd_sim::{SimBuilder, SimObserver};
use crowd_world::{CueSink, EntityStore, ExitPoints, PatrolPoints, load_waypoints_reader};

// ── Constants ─────────────────────────────────────────────────────────────────

const CROWD_COUNT: usize = 12;
const SEED:        u64   = 42;
const DT_SECS:     f32   = 0.1;
const MOVE_SPEED:  f32   = 1.5;

// ── Waypoint layout ───────────────────────────────────────────────────────────

// A ring of patrol points around the plaza center, with exits at the
// east/west street mouths.
const LAYOUT_CSV: &str = "\
kind,x,y\n\
patrol,3.0,0.0\n\
patrol,2.1,2.1\n\
patrol,0.0,3.0\n\
patrol,-2.1,2.1\n\
patrol,-3.0,0.0\n\
patrol,-2.1,-2.1\n\
patrol,0.0,-3.0\n\
patrol,2.1,-2.1\n\
exit,-8.0,0.0\n\
exit,8.0,0.0\n\
";

// ── Cues and observer ─────────────────────────────────────────────────────────

/// Cue sink that narrates to stdout in place of audio/sprites.
struct ConsoleCues;

impl CueSink for ConsoleCues {
    fn play_alert(&mut self) {
        tracing::info!("cue: alert");
    }
    fn play_take_away(&mut self) {
        tracing::info!("cue: take-away");
    }
    fn play_victory(&mut self) {
        tracing::info!("cue: victory");
    }
    fn play_defeat(&mut self) {
        tracing::info!("cue: defeat");
    }
    fn set_witness_sign(&mut self, entity: EntityId, visible: bool) {
        tracing::debug!(%entity, visible, "witness sign");
    }
    fn set_violence_sign(&mut self, entity: EntityId, visible: bool) {
        tracing::debug!(%entity, visible, "violence sign");
    }
}

/// Records abductions for the end-of-run summary.
#[derive(Default)]
struct TakeAwayLog {
    events: Vec<(Tick, EntityId, EntityId)>,
}

impl SimObserver for TakeAwayLog {
    fn on_take_away(&mut self, tick: Tick, abductor: EntityId, victim: EntityId) {
        println!("  {tick}: {abductor} abducted {victim}");
        self.events.push((tick, abductor, victim));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== plaza — rust_crowd simulation ===");
    println!("Crowd: {CROWD_COUNT}  |  Seed: {SEED}");
    println!();

    // 1. Load the waypoint layout.
    let layout = load_waypoints_reader(Cursor::new(LAYOUT_CSV))?;
    println!(
        "Layout: {} patrol points, {} exits",
        layout.patrol.len(),
        layout.exits.len()
    );

    // 2. Place the crowd: player at the center, everyone else scattered.
    let mut rng = SimRng::new(SEED);
    let mut positions = vec![Vec2::ZERO]; // entity 0: the player
    for _ in 0..CROWD_COUNT {
        positions.push(Vec2::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0)));
    }
    let player = EntityId(0);
    let entities = EntityStore::new(positions, MOVE_SPEED);

    // 3. Build the sim.
    let mut sim = SimBuilder::new(
        SimConfig { dt_secs: DT_SECS, seed: SEED },
        AiConfig::default(),
        AlertConfig::default(),
        entities,
        PatrolPoints::new(layout.patrol),
        ExitPoints::new(layout.exits),
        ConsoleCues,
    )
    .player(player)
    .build()?;

    let mut log = TakeAwayLog::default();

    // 4. Let the crowd settle into its patrol pattern.
    sim.run_ticks(50, &mut log);

    // 5. Nearby entities notice the player; alert them with a full cone.
    let witnesses: Vec<EntityId> = sim
        .entities
        .entity_ids()
        .filter(|&e| e != player && sim.entities.position(e).length() < 3.0)
        .collect();
    for &witness in &witnesses {
        sim.set_witness(witness, 20.0);
    }
    println!("Witnesses marked: {}", witnesses.len());

    for _ in 0..30 {
        sim.grow_cone();
        sim.tick(&mut log);
    }
    sim.aim_cone(Vec2::new(1.0, 0.0));
    let outcome = sim.release_cone(false);
    println!(
        "Cone released: {} in cone, {:.2} conviction accepted",
        outcome.qualifying, outcome.accepted_total
    );

    // 6. The regime notices: one entity is compromised and begins hunting
    //    the freshly converted.
    sim.compromise(EntityId(1));
    println!("Entity 1 compromised; abductions:");
    sim.run_ticks(1_200, &mut log);

    // 7. Outcome: the crowd wins if nobody was dragged away.
    let victory = log.events.is_empty();
    sim.finish(victory);
    println!();
    println!(
        "Outcome after {:.0} s: {} ({} abductions)",
        sim.clock.now_secs(),
        if victory { "victory" } else { "defeat" },
        log.events.len()
    );

    // 8. Final crowd table.
    println!();
    println!("{:<10} {:<18} {:<12} {:<10}", "Entity", "State", "Conviction", "Position");
    println!("{}", "-".repeat(54));
    for entity in sim.entities.entity_ids() {
        let state = sim
            .agent_state(entity)
            .map_or_else(|| "player".to_string(), |s| s.to_string());
        println!(
            "{:<10} {:<18} {:<12.2} {}",
            entity.0,
            state,
            sim.entities.conviction(entity),
            sim.entities.position(entity),
        );
    }

    Ok(())
}
