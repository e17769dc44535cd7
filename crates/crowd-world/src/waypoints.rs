//! Waypoint providers: patrol targets and exit points.
//!
//! # Pluggability
//!
//! The controllers request targets via the [`PatrolProvider`] and
//! [`ExitProvider`] traits, so applications can swap in custom placement
//! logic (navmesh sampling, scripted routes) without touching the AI core.
//! The defaults here serve a flat open environment.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps positions to the nearest exit point.  Exit
//! sets are small, but the query sits on the abduction hot path and the
//! index keeps it O(log n) regardless of how many exits a scene defines.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crowd_core::{AgentRng, Vec2, WaypointId};

// ── Traits ────────────────────────────────────────────────────────────────────

/// Supplies patrol waypoints to roaming agents.
///
/// Implementations may bias the choice by the requesting agent's conviction.
/// The `rng` parameter is the requesting agent's own deterministic generator,
/// so waypoint choice replays identically for a given run seed.
pub trait PatrolProvider {
    /// Next waypoint for an agent at `position` with the given conviction.
    ///
    /// `None` means the scene has no patrol points; the agent skips movement
    /// until one appears.
    fn next_target(&self, position: Vec2, conviction: f32, rng: &mut AgentRng) -> Option<Vec2>;

    /// Waypoint for an abductor returning from dropping a victim at
    /// `position` (an exit point).
    fn next_target_after_take_away(&self, position: Vec2, rng: &mut AgentRng) -> Option<Vec2>;
}

/// Resolves the exit point nearest to a position.
pub trait ExitProvider {
    fn closest_exit(&self, position: Vec2) -> Option<Vec2>;
}

// ── PatrolPoints ──────────────────────────────────────────────────────────────

/// Default patrol provider over a fixed set of waypoints.
pub struct PatrolPoints {
    points: Vec<Vec2>,
}

impl PatrolPoints {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PatrolProvider for PatrolPoints {
    /// Uniform choice, with a conviction bias: with probability equal to the
    /// (positive) conviction, the nearer of two uniform candidates is taken
    /// instead — converted agents keep to their neighborhood while neutral
    /// ones drift anywhere.
    fn next_target(&self, position: Vec2, conviction: f32, rng: &mut AgentRng) -> Option<Vec2> {
        let a = *rng.choose(&self.points)?;
        if conviction <= 0.0 || self.points.len() < 2 {
            return Some(a);
        }
        let b = *rng.choose(&self.points)?;
        if rng.gen_bool(conviction.min(1.0) as f64)
            && position.distance(b) < position.distance(a)
        {
            return Some(b);
        }
        Some(a)
    }

    /// The farther of two uniform candidates — steers the returning abductor
    /// away from the exit and back into the crowd.
    fn next_target_after_take_away(&self, position: Vec2, rng: &mut AgentRng) -> Option<Vec2> {
        let a = *rng.choose(&self.points)?;
        let b = *rng.choose(&self.points)?;
        if position.distance(b) > position.distance(a) {
            Some(b)
        } else {
            Some(a)
        }
    }
}

// ── ExitPoints ────────────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D point with the associated
/// `WaypointId`.
#[derive(Clone)]
struct ExitEntry {
    point: [f32; 2],
    id: WaypointId,
}

impl RTreeObject for ExitEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ExitEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Default exit provider: nearest-neighbor lookup over a fixed exit set.
pub struct ExitPoints {
    tree: RTree<ExitEntry>,
    count: usize,
}

impl ExitPoints {
    pub fn new(points: Vec<Vec2>) -> Self {
        let count = points.len();
        let entries = points
            .into_iter()
            .enumerate()
            .map(|(i, p)| ExitEntry { point: [p.x, p.y], id: WaypointId(i as u32) })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            count,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Nearest exit with its id, or `None` for an empty exit set.
    pub fn closest(&self, position: Vec2) -> Option<(WaypointId, Vec2)> {
        self.tree
            .nearest_neighbor(&[position.x, position.y])
            .map(|e| (e.id, Vec2::new(e.point[0], e.point[1])))
    }
}

impl ExitProvider for ExitPoints {
    fn closest_exit(&self, position: Vec2) -> Option<Vec2> {
        self.closest(position).map(|(_, p)| p)
    }
}
