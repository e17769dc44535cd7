//! Simulation observer trait for progress reporting and data collection.

use crowd_core::{EntityId, Tick};

/// Callbacks invoked by [`Sim::tick`][crate::Sim::tick] at key points.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — take-away logger
///
/// ```rust,ignore
/// struct TakeAwayLog;
///
/// impl SimObserver for TakeAwayLog {
///     fn on_take_away(&mut self, tick: Tick, abductor: EntityId, victim: EntityId) {
///         println!("{tick}: {abductor} took away {victim}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any controller runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `taken` is the number of entities currently marked taken away.
    fn on_tick_end(&mut self, _tick: Tick, _taken: usize) {}

    /// Called when an abductor captures a victim (the moment the cross-agent
    /// order is issued).
    fn on_take_away(&mut self, _tick: Tick, _abductor: EntityId, _victim: EntityId) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `tick`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
