//! Per-session combat state
//!
//! [`CombatSession`] owns the state one encounter needs across ticks: the
//! seeded RNG for random placement, the tick counter and the visibility cache.
//! Two sessions never share state, so tests can run side by side.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::orbit::{
    EllipticalOrbit, EllipticalOrbitDef, FocusHandle, KeplerOrbit, KeplerOrbitDef, SimClock,
};
use crate::settings::GeomSettings;

/// Memoised observer-to-target visibility verdicts for one tick
///
/// Verdicts are keyed by host entity ids. Asking with a different tick id
/// drops everything cached for the previous one.
#[derive(Debug, Clone, Default)]
pub struct VisibilityCache {
    tick: Option<u64>,
    verdicts: HashMap<(u64, u64), bool>,
}

impl VisibilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached verdict for `(observer, target)` at `tick`, computing it on a miss
    pub fn get_or_compute<F>(&mut self, tick: u64, observer: u64, target: u64, compute: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if self.tick != Some(tick) {
            self.verdicts.clear();
            self.tick = Some(tick);
        }
        *self.verdicts.entry((observer, target)).or_insert_with(compute)
    }

    pub fn invalidate(&mut self) {
        self.verdicts.clear();
        self.tick = None;
    }

    /// Tick the cached verdicts belong to
    #[inline]
    pub fn tick(&self) -> Option<u64> {
        self.tick
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

/// State owned by one combat encounter
#[derive(Debug, Clone)]
pub struct CombatSession {
    /// Seed for reproducibility
    pub seed: u64,
    tick: u64,
    rng: Pcg32,
    visibility: VisibilityCache,
    settings: GeomSettings,
}

impl CombatSession {
    /// Create a session; the same seed always yields the same random stream
    pub fn new(seed: u64, settings: GeomSettings) -> Self {
        log::info!("Starting combat session (seed {seed})");
        Self {
            seed,
            tick: 0,
            rng: Pcg32::seed_from_u64(seed),
            visibility: VisibilityCache::new(),
            settings,
        }
    }

    /// Current simulation tick
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Move to the next tick, dropping last tick's visibility verdicts
    pub fn advance_tick(&mut self) -> u64 {
        self.tick += 1;
        self.visibility.invalidate();
        self.tick
    }

    /// Session RNG, for the `math::random` helpers
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Whether `observer` can see `target` this tick, asking the host once
    pub fn is_visible<F>(&mut self, observer: u64, target: u64, compute: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        self.visibility
            .get_or_compute(self.tick, observer, target, compute)
    }

    pub fn visibility(&self) -> &VisibilityCache {
        &self.visibility
    }

    pub fn settings(&self) -> &GeomSettings {
        &self.settings
    }

    pub fn clock(&self) -> SimClock {
        SimClock::from(&self.settings)
    }

    pub fn elliptical_orbit(
        &self,
        focus: FocusHandle,
        def: EllipticalOrbitDef,
    ) -> EllipticalOrbit {
        EllipticalOrbit::new(focus, def, self.clock())
    }

    pub fn kepler_orbit(&self, focus: FocusHandle, def: KeplerOrbitDef) -> KeplerOrbit {
        KeplerOrbit::new(focus, def, self.clock(), self.settings.solver)
    }
}
