//! Eccentric orbit advanced through Kepler's equation
//!
//! Time is tracked in days since periapsis passage. Each advance converts the
//! elapsed time to a mean anomaly, solves for the eccentric anomaly and keeps
//! the result for position queries.
//!
//! The periapsis angle is stored but the position is not rotated by it.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::solver::solve_kepler;
use super::{FocusHandle, Orbit, SimClock, clamp_param};
use crate::consts::*;
use crate::math::trig;
use crate::math::vector::clamp_angle;
use crate::settings::SolverSettings;

/// Defining parameters, as loaded from data files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeplerOrbitDef {
    pub semi_major: f32,
    pub eccentricity: f32,
    /// Degrees
    pub periapsis_angle: f32,
    /// Days
    pub period: f32,
    pub clockwise: bool,
    /// Day of periapsis passage
    pub pericenter_time: f32,
}

impl Default for KeplerOrbitDef {
    fn default() -> Self {
        Self {
            semi_major: 1000.0,
            eccentricity: 0.1,
            periapsis_angle: 0.0,
            period: 100.0,
            clockwise: false,
            pericenter_time: 0.0,
        }
    }
}

impl KeplerOrbitDef {
    /// Definition from both semi-axes; the longer one is taken as major
    pub fn from_axes(semi_major: f32, semi_minor: f32, period: f32) -> Self {
        let (a, b) = if semi_major >= semi_minor {
            (semi_major, semi_minor)
        } else {
            (semi_minor, semi_major)
        };
        let eccentricity = if a > 0.0 {
            (1.0 - (b / a).powi(2)).max(0.0).sqrt()
        } else {
            0.0
        };
        Self {
            semi_major: a,
            eccentricity,
            period,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeplerOrbit {
    focus: FocusHandle,
    clock: SimClock,
    solver: SolverSettings,

    semi_major: f32,
    semi_minor: f32,
    eccentricity: f32,
    periapsis_angle: f32,
    period: f32,
    clockwise: bool,
    pericenter_time: f32,

    // Kinematic state
    elapsed_time: f32,
    eccentric_anomaly: f32,
    last_solve_converged: bool,
}

impl KeplerOrbit {
    /// Build an orbit, clamping every parameter into its supported range
    pub fn new(
        focus: FocusHandle,
        def: KeplerOrbitDef,
        clock: SimClock,
        solver: SolverSettings,
    ) -> Self {
        let mut eccentricity = clamp_param(
            "eccentricity",
            def.eccentricity,
            MIN_ECCENTRICITY,
            MAX_ECCENTRICITY,
        );
        let semi_major = clamp_param("semi_major", def.semi_major, MIN_AXIS, MAX_AXIS);
        let period = clamp_param("period", def.period, MIN_PERIOD, MAX_PERIOD);

        // A very eccentric orbit can leave the minor axis below range; raising
        // it changes the eccentricity, so derive that back from the axes
        let derived_minor = semi_major * (1.0 - eccentricity * eccentricity).sqrt();
        let semi_minor = clamp_param("semi_minor", derived_minor, MIN_AXIS, semi_major);
        if semi_minor != derived_minor {
            let ratio = semi_minor / semi_major;
            eccentricity = clamp_param(
                "eccentricity",
                (1.0 - ratio * ratio).max(0.0).sqrt(),
                MIN_ECCENTRICITY,
                MAX_ECCENTRICITY,
            );
        }

        let pericenter_time = if def.pericenter_time.is_finite() {
            def.pericenter_time
        } else {
            0.0
        };

        let mut orbit = Self {
            focus,
            clock,
            solver,
            semi_major,
            semi_minor,
            eccentricity,
            periapsis_angle: clamp_angle(def.periapsis_angle),
            period,
            clockwise: def.clockwise,
            pericenter_time,
            elapsed_time: 0.0,
            eccentric_anomaly: 0.0,
            last_solve_converged: true,
        };
        orbit.resolve();
        orbit
    }

    /// Mean anomaly at the current elapsed time, radians
    pub fn mean_anomaly(&self) -> f32 {
        TAU / self.period * (self.elapsed_time - self.pericenter_time)
    }

    /// Jump to `days` since the epoch (wrapped into one period)
    pub fn set_elapsed_time(&mut self, days: f32) {
        self.elapsed_time = if days.is_finite() {
            days.rem_euclid(self.period)
        } else {
            0.0
        };
        self.resolve();
    }

    fn resolve(&mut self) {
        let solve = solve_kepler(self.eccentricity, self.mean_anomaly(), &self.solver);
        self.eccentric_anomaly = solve.value();
        self.last_solve_converged = solve.converged();
    }

    /// Offset from the focus in the orbit's own frame
    pub fn offset(&self) -> Vec2 {
        let (s, c) = trig::sin_cos(self.eccentric_anomaly);
        let y = self.semi_minor * s;
        Vec2::new(
            self.semi_major * (c - self.eccentricity),
            if self.clockwise { -y } else { y },
        )
    }

    /// Current distance to the focus, `a·(1 - e·cos E)`
    pub fn distance_from_focus(&self) -> f32 {
        self.semi_major * (1.0 - self.eccentricity * trig::cos(self.eccentric_anomaly))
    }

    #[inline]
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    #[inline]
    pub fn eccentric_anomaly(&self) -> f32 {
        self.eccentric_anomaly
    }

    /// False when the last advance used the mean-anomaly fallback
    #[inline]
    pub fn last_solve_converged(&self) -> bool {
        self.last_solve_converged
    }

    #[inline]
    pub fn semi_major(&self) -> f32 {
        self.semi_major
    }

    #[inline]
    pub fn semi_minor(&self) -> f32 {
        self.semi_minor
    }

    #[inline]
    pub fn eccentricity(&self) -> f32 {
        self.eccentricity
    }

    #[inline]
    pub fn periapsis_angle(&self) -> f32 {
        self.periapsis_angle
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }
}

impl Orbit for KeplerOrbit {
    fn advance(&mut self, dt: f32) {
        let days = self.clock.to_days(dt);
        self.set_elapsed_time(self.elapsed_time + days);
    }

    fn compute_current_location(&self) -> Vec2 {
        self.focus.location() + self.offset()
    }

    fn make_copy(&self) -> Box<dyn Orbit> {
        let mut copy = self.clone();
        copy.set_elapsed_time(0.0);
        Box::new(copy)
    }

    fn get_orbital_period(&self) -> f32 {
        self.period
    }

    fn focus(&self) -> &FocusHandle {
        &self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> KeplerOrbitDef {
        KeplerOrbitDef {
            semi_major: 1000.0,
            eccentricity: 0.5,
            period: 100.0,
            ..KeplerOrbitDef::default()
        }
    }

    fn orbit_at(focus: Vec2, def: KeplerOrbitDef) -> KeplerOrbit {
        KeplerOrbit::new(
            FocusHandle::new(focus),
            def,
            SimClock::default(),
            SolverSettings::default(),
        )
    }

    fn within_one_percent(a: Vec2, b: Vec2, scale: f32) -> bool {
        (a - b).length() <= 0.01 * scale
    }

    #[test]
    fn test_starts_at_periapsis() {
        let orbit = orbit_at(Vec2::ZERO, def());
        assert!((orbit.compute_current_location() - Vec2::new(500.0, 0.0)).length() < 1e-2);
        assert!((orbit.distance_from_focus() - 500.0).abs() < 1e-2);
        assert!(orbit.last_solve_converged());
    }

    #[test]
    fn test_full_period_returns_to_start() {
        // 100 days at 10 s per day
        let mut orbit = orbit_at(Vec2::new(3000.0, -2000.0), def());
        let start = orbit.compute_current_location();
        for _ in 0..100 {
            orbit.advance(10.0);
        }
        assert!(within_one_percent(orbit.compute_current_location(), start, 1000.0));
    }

    #[test]
    fn test_full_period_with_small_steps() {
        let mut orbit = orbit_at(Vec2::ZERO, def());
        let start = orbit.compute_current_location();
        for _ in 0..1000 {
            orbit.advance(1.0);
        }
        assert!(within_one_percent(orbit.compute_current_location(), start, 1000.0));
    }

    #[test]
    fn test_high_eccentricity_full_period_never_falls_back() {
        // 0.01 days per tick, fast through periapsis
        let mut orbit = orbit_at(
            Vec2::ZERO,
            KeplerOrbitDef {
                semi_major: 100_000.0,
                eccentricity: 0.98,
                period: 100.0,
                ..KeplerOrbitDef::default()
            },
        );
        let mut last = orbit.compute_current_location();
        let mut max_step = 0.0f32;
        for tick in 0..10_000 {
            orbit.advance(0.1);
            assert!(orbit.last_solve_converged(), "fallback at tick {tick}");
            let p = orbit.compute_current_location();
            max_step = max_step.max((p - last).length());
            last = p;
        }
        // Periapsis speed covers about 620 units per tick
        assert!(max_step < 1000.0, "jumped {max_step} in one tick");
    }

    #[test]
    fn test_half_period_reaches_apoapsis() {
        let mut orbit = orbit_at(Vec2::ZERO, def());
        orbit.set_elapsed_time(50.0);
        assert!((orbit.distance_from_focus() - 1500.0).abs() < 0.5);
        assert!((orbit.compute_current_location() - Vec2::new(-1500.0, 0.0)).length() < 0.5);
    }

    #[test]
    fn test_clockwise_mirrors_y() {
        let mut ccw = orbit_at(Vec2::ZERO, def());
        let mut cw = orbit_at(Vec2::ZERO, KeplerOrbitDef { clockwise: true, ..def() });
        ccw.set_elapsed_time(25.0);
        cw.set_elapsed_time(25.0);
        let a = ccw.compute_current_location();
        let b = cw.compute_current_location();
        assert!(a.y > 0.0);
        assert!((a - Vec2::new(b.x, -b.y)).length() < 1e-3);
    }

    #[test]
    fn test_pericenter_time_shifts_phase() {
        let mut orbit = orbit_at(
            Vec2::ZERO,
            KeplerOrbitDef {
                pericenter_time: 50.0,
                ..def()
            },
        );
        assert!((orbit.distance_from_focus() - 1500.0).abs() < 0.5);
        orbit.set_elapsed_time(50.0);
        assert!((orbit.distance_from_focus() - 500.0).abs() < 0.5);
    }

    #[test]
    fn test_construction_clamps() {
        let orbit = orbit_at(
            Vec2::ZERO,
            KeplerOrbitDef {
                semi_major: 5.0,
                eccentricity: 1.5,
                period: 0.0,
                ..def()
            },
        );
        assert_eq!(orbit.semi_major(), MIN_AXIS);
        assert_eq!(orbit.get_orbital_period(), MIN_PERIOD);
        assert!(orbit.semi_minor() >= MIN_AXIS);
        assert!(orbit.semi_minor() <= orbit.semi_major());
        assert!((MIN_ECCENTRICITY..=MAX_ECCENTRICITY).contains(&orbit.eccentricity()));
    }

    #[test]
    fn test_minor_axis_floor_lowers_eccentricity() {
        // a = 1000, e = 0.999 gives b ≈ 44.7, below the floor
        let orbit = orbit_at(
            Vec2::ZERO,
            KeplerOrbitDef {
                eccentricity: 0.999,
                ..def()
            },
        );
        assert_eq!(orbit.semi_minor(), MIN_AXIS);
        let expected = (1.0f32 - 0.01).sqrt();
        assert!((orbit.eccentricity() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_nan_parameters_are_clamped() {
        let orbit = orbit_at(
            Vec2::ZERO,
            KeplerOrbitDef {
                semi_major: f32::NAN,
                eccentricity: f32::NAN,
                period: f32::NAN,
                pericenter_time: f32::NAN,
                ..def()
            },
        );
        assert!(orbit.compute_current_location().is_finite());
        assert_eq!(orbit.elapsed_time(), 0.0);
    }

    #[test]
    fn test_from_axes() {
        let d = KeplerOrbitDef::from_axes(1000.0, 800.0, 50.0);
        assert!((d.eccentricity - 0.6).abs() < 1e-5);
        assert_eq!(d.period, 50.0);

        let swapped = KeplerOrbitDef::from_axes(800.0, 1000.0, 50.0);
        assert_eq!(swapped.semi_major, 1000.0);
        assert!((swapped.eccentricity - 0.6).abs() < 1e-5);

        let orbit = orbit_at(Vec2::ZERO, d);
        assert!((orbit.semi_minor() - 800.0).abs() < 0.1);
    }

    #[test]
    fn test_make_copy_resets_state() {
        let mut orbit = orbit_at(Vec2::ZERO, def());
        let start = orbit.compute_current_location();
        orbit.advance(250.0);
        assert!(orbit.elapsed_time() > 0.0);

        let copy = orbit.make_copy();
        assert!((copy.compute_current_location() - start).length() < 1e-3);
        assert!(copy.focus().same_focus(orbit.focus()));
        assert_eq!(copy.get_orbital_period(), 100.0);
    }

    #[test]
    fn test_follows_moving_focus() {
        let focus = FocusHandle::new(Vec2::ZERO);
        let orbit = KeplerOrbit::new(
            focus.clone(),
            def(),
            SimClock::default(),
            SolverSettings::default(),
        );
        focus.set_location(Vec2::new(100.0, 100.0));
        assert!((orbit.compute_current_location() - Vec2::new(600.0, 100.0)).length() < 1e-2);
    }

    #[test]
    fn test_starved_solver_uses_mean_anomaly() {
        let solver = SolverSettings {
            max_iterations: 1,
            tolerance: 1e-12,
            ..SolverSettings::default()
        };
        let mut orbit =
            KeplerOrbit::new(FocusHandle::new(Vec2::ZERO), def(), SimClock::default(), solver);
        orbit.set_elapsed_time(10.0);
        assert!(!orbit.last_solve_converged());
        assert!((orbit.eccentric_anomaly() - orbit.mean_anomaly()).abs() < 1e-6);
        assert!(orbit.compute_current_location().is_finite());
    }
}
