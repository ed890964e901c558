//! Bounded Newton-Raphson root finding
//!
//! Every solve has an iteration cap, an absolute residual tolerance and a
//! caller-chosen fallback value. Non-convergence is a normal outcome, reported
//! as [`RootSolve::Fallback`] rather than an error.

use std::f32::consts::{PI, TAU};

use crate::math::trig;
use crate::settings::SolverSettings;

/// Outcome of a bounded solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootSolve {
    /// Residual fell below tolerance after `iterations` Newton steps
    Converged { root: f32, iterations: u32 },
    /// Gave up (cap hit, flat derivative or non-finite iterate)
    Fallback { value: f32 },
}

impl RootSolve {
    /// The root, or the fallback value
    #[inline]
    pub fn value(&self) -> f32 {
        match *self {
            RootSolve::Converged { root, .. } => root,
            RootSolve::Fallback { value } => value,
        }
    }

    #[inline]
    pub fn converged(&self) -> bool {
        matches!(self, RootSolve::Converged { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRaphson {
    pub max_iterations: u32,
    pub tolerance: f32,
}

impl From<&SolverSettings> for NewtonRaphson {
    fn from(settings: &SolverSettings) -> Self {
        Self {
            max_iterations: settings.max_iterations,
            tolerance: settings.tolerance,
        }
    }
}

impl NewtonRaphson {
    pub fn new(max_iterations: u32, tolerance: f32) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Find `x` with `|f(x)| < tolerance`, starting from `initial`
    pub fn solve<F, D>(&self, initial: f32, fallback: f32, f: F, df: D) -> RootSolve
    where
        F: Fn(f32) -> f32,
        D: Fn(f32) -> f32,
    {
        let mut x = initial;
        for iterations in 0..=self.max_iterations {
            let fx = f(x);
            if !fx.is_finite() {
                break;
            }
            if fx.abs() < self.tolerance {
                return RootSolve::Converged { root: x, iterations };
            }
            if iterations == self.max_iterations {
                break;
            }

            let slope = df(x);
            if slope == 0.0 || !slope.is_finite() {
                break;
            }
            x -= fx / slope;
            if !x.is_finite() {
                break;
            }
        }
        RootSolve::Fallback { value: fallback }
    }
}

/// Wrap an angle in radians into [-π, π]
#[inline]
pub(crate) fn wrap_pi(radians: f32) -> f32 {
    let wrapped = (radians + PI).rem_euclid(TAU) - PI;
    if wrapped.is_finite() { wrapped } else { 0.0 }
}

/// Solve Kepler's equation `E - e·sin(E) = M` for the eccentric anomaly
///
/// `M` is reduced to [-π, π] for the iteration and the whole turns are added
/// back, so the result satisfies the equation for the `M` given. Starts from
/// `M` below `settings.high_eccentricity` and from ±π (on the same side as the
/// reduced `M`) above it. Falls back to `M` itself when the solve does not
/// converge.
pub fn solve_kepler(eccentricity: f32, mean_anomaly: f32, settings: &SolverSettings) -> RootSolve {
    let reduced = wrap_pi(mean_anomaly);
    let turns = mean_anomaly - reduced;

    // f is convex on [0, π] and concave on [-π, 0]: starting from the end of
    // the half the root lies in, Newton walks to it without overshooting
    let initial = if eccentricity < settings.high_eccentricity {
        reduced
    } else {
        PI.copysign(reduced)
    };

    let solve = NewtonRaphson::from(settings).solve(
        initial,
        mean_anomaly,
        |e| e - eccentricity * trig::sin(e) - reduced,
        |e| 1.0 - eccentricity * trig::cos(e),
    );

    match solve {
        RootSolve::Converged { root, iterations } => RootSolve::Converged {
            root: root + turns,
            iterations,
        },
        fallback => {
            log::debug!(
                "Kepler solve fell back to mean anomaly (e = {eccentricity}, M = {mean_anomaly})"
            );
            fallback
        }
    }
}
