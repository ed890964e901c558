//! Orbit propagation
//!
//! Two independent state machines behind one trait:
//! - [`EllipticalOrbit`]: fixed angular rate, closed form, no iteration
//! - [`KeplerOrbit`]: eccentric orbit advanced by solving Kepler's equation
//!
//! Orbit state is owned by the simulation loop and mutated once per tick.
//! [`FocusHandle`] is `Rc`-based, so orbits are deliberately `!Send`.

pub mod elliptical;
pub mod kepler;
pub mod solver;

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SECONDS_PER_DAY;
use crate::settings::GeomSettings;

pub use elliptical::{EllipticalOrbit, EllipticalOrbitDef};
pub use kepler::{KeplerOrbit, KeplerOrbitDef};
pub use solver::{NewtonRaphson, RootSolve, solve_kepler};

/// Shared location of the body an orbit circles
///
/// The host moves the focus; every orbit holding a clone sees the new
/// location on its next position query.
#[derive(Debug, Clone, Default)]
pub struct FocusHandle(Rc<Cell<Vec2>>);

impl FocusHandle {
    pub fn new(location: Vec2) -> Self {
        Self(Rc::new(Cell::new(location)))
    }

    #[inline]
    pub fn location(&self) -> Vec2 {
        self.0.get()
    }

    #[inline]
    pub fn set_location(&self, location: Vec2) {
        self.0.set(location);
    }

    /// Whether both handles track the same body
    pub fn same_focus(&self, other: &FocusHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Converts simulated seconds into campaign days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    pub seconds_per_day: f32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            seconds_per_day: SECONDS_PER_DAY,
        }
    }
}

impl SimClock {
    /// Non-positive rates fall back to the default
    pub fn new(seconds_per_day: f32) -> Self {
        if seconds_per_day > 0.0 {
            Self { seconds_per_day }
        } else {
            Self::default()
        }
    }

    #[inline]
    pub fn to_days(&self, seconds: f32) -> f32 {
        seconds / self.seconds_per_day
    }
}

impl From<&GeomSettings> for SimClock {
    fn from(settings: &GeomSettings) -> Self {
        SimClock::new(settings.seconds_per_day)
    }
}

/// Lifecycle hooks the host calls on an orbiting body
pub trait Orbit {
    /// Advance by `dt` simulated seconds
    fn advance(&mut self, dt: f32);

    /// World position: orbit offset plus the focus's current location
    fn compute_current_location(&self) -> Vec2;

    /// Same defining parameters and focus, kinematic state reset
    fn make_copy(&self) -> Box<dyn Orbit>;

    /// Period in days
    fn get_orbital_period(&self) -> f32;

    fn focus(&self) -> &FocusHandle;
}

/// Clamp a loaded parameter into range, warning when it had to change
pub(crate) fn clamp_param(name: &str, value: f32, min: f32, max: f32) -> f32 {
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != value {
        log::warn!("Orbit {name} {value} out of range, clamped to {clamped}");
    }
    clamped
}
