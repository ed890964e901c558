//! Fixed-rate elliptical orbit
//!
//! The body sweeps a constant number of degrees per day around an ellipse
//! centered on the focus. There is no iteration: the position is recomputed
//! from the current angle on every query.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{FocusHandle, Orbit, SimClock, clamp_param};
use crate::consts::MIN_DAYS_PER_ORBIT;
use crate::math::trig;
use crate::math::vector::{clamp_angle, rotate};

/// Defining parameters, as loaded from data files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipticalOrbitDef {
    /// Degrees
    pub start_angle: f32,
    /// Half-width along the unrotated x axis
    pub semi_major: f32,
    /// Half-height along the unrotated y axis
    pub semi_minor: f32,
    /// Rotation of the whole ellipse, degrees
    pub tilt_angle: f32,
    pub days_per_orbit: f32,
}

#[derive(Debug, Clone)]
pub struct EllipticalOrbit {
    focus: FocusHandle,
    clock: SimClock,
    start_angle: f32,
    semi_major: f32,
    semi_minor: f32,
    tilt_angle: f32,
    /// Degrees per day
    angular_rate: f32,
    current_angle: f32,
}

impl EllipticalOrbit {
    /// Negative axes are mirrored, too-short periods are clamped
    pub fn new(focus: FocusHandle, def: EllipticalOrbitDef, clock: SimClock) -> Self {
        let days_per_orbit =
            clamp_param("days_per_orbit", def.days_per_orbit, MIN_DAYS_PER_ORBIT, f32::MAX);
        let start_angle = clamp_angle(def.start_angle);
        Self {
            focus,
            clock,
            start_angle,
            semi_major: def.semi_major.abs(),
            semi_minor: def.semi_minor.abs(),
            tilt_angle: clamp_angle(def.tilt_angle),
            angular_rate: 360.0 / days_per_orbit,
            current_angle: start_angle,
        }
    }

    /// Degrees, in [0, 360)
    #[inline]
    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    pub fn set_angle(&mut self, degrees: f32) {
        self.current_angle = clamp_angle(degrees);
    }

    /// Degrees per day
    #[inline]
    pub fn angular_rate(&self) -> f32 {
        self.angular_rate
    }

    #[inline]
    pub fn tilt_angle(&self) -> f32 {
        self.tilt_angle
    }

    #[inline]
    pub fn semi_major(&self) -> f32 {
        self.semi_major
    }

    #[inline]
    pub fn semi_minor(&self) -> f32 {
        self.semi_minor
    }

    /// Offset from the focus at the current angle
    pub fn offset(&self) -> Vec2 {
        let (s, c) = trig::sin_cos(self.current_angle.to_radians());
        rotate(
            Vec2::new(self.semi_major * c, self.semi_minor * s),
            self.tilt_angle,
        )
    }
}

impl Orbit for EllipticalOrbit {
    fn advance(&mut self, dt: f32) {
        let days = self.clock.to_days(dt);
        self.current_angle = clamp_angle(self.current_angle + self.angular_rate * days);
    }

    fn compute_current_location(&self) -> Vec2 {
        self.focus.location() + self.offset()
    }

    fn make_copy(&self) -> Box<dyn Orbit> {
        let mut copy = self.clone();
        copy.current_angle = self.start_angle;
        Box::new(copy)
    }

    fn get_orbital_period(&self) -> f32 {
        360.0 / self.angular_rate
    }

    fn focus(&self) -> &FocusHandle {
        &self.focus
    }
}
