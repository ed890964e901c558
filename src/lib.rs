//! Combat Geom - 2D geometry and orbit math for a space-combat modding API
//!
//! Core modules:
//! - `math`: Fast trig, angle/vector helpers, seeded random points
//! - `geom`: Shapes, intersection primitives, entity collision queries
//! - `combat`: Armor-grid cell mapping and weapon-arc targeting
//! - `orbit`: Fixed-rate elliptical and Kepler orbit propagation
//! - `session`: Per-session RNG and visibility cache
//! - `settings`: Tunable constants loaded from JSON
//!
//! Angles in the public surface are always degrees. Only the `math::trig`
//! functions take radians.

pub mod combat;
pub mod error;
pub mod geom;
pub mod math;
pub mod orbit;
pub mod session;
pub mod settings;

pub use error::GeomError;
pub use session::CombatSession;
pub use settings::{GeomSettings, SolverSettings};

/// Crate-wide constants
pub mod consts {
    /// Newton-Raphson iteration cap for Kepler's equation
    pub const MAX_ITERATIONS: u32 = 100;
    /// Absolute residual tolerance for Kepler's equation
    pub const ERROR_TOLERANCE: f32 = 1e-4;
    /// Eccentricity above which Newton-Raphson starts from π instead of M
    pub const HIGH_ECCENTRICITY: f32 = 0.8;

    /// Returned by `time_to_aim` when a fixed weapon can never bear on a point
    pub const NEVER_AIMED: f32 = f32::MAX;

    /// Points closer than this to an edge may classify either way
    pub const EDGE_TOLERANCE: f32 = 1e-4;

    /// Host clock: simulated seconds per campaign day
    pub const SECONDS_PER_DAY: f32 = 10.0;

    /// Kepler orbit construction ranges (values outside are clamped)
    pub const MIN_ECCENTRICITY: f32 = 0.001;
    pub const MAX_ECCENTRICITY: f32 = 0.999;
    pub const MIN_AXIS: f32 = 100.0;
    pub const MAX_AXIS: f32 = 1_000_000.0;
    pub const MIN_PERIOD: f32 = 10.0;
    pub const MAX_PERIOD: f32 = 1_000_000.0;

    /// Shortest allowed fixed-rate orbit period, in days
    pub const MIN_DAYS_PER_ORBIT: f32 = 0.001;
}
