//! Combat Geom demo entry point
//!
//! Loads a JSON scenario (or uses the built-in one), propagates every orbit
//! for the configured number of ticks and logs where each body ends up.
//!
//! Usage: `combat-geom [scenario.json]`

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use combat_geom::orbit::{EllipticalOrbitDef, FocusHandle, KeplerOrbitDef, Orbit};
use combat_geom::settings::read_json;
use combat_geom::{CombatSession, GeomError, GeomSettings};

/// Demo input: settings plus the orbits to propagate around one focus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Scenario {
    settings: GeomSettings,
    seed: u64,
    ticks: u32,
    /// Seconds per tick
    dt: f32,
    focus: Vec2,
    elliptical: Vec<EllipticalOrbitDef>,
    kepler: Vec<KeplerOrbitDef>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            settings: GeomSettings::default(),
            seed: 12345,
            ticks: 600,
            dt: 1.0,
            focus: Vec2::ZERO,
            elliptical: vec![EllipticalOrbitDef {
                start_angle: 0.0,
                semi_major: 800.0,
                semi_minor: 600.0,
                tilt_angle: 30.0,
                days_per_orbit: 20.0,
            }],
            kepler: vec![
                KeplerOrbitDef {
                    semi_major: 1000.0,
                    eccentricity: 0.5,
                    period: 100.0,
                    ..KeplerOrbitDef::default()
                },
                KeplerOrbitDef {
                    semi_major: 4000.0,
                    eccentricity: 0.95,
                    period: 365.0,
                    clockwise: true,
                    ..KeplerOrbitDef::default()
                },
            ],
        }
    }
}

impl Scenario {
    fn load(path: &Path) -> Result<Self, GeomError> {
        let scenario: Scenario = read_json(path)?;
        scenario.settings.validate()?;
        log::info!("Loaded scenario from {}", path.display());
        Ok(scenario)
    }
}

fn run() -> Result<(), GeomError> {
    let scenario = match std::env::args_os().nth(1) {
        Some(path) => Scenario::load(Path::new(&path))?,
        None => {
            log::info!("No scenario given, using the built-in one");
            Scenario::default()
        }
    };

    let mut session = CombatSession::new(scenario.seed, scenario.settings.clone());
    let focus = FocusHandle::new(scenario.focus);

    let mut orbits: Vec<(String, Box<dyn Orbit>)> = Vec::new();
    for (i, def) in scenario.elliptical.iter().enumerate() {
        let orbit: Box<dyn Orbit> = Box::new(session.elliptical_orbit(focus.clone(), *def));
        orbits.push((format!("elliptical #{i}"), orbit));
    }
    for (i, def) in scenario.kepler.iter().enumerate() {
        let orbit: Box<dyn Orbit> = Box::new(session.kepler_orbit(focus.clone(), *def));
        orbits.push((format!("kepler #{i}"), orbit));
    }

    for (name, orbit) in &orbits {
        let start = orbit.compute_current_location();
        log::info!(
            "{name}: period {:.2} days, starts at ({:.1}, {:.1})",
            orbit.get_orbital_period(),
            start.x,
            start.y
        );
    }

    for _ in 0..scenario.ticks {
        session.advance_tick();
        for (_, orbit) in orbits.iter_mut() {
            orbit.advance(scenario.dt);
        }
    }

    let days = session.clock().to_days(scenario.dt * scenario.ticks as f32);
    log::info!("Advanced {} ticks ({days:.2} days)", session.tick());
    for (name, orbit) in &orbits {
        let p = orbit.compute_current_location();
        let r = (p - focus.location()).length();
        log::info!("{name}: at ({:.1}, {:.1}), {r:.1} from focus", p.x, p.y);
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
