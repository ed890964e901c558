//! Combat-specific geometry built on `geom`
//!
//! `armor` maps world points onto a ship's armor grid, `weapon` answers
//! firing-arc and aiming questions.

pub mod armor;
pub mod weapon;

pub use armor::{
    ArmorGrid, CellIndex, armor_damage, armor_fraction, armor_value, cell_at_world_point,
    cell_center_world,
};
pub use weapon::{Weapon, best_intercept_point};
