//! Damage - Turning effective stats and a skill into a damage number

mod calculation;

pub use calculation::{compute_damage, compute_damage_breakdown, DamageBreakdown, DamageInput};
