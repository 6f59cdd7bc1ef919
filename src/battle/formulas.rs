//! Pure combat formulas. Everything probabilistic consumes the shared
//! percent oracle, so each formula is independently testable with a
//! scripted sequence.

use crate::battle::state::BattleRng;

/// Map a percent roll onto the uniform damage variance range [0.9, 1.1].
pub fn variance(rng: &mut BattleRng, reason: &str) -> f64 {
    let roll = rng.next_percent(reason);
    0.9 + (roll as f64 - 1.0) * (0.2 / 99.0)
}

/// Roll a probability in [0, 1]. A chance of 1.0 always succeeds, 0.0 never
/// does.
pub fn chance_roll(chance: f64, rng: &mut BattleRng, reason: &str) -> bool {
    let threshold = (chance * 100.0).round().clamp(0.0, 100.0) as u8;
    rng.next_percent(reason) <= threshold
}

/// Basic physical attack damage. Returns the damage and whether the hit was
/// critical.
pub fn physical_damage(
    attack: i32,
    defense: i32,
    critical_chance: f64,
    critical_multiplier: f64,
    rng: &mut BattleRng,
) -> (i32, bool) {
    let base = (attack - defense / 2).max(1);
    roll_damage(base, critical_chance, critical_multiplier, rng)
}

/// Physical skill damage: attack scaled by the skill's power percentage
/// before defense applies.
pub fn physical_skill_damage(
    attack: i32,
    defense: i32,
    power: i32,
    critical_chance: f64,
    critical_multiplier: f64,
    rng: &mut BattleRng,
) -> (i32, bool) {
    let base = (attack * power / 100 - defense / 2).max(1);
    roll_damage(base, critical_chance, critical_multiplier, rng)
}

/// Magical skill damage: magic power against magic resistance.
pub fn magical_damage(
    magic: i32,
    resistance: i32,
    power: i32,
    critical_chance: f64,
    critical_multiplier: f64,
    rng: &mut BattleRng,
) -> (i32, bool) {
    let base = (magic * power / 100 - resistance / 2).max(1);
    roll_damage(base, critical_chance, critical_multiplier, rng)
}

/// Healing amount for a restorative skill.
pub fn healing_amount(magic: i32, power: i32, rng: &mut BattleRng) -> i32 {
    let base = magic * power / 100;
    let amount = (base as f64 * variance(rng, "heal variance")).round() as i32;
    amount.max(1)
}

/// Whether an attack lands, from the attacker's accuracy and the defender's
/// evasion.
pub fn hit_check(
    accuracy: f64,
    accuracy_modifier: f64,
    evasion: f64,
    rng: &mut BattleRng,
) -> bool {
    let hit_probability = accuracy * accuracy_modifier * (1.0 - evasion);
    chance_roll(hit_probability, rng, "hit check")
}

/// Escape probability from the speed advantage of the fleeing side,
/// clamped to [0.1, 0.9].
pub fn flee_chance(avg_party_speed: f64, avg_enemy_speed: f64) -> f64 {
    (0.5 + (avg_party_speed - avg_enemy_speed) * 0.01).clamp(0.1, 0.9)
}

// Variance then crit, with the post-variance minimum of 1 the damage
// invariant requires.
fn roll_damage(
    base: i32,
    critical_chance: f64,
    critical_multiplier: f64,
    rng: &mut BattleRng,
) -> (i32, bool) {
    let mut damage = (base as f64 * variance(rng, "damage variance")).round() as i32;

    let is_crit = chance_roll(critical_chance, rng, "critical check");
    if is_crit {
        damage = (damage as f64 * critical_multiplier).round() as i32;
    }

    (damage.max(1), is_crit)
}
