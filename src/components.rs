use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use schema::{DamageType, StatusType};

/// Health points tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max_hp: i32,
}

impl Health {
    pub fn new(max_hp: i32) -> Self {
        Self {
            current: max_hp,
            max_hp,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max_hp
    }

    /// Health as a fraction in [0, 1].
    pub fn percent(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.current as f64 / self.max_hp as f64
    }

    /// Remove up to `amount` HP. Returns the amount actually removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.clamp(0, self.current);
        self.current -= actual;
        actual
    }

    /// Restore up to `amount` HP, never exceeding the maximum. Returns the
    /// amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let old = self.current;
        self.current = (self.current + amount.max(0)).min(self.max_hp);
        self.current - old
    }

    /// Restore a dead actor to a percentage of max HP (at least 1).
    pub fn revive(&mut self, percent: f64) {
        self.current = ((self.max_hp as f64 * percent) as i32).max(1);
    }
}

/// Mana points tracking. Absent entirely for actors with no magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mana {
    pub current: i32,
    pub max_mp: i32,
}

impl Mana {
    pub fn new(max_mp: i32) -> Self {
        Self {
            current: max_mp,
            max_mp,
        }
    }

    pub fn percent(&self) -> f64 {
        if self.max_mp <= 0 {
            return 0.0;
        }
        self.current as f64 / self.max_mp as f64
    }

    /// Atomic check-and-deduct. Returns false (and spends nothing) when the
    /// balance is insufficient.
    pub fn spend(&mut self, amount: i32) -> bool {
        if self.current >= amount {
            self.current -= amount;
            true
        } else {
            false
        }
    }

    /// Restore up to `amount` MP. Returns the amount actually restored.
    pub fn restore(&mut self, amount: i32) -> i32 {
        let old = self.current;
        self.current = (self.current + amount.max(0)).min(self.max_mp);
        self.current - old
    }
}

/// Experience and leveling tracking, carried as a snapshot so victory can
/// report level-ups back to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub current: u32,
    pub total: u32,
    pub level: u32,
    pub to_next_level: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            current: 0,
            total: 0,
            level: 1,
            to_next_level: 100,
        }
    }
}

impl Experience {
    /// Add experience points. Returns the number of levels gained.
    pub fn add_exp(&mut self, amount: u32) -> u32 {
        self.current += amount;
        self.total += amount;

        let mut levels_gained = 0;
        while self.current >= self.to_next_level {
            self.current -= self.to_next_level;
            self.level += 1;
            levels_gained += 1;
            self.to_next_level = Self::next_level_xp(self.level);
        }

        levels_gained
    }

    // Exponential curve: 100 * 1.5^(level - 1)
    fn next_level_xp(level: u32) -> u32 {
        (100.0 * 1.5f64.powi(level as i32 - 1)) as u32
    }
}

/// A single active status effect instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub status_type: StatusType,
    /// Remaining duration in seconds.
    pub duration: f64,
    /// Strength of the effect, used when deciding whether a re-application
    /// refreshes an existing instance.
    pub potency: i32,
    /// Entity id of the actor that applied this effect.
    pub source_id: Option<u32>,
}

impl StatusEffect {
    pub fn new(status_type: StatusType, duration: f64, potency: i32, source_id: Option<u32>) -> Self {
        Self {
            status_type,
            duration,
            potency,
            source_id,
        }
    }

    /// Count down the remaining duration. Returns true once expired.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.duration -= dt;
        self.duration <= 0.0
    }
}

/// Combat-time modifiers and state layered over an actor's base stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack_modifier: i32,
    pub defense_modifier: i32,
    pub magic_modifier: i32,
    pub resistance_modifier: i32,
    pub speed_modifier: i32,
    /// Hit chance in [0, 1].
    pub accuracy: f64,
    /// Dodge chance in [0, 1].
    pub evasion: f64,
    pub critical_chance: f64,
    pub critical_multiplier: f64,
    pub status_effects: Vec<StatusEffect>,
    /// Multipliers below 1.0 reduce incoming damage of that type.
    pub resistances: HashMap<DamageType, f64>,
    /// Multipliers above 1.0 increase incoming damage of that type.
    pub weaknesses: HashMap<DamageType, f64>,
    pub immunities: Vec<StatusType>,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            attack_modifier: 0,
            defense_modifier: 0,
            magic_modifier: 0,
            resistance_modifier: 0,
            speed_modifier: 0,
            accuracy: 1.0,
            evasion: 0.0,
            critical_chance: 0.05,
            critical_multiplier: 2.0,
            status_effects: Vec::new(),
            resistances: HashMap::new(),
            weaknesses: HashMap::new(),
            immunities: Vec::new(),
        }
    }
}

impl CombatStats {
    /// Add a status effect. Returns false when the holder is immune.
    ///
    /// Re-applying an effect that is already present refreshes its duration
    /// when the new instance is at least as potent.
    pub fn add_status(&mut self, effect: StatusEffect) -> bool {
        if self.immunities.contains(&effect.status_type) {
            return false;
        }

        for existing in &mut self.status_effects {
            if existing.status_type == effect.status_type {
                if effect.potency >= existing.potency {
                    existing.duration = effect.duration;
                    existing.potency = effect.potency;
                }
                return true;
            }
        }

        self.status_effects.push(effect);
        true
    }

    /// Remove a status effect by type. Returns true if one was removed.
    pub fn remove_status(&mut self, status_type: StatusType) -> bool {
        if let Some(index) = self
            .status_effects
            .iter()
            .position(|e| e.status_type == status_type)
        {
            self.status_effects.remove(index);
            true
        } else {
            false
        }
    }

    pub fn has_status(&self, status_type: StatusType) -> bool {
        self.status_effects
            .iter()
            .any(|e| e.status_type == status_type)
    }

    /// Combined incoming-damage multiplier for a damage type.
    pub fn damage_multiplier(&self, damage_type: DamageType) -> f64 {
        let mut multiplier = 1.0;
        if let Some(resistance) = self.resistances.get(&damage_type) {
            multiplier *= resistance;
        }
        if let Some(weakness) = self.weaknesses.get(&damage_type) {
            multiplier *= weakness;
        }
        multiplier
    }

    /// Tick all status effect durations, dropping expired ones. Returns the
    /// expired effects.
    pub fn update_effects(&mut self, dt: f64) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        self.status_effects.retain_mut(|effect| {
            if effect.tick(dt) {
                expired.push(effect.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Remove every debuff. Returns the number removed.
    pub fn clear_debuffs(&mut self) -> usize {
        let before = self.status_effects.len();
        self.status_effects.retain(|e| !e.status_type.is_debuff());
        before - self.status_effects.len()
    }

    pub fn clear_all_status(&mut self) {
        self.status_effects.clear();
    }
}
