use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::combat::{DamageType, StatusType};

/// Which decision function drives an enemy's turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiKind {
    /// Attack a live random opponent.
    Basic,
    /// Attack the live opponent with the lowest HP fraction.
    PreferWeakest,
}

/// Static definition of an enemy type. Instantiated into battle actors when
/// an encounter starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyData {
    pub id: String,
    pub name: String,

    // Base stats
    pub hp: i32,
    pub mp: i32,
    pub strength: i32,
    pub defense: i32,
    pub magic: i32,
    pub resistance: i32,
    pub agility: i32,
    pub luck: i32,

    // Rewards
    pub exp_reward: u32,
    pub gold_reward: u32,
    /// `(item_id, chance)` pairs rolled independently on victory.
    pub drops: Vec<(String, f64)>,

    pub skills: Vec<String>,

    // Damage type multipliers and status immunities
    pub resistances: HashMap<DamageType, f64>,
    pub weaknesses: HashMap<DamageType, f64>,
    pub immunities: Vec<StatusType>,

    pub ai: AiKind,

    // Display
    pub sprite_id: String,
}

impl Default for EnemyData {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            hp: 50,
            mp: 0,
            strength: 10,
            defense: 10,
            magic: 10,
            resistance: 10,
            agility: 10,
            luck: 5,
            exp_reward: 10,
            gold_reward: 5,
            drops: Vec::new(),
            skills: Vec::new(),
            resistances: HashMap::new(),
            weaknesses: HashMap::new(),
            immunities: Vec::new(),
            ai: AiKind::Basic,
            sprite_id: String::new(),
        }
    }
}
