use serde::{Deserialize, Serialize};

use crate::combat::{DamageType, StatusType, TargetType};

/// Static definition of a skill. Registered once at setup and never mutated
/// during battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillData {
    pub id: String,
    pub name: String,
    pub description: String,

    // Costs
    pub mp_cost: i32,

    // Targeting
    pub target_type: TargetType,

    // Effects
    pub damage_type: DamageType,
    /// Percentage of the user's attack or magic power.
    pub power: i32,
    /// Magical skills scale on magic vs. resistance, physical ones on
    /// attack vs. defense.
    pub is_magical: bool,
    pub healing: bool,

    // Status effects
    pub status_effect: Option<StatusType>,
    pub status_chance: f64,
    pub status_duration: f64,
    pub status_potency: i32,

    // Modifiers
    pub hit_count: u32,
    pub accuracy_modifier: f64,
    pub critical_modifier: f64,

    // Presentation hooks
    pub animation_id: String,
    pub sound_id: String,
}

impl Default for SkillData {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            mp_cost: 0,
            target_type: TargetType::SingleEnemy,
            damage_type: DamageType::Physical,
            power: 100,
            is_magical: false,
            healing: false,
            status_effect: None,
            status_chance: 1.0,
            status_duration: 3.0,
            status_potency: 10,
            hit_count: 1,
            accuracy_modifier: 1.0,
            critical_modifier: 1.0,
            animation_id: String::new(),
            sound_id: String::new(),
        }
    }
}
