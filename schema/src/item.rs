use serde::{Deserialize, Serialize};

use crate::combat::{DamageType, StatusType, TargetType};

/// Static definition of a usable item.
///
/// Any subset of the effect fields may be present on one definition; all
/// applicable effects fire in a single use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemData {
    pub id: String,
    pub name: String,
    pub description: String,

    // Targeting
    pub target_type: TargetType,

    // Restoration
    pub hp_restore: i32,
    pub hp_restore_percent: f64,
    pub mp_restore: i32,
    pub mp_restore_percent: f64,

    // Status
    pub cures_status: Vec<StatusType>,
    pub applies_status: Option<StatusType>,
    pub status_duration: f64,

    // Revival
    pub revive: bool,
    pub revive_hp_percent: f64,

    // Offensive items
    pub damage: i32,
    pub damage_type: DamageType,
}

impl Default for ItemData {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            target_type: TargetType::SingleAlly,
            hp_restore: 0,
            hp_restore_percent: 0.0,
            mp_restore: 0,
            mp_restore_percent: 0.0,
            cures_status: Vec::new(),
            applies_status: None,
            status_duration: 3.0,
            revive: false,
            revive_hp_percent: 0.5,
            damage: 0,
            damage_type: DamageType::Physical,
        }
    }
}
