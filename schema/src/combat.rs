use serde::{Deserialize, Serialize};
use strum::Display;

/// Damage categories used for resistance and weakness lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DamageType {
    Physical,
    Fire,
    Ice,
    Lightning,
    Water,
    Earth,
    Wind,
    Light,
    Dark,
    Healing,
}

/// Status effect categories.
///
/// Debuffs change what an actor can do or bleed HP over time; buffs are the
/// positive counterparts. Whether a given status prevents acting or ticks
/// damage is decided by the battle engine, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum StatusType {
    // Debuffs
    Poison,
    Burn,
    Freeze,
    Paralysis,
    Sleep,
    Confusion,
    Blind,
    Silence,
    Slow,
    // Buffs
    Regen,
    Haste,
    Protect,
    Shell,
    Berserk,
    Invisible,
}

impl StatusType {
    /// True for effects that harm or impair the holder.
    pub fn is_debuff(self) -> bool {
        matches!(
            self,
            StatusType::Poison
                | StatusType::Burn
                | StatusType::Freeze
                | StatusType::Paralysis
                | StatusType::Sleep
                | StatusType::Confusion
                | StatusType::Blind
                | StatusType::Silence
                | StatusType::Slow
        )
    }
}

/// Targeting policy for skills and items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum TargetType {
    SingleEnemy,
    AllEnemies,
    SingleAlly,
    AllAllies,
    /// The acting actor itself.
    User,
    /// A downed ally, for revive items.
    DeadAlly,
    /// Any single live actor on either side.
    AnySingle,
    /// Every live actor on both sides.
    All,
}

impl TargetType {
    /// Policies that need a cursor in target selection. List policies and
    /// self-targeting resolve without player input.
    pub fn is_single(self) -> bool {
        matches!(
            self,
            TargetType::SingleEnemy
                | TargetType::SingleAlly
                | TargetType::DeadAlly
                | TargetType::AnySingle
        )
    }
}
