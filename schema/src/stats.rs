use serde::{Deserialize, Serialize};

/// Base character statistics.
///
/// These are the permanent stats that define a combatant; battle-time
/// modifiers are layered on top of the values derived here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    pub strength: i32,
    pub defense: i32,
    pub magic: i32,
    pub resistance: i32,
    pub agility: i32,
    pub luck: i32,
    pub level: i32,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            strength: 10,
            defense: 10,
            magic: 10,
            resistance: 10,
            agility: 10,
            luck: 5,
            level: 1,
        }
    }
}

impl CharacterStats {
    /// Base attack power before battle modifiers.
    pub fn attack_power(&self) -> i32 {
        self.strength + self.level * 2
    }

    /// Base defense power before battle modifiers.
    pub fn defense_power(&self) -> i32 {
        self.defense + self.level
    }

    /// Base magic power before battle modifiers.
    pub fn magic_power(&self) -> i32 {
        self.magic + self.level * 2
    }

    /// Base magic resistance before battle modifiers.
    pub fn resistance_power(&self) -> i32 {
        self.resistance
    }

    /// Base battle speed for turn ordering.
    pub fn speed(&self) -> i32 {
        self.agility + self.level / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_powers_scale_with_level() {
        let stats = CharacterStats {
            strength: 12,
            defense: 8,
            magic: 14,
            resistance: 9,
            agility: 11,
            luck: 5,
            level: 5,
        };

        assert_eq!(stats.attack_power(), 22);
        assert_eq!(stats.defense_power(), 13);
        assert_eq!(stats.magic_power(), 24);
        assert_eq!(stats.resistance_power(), 9);
        assert_eq!(stats.speed(), 13);
    }
}
