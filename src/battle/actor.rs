use serde::{Deserialize, Serialize};

use schema::{AiKind, CharacterStats, DamageType, EnemyData, StatusType};

use crate::components::{CombatStats, Experience, Health, Mana, StatusEffect};

/// Enemy actors receive fresh ids from this base so they never collide with
/// the live entity namespace.
pub const ENEMY_ID_BASE: u32 = 10_000;

/// Kind of battle actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    PartyMember,
    Enemy,
    Boss,
}

/// Read-only snapshot of a party member's components, taken from the entity
/// store when an encounter starts. The engine never reaches back into the
/// world; everything it needs travels in here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMemberSnapshot {
    pub entity_id: u32,
    pub name: String,
    pub kind: ActorKind,
    pub stats: CharacterStats,
    pub health: Health,
    pub mana: Option<Mana>,
    pub combat: CombatStats,
    pub experience: Experience,
    pub skills: Vec<String>,
    /// Item ids this member can use, from the inventory query.
    pub inventory: Vec<String>,
    pub sprite_id: Option<String>,
}

/// Reward yield carried by enemy actors, copied from their `EnemyData` at
/// construction so victory never needs a registry lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardYield {
    pub exp: u32,
    pub gold: u32,
    pub drops: Vec<(String, f64)>,
}

/// A participant in battle.
///
/// Wraps a combatant's stats, vitals, and status for the duration of one
/// encounter. Constructed when the encounter starts, discarded when it ends;
/// mutated only through the operations below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleActor {
    pub entity_id: u32,
    pub name: String,
    pub kind: ActorKind,

    pub stats: CharacterStats,
    pub health: Health,
    pub mana: Option<Mana>,
    pub combat: CombatStats,
    pub experience: Option<Experience>,
    pub reward: Option<RewardYield>,

    // Turn-local flags
    pub is_defending: bool,
    pub can_act: bool,
    pub action_points: u32,

    // Display
    pub sprite_id: Option<String>,
    pub position_index: usize,

    pub skills: Vec<String>,
    pub inventory: Vec<String>,

    /// Decision function selector, meaningful for enemy-side actors.
    pub ai: AiKind,
}

impl BattleActor {
    /// Build a party-side actor from an entity snapshot.
    pub fn from_snapshot(snapshot: &PartyMemberSnapshot, position: usize) -> Self {
        Self {
            entity_id: snapshot.entity_id,
            name: snapshot.name.clone(),
            kind: snapshot.kind,
            stats: snapshot.stats,
            health: snapshot.health,
            mana: snapshot.mana,
            combat: snapshot.combat.clone(),
            experience: Some(snapshot.experience),
            reward: None,
            is_defending: false,
            can_act: true,
            action_points: 1,
            sprite_id: snapshot.sprite_id.clone(),
            position_index: position,
            skills: snapshot.skills.clone(),
            inventory: snapshot.inventory.clone(),
            ai: AiKind::Basic,
        }
    }

    /// Build an enemy-side actor from a registered enemy type.
    pub fn from_enemy(enemy: &EnemyData, entity_id: u32, position: usize) -> Self {
        let stats = CharacterStats {
            strength: enemy.strength,
            defense: enemy.defense,
            magic: enemy.magic,
            resistance: enemy.resistance,
            agility: enemy.agility,
            luck: enemy.luck,
            level: 1,
        };

        let combat = CombatStats {
            resistances: enemy.resistances.clone(),
            weaknesses: enemy.weaknesses.clone(),
            immunities: enemy.immunities.clone(),
            ..CombatStats::default()
        };

        Self {
            entity_id,
            name: enemy.name.clone(),
            kind: ActorKind::Enemy,
            stats,
            health: Health::new(enemy.hp),
            mana: (enemy.mp > 0).then(|| Mana::new(enemy.mp)),
            combat,
            experience: None,
            reward: Some(RewardYield {
                exp: enemy.exp_reward,
                gold: enemy.gold_reward,
                drops: enemy.drops.clone(),
            }),
            is_defending: false,
            can_act: true,
            action_points: 1,
            sprite_id: (!enemy.sprite_id.is_empty()).then(|| enemy.sprite_id.clone()),
            position_index: position,
            skills: enemy.skills.clone(),
            inventory: Vec::new(),
            ai: enemy.ai,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    pub fn is_player_controlled(&self) -> bool {
        matches!(self.kind, ActorKind::Player | ActorKind::PartyMember)
    }

    pub fn current_hp(&self) -> i32 {
        self.health.current
    }

    pub fn max_hp(&self) -> i32 {
        self.health.max_hp
    }

    pub fn current_mp(&self) -> i32 {
        self.mana.map_or(0, |m| m.current)
    }

    pub fn max_mp(&self) -> i32 {
        self.mana.map_or(0, |m| m.max_mp)
    }

    pub fn hp_percent(&self) -> f64 {
        self.health.percent()
    }

    pub fn mp_percent(&self) -> f64 {
        self.mana.map_or(0.0, |m| m.percent())
    }

    /// Total attack power (base + battle modifier).
    pub fn attack(&self) -> i32 {
        self.stats.attack_power() + self.combat.attack_modifier
    }

    /// Total defense (base + battle modifier).
    pub fn defense(&self) -> i32 {
        self.stats.defense_power() + self.combat.defense_modifier
    }

    /// Total magic power (base + battle modifier).
    pub fn magic(&self) -> i32 {
        self.stats.magic_power() + self.combat.magic_modifier
    }

    /// Total magic resistance (base + battle modifier).
    pub fn resistance(&self) -> i32 {
        self.stats.resistance_power() + self.combat.resistance_modifier
    }

    /// Battle speed for turn ordering (base + battle modifier).
    pub fn speed(&self) -> i32 {
        self.stats.speed() + self.combat.speed_modifier
    }

    // The incoming-damage pipeline: type multiplier, then the defend
    // halving, then the clamp against remaining HP. `preview_damage` is the
    // non-mutating twin used while a result is held for an animation;
    // `already` is damage recorded against this actor earlier in the same
    // resolution (multi-hit skills).
    fn modified_damage(&self, amount: i32, damage_type: DamageType) -> i32 {
        let mut final_amount = (amount as f64 * self.combat.damage_multiplier(damage_type)) as i32;
        if self.is_defending {
            final_amount /= 2;
        }
        final_amount
    }

    pub fn preview_damage(&self, amount: i32, damage_type: DamageType, already: i32) -> i32 {
        let remaining = (self.health.current - already).max(0);
        self.modified_damage(amount, damage_type).clamp(0, remaining)
    }

    /// Take damage. Returns the amount actually removed.
    pub fn take_damage(&mut self, amount: i32, damage_type: DamageType) -> i32 {
        let final_amount = self.modified_damage(amount, damage_type);
        self.health.take_damage(final_amount)
    }

    /// End-of-turn status tick damage: no type multiplier, but an active
    /// defend still halves it.
    pub fn take_status_tick(&mut self, amount: i32) -> i32 {
        let final_amount = if self.is_defending { amount / 2 } else { amount };
        self.health.take_damage(final_amount)
    }

    pub fn preview_heal(&self, amount: i32, already: i32) -> i32 {
        let headroom = (self.health.max_hp - self.health.current - already).max(0);
        amount.clamp(0, headroom)
    }

    /// Heal HP. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.health.heal(amount)
    }

    /// Spend MP. Returns false (spending nothing) on insufficient balance
    /// or for actors with no mana pool.
    pub fn spend_mp(&mut self, amount: i32) -> bool {
        match &mut self.mana {
            Some(mana) => mana.spend(amount),
            None => amount <= 0,
        }
    }

    /// Restore MP. Returns the amount actually restored.
    pub fn restore_mp(&mut self, amount: i32) -> i32 {
        match &mut self.mana {
            Some(mana) => mana.restore(amount),
            None => 0,
        }
    }

    /// True when `spend_mp(amount)` would succeed.
    pub fn can_spend_mp(&self, amount: i32) -> bool {
        match &self.mana {
            Some(mana) => mana.current >= amount,
            None => amount <= 0,
        }
    }

    /// Bring a downed actor back at the given HP. Used when committing a
    /// resolved revive.
    pub fn revive_to(&mut self, hp: i32) {
        self.health.current = hp.clamp(1, self.health.max_hp);
    }

    /// Apply a status effect. Returns false when immune.
    pub fn apply_status(&mut self, effect: StatusEffect) -> bool {
        self.combat.add_status(effect)
    }

    pub fn has_status(&self, status_type: StatusType) -> bool {
        self.combat.has_status(status_type)
    }

    pub fn remove_status(&mut self, status_type: StatusType) -> bool {
        self.combat.remove_status(status_type)
    }

    /// The status currently preventing this actor from acting, if any.
    pub fn action_preventing_status(&self) -> Option<StatusType> {
        if self.has_status(StatusType::Paralysis) {
            Some(StatusType::Paralysis)
        } else if self.has_status(StatusType::Sleep) {
            Some(StatusType::Sleep)
        } else {
            None
        }
    }

    pub fn start_defend(&mut self) {
        self.is_defending = true;
    }

    pub fn end_defend(&mut self) {
        self.is_defending = false;
    }

    /// Called when this actor's turn begins. A defend stance from the
    /// previous round ends here, so it covers every attack between the two
    /// turns.
    pub fn start_turn(&mut self) {
        self.action_points = 1;
        self.can_act = true;
        self.end_defend();
    }

    /// Called when this actor's turn ends.
    pub fn end_turn(&mut self) {
        self.action_points = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_actor(strength: i32, defense: i32, hp: i32) -> BattleActor {
        let enemy = EnemyData {
            id: "dummy".to_string(),
            name: "Dummy".to_string(),
            hp,
            strength,
            defense,
            ..EnemyData::default()
        };
        BattleActor::from_enemy(&enemy, ENEMY_ID_BASE, 0)
    }

    #[test]
    fn take_damage_applies_weakness_and_defend() {
        let mut actor = test_actor(10, 10, 100);
        actor.combat.weaknesses.insert(DamageType::Fire, 2.0);

        assert_eq!(actor.take_damage(10, DamageType::Fire), 20);

        actor.start_defend();
        assert_eq!(actor.take_damage(10, DamageType::Fire), 10);
    }

    #[test]
    fn preview_matches_commit_and_respects_accumulator() {
        let actor = test_actor(10, 10, 15);

        assert_eq!(actor.preview_damage(10, DamageType::Physical, 0), 10);
        // Only 5 HP left after the first 10 are accounted for.
        assert_eq!(actor.preview_damage(10, DamageType::Physical, 10), 5);
        assert_eq!(actor.preview_damage(10, DamageType::Physical, 15), 0);
    }

    #[test]
    fn defend_clears_when_the_next_turn_starts() {
        let mut actor = test_actor(10, 10, 100);
        actor.start_defend();
        actor.end_turn();
        assert!(actor.is_defending);

        actor.start_turn();
        assert!(!actor.is_defending);
    }

    #[test]
    fn actors_without_mana_cannot_spend() {
        let mut actor = test_actor(10, 10, 100);
        assert!(actor.mana.is_none());
        assert!(!actor.spend_mp(5));
        assert!(actor.spend_mp(0));
    }

    #[test]
    fn enemy_construction_copies_rewards_and_immunities() {
        let enemy = EnemyData {
            id: "slime".to_string(),
            name: "Slime".to_string(),
            hp: 30,
            exp_reward: 12,
            gold_reward: 7,
            immunities: vec![StatusType::Poison],
            ..EnemyData::default()
        };

        let mut actor = BattleActor::from_enemy(&enemy, ENEMY_ID_BASE + 3, 3);
        assert_eq!(actor.entity_id, ENEMY_ID_BASE + 3);
        let reward = actor.reward.clone().unwrap();
        assert_eq!((reward.exp, reward.gold), (12, 7));
        assert!(!actor.apply_status(StatusEffect::new(StatusType::Poison, 3.0, 10, None)));
    }
}
