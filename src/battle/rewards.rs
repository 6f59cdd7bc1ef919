use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::battle::actor::BattleActor;
use crate::battle::formulas::chance_roll;
use crate::battle::state::BattleRng;

/// What a won battle pays out. Levels gained are keyed by entity id so the
/// world can apply them to the real party records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleRewards {
    pub exp: u32,
    pub gold: u32,
    pub items: Vec<String>,
    pub levels_gained: HashMap<u32, u32>,
}

/// Sum the defeated enemies' yields, roll their drops, and grant the full
/// experience sum to every living party member, recording any level-ups.
pub fn compute_victory_rewards(
    party: &mut [BattleActor],
    enemies: &[BattleActor],
    rng: &mut BattleRng,
) -> BattleRewards {
    let mut rewards = BattleRewards::default();

    for enemy in enemies {
        let Some(yield_) = &enemy.reward else {
            continue;
        };
        rewards.exp += yield_.exp;
        rewards.gold += yield_.gold;
        for (item_id, chance) in &yield_.drops {
            if chance_roll(*chance, rng, "drop roll") {
                rewards.items.push(item_id.clone());
            }
        }
    }

    for member in party.iter_mut() {
        if !member.is_alive() {
            continue;
        }
        if let Some(experience) = &mut member.experience {
            let levels = experience.add_exp(rewards.exp);
            if levels > 0 {
                rewards.levels_gained.insert(member.entity_id, levels);
            }
        }
    }

    rewards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::actor::{ActorKind, PartyMemberSnapshot, ENEMY_ID_BASE};
    use crate::components::{CombatStats, Experience, Health};
    use schema::{CharacterStats, EnemyData};

    fn member(id: u32, alive: bool) -> BattleActor {
        let snapshot = PartyMemberSnapshot {
            entity_id: id,
            name: format!("Member {}", id),
            kind: ActorKind::PartyMember,
            stats: CharacterStats::default(),
            health: Health::new(40),
            mana: None,
            combat: CombatStats::default(),
            experience: Experience::default(),
            skills: Vec::new(),
            inventory: Vec::new(),
            sprite_id: None,
        };
        let mut actor = BattleActor::from_snapshot(&snapshot, 0);
        if !alive {
            actor.health.take_damage(40);
        }
        actor
    }

    fn slain_enemy(exp: u32, gold: u32, drops: Vec<(String, f64)>) -> BattleActor {
        let data = EnemyData {
            id: "slime".to_string(),
            name: "Slime".to_string(),
            hp: 1,
            exp_reward: exp,
            gold_reward: gold,
            drops,
            ..EnemyData::default()
        };
        let mut actor = BattleActor::from_enemy(&data, ENEMY_ID_BASE, 0);
        actor.health.take_damage(1);
        actor
    }

    #[test]
    fn rewards_sum_over_all_enemies() {
        let mut party = vec![member(1, true)];
        let enemies = vec![
            slain_enemy(10, 5, Vec::new()),
            slain_enemy(25, 12, Vec::new()),
        ];
        let mut rng = BattleRng::scripted(vec![]);

        let rewards = compute_victory_rewards(&mut party, &enemies, &mut rng);
        assert_eq!(rewards.exp, 35);
        assert_eq!(rewards.gold, 17);
        assert!(rewards.items.is_empty());
    }

    #[test]
    fn only_living_members_gain_experience() {
        let mut party = vec![member(1, true), member(2, false)];
        let enemies = vec![slain_enemy(120, 0, Vec::new())];
        let mut rng = BattleRng::scripted(vec![]);

        let rewards = compute_victory_rewards(&mut party, &enemies, &mut rng);

        // 120 exp crosses the 100-exp threshold for level 2.
        assert_eq!(rewards.levels_gained.get(&1), Some(&1));
        assert!(!rewards.levels_gained.contains_key(&2));
        assert_eq!(party[0].experience.unwrap().level, 2);
        assert_eq!(party[1].experience.unwrap().level, 1);
    }

    #[test]
    fn drops_are_rolled_per_entry() {
        let mut party = vec![member(1, true)];
        let enemies = vec![slain_enemy(
            1,
            1,
            vec![("herb".to_string(), 1.0), ("gem".to_string(), 0.0)],
        )];
        // Both rolls scripted; the zero-chance entry can never pass.
        let mut rng = BattleRng::scripted(vec![50, 50]);

        let rewards = compute_victory_rewards(&mut party, &enemies, &mut rng);
        assert_eq!(rewards.items, vec!["herb".to_string()]);
    }
}
