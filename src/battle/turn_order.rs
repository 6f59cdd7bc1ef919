use serde::{Deserialize, Serialize};

use crate::battle::actor::BattleActor;
use crate::battle::executor::find_actor;

/// Maintains the speed-sorted acting order for a round.
///
/// Actors are referenced by entity id; dead entries are skipped in place so
/// a death mid-round never corrupts the cursor. Each new round re-filters
/// to the living and re-sorts, since speed can change mid-battle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnOrderManager {
    order: Vec<u32>,
    cursor: usize,
    round: u32,
}

impl TurnOrderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the order for the first round: live actors, fastest first.
    /// Ties keep insertion order (party before enemies).
    pub fn initialize(&mut self, party: &[BattleActor], enemies: &[BattleActor]) {
        self.order = sorted_live_ids(party, enemies);
        self.cursor = 0;
        self.round = 1;
    }

    /// The actor whose turn it is, skipping (without removing) entries that
    /// died earlier in the round. None once every remaining entry is dead.
    pub fn current_actor(&mut self, party: &[BattleActor], enemies: &[BattleActor]) -> Option<u32> {
        while self.cursor < self.order.len() {
            let id = self.order[self.cursor];
            match find_actor(party, enemies, id) {
                Some(actor) if actor.is_alive() => return Some(id),
                _ => self.cursor += 1,
            }
        }
        None
    }

    /// Move to the next actor, rolling over into a fresh round (and a
    /// re-sort) when the order is exhausted.
    pub fn advance(&mut self, party: &[BattleActor], enemies: &[BattleActor]) -> Option<u32> {
        self.cursor += 1;
        if self.cursor >= self.order.len() {
            self.start_new_round(party, enemies);
        }
        self.current_actor(party, enemies)
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// True when `advance` just rolled the cursor over to a new round.
    pub fn at_round_start(&self) -> bool {
        self.cursor == 0
    }

    fn start_new_round(&mut self, party: &[BattleActor], enemies: &[BattleActor]) {
        self.round += 1;
        self.cursor = 0;
        self.order = sorted_live_ids(party, enemies);
    }
}

fn sorted_live_ids(party: &[BattleActor], enemies: &[BattleActor]) -> Vec<u32> {
    let mut live: Vec<(u32, i32)> = party
        .iter()
        .chain(enemies.iter())
        .filter(|a| a.is_alive())
        .map(|a| (a.entity_id, a.speed()))
        .collect();
    // Stable sort keeps insertion order between equal speeds.
    live.sort_by(|a, b| b.1.cmp(&a.1));
    live.into_iter().map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::EnemyData;

    fn actor(id: u32, agility: i32, hp: i32) -> BattleActor {
        let enemy = EnemyData {
            id: format!("e{}", id),
            name: format!("Actor {}", id),
            hp,
            agility,
            ..EnemyData::default()
        };
        BattleActor::from_enemy(&enemy, id, 0)
    }

    #[test]
    fn initialize_sorts_by_speed_descending() {
        let party = vec![actor(1, 5, 10), actor(2, 20, 10)];
        let enemies = vec![actor(3, 10, 10)];

        let mut order = TurnOrderManager::new();
        order.initialize(&party, &enemies);

        assert_eq!(order.current_actor(&party, &enemies), Some(2));
        assert_eq!(order.advance(&party, &enemies), Some(3));
        assert_eq!(order.advance(&party, &enemies), Some(1));
        assert_eq!(order.round(), 1);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let party = vec![actor(1, 10, 10), actor(2, 10, 10)];
        let enemies = vec![actor(3, 10, 10)];

        let mut order = TurnOrderManager::new();
        order.initialize(&party, &enemies);

        assert_eq!(order.current_actor(&party, &enemies), Some(1));
        assert_eq!(order.advance(&party, &enemies), Some(2));
        assert_eq!(order.advance(&party, &enemies), Some(3));
    }

    #[test]
    fn dead_actors_are_excluded_at_initialize() {
        let mut fallen = actor(1, 30, 10);
        fallen.health.take_damage(10);
        let party = vec![fallen, actor(2, 5, 10)];
        let enemies = vec![actor(3, 10, 10)];

        let mut order = TurnOrderManager::new();
        order.initialize(&party, &enemies);

        assert_eq!(order.current_actor(&party, &enemies), Some(3));
        assert_eq!(order.advance(&party, &enemies), Some(2));
    }

    #[test]
    fn mid_round_death_is_skipped_without_cursor_corruption() {
        let mut party = vec![actor(1, 30, 10), actor(2, 20, 10)];
        let enemies = vec![actor(3, 10, 10)];

        let mut order = TurnOrderManager::new();
        order.initialize(&party, &enemies);
        assert_eq!(order.current_actor(&party, &enemies), Some(1));

        // Actor 2 dies before its turn comes up.
        party[1].health.take_damage(10);
        assert_eq!(order.advance(&party, &enemies), Some(3));
    }

    #[test]
    fn new_round_resorts_with_changed_speeds() {
        let mut party = vec![actor(1, 30, 10)];
        let enemies = vec![actor(3, 10, 10)];

        let mut order = TurnOrderManager::new();
        order.initialize(&party, &enemies);
        assert_eq!(order.current_actor(&party, &enemies), Some(1));
        assert_eq!(order.advance(&party, &enemies), Some(3));

        // A debuff drops actor 1 below actor 3 before the round rolls over.
        party[0].combat.speed_modifier = -25;
        assert_eq!(order.advance(&party, &enemies), Some(3));
        assert_eq!(order.round(), 2);
        assert_eq!(order.advance(&party, &enemies), Some(1));
    }

    #[test]
    fn no_live_actors_yields_none() {
        let mut party = vec![actor(1, 10, 10)];
        let enemies = vec![actor(3, 10, 10)];

        let mut order = TurnOrderManager::new();
        order.initialize(&party, &enemies);

        party[0].health.take_damage(10);
        let mut dead_enemies = enemies;
        dead_enemies[0].health.take_damage(10);

        assert_eq!(order.current_actor(&party, &dead_enemies), None);
    }
}
