//! Decision functions for enemy turns.
//!
//! Enemy tactics are deliberately simple; the trait exists so hosts can
//! plug in something smarter without touching the state machine.

use ordered_float::OrderedFloat;

use schema::AiKind;

use crate::battle::actor::BattleActor;
use crate::battle::executor::{ActionKind, Command};
use crate::battle::state::BattleRng;

/// A decision function for any actor the player does not control.
pub trait EnemyBehavior {
    /// Decide the acting enemy's command. Returns None when there is no
    /// valid move (no live opponent remains).
    fn decide(
        &self,
        actor: &BattleActor,
        party: &[BattleActor],
        enemies: &[BattleActor],
        rng: &mut BattleRng,
    ) -> Option<Command>;
}

/// Attack a live random party member.
pub struct RandomTarget;

impl EnemyBehavior for RandomTarget {
    fn decide(
        &self,
        actor: &BattleActor,
        party: &[BattleActor],
        _enemies: &[BattleActor],
        rng: &mut BattleRng,
    ) -> Option<Command> {
        let living: Vec<&BattleActor> = party.iter().filter(|a| a.is_alive()).collect();
        if living.is_empty() {
            return None;
        }

        let target = living[rng.pick_index(living.len(), "ai target")];
        let mut command = Command::new(actor.entity_id, ActionKind::Attack);
        command.targets = vec![target.entity_id];
        Some(command)
    }
}

/// Attack the live party member with the lowest HP fraction.
pub struct PreferWeakest;

impl EnemyBehavior for PreferWeakest {
    fn decide(
        &self,
        actor: &BattleActor,
        party: &[BattleActor],
        _enemies: &[BattleActor],
        _rng: &mut BattleRng,
    ) -> Option<Command> {
        let target = party
            .iter()
            .filter(|a| a.is_alive())
            .min_by_key(|a| OrderedFloat(a.hp_percent()))?;

        let mut command = Command::new(actor.entity_id, ActionKind::Attack);
        command.targets = vec![target.entity_id];
        Some(command)
    }
}

/// The default behavior: dispatch on the `ai` selector each enemy type
/// declares in its data.
pub struct DataDriven;

impl EnemyBehavior for DataDriven {
    fn decide(
        &self,
        actor: &BattleActor,
        party: &[BattleActor],
        enemies: &[BattleActor],
        rng: &mut BattleRng,
    ) -> Option<Command> {
        match actor.ai {
            AiKind::Basic => RandomTarget.decide(actor, party, enemies, rng),
            AiKind::PreferWeakest => PreferWeakest.decide(actor, party, enemies, rng),
        }
    }
}
