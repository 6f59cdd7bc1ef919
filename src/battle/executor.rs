use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use schema::{ItemData, SkillData, StatusType};

use crate::battle::actor::BattleActor;
use crate::battle::formulas;
use crate::battle::state::BattleRng;
use crate::components::StatusEffect;

/// The five battle actions a command can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Attack,
    Skill,
    Item,
    Defend,
    Flee,
}

/// A queued battle command: who acts, what they do, and at whom. Built
/// during input (or by the AI), consumed in the executing phase, then
/// discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub actor_id: u32,
    pub kind: ActionKind,
    pub skill_id: Option<String>,
    pub item_id: Option<String>,
    pub targets: Vec<u32>,
}

impl Command {
    pub fn new(actor_id: u32, kind: ActionKind) -> Self {
        Self {
            actor_id,
            kind,
            skill_id: None,
            item_id: None,
            targets: Vec::new(),
        }
    }
}

/// The resolved outcome of one command.
///
/// Resolution never touches the actors; every recorded amount is final
/// (multipliers, defend halving, and HP/MP clamps included) so
/// [`apply_result`] can commit it verbatim — immediately, or after an
/// animation signal releases a held result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    /// actor_id -> HP actually removed.
    pub damage_dealt: HashMap<u32, i32>,
    /// actor_id -> HP actually restored (revives excluded).
    pub healing_done: HashMap<u32, i32>,
    pub mp_cost: i32,
    /// actor_id -> MP actually restored.
    pub mp_restored: HashMap<u32, i32>,
    /// Targets that took a critical hit.
    pub critical_hits: HashSet<u32>,
    pub statuses_applied: HashMap<u32, Vec<StatusEffect>>,
    pub statuses_cured: HashMap<u32, Vec<StatusType>>,
    /// actor_id -> HP a revive restores the target to.
    pub revived: HashMap<u32, i32>,
    pub message: String,
    pub fled: bool,
}

impl Default for ActionResult {
    fn default() -> Self {
        Self {
            success: true,
            damage_dealt: HashMap::new(),
            healing_done: HashMap::new(),
            mp_cost: 0,
            mp_restored: HashMap::new(),
            critical_hits: HashSet::new(),
            statuses_applied: HashMap::new(),
            statuses_cured: HashMap::new(),
            revived: HashMap::new(),
            message: String::new(),
            fled: false,
        }
    }
}

impl ActionResult {
    /// Healing per target including revives, for event payloads.
    pub fn total_healing(&self) -> HashMap<u32, i32> {
        let mut totals = self.healing_done.clone();
        for (&id, &hp) in &self.revived {
            *totals.entry(id).or_insert(0) += hp;
        }
        totals
    }
}

/// Stateless action resolver over the skill and item registries.
#[derive(Debug, Default)]
pub struct ActionExecutor {
    skills: HashMap<String, SkillData>,
    items: HashMap<String, ItemData>,
}

impl ActionExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_skill(&mut self, skill: SkillData) {
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn register_item(&mut self, item: ItemData) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn skill(&self, id: &str) -> Option<&SkillData> {
        self.skills.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&ItemData> {
        self.items.get(id)
    }

    /// Resolve a basic physical attack against each live target.
    pub fn execute_attack(
        &self,
        attacker: &BattleActor,
        targets: &[&BattleActor],
        rng: &mut BattleRng,
    ) -> ActionResult {
        let mut result = ActionResult::default();

        for target in targets {
            if !target.is_alive() {
                continue;
            }

            let (damage, is_crit) = formulas::physical_damage(
                attacker.attack(),
                target.defense(),
                attacker.combat.critical_chance,
                attacker.combat.critical_multiplier,
                rng,
            );

            if formulas::hit_check(attacker.combat.accuracy, 1.0, target.combat.evasion, rng) {
                let already = *result.damage_dealt.get(&target.entity_id).unwrap_or(&0);
                let actual = target.preview_damage(damage, schema::DamageType::Physical, already);
                *result.damage_dealt.entry(target.entity_id).or_insert(0) += actual;
                if is_crit {
                    result.critical_hits.insert(target.entity_id);
                }
            } else {
                result.message = "Miss!".to_string();
            }
        }

        result
    }

    /// Resolve a skill use. Fails softly on an unknown id or insufficient
    /// MP; the MP check reserves the cost without deducting it, so a failed
    /// resolution has no side effects at all.
    pub fn execute_skill(
        &self,
        user: &BattleActor,
        skill_id: &str,
        targets: &[&BattleActor],
        rng: &mut BattleRng,
    ) -> ActionResult {
        let mut result = ActionResult::default();

        let Some(skill) = self.skills.get(skill_id) else {
            result.success = false;
            result.message = format!("Unknown skill: {}", skill_id);
            return result;
        };

        if skill.mp_cost > 0 {
            if !user.can_spend_mp(skill.mp_cost) {
                result.success = false;
                result.message = "Not enough MP!".to_string();
                return result;
            }
            result.mp_cost = skill.mp_cost;
        }

        for _ in 0..skill.hit_count.max(1) {
            for target in targets {
                let dealt = *result.damage_dealt.get(&target.entity_id).unwrap_or(&0);
                let dead_now = target.current_hp() - dealt <= 0;
                if dead_now && !skill.healing {
                    continue;
                }

                if skill.healing {
                    let amount = formulas::healing_amount(user.magic(), skill.power, rng);
                    let healed = *result.healing_done.get(&target.entity_id).unwrap_or(&0);
                    let actual = target.preview_heal(amount, healed);
                    *result.healing_done.entry(target.entity_id).or_insert(0) += actual;
                } else {
                    let crit_chance = user.combat.critical_chance * skill.critical_modifier;
                    let (damage, is_crit) = if skill.is_magical {
                        formulas::magical_damage(
                            user.magic(),
                            target.resistance(),
                            skill.power,
                            crit_chance,
                            user.combat.critical_multiplier,
                            rng,
                        )
                    } else {
                        formulas::physical_skill_damage(
                            user.attack(),
                            target.defense(),
                            skill.power,
                            crit_chance,
                            user.combat.critical_multiplier,
                            rng,
                        )
                    };

                    if formulas::hit_check(
                        user.combat.accuracy,
                        skill.accuracy_modifier,
                        target.combat.evasion,
                        rng,
                    ) {
                        let actual = target.preview_damage(damage, skill.damage_type, dealt);
                        *result.damage_dealt.entry(target.entity_id).or_insert(0) += actual;
                        if is_crit {
                            result.critical_hits.insert(target.entity_id);
                        }
                    } else {
                        result.message = "Miss!".to_string();
                    }
                }

                if let Some(status_type) = skill.status_effect {
                    if formulas::chance_roll(skill.status_chance, rng, "status chance")
                        && !target.combat.immunities.contains(&status_type)
                    {
                        let effect = StatusEffect::new(
                            status_type,
                            skill.status_duration,
                            skill.status_potency,
                            Some(user.entity_id),
                        );
                        result
                            .statuses_applied
                            .entry(target.entity_id)
                            .or_default()
                            .push(effect);
                    }
                }
            }
        }

        result
    }

    /// Resolve an item use. All applicable effects of the definition fire
    /// in this single resolution.
    pub fn execute_item(
        &self,
        user: &BattleActor,
        item_id: &str,
        targets: &[&BattleActor],
    ) -> ActionResult {
        let mut result = ActionResult::default();

        let Some(item) = self.items.get(item_id) else {
            result.success = false;
            result.message = format!("Unknown item: {}", item_id);
            return result;
        };

        for target in targets {
            let mut healed_so_far = 0;

            // Revive only applies to downed targets.
            if item.revive && !target.is_alive() {
                let restored = ((target.max_hp() as f64 * item.revive_hp_percent) as i32).max(1);
                result.revived.insert(target.entity_id, restored);
                healed_so_far = restored - target.current_hp();
            }

            if item.hp_restore > 0 || item.hp_restore_percent > 0.0 {
                let amount = item.hp_restore
                    + (target.max_hp() as f64 * item.hp_restore_percent) as i32;
                let actual = target.preview_heal(amount, healed_so_far);
                if actual > 0 {
                    *result.healing_done.entry(target.entity_id).or_insert(0) += actual;
                }
            }

            if item.mp_restore > 0 || item.mp_restore_percent > 0.0 {
                let amount = item.mp_restore
                    + (target.max_mp() as f64 * item.mp_restore_percent) as i32;
                let actual = amount.clamp(0, target.max_mp() - target.current_mp());
                if actual > 0 {
                    result.mp_restored.insert(target.entity_id, actual);
                }
            }

            for &status_type in &item.cures_status {
                result
                    .statuses_cured
                    .entry(target.entity_id)
                    .or_default()
                    .push(status_type);
            }

            if let Some(status_type) = item.applies_status {
                if !target.combat.immunities.contains(&status_type) {
                    let effect = StatusEffect::new(
                        status_type,
                        item.status_duration,
                        10,
                        Some(user.entity_id),
                    );
                    result
                        .statuses_applied
                        .entry(target.entity_id)
                        .or_default()
                        .push(effect);
                }
            }

            if item.damage > 0 {
                let dealt = *result.damage_dealt.get(&target.entity_id).unwrap_or(&0);
                let actual = target.preview_damage(item.damage, item.damage_type, dealt);
                *result.damage_dealt.entry(target.entity_id).or_insert(0) += actual;
            }
        }

        result
    }

    /// Take a defensive stance. Always succeeds, applied on the spot.
    pub fn execute_defend(&self, actor: &mut BattleActor) -> ActionResult {
        actor.start_defend();
        ActionResult {
            message: format!("{} is defending!", actor.name),
            ..ActionResult::default()
        }
    }

    /// Attempt to flee. The escape chance follows the speed advantage of
    /// the living party members over the living enemies, 0.5 when either
    /// side has no live member.
    pub fn execute_flee(
        &self,
        party: &[BattleActor],
        enemies: &[BattleActor],
        rng: &mut BattleRng,
    ) -> ActionResult {
        let mut result = ActionResult::default();

        let chance = match (average_speed(party), average_speed(enemies)) {
            (Some(party_avg), Some(enemy_avg)) => formulas::flee_chance(party_avg, enemy_avg),
            _ => 0.5,
        };

        if formulas::chance_roll(chance, rng, "flee check") {
            result.fled = true;
            result.message = "Got away safely!".to_string();
        } else {
            result.success = false;
            result.message = "Couldn't escape!".to_string();
        }

        result
    }
}

/// Commit every mutation a resolution recorded. Called exactly once per
/// result, either straight from the executing phase or when an animation
/// signal releases a held result.
pub fn apply_result(
    result: &ActionResult,
    user_id: u32,
    party: &mut [BattleActor],
    enemies: &mut [BattleActor],
) {
    if result.mp_cost > 0 {
        if let Some(user) = find_actor_mut(party, enemies, user_id) {
            user.spend_mp(result.mp_cost);
        }
    }

    for (&id, &hp) in &result.revived {
        if let Some(actor) = find_actor_mut(party, enemies, id) {
            actor.revive_to(hp);
        }
    }

    for (&id, &amount) in &result.healing_done {
        if let Some(actor) = find_actor_mut(party, enemies, id) {
            actor.health.heal(amount);
        }
    }

    for (&id, &amount) in &result.mp_restored {
        if let Some(actor) = find_actor_mut(party, enemies, id) {
            actor.restore_mp(amount);
        }
    }

    for (&id, &amount) in &result.damage_dealt {
        if let Some(actor) = find_actor_mut(party, enemies, id) {
            // Multipliers and clamps were already folded in at resolution.
            actor.health.take_damage(amount);
        }
    }

    for (&id, effects) in &result.statuses_applied {
        if let Some(actor) = find_actor_mut(party, enemies, id) {
            for effect in effects {
                actor.apply_status(effect.clone());
            }
        }
    }

    for (&id, statuses) in &result.statuses_cured {
        if let Some(actor) = find_actor_mut(party, enemies, id) {
            for &status_type in statuses {
                actor.remove_status(status_type);
            }
        }
    }
}

fn average_speed(actors: &[BattleActor]) -> Option<f64> {
    let alive: Vec<i32> = actors
        .iter()
        .filter(|a| a.is_alive())
        .map(|a| a.speed())
        .collect();
    if alive.is_empty() {
        return None;
    }
    Some(alive.iter().sum::<i32>() as f64 / alive.len() as f64)
}

pub(crate) fn find_actor<'a>(
    party: &'a [BattleActor],
    enemies: &'a [BattleActor],
    id: u32,
) -> Option<&'a BattleActor> {
    party
        .iter()
        .chain(enemies.iter())
        .find(|a| a.entity_id == id)
}

pub(crate) fn find_actor_mut<'a>(
    party: &'a mut [BattleActor],
    enemies: &'a mut [BattleActor],
    id: u32,
) -> Option<&'a mut BattleActor> {
    party
        .iter_mut()
        .chain(enemies.iter_mut())
        .find(|a| a.entity_id == id)
}

/// Collect actor references for a command's resolved target ids, in order.
pub(crate) fn collect_actors<'a>(
    party: &'a [BattleActor],
    enemies: &'a [BattleActor],
    ids: &[u32],
) -> Vec<&'a BattleActor> {
    ids.iter()
        .filter_map(|&id| find_actor(party, enemies, id))
        .collect()
}
