use std::collections::HashMap;

use schema::{EnemyData, TargetType};

use crate::battle::actor::{BattleActor, PartyMemberSnapshot, ENEMY_ID_BASE};
use crate::battle::ai::{DataDriven, EnemyBehavior};
use crate::battle::executor::{
    apply_result, collect_actors, find_actor, find_actor_mut, ActionExecutor, ActionKind,
    ActionResult, Command,
};
use crate::battle::ports::{
    AnimationPort, AnimationSignal, InputAction, InputPort, ATTACK_HIT_EVENT,
};
use crate::battle::rewards::{compute_victory_rewards, BattleRewards};
use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase, BattleRng, EventBus};
use crate::battle::turn_order::TurnOrderManager;

/// Entries of the main battle menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMenu {
    Attack,
    Skill,
    Item,
    Defend,
    Flee,
}

const MAIN_MENU: [CommandMenu; 5] = [
    CommandMenu::Attack,
    CommandMenu::Skill,
    CommandMenu::Item,
    CommandMenu::Defend,
    CommandMenu::Flee,
];

// A resolved result waiting for its animation signal. Applied exactly once:
// on the clip's hit frame when one arrives, otherwise at completion.
#[derive(Debug)]
struct HeldResult {
    actor_id: u32,
    kind: ActionKind,
    result: ActionResult,
}

/// Turn-based battle controller.
///
/// Owns the encounter state exclusively: party and enemy actors, the turn
/// order, the pending command, and any held result. Collaborators reach it
/// only through `update`, `notify_animation`, and the read accessors.
pub struct BattleSystem {
    phase: BattlePhase,
    party: Vec<BattleActor>,
    enemies: Vec<BattleActor>,
    turn_order: TurnOrderManager,
    current_actor: Option<u32>,
    can_flee: bool,
    last_round: u32,

    // Menu state
    menu_selection: usize,
    skill_selection: usize,
    item_selection: usize,
    target_selection: usize,
    current_menu: CommandMenu,
    sub_menu_open: bool,
    available_items: Vec<String>,

    pending_command: Option<Command>,
    held_result: Option<HeldResult>,

    executor: ActionExecutor,
    enemy_registry: HashMap<String, EnemyData>,
    behavior: Box<dyn EnemyBehavior>,
    input: Box<dyn InputPort>,
    animation: Option<Box<dyn AnimationPort>>,
    events: EventBus,
    rng: BattleRng,
}

impl BattleSystem {
    pub fn new(input: Box<dyn InputPort>, rng: BattleRng) -> Self {
        Self {
            phase: BattlePhase::Inactive,
            party: Vec::new(),
            enemies: Vec::new(),
            turn_order: TurnOrderManager::new(),
            current_actor: None,
            can_flee: true,
            last_round: 0,
            menu_selection: 0,
            skill_selection: 0,
            item_selection: 0,
            target_selection: 0,
            current_menu: CommandMenu::Attack,
            sub_menu_open: false,
            available_items: Vec::new(),
            pending_command: None,
            held_result: None,
            executor: ActionExecutor::new(),
            enemy_registry: HashMap::new(),
            behavior: Box::new(DataDriven),
            input,
            animation: None,
            events: EventBus::new(),
            rng,
        }
    }

    /// Attach the animation collaborator. Without one, results always apply
    /// immediately.
    pub fn set_animation_port(&mut self, port: Box<dyn AnimationPort>) {
        self.animation = Some(port);
    }

    /// Replace the enemy decision function.
    pub fn set_behavior(&mut self, behavior: Box<dyn EnemyBehavior>) {
        self.behavior = behavior;
    }

    pub fn register_enemy(&mut self, enemy: EnemyData) {
        self.enemy_registry.insert(enemy.id.clone(), enemy);
    }

    pub fn register_skill(&mut self, skill: schema::SkillData) {
        self.executor.register_skill(skill);
    }

    pub fn register_item(&mut self, item: schema::ItemData) {
        self.executor.register_item(item);
    }

    /// Start a battle from party snapshots and registered enemy type ids.
    ///
    /// Returns false, without mutating anything, when a battle is already
    /// active or either side would be empty.
    pub fn start_battle(
        &mut self,
        party: &[PartyMemberSnapshot],
        enemy_types: &[&str],
        can_flee: bool,
    ) -> bool {
        if self.phase != BattlePhase::Inactive {
            return false;
        }

        let party_actors: Vec<BattleActor> = party
            .iter()
            .enumerate()
            .map(|(i, snapshot)| BattleActor::from_snapshot(snapshot, i))
            .collect();
        if party_actors.is_empty() {
            return false;
        }

        let mut enemy_actors = Vec::new();
        for (i, type_id) in enemy_types.iter().enumerate() {
            if let Some(enemy) = self.enemy_registry.get(*type_id) {
                let entity_id = ENEMY_ID_BASE + enemy_actors.len() as u32;
                enemy_actors.push(BattleActor::from_enemy(enemy, entity_id, i));
            }
        }
        if enemy_actors.is_empty() {
            return false;
        }

        self.party = party_actors;
        self.enemies = enemy_actors;
        self.turn_order.initialize(&self.party, &self.enemies);
        self.current_actor = None;
        self.can_flee = can_flee;
        self.last_round = 0;
        self.phase = BattlePhase::Starting;

        self.events.push(BattleEvent::BattleStarted {
            party_count: self.party.len(),
            enemy_count: self.enemies.len(),
        });

        true
    }

    /// Advance the battle by one frame: at most one state transition's
    /// worth of work, plus status-duration ticking.
    pub fn update(&mut self, dt: f64) {
        match self.phase {
            BattlePhase::Inactive | BattlePhase::Ending => return,
            BattlePhase::Starting => self.on_battle_start(),
            BattlePhase::TurnStart => self.on_turn_start(),
            BattlePhase::PlayerInput => self.handle_player_input(),
            BattlePhase::TargetSelect => self.handle_target_selection(),
            BattlePhase::Executing => self.execute_command(),
            // Suspended until an animation signal arrives.
            BattlePhase::Animation => {}
            BattlePhase::TurnEnd => self.on_turn_end(),
            BattlePhase::Victory | BattlePhase::Defeat | BattlePhase::Fled => self.on_battle_end(),
        }

        self.tick_status_durations(dt);
    }

    /// Feed an animation signal back into the engine. Ignored outside the
    /// animation phase or for entities other than the acting one.
    pub fn notify_animation(&mut self, signal: AnimationSignal) {
        if self.phase != BattlePhase::Animation {
            return;
        }
        let Some(held_actor) = self.held_result.as_ref().map(|h| h.actor_id) else {
            // Result already applied mid-clip; only completion matters now.
            if let AnimationSignal::Completed { entity_id } = signal {
                if Some(entity_id) == self.current_actor {
                    self.phase = BattlePhase::TurnEnd;
                }
            }
            return;
        };

        match signal {
            AnimationSignal::FrameEvent { entity_id, name } => {
                if entity_id == held_actor && name == ATTACK_HIT_EVENT {
                    self.apply_held_result();
                }
            }
            AnimationSignal::Completed { entity_id } => {
                if entity_id == held_actor {
                    self.apply_held_result();
                    self.phase = BattlePhase::TurnEnd;
                }
            }
        }
    }

    /// Tear the encounter down and return to the inactive state.
    pub fn end_battle(&mut self) {
        self.party.clear();
        self.enemies.clear();
        self.turn_order = TurnOrderManager::new();
        self.pending_command = None;
        self.held_result = None;
        self.current_actor = None;
        self.sub_menu_open = false;
        self.available_items.clear();
        self.phase = BattlePhase::Inactive;
    }

    // --- Phase handlers ---

    fn on_battle_start(&mut self) {
        self.phase = BattlePhase::TurnStart;
    }

    fn on_turn_start(&mut self) {
        let Some(id) = self.turn_order.current_actor(&self.party, &self.enemies) else {
            self.check_battle_end();
            return;
        };
        self.current_actor = Some(id);

        if self.turn_order.round() != self.last_round {
            self.last_round = self.turn_order.round();
            self.events.push(BattleEvent::RoundStarted {
                round: self.last_round,
            });
        }

        let Some(actor) = find_actor_mut(&mut self.party, &mut self.enemies, id) else {
            self.check_battle_end();
            return;
        };
        actor.start_turn();
        let name = actor.name.clone();
        let player_controlled = actor.is_player_controlled();
        let prevented = actor.action_preventing_status();

        self.events.push(BattleEvent::TurnStarted {
            actor_id: id,
            name: name.clone(),
            player_controlled,
        });

        if let Some(status) = prevented {
            self.events.push(BattleEvent::TurnSkipped {
                actor_id: id,
                name,
                status,
            });
            self.phase = BattlePhase::TurnEnd;
            return;
        }

        if player_controlled {
            self.menu_selection = 0;
            self.sub_menu_open = false;
            self.phase = BattlePhase::PlayerInput;
        } else {
            self.run_enemy_turn(id);
        }
    }

    fn run_enemy_turn(&mut self, id: u32) {
        let Some(actor) = find_actor(&self.party, &self.enemies, id) else {
            self.check_battle_end();
            return;
        };
        match self
            .behavior
            .decide(actor, &self.party, &self.enemies, &mut self.rng)
        {
            Some(command) => {
                self.pending_command = Some(command);
                self.phase = BattlePhase::Executing;
            }
            None => {
                self.check_battle_end();
            }
        }
    }

    fn handle_player_input(&mut self) {
        let Some(action) = self.input.poll() else {
            return;
        };

        if self.sub_menu_open {
            self.handle_sub_menu(action);
            return;
        }

        match action {
            InputAction::MenuUp => {
                self.menu_selection = (self.menu_selection + MAIN_MENU.len() - 1) % MAIN_MENU.len();
            }
            InputAction::MenuDown => {
                self.menu_selection = (self.menu_selection + 1) % MAIN_MENU.len();
            }
            InputAction::Confirm => self.select_menu_command(),
            _ => {}
        }
    }

    fn select_menu_command(&mut self) {
        let Some(actor_id) = self.current_actor else {
            return;
        };
        self.current_menu = MAIN_MENU[self.menu_selection];

        match self.current_menu {
            CommandMenu::Attack => {
                self.pending_command = Some(Command::new(actor_id, ActionKind::Attack));
                self.target_selection = 0;
                self.phase = BattlePhase::TargetSelect;
            }
            CommandMenu::Skill => {
                let has_skills = find_actor(&self.party, &self.enemies, actor_id)
                    .map_or(false, |a| !a.skills.is_empty());
                if has_skills {
                    self.skill_selection = 0;
                    self.sub_menu_open = true;
                }
            }
            CommandMenu::Item => {
                self.available_items = find_actor(&self.party, &self.enemies, actor_id)
                    .map(|a| {
                        a.inventory
                            .iter()
                            .filter(|id| self.executor.item(id).is_some())
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                if !self.available_items.is_empty() {
                    self.item_selection = 0;
                    self.sub_menu_open = true;
                }
            }
            CommandMenu::Defend => {
                self.pending_command = Some(Command::new(actor_id, ActionKind::Defend));
                self.phase = BattlePhase::Executing;
            }
            CommandMenu::Flee => {
                if self.can_flee {
                    self.pending_command = Some(Command::new(actor_id, ActionKind::Flee));
                    self.phase = BattlePhase::Executing;
                }
            }
        }
    }

    fn handle_sub_menu(&mut self, action: InputAction) {
        let Some(actor_id) = self.current_actor else {
            return;
        };

        if action == InputAction::Cancel {
            self.sub_menu_open = false;
            return;
        }

        match self.current_menu {
            CommandMenu::Skill => {
                let skills = find_actor(&self.party, &self.enemies, actor_id)
                    .map(|a| a.skills.clone())
                    .unwrap_or_default();
                if skills.is_empty() {
                    self.sub_menu_open = false;
                    return;
                }
                match action {
                    InputAction::MenuUp => {
                        self.skill_selection =
                            (self.skill_selection + skills.len() - 1) % skills.len();
                    }
                    InputAction::MenuDown => {
                        self.skill_selection = (self.skill_selection + 1) % skills.len();
                    }
                    InputAction::Confirm => {
                        let mut command = Command::new(actor_id, ActionKind::Skill);
                        command.skill_id = Some(skills[self.skill_selection].clone());
                        self.pending_command = Some(command);
                        self.sub_menu_open = false;
                        self.target_selection = 0;
                        self.phase = BattlePhase::TargetSelect;
                    }
                    _ => {}
                }
            }
            CommandMenu::Item => {
                if self.available_items.is_empty() {
                    self.sub_menu_open = false;
                    return;
                }
                match action {
                    InputAction::MenuUp => {
                        self.item_selection = (self.item_selection + self.available_items.len()
                            - 1)
                            % self.available_items.len();
                    }
                    InputAction::MenuDown => {
                        self.item_selection =
                            (self.item_selection + 1) % self.available_items.len();
                    }
                    InputAction::Confirm => {
                        let mut command = Command::new(actor_id, ActionKind::Item);
                        command.item_id = Some(self.available_items[self.item_selection].clone());
                        self.pending_command = Some(command);
                        self.sub_menu_open = false;
                        self.target_selection = 0;
                        self.phase = BattlePhase::TargetSelect;
                    }
                    _ => {}
                }
            }
            _ => self.sub_menu_open = false,
        }
    }

    fn handle_target_selection(&mut self) {
        let Some(command) = self.pending_command.clone() else {
            self.phase = BattlePhase::PlayerInput;
            return;
        };

        let policy = self.target_policy(&command);
        let candidates = self.target_candidates(policy, command.actor_id);

        if candidates.is_empty() {
            self.pending_command = None;
            self.phase = BattlePhase::PlayerInput;
            return;
        }

        // List and self policies need no cursor; resolve on the spot.
        if !policy.is_single() {
            if let Some(pending) = self.pending_command.as_mut() {
                pending.targets = candidates;
            }
            self.phase = BattlePhase::Executing;
            return;
        }

        if self.target_selection >= candidates.len() {
            self.target_selection = 0;
        }

        let Some(action) = self.input.poll() else {
            return;
        };
        match action {
            InputAction::MenuLeft => {
                self.target_selection =
                    (self.target_selection + candidates.len() - 1) % candidates.len();
            }
            InputAction::MenuRight => {
                self.target_selection = (self.target_selection + 1) % candidates.len();
            }
            InputAction::Confirm => {
                if let Some(pending) = self.pending_command.as_mut() {
                    pending.targets = vec![candidates[self.target_selection]];
                }
                self.phase = BattlePhase::Executing;
            }
            InputAction::Cancel => {
                self.pending_command = None;
                self.phase = BattlePhase::PlayerInput;
            }
            _ => {}
        }
    }

    fn target_policy(&self, command: &Command) -> TargetType {
        match command.kind {
            ActionKind::Attack => TargetType::SingleEnemy,
            ActionKind::Skill => command
                .skill_id
                .as_deref()
                .and_then(|id| self.executor.skill(id))
                .map(|s| s.target_type)
                .unwrap_or(TargetType::SingleEnemy),
            ActionKind::Item => command
                .item_id
                .as_deref()
                .and_then(|id| self.executor.item(id))
                .map(|i| i.target_type)
                .unwrap_or(TargetType::SingleAlly),
            ActionKind::Defend | ActionKind::Flee => TargetType::User,
        }
    }

    fn target_candidates(&self, policy: TargetType, actor_id: u32) -> Vec<u32> {
        let live_ids = |actors: &[BattleActor]| -> Vec<u32> {
            actors
                .iter()
                .filter(|a| a.is_alive())
                .map(|a| a.entity_id)
                .collect()
        };

        match policy {
            TargetType::SingleEnemy | TargetType::AllEnemies => live_ids(&self.enemies),
            TargetType::SingleAlly | TargetType::AllAllies => live_ids(&self.party),
            TargetType::User => vec![actor_id],
            TargetType::DeadAlly => self
                .party
                .iter()
                .filter(|a| !a.is_alive())
                .map(|a| a.entity_id)
                .collect(),
            TargetType::AnySingle | TargetType::All => {
                let mut all = live_ids(&self.party);
                all.extend(live_ids(&self.enemies));
                all
            }
        }
    }

    fn execute_command(&mut self) {
        let Some(command) = self.pending_command.take() else {
            self.phase = BattlePhase::TurnEnd;
            return;
        };

        let result = match command.kind {
            ActionKind::Attack => {
                let Some(attacker) = find_actor(&self.party, &self.enemies, command.actor_id)
                else {
                    self.phase = BattlePhase::TurnEnd;
                    return;
                };
                let targets = collect_actors(&self.party, &self.enemies, &command.targets);
                self.executor
                    .execute_attack(attacker, &targets, &mut self.rng)
            }
            ActionKind::Skill => {
                let Some(user) = find_actor(&self.party, &self.enemies, command.actor_id) else {
                    self.phase = BattlePhase::TurnEnd;
                    return;
                };
                let targets = collect_actors(&self.party, &self.enemies, &command.targets);
                let skill_id = command.skill_id.as_deref().unwrap_or_default();
                self.executor
                    .execute_skill(user, skill_id, &targets, &mut self.rng)
            }
            ActionKind::Item => {
                let Some(user) = find_actor(&self.party, &self.enemies, command.actor_id) else {
                    self.phase = BattlePhase::TurnEnd;
                    return;
                };
                let targets = collect_actors(&self.party, &self.enemies, &command.targets);
                let item_id = command.item_id.as_deref().unwrap_or_default();
                self.executor.execute_item(user, item_id, &targets)
            }
            ActionKind::Defend => {
                let Some(actor) = find_actor_mut(&mut self.party, &mut self.enemies, command.actor_id)
                else {
                    self.phase = BattlePhase::TurnEnd;
                    return;
                };
                let result = self.executor.execute_defend(actor);
                self.emit_action_event(&command, &result);
                self.phase = BattlePhase::TurnEnd;
                return;
            }
            ActionKind::Flee => {
                let result = self
                    .executor
                    .execute_flee(&self.party, &self.enemies, &mut self.rng);
                if result.fled {
                    self.phase = BattlePhase::Fled;
                    return;
                }
                self.emit_action_event(&command, &result);
                self.phase = BattlePhase::TurnEnd;
                return;
            }
        };

        // Attack and skill results can wait for the swing animation; if the
        // clip cannot start, fall through and apply directly so the damage
        // is never dropped.
        if result.success {
            if let Some(clip_id) = self.animation_clip(&command) {
                if let Some(port) = self.animation.as_mut() {
                    if port.play(command.actor_id, &clip_id, true) {
                        self.events.push(BattleEvent::AnimationStarted {
                            actor_id: command.actor_id,
                            clip_id,
                        });
                        self.held_result = Some(HeldResult {
                            actor_id: command.actor_id,
                            kind: command.kind,
                            result,
                        });
                        self.phase = BattlePhase::Animation;
                        return;
                    }
                }
            }
        }

        apply_result(&result, command.actor_id, &mut self.party, &mut self.enemies);
        self.emit_action_event(&command, &result);
        self.emit_defeat_events(&result);
        self.phase = BattlePhase::TurnEnd;
    }

    fn animation_clip(&self, command: &Command) -> Option<String> {
        match command.kind {
            ActionKind::Attack => Some("attack".to_string()),
            ActionKind::Skill => command
                .skill_id
                .as_deref()
                .and_then(|id| self.executor.skill(id))
                .filter(|s| !s.animation_id.is_empty())
                .map(|s| s.animation_id.clone()),
            _ => None,
        }
    }

    fn apply_held_result(&mut self) {
        let Some(held) = self.held_result.take() else {
            return;
        };
        apply_result(&held.result, held.actor_id, &mut self.party, &mut self.enemies);

        let command = Command {
            actor_id: held.actor_id,
            kind: held.kind,
            skill_id: None,
            item_id: None,
            targets: Vec::new(),
        };
        self.emit_action_event(&command, &held.result);
        self.emit_defeat_events(&held.result);
    }

    fn emit_action_event(&mut self, command: &Command, result: &ActionResult) {
        let name = find_actor(&self.party, &self.enemies, command.actor_id)
            .map(|a| a.name.clone())
            .unwrap_or_default();
        self.events.push(BattleEvent::ActionPerformed {
            actor_id: command.actor_id,
            name,
            kind: command.kind,
            damage: result.damage_dealt.clone(),
            healing: result.total_healing(),
            message: result.message.clone(),
        });
    }

    fn emit_defeat_events(&mut self, result: &ActionResult) {
        for &id in result.damage_dealt.keys() {
            if let Some(actor) = find_actor(&self.party, &self.enemies, id) {
                if !actor.is_alive() {
                    self.events.push(BattleEvent::ActorDefeated {
                        actor_id: id,
                        name: actor.name.clone(),
                    });
                }
            }
        }
    }

    fn on_turn_end(&mut self) {
        if let Some(id) = self.current_actor {
            if let Some(actor) = find_actor_mut(&mut self.party, &mut self.enemies, id) {
                actor.end_turn();
            }
        }

        self.process_status_ticks();

        if self.check_battle_end() {
            return;
        }

        self.turn_order.advance(&self.party, &self.enemies);
        self.phase = BattlePhase::TurnStart;
    }

    fn process_status_ticks(&mut self) {
        use schema::StatusType;

        let mut events = Vec::new();
        for actor in self.party.iter_mut().chain(self.enemies.iter_mut()) {
            if !actor.is_alive() {
                continue;
            }

            for (status, divisor) in [(StatusType::Poison, 10), (StatusType::Burn, 8)] {
                if actor.is_alive() && actor.has_status(status) {
                    let amount = (actor.max_hp() / divisor).max(1);
                    let damage = actor.take_status_tick(amount);
                    events.push(BattleEvent::StatusDamage {
                        actor_id: actor.entity_id,
                        name: actor.name.clone(),
                        status,
                        damage,
                        remaining_hp: actor.current_hp(),
                    });
                    if !actor.is_alive() {
                        events.push(BattleEvent::ActorDefeated {
                            actor_id: actor.entity_id,
                            name: actor.name.clone(),
                        });
                    }
                }
            }

            if actor.is_alive() && actor.has_status(StatusType::Regen) {
                let amount = actor.heal((actor.max_hp() / 10).max(1));
                events.push(BattleEvent::StatusHealed {
                    actor_id: actor.entity_id,
                    name: actor.name.clone(),
                    status: StatusType::Regen,
                    amount,
                });
            }
        }
        for event in events {
            self.events.push(event);
        }
    }

    fn tick_status_durations(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let mut events = Vec::new();
        for actor in self.party.iter_mut().chain(self.enemies.iter_mut()) {
            if !actor.is_alive() {
                continue;
            }
            for expired in actor.combat.update_effects(dt) {
                events.push(BattleEvent::StatusExpired {
                    actor_id: actor.entity_id,
                    status: expired.status_type,
                });
            }
        }
        for event in events {
            self.events.push(event);
        }
    }

    /// Victory when no enemy lives, defeat when no party member does.
    /// Victory wins when both empty out in the same tick.
    fn check_battle_end(&mut self) -> bool {
        let enemies_alive = self.enemies.iter().any(|e| e.is_alive());
        let party_alive = self.party.iter().any(|a| a.is_alive());

        if !enemies_alive {
            self.phase = BattlePhase::Victory;
            return true;
        }
        if !party_alive {
            self.phase = BattlePhase::Defeat;
            return true;
        }
        false
    }

    fn on_battle_end(&mut self) {
        let outcome = match self.phase {
            BattlePhase::Victory => BattleOutcome::Victory,
            BattlePhase::Defeat => BattleOutcome::Defeat,
            _ => BattleOutcome::Fled,
        };

        let rewards = if outcome == BattleOutcome::Victory {
            compute_victory_rewards(&mut self.party, &self.enemies, &mut self.rng)
        } else {
            BattleRewards::default()
        };

        self.events.push(BattleEvent::BattleEnded { outcome, rewards });
        self.phase = BattlePhase::Ending;
    }

    // --- Read accessors ---

    pub fn is_active(&self) -> bool {
        self.phase != BattlePhase::Inactive
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn party(&self) -> &[BattleActor] {
        &self.party
    }

    pub fn enemies(&self) -> &[BattleActor] {
        &self.enemies
    }

    pub fn current_actor(&self) -> Option<&BattleActor> {
        self.current_actor
            .and_then(|id| find_actor(&self.party, &self.enemies, id))
    }

    pub fn round(&self) -> u32 {
        self.turn_order.round()
    }

    pub fn menu_selection(&self) -> usize {
        self.menu_selection
    }

    pub fn target_selection(&self) -> usize {
        self.target_selection
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Take every pending event for rendering or logging.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.events.drain()
    }

    // Test hooks: encounters under test need to poke actor state directly.
    #[cfg(test)]
    pub(crate) fn party_mut(&mut self) -> &mut Vec<BattleActor> {
        &mut self.party
    }

    #[cfg(test)]
    pub(crate) fn enemies_mut(&mut self) -> &mut Vec<BattleActor> {
        &mut self.enemies
    }
}
