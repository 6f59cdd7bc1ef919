use std::cell::RefCell;
use std::rc::Rc;

use schema::{CharacterStats, EnemyData, ItemData, SkillData, StatusType, TargetType};

use crate::battle::actor::{ActorKind, BattleActor, PartyMemberSnapshot};
use crate::battle::ports::{AnimationPort, InputAction, InputPort, QueuedInput};
use crate::battle::state::{BattlePhase, BattleRng};
use crate::battle::system::BattleSystem;
use crate::components::{CombatStats, Experience, Health, Mana};

pub const FRAME_DT: f64 = 1.0 / 60.0;

/// A builder for party member snapshots with sane test defaults.
///
/// # Example
/// ```ignore
/// let hero = SnapshotBuilder::new(1, "Hero")
///     .with_strength(18)
///     .with_mp(12)
///     .build();
/// ```
pub struct SnapshotBuilder {
    entity_id: u32,
    name: String,
    stats: CharacterStats,
    hp: i32,
    current_hp: Option<i32>,
    mp: Option<i32>,
    current_mp: Option<i32>,
    skills: Vec<String>,
    inventory: Vec<String>,
    critical_chance: f64,
}

impl SnapshotBuilder {
    pub fn new(entity_id: u32, name: &str) -> Self {
        Self {
            entity_id,
            name: name.to_string(),
            stats: CharacterStats {
                strength: 10,
                defense: 10,
                magic: 10,
                resistance: 10,
                agility: 10,
                luck: 5,
                level: 1,
            },
            hp: 50,
            current_hp: None,
            mp: None,
            current_mp: None,
            skills: Vec::new(),
            inventory: Vec::new(),
            // Deterministic by default; tests opt in to crits.
            critical_chance: 0.0,
        }
    }

    pub fn with_strength(mut self, strength: i32) -> Self {
        self.stats.strength = strength;
        self
    }

    pub fn with_defense(mut self, defense: i32) -> Self {
        self.stats.defense = defense;
        self
    }

    pub fn with_magic(mut self, magic: i32) -> Self {
        self.stats.magic = magic;
        self
    }

    pub fn with_agility(mut self, agility: i32) -> Self {
        self.stats.agility = agility;
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_current_hp(mut self, hp: i32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_mp(mut self, mp: i32) -> Self {
        self.mp = Some(mp);
        self
    }

    pub fn with_skills(mut self, skills: &[&str]) -> Self {
        self.skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_inventory(mut self, items: &[&str]) -> Self {
        self.inventory = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> PartyMemberSnapshot {
        let mut health = Health::new(self.hp);
        if let Some(current) = self.current_hp {
            health.current = current;
        }
        let mana = self.mp.map(|max| {
            let mut mana = Mana::new(max);
            if let Some(current) = self.current_mp {
                mana.current = current;
            }
            mana
        });

        PartyMemberSnapshot {
            entity_id: self.entity_id,
            name: self.name,
            kind: ActorKind::PartyMember,
            stats: self.stats,
            health,
            mana,
            combat: CombatStats {
                critical_chance: self.critical_chance,
                ..CombatStats::default()
            },
            experience: Experience::default(),
            skills: self.skills,
            inventory: self.inventory,
            sprite_id: None,
        }
    }

    /// Build straight into a battle actor, for executor-level tests that
    /// never go through `start_battle`.
    pub fn build_actor(self) -> BattleActor {
        let snapshot = self.build();
        let mut actor = BattleActor::from_snapshot(&snapshot, 0);
        actor.combat.critical_chance = snapshot.combat.critical_chance;
        actor
    }
}

/// The standard test bestiary and move set, registered on every test system.
pub fn register_test_data(system: &mut BattleSystem) {
    system.register_enemy(EnemyData {
        id: "slime".to_string(),
        name: "Slime".to_string(),
        hp: 30,
        strength: 8,
        defense: 6,
        agility: 4,
        exp_reward: 8,
        gold_reward: 4,
        ..EnemyData::default()
    });
    system.register_enemy(EnemyData {
        id: "ogre".to_string(),
        name: "Ogre".to_string(),
        hp: 200,
        strength: 60,
        defense: 20,
        agility: 30,
        exp_reward: 50,
        gold_reward: 30,
        ..EnemyData::default()
    });

    system.register_skill(SkillData {
        id: "heal".to_string(),
        name: "Heal".to_string(),
        mp_cost: 4,
        target_type: TargetType::SingleAlly,
        power: 120,
        is_magical: true,
        healing: true,
        ..SkillData::default()
    });
    system.register_skill(SkillData {
        id: "venom_strike".to_string(),
        name: "Venom Strike".to_string(),
        mp_cost: 4,
        power: 70,
        hit_count: 2,
        status_effect: Some(StatusType::Poison),
        status_chance: 0.4,
        status_duration: 12.0,
        status_potency: 12,
        animation_id: "attack_dagger".to_string(),
        ..SkillData::default()
    });

    system.register_item(ItemData {
        id: "potion".to_string(),
        name: "Potion".to_string(),
        hp_restore: 30,
        ..ItemData::default()
    });
    system.register_item(ItemData {
        id: "phoenix_feather".to_string(),
        name: "Phoenix Feather".to_string(),
        target_type: TargetType::DeadAlly,
        revive: true,
        revive_hp_percent: 0.5,
        ..ItemData::default()
    });
}

/// A system driven by a scripted input queue.
pub fn scripted_system(inputs: Vec<InputAction>, rng: BattleRng) -> BattleSystem {
    let mut queue = QueuedInput::new();
    queue.extend(inputs);
    let mut system = BattleSystem::new(Box::new(queue), rng);
    register_test_data(&mut system);
    system
}

/// Step frames until the system reaches `phase`, panicking if it never
/// does.
pub fn run_until_phase(system: &mut BattleSystem, phase: BattlePhase, max_frames: usize) {
    for _ in 0..max_frames {
        if system.phase() == phase {
            return;
        }
        system.update(FRAME_DT);
    }
    panic!(
        "never reached {:?} within {} frames (stuck in {:?})",
        phase,
        max_frames,
        system.phase()
    );
}

/// An input port that always confirms, walking the default menu path.
pub struct AlwaysConfirm;

impl InputPort for AlwaysConfirm {
    fn poll(&mut self) -> Option<InputAction> {
        Some(InputAction::Confirm)
    }
}

/// An animation collaborator that records every `play` call and can be told
/// to refuse clips.
pub struct RecordingAnimation {
    pub accept: bool,
    pub plays: Rc<RefCell<Vec<(u32, String)>>>,
}

impl RecordingAnimation {
    pub fn new(accept: bool) -> (Self, Rc<RefCell<Vec<(u32, String)>>>) {
        let plays = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                accept,
                plays: Rc::clone(&plays),
            },
            plays,
        )
    }
}

impl AnimationPort for RecordingAnimation {
    fn play(&mut self, entity_id: u32, clip_id: &str, _restart: bool) -> bool {
        self.plays.borrow_mut().push((entity_id, clip_id.to_string()));
        self.accept
    }
}
