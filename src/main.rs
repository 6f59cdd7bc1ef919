//! Headless demo battle: loads the shipped data set, pits a two-member
//! party against a scripted encounter, and prints the battle log.

use std::path::Path;
use std::process;

use jrpg_battle::{
    load_enemies, load_items, load_skills, ActorKind, BattlePhase, BattleRng, BattleSystem,
    CharacterStats, CombatStats, DataResult, Experience, Health, InputAction, InputPort, Mana,
    PartyMemberSnapshot,
};

/// Confirms every menu the engine opens, which walks the default cursor
/// path: Attack, then the first live enemy.
struct AlwaysConfirm;

impl InputPort for AlwaysConfirm {
    fn poll(&mut self) -> Option<InputAction> {
        Some(InputAction::Confirm)
    }
}

fn build_party() -> Vec<PartyMemberSnapshot> {
    let hero = PartyMemberSnapshot {
        entity_id: 1,
        name: "Rowan".to_string(),
        kind: ActorKind::Player,
        stats: CharacterStats {
            strength: 14,
            defense: 11,
            magic: 6,
            resistance: 8,
            agility: 12,
            luck: 6,
            level: 3,
        },
        health: Health::new(64),
        mana: Some(Mana::new(10)),
        combat: CombatStats::default(),
        experience: Experience::default(),
        skills: vec!["power_strike".to_string()],
        inventory: vec!["potion".to_string()],
        sprite_id: Some("hero_idle".to_string()),
    };

    let mage = PartyMemberSnapshot {
        entity_id: 2,
        name: "Liselle".to_string(),
        kind: ActorKind::PartyMember,
        stats: CharacterStats {
            strength: 7,
            defense: 8,
            magic: 16,
            resistance: 13,
            agility: 10,
            luck: 7,
            level: 3,
        },
        health: Health::new(48),
        mana: Some(Mana::new(26)),
        combat: CombatStats::default(),
        experience: Experience::default(),
        skills: vec!["fireball".to_string(), "heal".to_string()],
        inventory: vec!["potion".to_string(), "ether".to_string()],
        sprite_id: Some("mage_idle".to_string()),
    };

    vec![hero, mage]
}

fn load_data(system: &mut BattleSystem, data_path: &Path) -> DataResult<()> {
    for enemy in load_enemies(data_path)? {
        system.register_enemy(enemy);
    }
    for skill in load_skills(data_path)? {
        system.register_skill(skill);
    }
    for item in load_items(data_path)? {
        system.register_item(item);
    }
    Ok(())
}

fn main() {
    let data_path = Path::new("data");
    let mut system = BattleSystem::new(Box::new(AlwaysConfirm), BattleRng::from_seed(7));

    if let Err(err) = load_data(&mut system, data_path) {
        eprintln!("Failed to load battle data: {}", err);
        process::exit(1);
    }

    let party = build_party();
    if !system.start_battle(&party, &["slime", "goblin"], true) {
        eprintln!("Could not start the battle");
        process::exit(1);
    }

    // 60 FPS frames, capped well past any plausible battle length.
    let dt = 1.0 / 60.0;
    for _ in 0..100_000 {
        system.update(dt);
        for event in system.drain_events() {
            if let Some(line) = event.format() {
                println!("{}", line);
            }
        }
        if system.phase() == BattlePhase::Ending {
            break;
        }
    }

    system.end_battle();
}
