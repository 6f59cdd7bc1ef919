use pretty_assertions::assert_eq;

use crate::battle::ports::InputAction::{Cancel, Confirm, MenuDown};
use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase, BattleRng};
use crate::battle::system::BattleSystem;
use crate::battle::tests::common::{
    register_test_data, run_until_phase, scripted_system, AlwaysConfirm, SnapshotBuilder,
    FRAME_DT,
};

fn confirm_system(rng: BattleRng) -> BattleSystem {
    let mut system = BattleSystem::new(Box::new(AlwaysConfirm), rng);
    register_test_data(&mut system);
    system
}

fn ended_with(system: &BattleSystem) -> Option<BattleOutcome> {
    system.events().events().iter().find_map(|e| match e {
        BattleEvent::BattleEnded { outcome, .. } => Some(*outcome),
        _ => None,
    })
}

#[test]
fn empty_party_is_rejected_before_any_mutation() {
    let mut system = scripted_system(vec![], BattleRng::from_seed(1));

    assert!(!system.start_battle(&[], &["slime"], true));
    assert_eq!(system.phase(), BattlePhase::Inactive);
    assert!(!system.is_active());
    assert!(system.party().is_empty());
    assert!(system.events().is_empty());
}

#[test]
fn unknown_enemy_types_leave_the_enemy_side_empty_and_reject() {
    let mut system = scripted_system(vec![], BattleRng::from_seed(1));
    let party = vec![SnapshotBuilder::new(1, "Hero").build()];

    assert!(!system.start_battle(&party, &["dragon_god"], true));
    assert_eq!(system.phase(), BattlePhase::Inactive);
}

#[test]
fn a_second_start_while_active_is_rejected() {
    let mut system = confirm_system(BattleRng::from_seed(1));
    let party = vec![SnapshotBuilder::new(1, "Hero").build()];

    assert!(system.start_battle(&party, &["slime"], true));
    assert!(!system.start_battle(&party, &["slime"], true));
}

#[test]
fn overwhelming_party_reaches_victory_and_collects_rewards() {
    let mut system = confirm_system(BattleRng::from_seed(3));
    let party = vec![SnapshotBuilder::new(1, "Hero")
        .with_strength(100)
        .with_agility(50)
        .with_hp(80)
        .build()];

    assert!(system.start_battle(&party, &["slime"], true));
    run_until_phase(&mut system, BattlePhase::Ending, 200);

    assert_eq!(ended_with(&system), Some(BattleOutcome::Victory));
    assert!(system.enemies().iter().all(|e| !e.is_alive()));

    let rewards = system
        .events()
        .events()
        .iter()
        .find_map(|e| match e {
            BattleEvent::BattleEnded { rewards, .. } => Some(rewards.clone()),
            _ => None,
        })
        .expect("battle ended");
    assert_eq!(rewards.exp, 8);
    assert_eq!(rewards.gold, 4);
    assert_eq!(system.party()[0].experience.unwrap().total, 8);

    system.end_battle();
    assert!(!system.is_active());
    assert!(system.party().is_empty());
}

#[test]
fn a_wiped_party_reaches_defeat_with_no_rewards() {
    let mut system = confirm_system(BattleRng::from_seed(3));
    // One fragile member against an ogre that always moves first and whose
    // minimum damage exceeds 1 HP.
    let party = vec![SnapshotBuilder::new(1, "Doomed").with_hp(1).build()];

    assert!(system.start_battle(&party, &["ogre"], true));
    run_until_phase(&mut system, BattlePhase::Ending, 50);

    assert_eq!(ended_with(&system), Some(BattleOutcome::Defeat));
    let rewards = system
        .events()
        .events()
        .iter()
        .find_map(|e| match e {
            BattleEvent::BattleEnded { rewards, .. } => Some(rewards.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(rewards.exp, 0);
    assert!(rewards.levels_gained.is_empty());
}

#[test]
fn a_successful_flee_short_circuits_to_fled() {
    // Down four times to Flee, confirm; the single scripted roll passes.
    let inputs = vec![MenuDown, MenuDown, MenuDown, MenuDown, Confirm];
    let mut system = scripted_system(inputs, BattleRng::scripted(vec![1]));
    let party = vec![SnapshotBuilder::new(1, "Hero").build()];

    assert!(system.start_battle(&party, &["slime"], true));
    run_until_phase(&mut system, BattlePhase::Ending, 50);

    assert_eq!(ended_with(&system), Some(BattleOutcome::Fled));
    // Nobody took damage on the way out.
    assert_eq!(system.party()[0].current_hp(), system.party()[0].max_hp());
}

#[test]
fn a_failed_flee_consumes_the_turn() {
    let inputs = vec![MenuDown, MenuDown, MenuDown, MenuDown, Confirm];
    // Flee roll fails; the slime then picks a target and attacks.
    let rolls = vec![100, 1, 50, 100, 50];
    let mut system = scripted_system(inputs, BattleRng::scripted(rolls));
    let party = vec![SnapshotBuilder::new(1, "Hero").with_hp(60).build()];

    assert!(system.start_battle(&party, &["slime"], true));
    for _ in 0..30 {
        system.update(FRAME_DT);
    }

    assert_eq!(system.phase(), BattlePhase::PlayerInput);
    assert!(system.party()[0].current_hp() < 60);
    assert!(system.is_active());
}

#[test]
fn flee_is_ignored_when_the_encounter_forbids_it() {
    let inputs = vec![MenuDown, MenuDown, MenuDown, MenuDown, Confirm];
    let mut system = scripted_system(inputs, BattleRng::scripted(vec![]));
    let party = vec![SnapshotBuilder::new(1, "Hero").build()];

    assert!(system.start_battle(&party, &["slime"], false));
    for _ in 0..30 {
        system.update(FRAME_DT);
    }

    // Still waiting for a usable command.
    assert_eq!(system.phase(), BattlePhase::PlayerInput);
}

#[test]
fn cancel_in_target_select_returns_to_the_menu_without_mutation() {
    let inputs = vec![Confirm, Cancel];
    let mut system = scripted_system(inputs, BattleRng::scripted(vec![]));
    let party = vec![SnapshotBuilder::new(1, "Hero").build()];

    assert!(system.start_battle(&party, &["slime"], true));
    for _ in 0..20 {
        system.update(FRAME_DT);
    }

    assert_eq!(system.phase(), BattlePhase::PlayerInput);
    assert_eq!(system.enemies()[0].current_hp(), system.enemies()[0].max_hp());
}

#[test]
fn an_empty_target_list_falls_back_to_player_input() {
    // Item menu -> phoenix feather targets dead allies; nobody is dead.
    let inputs = vec![MenuDown, MenuDown, Confirm, Confirm];
    let mut system = scripted_system(inputs, BattleRng::scripted(vec![]));
    let party = vec![SnapshotBuilder::new(1, "Hero")
        .with_inventory(&["phoenix_feather"])
        .build()];

    assert!(system.start_battle(&party, &["slime"], true));
    for _ in 0..20 {
        system.update(FRAME_DT);
    }

    assert_eq!(system.phase(), BattlePhase::PlayerInput);
}

#[test]
fn defend_halves_damage_until_the_defenders_next_turn() {
    // Hero defends; the slime's attack that follows is halved.
    let inputs = vec![MenuDown, MenuDown, MenuDown, Confirm];
    // Slime turn: target pick, variance (mid), no crit, hit.
    let rolls = vec![1, 50, 100, 50];
    let mut system = scripted_system(inputs, BattleRng::scripted(rolls));
    let party = vec![SnapshotBuilder::new(1, "Hero").with_hp(60).build()];

    assert!(system.start_battle(&party, &["slime"], true));
    run_until_phase(&mut system, BattlePhase::Executing, 20);
    system.update(FRAME_DT); // defend resolves
    assert!(system.party()[0].is_defending);

    // Let the slime's attack land.
    for _ in 0..10 {
        system.update(FRAME_DT);
    }
    // Slime attack 10 vs defense 11: base damage 5, halved to 2 while
    // defending (variance cannot move it past the halving).
    let taken = 60 - system.party()[0].current_hp();
    assert_eq!(taken, 2);

    // Back on the hero's turn the stance has been dropped.
    assert_eq!(system.phase(), BattlePhase::PlayerInput);
    assert!(!system.party()[0].is_defending);
}
