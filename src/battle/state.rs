use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use schema::StatusType;

use crate::battle::executor::ActionKind;
use crate::battle::rewards::BattleRewards;

/// Phase of the battle state machine.
///
/// `Inactive` is the resting state before `start_battle` and after
/// `end_battle`; `Ending` is the inert terminal phase reached once the
/// closing event has been emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    Inactive,
    Starting,
    TurnStart,
    PlayerInput,
    TargetSelect,
    Executing,
    Animation,
    TurnEnd,
    Victory,
    Defeat,
    Fled,
    Ending,
}

/// How a finished battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    // Encounter lifecycle
    BattleStarted {
        party_count: usize,
        enemy_count: usize,
    },
    BattleEnded {
        outcome: BattleOutcome,
        rewards: BattleRewards,
    },

    // Turn management
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        actor_id: u32,
        name: String,
        player_controlled: bool,
    },
    TurnSkipped {
        actor_id: u32,
        name: String,
        status: StatusType,
    },

    // Action resolution
    ActionPerformed {
        actor_id: u32,
        name: String,
        kind: ActionKind,
        damage: HashMap<u32, i32>,
        healing: HashMap<u32, i32>,
        message: String,
    },
    AnimationStarted {
        actor_id: u32,
        clip_id: String,
    },

    // Status effects
    StatusDamage {
        actor_id: u32,
        name: String,
        status: StatusType,
        damage: i32,
        remaining_hp: i32,
    },
    StatusHealed {
        actor_id: u32,
        name: String,
        status: StatusType,
        amount: i32,
    },
    StatusExpired {
        actor_id: u32,
        status: StatusType,
    },

    ActorDefeated {
        actor_id: u32,
        name: String,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable line. Returns None for
    /// events that should stay silent in a battle log.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { enemy_count, .. } => match enemy_count {
                1 => Some("An enemy draws near!".to_string()),
                _ => Some(format!("{} enemies draw near!", enemy_count)),
            },
            BattleEvent::BattleEnded { outcome, rewards } => match outcome {
                BattleOutcome::Victory => Some(format!(
                    "Victory! Gained {} EXP and {} gold.",
                    rewards.exp, rewards.gold
                )),
                BattleOutcome::Defeat => Some("The party was defeated...".to_string()),
                BattleOutcome::Fled => Some("Got away safely!".to_string()),
            },
            BattleEvent::RoundStarted { round } => Some(format!("=== Round {} ===", round)),
            BattleEvent::TurnStarted { name, .. } => Some(format!("{}'s turn!", name)),
            BattleEvent::TurnSkipped { name, status, .. } => {
                Some(format!("{} can't move ({})!", name, status))
            }
            BattleEvent::ActionPerformed { message, .. } => {
                if message.is_empty() {
                    None
                } else {
                    Some(message.clone())
                }
            }
            BattleEvent::AnimationStarted { .. } => None,
            BattleEvent::StatusDamage {
                name,
                status,
                damage,
                ..
            } => Some(format!("{} is hurt by {}! ({} damage)", name, status, damage)),
            BattleEvent::StatusHealed { name, amount, .. } => {
                Some(format!("{} recovered {} HP!", name, amount))
            }
            BattleEvent::StatusExpired { .. } => None,
            BattleEvent::ActorDefeated { name, .. } => Some(format!("{} was defeated!", name)),
        }
    }
}

/// Collects the events produced while the battle advances. The host drains
/// it once per frame and renders or logs whatever it cares about.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Take every pending event, leaving the bus empty.
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Print all formatted events, skipping silent ones.
    pub fn print_formatted(&self) {
        for event in &self.events {
            if let Some(line) = event.format() {
                println!("  {}", line);
            }
        }
    }
}

/// The single injectable randomness source for the whole engine.
///
/// Every probabilistic decision consumes a percent outcome in 1..=100, so
/// tests can script exact sequences and a seed reproduces a full battle.
#[derive(Debug, Clone)]
pub enum BattleRng {
    /// A fixed outcome script; panics (with the consuming reason) when it
    /// runs dry. Test use only.
    Scripted { outcomes: Vec<u8>, index: usize },
    /// A seeded generator for normal play and deterministic replays.
    Seeded(StdRng),
}

impl BattleRng {
    pub fn scripted(outcomes: Vec<u8>) -> Self {
        BattleRng::Scripted { outcomes, index: 0 }
    }

    pub fn from_seed(seed: u64) -> Self {
        BattleRng::Seeded(StdRng::seed_from_u64(seed))
    }

    pub fn new_random() -> Self {
        BattleRng::Seeded(StdRng::from_os_rng())
    }

    /// Next percent outcome in 1..=100. The reason names the roll so an
    /// exhausted script fails with a useful message.
    pub fn next_percent(&mut self, reason: &str) -> u8 {
        match self {
            BattleRng::Scripted { outcomes, index } => {
                let Some(&outcome) = outcomes.get(*index) else {
                    panic!(
                        "BattleRng script exhausted! Tried to roll for: '{}'. Need more outcomes.",
                        reason
                    );
                };
                *index += 1;
                outcome
            }
            BattleRng::Seeded(rng) => rng.random_range(1..=100),
        }
    }

    /// Uniform index in 0..len, derived from a percent roll so scripts stay
    /// simple. `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        (self.next_percent(reason) as usize - 1) % len
    }
}
