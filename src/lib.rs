//! JRPG Battle Engine
//!
//! A deterministic turn-based battle resolution engine: speed-ordered
//! turns, formula-driven damage with variance/crits/resistances, a
//! frame-driven battle state machine with animation-synchronized result
//! application, and reward computation. Rendering, entity storage, and
//! animation playback stay outside; they talk to the engine through
//! snapshots, ports, and events.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod components;
pub mod data;
pub mod errors;

// --- PUBLIC API RE-EXPORTS ---
// The types a host needs to set up and drive an encounter.

// --- From the `schema` crate ---
// Static data definitions and the shared enums.
pub use schema::{
    AiKind,
    CharacterStats,
    DamageType,
    EnemyData,
    ItemData,
    SkillData,
    StatusType,
    TargetType,
};

// --- From this crate's modules (`src/`) ---

// The battle controller and its state machine surface.
pub use battle::state::{BattleEvent, BattleOutcome, BattlePhase, BattleRng, EventBus};
pub use battle::system::{BattleSystem, CommandMenu};

// Actors and commands.
pub use battle::actor::{ActorKind, BattleActor, PartyMemberSnapshot, ENEMY_ID_BASE};
pub use battle::executor::{ActionExecutor, ActionKind, ActionResult, Command};
pub use battle::turn_order::TurnOrderManager;

// Collaborator boundaries.
pub use battle::ai::{DataDriven, EnemyBehavior, PreferWeakest, RandomTarget};
pub use battle::ports::{
    AnimationPort, AnimationSignal, InputAction, InputPort, QueuedInput, ATTACK_HIT_EVENT,
};

// Rewards and runtime components.
pub use battle::rewards::BattleRewards;
pub use components::{CombatStats, Experience, Health, Mana, StatusEffect};

// Data loading.
pub use data::{load_enemies, load_items, load_skills};
pub use errors::{DataError, DataResult};
