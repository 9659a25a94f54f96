//! Path: native/battle_simulation/src/world/mod.rs
//! Summary: ワールド状態モジュール（データのみ、ロジックは game_logic 側）

mod battle_event;
mod battle_world;
mod hazard;
mod pattern;
mod player;

pub use battle_event::BattleEvent;
pub use battle_world::{BattlePhase, BattleWorld, BattleWorldInner, PendingAction, PendingEvent};
pub use hazard::{HazardExpiry, HazardKind, HazardSpec, HazardWorld};
pub use pattern::{ActivePattern, PatternKind, SpawnSpec, TimedSpawn, VortexField};
pub use player::PlayerState;
