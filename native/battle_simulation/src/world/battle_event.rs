//! Path: native/battle_simulation/src/world/battle_event.rs
//! Summary: tick 内で発生したバトルイベント（ホスト側の音声/UI 用に毎 tick drain される）

use super::pattern::PatternKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleEvent {
    PlayerHit { damage: i32 },
    BossHit { damage: i32 },
    HealUsed { amount: i32 },
    /// ボスターン開始時に選ばれたパターン
    PatternStarted { pattern: PatternKind },
    MatchEnded { victory: bool },
}
