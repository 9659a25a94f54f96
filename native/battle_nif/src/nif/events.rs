//! Path: native/battle_nif/src/nif/events.rs
//! Summary: バトルイベントの drain（ホスト側の音声/UI 用）

use super::util::lock_poisoned_err;
use battle_simulation::world::{BattleEvent, BattleWorld};
use rustler::{Atom, NifResult, ResourceArc};

/// 蓄積したイベントを `{atom, value}` のリストに変換して引き渡す。
/// ダメージ/回復量はそのまま、pattern_started はパターン番号、
/// match_ended は勝利 1 / 敗北 0。
#[rustler::nif]
pub fn drain_battle_events(world: ResourceArc<BattleWorld>) -> NifResult<Vec<(Atom, u32)>> {
    let mut w = world.0.write().map_err(|_| lock_poisoned_err())?;
    let drained = w
        .events
        .drain(..)
        .map(|e| match e {
            BattleEvent::PlayerHit { damage } => (crate::player_hit(), damage.max(0) as u32),
            BattleEvent::BossHit { damage } => (crate::boss_hit(), damage.max(0) as u32),
            BattleEvent::HealUsed { amount } => (crate::heal_used(), amount.max(0) as u32),
            BattleEvent::PatternStarted { pattern } => {
                (crate::pattern_started(), pattern.as_u8() as u32)
            }
            BattleEvent::MatchEnded { victory } => (crate::match_ended(), victory as u32),
        })
        .collect();
    Ok(drained)
}
