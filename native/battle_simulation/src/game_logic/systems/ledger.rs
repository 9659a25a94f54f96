//! Path: native/battle_simulation/src/game_logic/systems/ledger.rs
//! Summary: ダメージ/回復台帳（HP クランプ・無敵/スタン窓・終局シグナル）

use crate::world::{BattleEvent, BattlePhase, BattleWorldInner};

/// プレイヤーへのダメージ適用。
/// 無敵中・終局後は no-op で false を返す（呼び出し側は自壊判定に使う）。
/// 適用時は無敵とスタンの両タイマーを張り直す。
pub fn apply_damage_to_player(w: &mut BattleWorldInner, amount: i32) -> bool {
    if !w.game_active || w.player.is_invulnerable() {
        return false;
    }
    w.player.hp = (w.player.hp - amount).max(0);
    w.player.invulnerable_timer_ms = w.params.invulnerability_ms;
    w.player.stun_timer_ms = w.params.stun_ms;
    w.events.push(BattleEvent::PlayerHit { damage: amount });

    // ダメージ適用の直後に敗北判定。進行中パターンの残りフェーズは
    // 各自のタイマーで発火し続けるが、game_active が以後の適用を遮断する。
    if w.player.hp <= 0 {
        trigger_defeat(w);
    }
    true
}

/// ボスへのダメージ適用（下限 0 でクランプ）。勝利判定は呼び出し側が行う。
pub fn apply_damage_to_boss(w: &mut BattleWorldInner, amount: i32) {
    if !w.game_active {
        return;
    }
    w.boss_hp = (w.boss_hp - amount).max(0);
    w.events.push(BattleEvent::BossHit { damage: amount });
}

/// 回復。最大 HP でクランプする。
pub fn heal_player(w: &mut BattleWorldInner, amount: i32) {
    if !w.game_active {
        return;
    }
    w.player.hp = (w.player.hp + amount).min(w.params.player_max_hp);
    w.events.push(BattleEvent::HealUsed { amount });
}

pub fn trigger_victory(w: &mut BattleWorldInner) {
    if !w.game_active {
        return;
    }
    w.game_active = false;
    w.can_select = false;
    w.phase = BattlePhase::Victory;
    w.events.push(BattleEvent::MatchEnded { victory: true });
    log::debug!("battle ended: victory (turn_count={})", w.turn_count);
}

pub fn trigger_defeat(w: &mut BattleWorldInner) {
    if !w.game_active {
        return;
    }
    w.game_active = false;
    w.can_select = false;
    w.phase = BattlePhase::Defeat;
    w.events.push(BattleEvent::MatchEnded { victory: false });
    log::debug!("battle ended: defeat (turn_count={})", w.turn_count);
}
