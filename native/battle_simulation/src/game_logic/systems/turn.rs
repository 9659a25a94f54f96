//! Path: native/battle_simulation/src/game_logic/systems/turn.rs
//! Summary: ターン状態機械（メニューアクション・遅延遷移・ボスターン開始/終了）

use super::ledger::{apply_damage_to_boss, heal_player, trigger_victory};
use super::patterns::build_pattern;
use crate::constants::{
    ACT_EXPOSE_MS, ACT_HANDOFF_MS, FIGHT_RESOLVE_MS, MERCY_FAIL_MS, MERCY_VICTORY_MS,
    SELECT_REENABLE_MS, TURN_HANDOFF_MS,
};
use crate::world::{
    BattleEvent, BattlePhase, BattleWorldInner, PatternKind, PendingAction, PendingEvent,
};

/// プレイヤーが選べる 4 アクション
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Fight,
    Act,
    Item,
    Mercy,
}

/// Act 選択時にランダムで出る台詞
const ACT_LINES: [&str; 4] = [
    "* You try to talk to the boss...",
    "* You tell a joke...",
    "* You try to make friends...",
    "* You show compassion...",
];

/// メニューアクションの受理。
/// プレイヤーターン外・選択ロック中は状態を変えず黙って無視する。
pub fn select_action(w: &mut BattleWorldInner, action: MenuAction) {
    if !w.game_active || !w.is_player_turn() || !w.can_select {
        log::debug!("menu action {:?} ignored (phase={:?})", action, w.phase);
        return;
    }
    w.can_select = false;

    match action {
        MenuAction::Fight => {
            w.phase = BattlePhase::ActionResolving;
            w.dialogue = String::from("* You ready your attack!");
            w.schedule(FIGHT_RESOLVE_MS, PendingAction::ResolveFight);
        }
        MenuAction::Act => {
            w.phase = BattlePhase::ActionResolving;
            let line = ACT_LINES[w.rng.range_u32(ACT_LINES.len() as u32) as usize];
            w.dialogue = String::from(line);
            w.mercy_progress += w.params.mercy_step;
            if w.mercy_progress >= w.params.mercy_max {
                w.schedule(ACT_EXPOSE_MS, PendingAction::ExposeBoss);
            }
            w.schedule(ACT_HANDOFF_MS, PendingAction::StartBossTurn);
        }
        MenuAction::Item => {
            if w.items > 0 {
                w.items -= 1;
                let amount = w.params.heal_amount;
                heal_player(w, amount);
                w.dialogue = format!("* You used a healing item! Recovered {amount} HP.");
                w.phase = BattlePhase::ActionResolving;
                w.schedule(TURN_HANDOFF_MS, PendingAction::StartBossTurn);
            } else {
                // ターン消費なしで選択をやり直させる
                w.dialogue = String::from("* You have no items left!");
                w.can_select = true;
            }
        }
        MenuAction::Mercy => {
            w.phase = BattlePhase::ActionResolving;
            if w.mercy_progress >= w.params.mercy_max && w.boss_hp == 1 {
                w.dialogue = String::from("* You offer mercy... The boss accepts it!");
                w.schedule(MERCY_VICTORY_MS, PendingAction::MercyVictory);
            } else {
                w.dialogue = String::from("* The boss refuses to make peace! Not yet!");
                w.schedule(MERCY_FAIL_MS, PendingAction::StartBossTurn);
            }
        }
    }
}

/// 発火時刻を過ぎた遅延遷移を時刻順に実行する
pub fn resolve_pending(w: &mut BattleWorldInner) {
    if w.pending.is_empty() {
        return;
    }
    let now = w.clock_ms;
    let mut due: Vec<PendingEvent> = Vec::new();
    w.pending.retain(|e| {
        if e.at_ms <= now {
            due.push(*e);
            false
        } else {
            true
        }
    });
    due.sort_by(|a, b| a.at_ms.partial_cmp(&b.at_ms).unwrap_or(std::cmp::Ordering::Equal));

    for event in due {
        // 終局後に残った遷移は意味を持たない
        if !w.game_active {
            break;
        }
        fire(w, event.action);
    }
}

fn fire(w: &mut BattleWorldInner, action: PendingAction) {
    match action {
        PendingAction::ResolveFight => {
            let base = 30 + w.rng.range_u32(31) as i32;
            let damage = (base as f32 * (1.0 + w.turn_count as f32 * 0.05)).floor() as i32;
            apply_damage_to_boss(w, damage);
            if w.boss_hp <= 0 {
                trigger_victory(w);
            } else {
                w.dialogue = format!("* You dealt {damage} damage!");
                w.schedule(TURN_HANDOFF_MS, PendingAction::StartBossTurn);
            }
        }
        PendingAction::ExposeBoss => {
            // 慈悲ルートの台本: ボスは HP 1 の「露出」状態になる
            w.boss_hp = 1;
            w.dialogue = String::from("* The boss becomes vulnerable! Its defense weakens!");
        }
        PendingAction::StartBossTurn => start_boss_turn(w),
        PendingAction::MercyVictory => trigger_victory(w),
        PendingAction::EnableSelection => w.can_select = true,
    }
}

/// ボスターン開始（パターンは 7 択から一様抽選、重複回避はしない）
pub fn start_boss_turn(w: &mut BattleWorldInner) {
    let kind = PatternKind::ALL[w.rng.range_u32(PatternKind::ALL.len() as u32) as usize];
    start_boss_turn_with(w, kind);
}

/// 指定パターンでボスターンを開始する（ホストの演出・テスト用）
pub fn start_boss_turn_with(w: &mut BattleWorldInner, kind: PatternKind) {
    if !w.game_active || w.pattern.is_some() {
        return;
    }
    w.turn_count += 1;
    w.phase = BattlePhase::BossTurn;
    w.can_select = false;

    if !w.params.boss_lines.is_empty() {
        w.dialogue_index = (w.dialogue_index + 1) % w.params.boss_lines.len();
        w.dialogue = w.params.boss_lines[w.dialogue_index].clone();
    }

    w.events.push(BattleEvent::PatternStarted { pattern: kind });
    w.pattern = Some(build_pattern(kind, w.turn_count));
    log::debug!("boss turn #{}: {}", w.turn_count, kind.name());
}

/// パターン総尺満了時のターン返却。
/// ハザードと周辺フィールドを一掃し、難度を頭打ち付きで引き上げる。
pub fn end_boss_turn(w: &mut BattleWorldInner) {
    w.hazards.clear();
    w.pattern = None;
    if !w.game_active {
        return;
    }
    w.phase = BattlePhase::PlayerTurn;
    w.difficulty = (w.difficulty + w.params.difficulty_step).min(w.params.difficulty_cap);
    w.dialogue = String::from("* What will you do?");
    w.schedule(SELECT_REENABLE_MS, PendingAction::EnableSelection);
    log::debug!("boss turn over, difficulty={}", w.difficulty);
}
