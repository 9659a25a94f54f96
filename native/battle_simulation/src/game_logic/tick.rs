//! Path: native/battle_simulation/src/game_logic/tick.rs
//! Summary: 論理 tick（入力適用 → 遅延遷移 → パターン進行 → 衝突解決）

use super::systems::hazards::update_hazards;
use super::systems::patterns::{apply_vortex, resolve_spawn};
use super::systems::turn::{end_boss_turn, resolve_pending};
use crate::constants::BOUNDARY_MARGIN;
use crate::physics::geometry::clamp_to_arena;
use crate::world::{BattleWorldInner, SpawnSpec};
use std::time::Instant;

/// 論理 tick の内部実装（NIF とテストの両方から呼ぶ）。
/// 描画フレームレートから独立しており、delta_ms だけ世界を進める。
/// tick 内の全衝突判定は、先に確定させた同一のプレイヤー位置を観測する。
pub fn tick_inner(w: &mut BattleWorldInner, delta_ms: f64) {
    log::trace!("tick: delta={}ms frame_id={}", delta_ms, w.frame_id);
    let t_start = Instant::now();

    w.frame_id += 1;
    w.clock_ms += delta_ms;

    // 被弾タイマーのカウントダウン
    if w.player.invulnerable_timer_ms > 0.0 {
        w.player.invulnerable_timer_ms = (w.player.invulnerable_timer_ms - delta_ms).max(0.0);
    }
    if w.player.stun_timer_ms > 0.0 {
        w.player.stun_timer_ms = (w.player.stun_timer_ms - delta_ms).max(0.0);
    }

    // 入力レイヤーの要求位置を反映する。
    // スタン中は凍結、Time Vortex 中は変位が move_factor 倍に減速する。
    if w.game_active && w.player.can_move() {
        let factor = w.pattern.as_ref().map(|p| p.move_factor).unwrap_or(1.0);
        let nx = w.player.x + (w.player.input_x - w.player.x) * factor;
        let ny = w.player.y + (w.player.input_y - w.player.y) * factor;
        let (nx, ny) = clamp_to_arena(nx, ny, BOUNDARY_MARGIN, w.arena_w, w.arena_h);
        w.player.x = nx;
        w.player.y = ny;
    }

    // ターン機械の遅延遷移
    resolve_pending(w);

    // パターン時計を進め、発火時刻を過ぎたスポーンを解決する
    let mut due: Vec<SpawnSpec> = Vec::new();
    if let Some(pattern) = w.pattern.as_mut() {
        pattern.elapsed_ms += delta_ms;
        pattern.drain_due(&mut due);
    }
    for spec in due {
        resolve_spawn(w, spec);
    }
    apply_vortex(w, delta_ms);

    // ハザード前進 → 後継スポーン → 現在位置に対する衝突
    update_hazards(w, delta_ms);

    // 総尺満了で強制クリーンアップしターンを返す
    if w.pattern.as_ref().is_some_and(|p| p.is_done()) {
        end_boss_turn(w);
    }

    w.last_tick_time_ms = t_start.elapsed().as_secs_f64() * 1000.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle_params::BattleParams;
    use crate::constants::{PLAYER_SIZE, TURN_HANDOFF_MS};
    use crate::game_logic::systems::turn::{select_action, start_boss_turn, start_boss_turn_with, MenuAction};
    use crate::physics::geometry::{boxes_overlap, Aabb};
    use crate::world::{BattlePhase, PatternKind};

    const TICK_MS: f64 = 16.0;

    fn make_world() -> BattleWorldInner {
        BattleWorldInner::new(BattleParams::default())
    }

    fn run_for(w: &mut BattleWorldInner, ms: f64) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            tick_inner(w, TICK_MS);
            elapsed += TICK_MS;
        }
    }

    /// 上端ストリップ（y=50）の退避候補から、脅威ハザードと重ならない点を選ぶ。
    /// 横薙ぎ骨は y ≥ 70 を掃くため上端ストリップには届かず、脅威は
    /// 落下骨とクロス骨のみ。pad は 1 tick 分のハザード移動量を吸収する余白。
    fn safe_spot(w: &BattleWorldInner) -> (f32, f32) {
        use crate::world::HazardKind;
        const CANDIDATES: [f32; 5] = [50.0, 200.0, 350.0, 550.0, 750.0];
        const PAD: f32 = 24.0;
        'candidate: for &x in CANDIDATES.iter() {
            let spot = Aabb::from_center(x, 50.0, PLAYER_SIZE, PLAYER_SIZE);
            for i in 0..w.hazards.len() {
                if !w.hazards.alive[i] {
                    continue;
                }
                if !matches!(
                    w.hazards.kinds[i],
                    HazardKind::BoneFalling | HazardKind::CrossBoneH | HazardKind::CrossBoneV
                ) {
                    continue;
                }
                let mut hazard_box = w.hazards.aabb(i);
                hazard_box.w += PAD * 2.0;
                hazard_box.h += PAD * 2.0;
                if boxes_overlap(&hazard_box, &spot) {
                    continue 'candidate;
                }
            }
            return (x, 50.0);
        }
        // 落下骨は上端帯に同時 3 本までしか滞在せず、候補 5 点は塞がり切らない
        (50.0, 50.0)
    }

    #[test]
    fn bone_storm_run_with_dodging_player_deals_no_damage() {
        let mut w = make_world();
        start_boss_turn_with(&mut w, PatternKind::BoneStorm);
        let hp_start = w.player.hp;
        let total_ms = w.pattern.as_ref().unwrap().total_ms;

        let mut elapsed = 0.0;
        while elapsed < total_ms {
            let (sx, sy) = safe_spot(&w);
            w.player.input_x = sx;
            w.player.input_y = sy;
            tick_inner(&mut w, TICK_MS);
            elapsed += TICK_MS;
        }

        assert_eq!(w.player.hp, hp_start, "ハザード経路を避けた周回はノーダメージであるべき");
        assert!(w.pattern.is_none(), "パターンは固定総尺で畳まれるべき");
        assert!(w.hazards.is_empty(), "パターン終了で全ハザードが消えるべき");
        assert_eq!(w.phase, BattlePhase::PlayerTurn, "手番がプレイヤーへ戻るべき");
    }

    #[test]
    fn fight_flow_damages_boss_then_starts_boss_turn() {
        let mut w = make_world();
        select_action(&mut w, MenuAction::Fight);

        run_for(&mut w, 1100.0);
        let dealt = w.params.boss_max_hp - w.boss_hp;
        assert!(
            (30..=60).contains(&dealt),
            "tc=0 の Fight ダメージは式の範囲内であるべき: {dealt}"
        );

        run_for(&mut w, TURN_HANDOFF_MS + 100.0);
        assert_eq!(w.phase, BattlePhase::BossTurn, "解決後は自動でボスターンが始まるべき");
        assert!(w.pattern.is_some());
    }

    #[test]
    fn full_boss_turn_returns_control_and_reenables_selection() {
        let mut w = make_world();
        start_boss_turn_with(&mut w, PatternKind::SpiralFire);
        // 周回中は引力もスポーンも受けつつ、中央を避けて待つ
        w.player.input_x = 60.0;
        w.player.input_y = 60.0;

        run_for(&mut w, 7000.0 + 600.0);

        assert_eq!(w.phase, BattlePhase::PlayerTurn);
        assert!(w.can_select, "短い遅延の後に選択が再有効化されるべき");
    }

    #[test]
    fn time_vortex_slows_player_movement() {
        let mut w = make_world();
        start_boss_turn_with(&mut w, PatternKind::TimeVortex);
        w.player.x = 100.0;
        w.player.y = 300.0;
        w.player.input_x = 200.0;
        w.player.input_y = 300.0;

        tick_inner(&mut w, TICK_MS);

        // 変位 100px のうち 0.4 倍しか進まない
        assert!(
            (w.player.x - 140.0).abs() < 0.01,
            "Time Vortex 中の移動は 0.4 倍であるべき: {}",
            w.player.x
        );
    }

    #[test]
    fn stunned_player_ignores_input() {
        let mut w = make_world();
        w.player.stun_timer_ms = 500.0;
        let x_before = w.player.x;
        w.player.input_x = 700.0;

        tick_inner(&mut w, TICK_MS);
        assert_eq!(w.player.x, x_before, "スタン中は入力を無視するべき");

        // スタン解除後は追従する
        run_for(&mut w, 600.0);
        assert_eq!(w.player.x, 700.0);
    }

    #[test]
    fn player_position_is_always_clamped() {
        let mut w = make_world();
        w.player.input_x = -50.0;
        w.player.input_y = 10000.0;
        tick_inner(&mut w, TICK_MS);
        assert_eq!((w.player.x, w.player.y), (50.0, 550.0));
    }

    #[test]
    fn invulnerability_window_expires() {
        let mut w = make_world();
        crate::game_logic::systems::ledger::apply_damage_to_player(&mut w, 10);
        assert!(w.player.is_invulnerable());

        let dur = w.params.invulnerability_ms + 100.0;
        run_for(&mut w, dur);
        assert!(!w.player.is_invulnerable(), "無敵窓は時間経過で解除されるべき");
        assert!(w.player.can_move());
    }

    #[test]
    fn restart_mid_pattern_resets_everything() {
        let mut w = make_world();
        select_action(&mut w, MenuAction::Fight);
        run_for(&mut w, 2500.0);
        assert_eq!(w.phase, BattlePhase::BossTurn);
        run_for(&mut w, 1500.0);

        w.reset();

        assert_eq!(w.player.hp, w.params.player_max_hp);
        assert_eq!(w.boss_hp, w.params.boss_max_hp);
        assert_eq!(w.turn_count, 0);
        assert!(w.hazards.is_empty(), "リスタート後に生存ハザードは残らないべき");
        assert!(w.pending.is_empty());
        assert!(w.pattern.is_none());

        // リスタート後は次のボスターンが新しいパターン抽選で始まる
        start_boss_turn(&mut w);
        assert_eq!(w.turn_count, 1);
        assert!(w.pattern.is_some());

        // tick がそのまま回り続けること
        run_for(&mut w, 500.0);
        assert!(w.game_active);
    }

    #[test]
    fn defeat_mid_pattern_gates_damage_but_pattern_concludes() {
        let mut w = make_world();
        start_boss_turn_with(&mut w, PatternKind::UltimateChaos);
        w.player.hp = 1;
        // 中心へ置いて接触ダメージで敗北させる
        w.player.x = w.arena_w / 2.0;
        w.player.y = w.arena_h / 2.0;
        w.player.input_x = w.player.x;
        w.player.input_y = w.player.y;

        run_for(&mut w, 500.0);
        assert_eq!(w.phase, BattlePhase::Defeat);
        assert_eq!(w.player.hp, 0);

        // 残りのフェーズは各自のタイマーで発火し続けるが HP は動かない
        run_for(&mut w, 10_000.0);
        assert_eq!(w.player.hp, 0);
        assert_eq!(w.phase, BattlePhase::Defeat, "終局フェーズは維持されるべき");
        assert!(w.pattern.is_none(), "パターンは総尺で強制クリーンアップされるべき");
        assert!(w.hazards.is_empty());
    }

    #[test]
    fn hp_bounds_hold_through_chaotic_run() {
        let mut w = make_world();
        // 中央に立ち尽くして全パターンを順に浴びる
        for kind in PatternKind::ALL {
            w.player.input_x = w.arena_w / 2.0;
            w.player.input_y = w.arena_h / 2.0;
            start_boss_turn_with(&mut w, kind);
            let total = w.pattern.as_ref().map(|p| p.total_ms).unwrap_or(0.0);
            let mut elapsed = 0.0;
            while elapsed < total + 200.0 {
                tick_inner(&mut w, TICK_MS);
                elapsed += TICK_MS;
                assert!(
                    (0..=w.params.player_max_hp).contains(&w.player.hp),
                    "プレイヤー HP は常に [0, max] であるべき: {}",
                    w.player.hp
                );
                assert!((0..=w.params.boss_max_hp).contains(&w.boss_hp));
            }
            if !w.game_active {
                break;
            }
        }
    }
}
