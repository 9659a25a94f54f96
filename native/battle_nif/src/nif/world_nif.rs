//! Path: native/battle_nif/src/nif/world_nif.rs
//! Summary: ワールド作成・入力・設定注入・リスタート NIF

use super::util::lock_poisoned_err;
use battle_simulation::battle_params::BattleParams;
use battle_simulation::game_logic::systems::turn::start_boss_turn;
use battle_simulation::world::{BattleWorld, BattleWorldInner};
use rustler::types::list::ListIterator;
use rustler::{Atom, NifResult, ResourceArc, Term};
use std::sync::RwLock;

use crate::ok;

#[rustler::nif]
pub fn create_battle() -> ResourceArc<BattleWorld> {
    ResourceArc::new(BattleWorld(RwLock::new(BattleWorldInner::new(
        BattleParams::default(),
    ))))
}

/// バトル設定テーブルを外部から注入する。
/// 整合した状態から始めるため、注入と同時にリスタートする。
///
/// 引数:
/// - `totals`: `{player_max_hp, boss_max_hp, starting_items, heal_amount, mercy_max, mercy_step}`
/// - `windows`: `{invulnerability_ms, stun_ms}`（無敵 < スタンは無敵側を持ち上げて補正）
/// - `difficulty`: `{start, step, cap}`
/// - `boss_lines`: 台詞のリスト（空なら既定の台詞を維持）
#[rustler::nif]
pub fn set_battle_params(
    world: ResourceArc<BattleWorld>,
    totals: Term,
    windows: Term,
    difficulty: Term,
    boss_lines: Term,
) -> NifResult<Atom> {
    let t: (i32, i32, u32, i32, u32, u32) = totals.decode()?;
    let win: (f64, f64) = windows.decode()?;
    let diff: (f64, f64, f64) = difficulty.decode()?;
    let lines = decode_boss_lines(boss_lines)?;

    let mut w = world.0.write().map_err(|_| lock_poisoned_err())?;
    let params = BattleParams {
        player_max_hp: t.0,
        boss_max_hp:   t.1,
        starting_items: t.2,
        heal_amount:    t.3,
        mercy_max:      t.4,
        mercy_step:     t.5,
        invulnerability_ms: win.0,
        stun_ms:            win.1,
        difficulty_start: diff.0 as f32,
        difficulty_step:  diff.1 as f32,
        difficulty_cap:   diff.2 as f32,
        boss_lines: if lines.is_empty() {
            w.params.boss_lines.clone()
        } else {
            lines
        },
    }
    .normalized();
    log::debug!(
        "battle params injected: player_max_hp={} boss_max_hp={} items={}",
        params.player_max_hp,
        params.boss_max_hp,
        params.starting_items
    );
    w.params = params;
    w.reset();
    Ok(ok())
}

fn decode_boss_lines(term: Term) -> NifResult<Vec<String>> {
    let list: ListIterator = term.decode()?;
    list.map(|item| item.decode::<String>()).collect()
}

/// アリーナサイズを外部から注入する（既定は 800x600）
#[rustler::nif]
pub fn set_arena_size(world: ResourceArc<BattleWorld>, width: f64, height: f64) -> NifResult<Atom> {
    let mut w = world.0.write().map_err(|_| lock_poisoned_err())?;
    w.arena_w = width as f32;
    w.arena_h = height as f32;
    Ok(ok())
}

/// プレイヤーの要求位置を注入する。クランプ・スタン・減速の適用は tick 側。
#[rustler::nif]
pub fn set_player_position(world: ResourceArc<BattleWorld>, x: f64, y: f64) -> NifResult<Atom> {
    let mut w = world.0.write().map_err(|_| lock_poisoned_err())?;
    w.player.input_x = x as f32;
    w.player.input_y = y as f32;
    Ok(ok())
}

/// 全状態を初期構成へ戻す。生存ハザード・保留タイマーも一掃される。
#[rustler::nif]
pub fn restart_battle(world: ResourceArc<BattleWorld>) -> NifResult<Atom> {
    let mut w = world.0.write().map_err(|_| lock_poisoned_err())?;
    w.reset();
    Ok(ok())
}

/// ボスターンを明示的に開始する（開幕演出用）。
/// パターン実行中・終局後は no-op。
#[rustler::nif]
pub fn begin_boss_turn(world: ResourceArc<BattleWorld>) -> NifResult<Atom> {
    let mut w = world.0.write().map_err(|_| lock_poisoned_err())?;
    start_boss_turn(&mut w);
    Ok(ok())
}
