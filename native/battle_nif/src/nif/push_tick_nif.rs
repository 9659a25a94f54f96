//! Path: native/battle_nif/src/nif/push_tick_nif.rs
//! Summary: Push 型同期 NIF（push_tick）

use super::util::lock_poisoned_err;
use battle_simulation::game_logic::tick_inner;
use battle_simulation::world::BattleWorld;
use rustler::{Atom, NifResult, ResourceArc};

use crate::ok;

/// ホストから入力位置を受け取り、delta_ms ぶん世界を進めて要約を返す。
///
/// x/y: プレイヤーの要求位置（アリーナ座標）
/// delta_ms: tick 間隔（ms）
/// returns: `{:ok, frame_id, {player_x, player_y}, {player_hp, boss_hp}, hazard_count, tick_ms}`
#[rustler::nif(schedule = "DirtyCpu")]
pub fn push_tick(
    world: ResourceArc<BattleWorld>,
    x: f64,
    y: f64,
    delta_ms: f64,
) -> NifResult<(Atom, u32, (f64, f64), (i32, i32), u32, f64)> {
    let mut w = world.0.write().map_err(|_| lock_poisoned_err())?;

    w.player.input_x = x as f32;
    w.player.input_y = y as f32;

    tick_inner(&mut w, delta_ms);

    Ok((
        ok(),
        w.frame_id,
        (w.player.x as f64, w.player.y as f64),
        (w.player.hp, w.boss_hp),
        w.hazards.count as u32,
        w.last_tick_time_ms,
    ))
}
