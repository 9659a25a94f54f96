//! Path: native/battle_nif/src/nif/snapshot_nif.rs
//! Summary: 描画用スナップショットのターム変換

use super::util::lock_poisoned_err;
use battle_simulation::snapshot::build_snapshot;
use battle_simulation::world::{BattlePhase, BattleWorld};
use rustler::{Atom, NifResult, ResourceArc};

use crate::{action_resolving, boss_turn, defeat, player_turn, victory};

type SnapshotTerm = (
    (u32, Atom),
    (i32, i32, i32, i32),
    (u32, u32, u32, u32),
    (String, String, bool),
    (f64, f64, bool),
    Vec<(u32, f64, f64, f64, f64)>,
    Option<(f64, f64, f64, bool)>,
);

fn phase_atom(phase: BattlePhase) -> Atom {
    match phase {
        BattlePhase::PlayerTurn => player_turn(),
        BattlePhase::ActionResolving => action_resolving(),
        BattlePhase::BossTurn => boss_turn(),
        BattlePhase::Victory => victory(),
        BattlePhase::Defeat => defeat(),
    }
}

/// tick ごとの不変スナップショットを返す。
/// returns:
/// `{{frame_id, phase}, {player_hp, player_max, boss_hp, boss_max},
///   {mercy, mercy_max, items, turn_count}, {dialogue, indicator, can_select},
///   {player_x, player_y, invulnerable}, hazards, vortex_or_nil}`
/// hazards は `{kind, x, y, w, h}` のリスト。
#[rustler::nif]
pub fn get_snapshot(world: ResourceArc<BattleWorld>) -> NifResult<SnapshotTerm> {
    let w = world.0.read().map_err(|_| lock_poisoned_err())?;
    let snap = build_snapshot(&w);

    let hazards = snap
        .hazards
        .iter()
        .map(|h| (h.kind as u32, h.x as f64, h.y as f64, h.w as f64, h.h as f64))
        .collect();

    let vortex = snap
        .vortex
        .map(|v| (v.x as f64, v.y as f64, v.radius as f64, v.intensified));

    Ok((
        (snap.frame_id, phase_atom(snap.phase)),
        (
            snap.player_hp,
            snap.player_max_hp,
            snap.boss_hp,
            snap.boss_max_hp,
        ),
        (
            snap.mercy_progress,
            snap.mercy_max,
            snap.items,
            snap.turn_count,
        ),
        (
            snap.dialogue,
            snap.turn_indicator.to_string(),
            snap.can_select,
        ),
        (
            snap.player_x as f64,
            snap.player_y as f64,
            snap.player_invulnerable,
        ),
        hazards,
        vortex,
    ))
}
