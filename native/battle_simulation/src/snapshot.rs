//! Path: native/battle_simulation/src/snapshot.rs
//! Summary: ワールドから描画用スナップショットを構築

use crate::world::{BattlePhase, BattleWorldInner};

/// 描画に必要な 1 ハザード分の情報
#[derive(Clone, Copy, Debug)]
pub struct HazardView {
    pub kind: u8,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// 引力フィールドの見かけ（中心はアリーナ中央に固定）
#[derive(Clone, Copy, Debug)]
pub struct VortexView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub intensified: bool,
}

/// tick ごとの不変スナップショット。描画側は純粋な消費者で、
/// シミュレーション状態には触れない。
#[derive(Clone, Debug)]
pub struct BattleSnapshot {
    pub frame_id: u32,
    pub phase: BattlePhase,
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub boss_hp: i32,
    pub boss_max_hp: i32,
    pub mercy_progress: u32,
    pub mercy_max: u32,
    pub items: u32,
    pub turn_count: u32,
    pub turn_indicator: &'static str,
    pub dialogue: String,
    pub can_select: bool,
    pub player_x: f32,
    pub player_y: f32,
    pub player_invulnerable: bool,
    pub hazards: Vec<HazardView>,
    pub vortex: Option<VortexView>,
}

/// `BattleWorldInner` から `BattleSnapshot` を構築する
pub fn build_snapshot(w: &BattleWorldInner) -> BattleSnapshot {
    let mut hazards = Vec::with_capacity(w.hazards.count);
    for i in 0..w.hazards.len() {
        if !w.hazards.alive[i] {
            continue;
        }
        hazards.push(HazardView {
            kind: w.hazards.kinds[i].as_u8(),
            x: w.hazards.positions_x[i],
            y: w.hazards.positions_y[i],
            w: w.hazards.widths[i],
            h: w.hazards.heights[i],
        });
    }

    let vortex = w.pattern.as_ref().and_then(|p| {
        p.vortex.map(|v| VortexView {
            x: w.arena_w / 2.0,
            y: w.arena_h / 2.0,
            radius: v.visual_radius,
            intensified: v.is_intensified(p.elapsed_ms),
        })
    });

    let turn_indicator = match w.phase {
        BattlePhase::PlayerTurn | BattlePhase::ActionResolving => "Your turn",
        BattlePhase::BossTurn => "Boss turn",
        BattlePhase::Victory => "Victory",
        BattlePhase::Defeat => "Game over",
    };

    BattleSnapshot {
        frame_id: w.frame_id,
        phase: w.phase,
        player_hp: w.player.hp,
        player_max_hp: w.params.player_max_hp,
        boss_hp: w.boss_hp,
        boss_max_hp: w.params.boss_max_hp,
        mercy_progress: w.mercy_progress,
        mercy_max: w.params.mercy_max,
        items: w.items,
        turn_count: w.turn_count,
        turn_indicator,
        dialogue: w.dialogue.clone(),
        can_select: w.can_select,
        player_x: w.player.x,
        player_y: w.player.y,
        player_invulnerable: w.player.is_invulnerable(),
        hazards,
        vortex,
    }
}
