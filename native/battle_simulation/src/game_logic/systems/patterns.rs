//! Path: native/battle_simulation/src/game_logic/systems/patterns.rs
//! Summary: 7 種のコンボパターン構築とスポーン解決・引力フィールド適用

use super::ledger::apply_damage_to_player;
use crate::constants::BOUNDARY_MARGIN;
use crate::physics::geometry::clamp_to_arena;
use crate::physics::trajectory::apply_pull;
use crate::world::{
    ActivePattern, BattleWorldInner, HazardSpec, PatternKind, SpawnSpec, TimedSpawn, VortexField,
};

/// ターン数スケーリング: base + turn_count / k
fn scaled_count(base: u32, tc: u32, k: u32) -> u32 {
    base + tc / k
}

fn scaled_damage(base: i32, tc: u32, k: u32) -> i32 {
    base + (tc / k) as i32
}

/// パターン種別からスポーンスケジュールを構築する。
/// フェーズは全て開始時刻からの固定オフセットで、イベント駆動の遷移はない。
/// 座標の乱数は発火時に解決するため、ここでは時刻と物量だけを決める。
pub fn build_pattern(kind: PatternKind, tc: u32) -> ActivePattern {
    let mut spawns: Vec<TimedSpawn> = Vec::new();
    let mut push = |at_ms: f64, spec: SpawnSpec| spawns.push(TimedSpawn { at_ms, spec });

    let (total_ms, vortex, move_factor) = match kind {
        PatternKind::BoneStorm => {
            for i in 0..scaled_count(10, tc, 3) {
                push(i as f64 * 200.0, SpawnSpec::HorizontalBone);
            }
            for i in 0..scaled_count(8, tc, 4) {
                push(2000.0 + i as f64 * 250.0, SpawnSpec::FallingBone);
            }
            push(4000.0, SpawnSpec::CrossPattern { pairs: scaled_count(5, tc, 6) });
            (8000.0, None, 1.0)
        }
        PatternKind::SpiralFire => {
            push(
                0.0,
                SpawnSpec::SpiralRing {
                    count: scaled_count(12, tc, 2),
                    radius: 100.0 + tc as f32 * 3.0,
                    lifetime_ms: 7000.0,
                },
            );
            for i in 0..scaled_count(6, tc, 5) {
                push(3000.0 + i as f64 * 400.0, SpawnSpec::Fireball { row: i });
            }
            (7000.0, None, 1.0)
        }
        PatternKind::LightningVortex => {
            for i in 0..scaled_count(6, tc, 3) {
                push(2000.0 + i as f64 * 800.0, SpawnSpec::LightningStrike);
            }
            let vortex = VortexField {
                inner_radius: 30.0,
                outer_radius: 150.0,
                force: 0.08,
                contact_damage: 0,
                visual_radius: 100.0,
                intensify_at_ms: 5000.0,
            };
            (9000.0, Some(vortex), 1.0)
        }
        PatternKind::MeteorBomb => {
            for i in 0..scaled_count(20, tc, 3) {
                push(i as f64 * 300.0, SpawnSpec::Meteor);
            }
            for i in 0..scaled_count(3, tc, 8) {
                push(3000.0 + i as f64 * 2500.0, SpawnSpec::TimeBomb);
            }
            (8000.0, None, 1.0)
        }
        PatternKind::ShadowVortex => {
            push(
                2000.0,
                SpawnSpec::CloneRing {
                    count: scaled_count(6, tc, 4),
                    distance: 180.0,
                    around_player: true,
                    homing_ms: 3000.0,
                    damage: 10,
                },
            );
            let vortex = VortexField {
                inner_radius: 40.0,
                outer_radius: 180.0,
                force: 0.06,
                contact_damage: 0,
                visual_radius: 125.0,
                intensify_at_ms: f64::INFINITY,
            };
            (8000.0, Some(vortex), 1.0)
        }
        PatternKind::TimeVortex => {
            for i in 0..scaled_count(4, tc, 6) {
                push(2000.0 + i as f64 * 1200.0, SpawnSpec::TimeBomb);
            }
            // 引力なしの見かけだけのフィールド。実効は移動倍率 0.4。
            let vortex = VortexField {
                inner_radius: 0.0,
                outer_radius: 0.0,
                force: 0.0,
                contact_damage: 0,
                visual_radius: 110.0,
                intensify_at_ms: f64::INFINITY,
            };
            (9000.0, Some(vortex), 0.4)
        }
        PatternKind::UltimateChaos => {
            for i in 0..8u32 {
                push(1000.0 + i as f64 * 500.0, SpawnSpec::Meteor);
            }
            for i in 0..6u32 {
                push(1000.0 + i as f64 * 700.0, SpawnSpec::LightningStrike);
            }
            for i in 0..5u32 {
                push(1000.0 + i as f64 * 600.0, SpawnSpec::Fireball { row: i });
            }
            push(
                1000.0,
                SpawnSpec::CloneRing {
                    count: 8,
                    distance: 220.0,
                    around_player: false,
                    homing_ms: 4000.0,
                    damage: 8,
                },
            );
            let vortex = VortexField {
                inner_radius: 50.0,
                outer_radius: 200.0,
                force: 0.1,
                contact_damage: 5,
                visual_radius: 150.0,
                intensify_at_ms: f64::INFINITY,
            };
            (10000.0, Some(vortex), 1.0)
        }
    };

    let mut pattern = ActivePattern::new(kind, total_ms, spawns);
    pattern.vortex = vortex;
    pattern.move_factor = move_factor;
    pattern
}

/// スポーン指示を実ハザードへ解決する。
/// 座標・向きはこの時点の RNG とプレイヤー位置から決まる。
pub fn resolve_spawn(w: &mut BattleWorldInner, spec: SpawnSpec) {
    let tc = w.turn_count;
    let margin = BOUNDARY_MARGIN;
    let (arena_w, arena_h) = (w.arena_w, w.arena_h);

    match spec {
        SpawnSpec::HorizontalBone => {
            let from_left = w.rng.next_bool();
            let y = w.rng.range_f32(margin + 20.0, arena_h - margin - 20.0);
            w.hazards.spawn(HazardSpec::horizontal_bone(
                from_left,
                y,
                scaled_damage(8, tc, 5),
                arena_w,
            ));
        }
        SpawnSpec::FallingBone => {
            let x = w.rng.range_f32(margin, arena_w - margin);
            w.hazards
                .spawn(HazardSpec::falling_bone(x, scaled_damage(10, tc, 4), arena_h));
        }
        SpawnSpec::CrossPattern { pairs } => {
            let pairs = pairs.max(2);
            let damage = scaled_damage(6, tc, 6);
            for i in 0..pairs {
                let t = i as f32 / (pairs - 1) as f32;
                w.hazards
                    .spawn(HazardSpec::cross_bone(true, t * arena_w, arena_h / 2.0, damage));
                w.hazards
                    .spawn(HazardSpec::cross_bone(false, arena_w / 2.0, t * arena_h, damage));
            }
        }
        SpawnSpec::SpiralRing { count, radius, lifetime_ms } => {
            let count = count.max(1);
            let damage = scaled_damage(8, tc, 4);
            for i in 0..count {
                let phase = i as f32 * std::f32::consts::TAU / count as f32;
                w.hazards.spawn(HazardSpec::spiral_bone(
                    arena_w / 2.0,
                    arena_h / 2.0,
                    radius,
                    phase,
                    damage,
                    lifetime_ms,
                ));
            }
        }
        SpawnSpec::Fireball { row } => {
            let base_y = margin + row as f32 * 70.0;
            w.hazards
                .spawn(HazardSpec::fireball(base_y, scaled_damage(12, tc, 4), arena_w));
        }
        SpawnSpec::LightningStrike => {
            let x = w.rng.range_f32(margin, arena_w - margin);
            w.hazards
                .spawn(HazardSpec::lightning_warning(x, scaled_damage(15, tc, 3)));
        }
        SpawnSpec::Meteor => {
            let x = w.rng.range_f32(margin, arena_w - margin);
            w.hazards
                .spawn(HazardSpec::meteor(x, scaled_damage(20, tc, 3), arena_h));
        }
        SpawnSpec::TimeBomb => {
            let inset = margin + 50.0;
            let x = w.rng.range_f32(inset, arena_w - inset);
            let y = w.rng.range_f32(inset, arena_h - inset);
            // 爆発は本体ダメージ + 5 上乗せ
            w.hazards
                .spawn(HazardSpec::time_bomb(x, y, scaled_damage(35, tc, 4) + 5));
        }
        SpawnSpec::CloneRing { count, distance, around_player, homing_ms, damage } => {
            let (cx, cy) = if around_player {
                (w.player.x, w.player.y)
            } else {
                (arena_w / 2.0, arena_h / 2.0)
            };
            // 目標はスポーン時点のプレイヤー位置で固定（再照準しない）
            let (tx, ty) = (w.player.x, w.player.y);
            let count = count.max(1);
            for i in 0..count {
                let angle = i as f32 * std::f32::consts::TAU / count as f32;
                w.hazards.spawn(HazardSpec::shadow_clone(
                    cx + angle.cos() * distance,
                    cy + angle.sin() * distance,
                    tx,
                    ty,
                    homing_ms,
                    damage,
                ));
            }
        }
    }
}

/// 実行中パターンの引力フィールドをプレイヤー位置へ適用する。
/// inner 半径の内側へは引き込まず、Chaos 変種のみ inner 内で接触ダメージ。
pub fn apply_vortex(w: &mut BattleWorldInner, delta_ms: f64) {
    let Some(vortex) = w.pattern.as_ref().and_then(|p| p.vortex) else {
        return;
    };
    if !w.game_active {
        return;
    }
    let cx = w.arena_w / 2.0;
    let cy = w.arena_h / 2.0;

    let (nx, ny) = apply_pull(
        cx,
        cy,
        w.player.x,
        w.player.y,
        vortex.inner_radius,
        vortex.outer_radius,
        vortex.factor(delta_ms),
    );
    let (nx, ny) = clamp_to_arena(nx, ny, BOUNDARY_MARGIN, w.arena_w, w.arena_h);
    w.player.x = nx;
    w.player.y = ny;

    if vortex.contact_damage > 0 {
        let dx = cx - w.player.x;
        let dy = cy - w.player.y;
        if dx * dx + dy * dy <= vortex.inner_radius * vortex.inner_radius {
            apply_damage_to_player(w, vortex.contact_damage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle_params::BattleParams;
    use crate::world::HazardKind;

    fn make_world() -> BattleWorldInner {
        BattleWorldInner::new(BattleParams::default())
    }

    #[test]
    fn bone_storm_schedule_at_turn_zero() {
        let pat = build_pattern(PatternKind::BoneStorm, 0);
        assert_eq!(pat.total_ms, 8000.0);
        // 横骨 10 + 落下骨 8 + クロス 1 = 19 イベント
        assert_eq!(pat.pending.len(), 19);
        assert!(pat.vortex.is_none());
        assert_eq!(pat.move_factor, 1.0);
    }

    #[test]
    fn bone_storm_counts_scale_with_turns() {
        let pat = build_pattern(PatternKind::BoneStorm, 12);
        // 横骨 10+4、落下骨 8+3、クロス 1
        assert_eq!(pat.pending.len(), 14 + 11 + 1);
    }

    #[test]
    fn lightning_vortex_carries_pull_field() {
        let pat = build_pattern(PatternKind::LightningVortex, 0);
        let vortex = pat.vortex.expect("引力フィールドを持つべき");
        assert_eq!(vortex.inner_radius, 30.0);
        assert_eq!(vortex.outer_radius, 150.0);
        assert!(vortex.is_intensified(5000.0));
        assert!(!vortex.is_intensified(4999.0));
    }

    #[test]
    fn time_vortex_slows_movement_only() {
        let pat = build_pattern(PatternKind::TimeVortex, 0);
        assert_eq!(pat.move_factor, 0.4);
        let vortex = pat.vortex.expect("見かけのフィールドは残るべき");
        assert_eq!(vortex.force, 0.0, "Time Vortex は引力を持たないべき");
    }

    #[test]
    fn ultimate_chaos_mixes_everything() {
        let pat = build_pattern(PatternKind::UltimateChaos, 0);
        assert_eq!(pat.total_ms, 10000.0);
        // 隕石 8 + 落雷 6 + 火球 5 + クローンリング 1 = 20
        assert_eq!(pat.pending.len(), 20);
        let vortex = pat.vortex.unwrap();
        assert_eq!(vortex.contact_damage, 5);
    }

    #[test]
    fn cross_pattern_spawns_pairs() {
        let mut w = make_world();
        resolve_spawn(&mut w, SpawnSpec::CrossPattern { pairs: 5 });
        assert_eq!(w.hazards.count, 10, "pairs 組の縦横骨が湧くべき");
        let horizontals = w
            .hazards
            .kinds
            .iter()
            .filter(|&&k| k == HazardKind::CrossBoneH)
            .count();
        assert_eq!(horizontals, 5);
    }

    #[test]
    fn clone_ring_captures_player_position_once() {
        let mut w = make_world();
        w.player.x = 200.0;
        w.player.y = 150.0;
        resolve_spawn(
            &mut w,
            SpawnSpec::CloneRing {
                count: 6,
                distance: 180.0,
                around_player: true,
                homing_ms: 3000.0,
                damage: 10,
            },
        );
        assert_eq!(w.hazards.count, 6);
        for i in 0..w.hazards.len() {
            // 目標 (p2, p3) はスポーン時点のプレイヤー位置
            assert_eq!(w.hazards.params_2[i], 200.0);
            assert_eq!(w.hazards.params_3[i], 150.0);
            // 始点はプレイヤーを囲む半径 180 の円周上
            let dx = w.hazards.params_0[i] - 200.0;
            let dy = w.hazards.params_1[i] - 150.0;
            let dist = (dx * dx + dy * dy).sqrt();
            assert!((dist - 180.0).abs() < 0.01, "始点距離は 180 であるべき: {dist}");
        }
    }

    #[test]
    fn spawned_hazard_damage_scales_with_turn_count() {
        let mut w = make_world();
        resolve_spawn(&mut w, SpawnSpec::Meteor);
        assert_eq!(w.hazards.damage[0], 20, "tc=0 の隕石は基礎ダメージ");

        let mut w = make_world();
        w.turn_count = 20;
        resolve_spawn(&mut w, SpawnSpec::Meteor);
        assert_eq!(w.hazards.damage[0], 20 + 20 / 3, "tc=20 でスケールするべき");
    }

    #[test]
    fn vortex_pulls_player_toward_center() {
        let mut w = make_world();
        w.pattern = Some(build_pattern(PatternKind::LightningVortex, 0));
        w.player.x = w.arena_w / 2.0 + 100.0;
        w.player.y = w.arena_h / 2.0;

        apply_vortex(&mut w, 50.0);

        assert!(
            w.player.x < w.arena_w / 2.0 + 100.0,
            "帯域内のプレイヤーは中心へ引かれるべき: {}",
            w.player.x
        );
    }

    #[test]
    fn chaos_core_deals_contact_damage() {
        let mut w = make_world();
        w.pattern = Some(build_pattern(PatternKind::UltimateChaos, 0));
        w.player.x = w.arena_w / 2.0 + 10.0;
        w.player.y = w.arena_h / 2.0;
        let hp_before = w.player.hp;

        apply_vortex(&mut w, 100.0);

        assert_eq!(w.player.hp, hp_before - 5, "inner 内は接触ダメージ 5 を受けるべき");
    }
}
