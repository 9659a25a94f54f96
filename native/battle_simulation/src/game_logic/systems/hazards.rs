//! Path: native/battle_simulation/src/game_logic/systems/hazards.rs
//! Summary: ハザード前進・後継スポーン・対プレイヤー衝突解決

use super::ledger::apply_damage_to_player;
use crate::constants::{CROSS_PULSE_MS, EXPLOSION_RADIUS, PLAYER_RADIUS, PLAYER_SIZE};
use crate::physics::geometry::{boxes_overlap, Aabb};
use crate::world::{BattleWorldInner, HazardExpiry, HazardKind, HazardSpec};

/// ハザードの時間を進め、寿命切れの後継（爆発・落雷）を湧かせたうえで
/// 現在のプレイヤー位置に対する衝突を解決する。
/// 同一 tick 内の全判定は更新済みの同じプレイヤー位置を観測する。
pub fn update_hazards(w: &mut BattleWorldInner, delta_ms: f64) {
    let mut expiries: Vec<HazardExpiry> = Vec::new();
    w.hazards.advance(delta_ms, &mut expiries);

    for expiry in expiries {
        match expiry {
            HazardExpiry::Explode { x, y, damage } => {
                w.hazards.spawn(HazardSpec::explosion(x, y, damage));
            }
            HazardExpiry::Strike { x, damage } => {
                w.hazards
                    .spawn(HazardSpec::lightning_bolt(x, damage, w.arena_h));
            }
        }
    }

    resolve_player_collisions(w);
}

fn resolve_player_collisions(w: &mut BattleWorldInner) {
    if !w.game_active {
        return;
    }
    let player_box = Aabb::from_center(w.player.x, w.player.y, PLAYER_SIZE, PLAYER_SIZE);

    let len = w.hazards.len();
    for i in 0..len {
        if !w.hazards.alive[i] {
            continue;
        }
        let kind = w.hazards.kinds[i];
        if kind.is_harmless() {
            continue;
        }
        let damage = w.hazards.damage[i];

        match kind {
            HazardKind::Explosion => {
                // 半径判定。最初の 1 ヒットで打ち止め（生存はしたまま）。
                if w.hazards.has_hit[i] {
                    continue;
                }
                let dx = w.hazards.positions_x[i] - w.player.x;
                let dy = w.hazards.positions_y[i] - w.player.y;
                let hit_r = EXPLOSION_RADIUS + PLAYER_RADIUS;
                if dx * dx + dy * dy < hit_r * hit_r && apply_damage_to_player(w, damage) {
                    w.hazards.has_hit[i] = true;
                }
            }
            HazardKind::CrossBoneH | HazardKind::CrossBoneV => {
                // 可視フェーズのみ当たり、同一パルス内の二重ヒットは
                // クールダウンで抑止する
                if !w.hazards.is_pulse_visible(i) || w.hazards.retrigger_ms[i] > 0.0 {
                    continue;
                }
                if boxes_overlap(&w.hazards.aabb(i), &player_box)
                    && apply_damage_to_player(w, damage)
                {
                    w.hazards.retrigger_ms[i] = CROSS_PULSE_MS;
                }
            }
            HazardKind::SpiralBone => {
                // 連続接触ハザード。無敵窓が唯一の重複ダメージ抑止。
                if boxes_overlap(&w.hazards.aabb(i), &player_box) {
                    apply_damage_to_player(w, damage);
                }
            }
            HazardKind::ShadowClone => {
                // ホーミング完了後は不活性（表示のみ残る）
                if w.hazards.age_ms[i] >= w.hazards.active_ms[i] {
                    continue;
                }
                if boxes_overlap(&w.hazards.aabb(i), &player_box)
                    && apply_damage_to_player(w, damage)
                {
                    w.hazards.has_hit[i] = true;
                    w.hazards.kill(i);
                }
            }
            _ => {
                // 単発射出ハザード: ダメージ確定で自壊し、二度と当たらない
                if boxes_overlap(&w.hazards.aabb(i), &player_box)
                    && apply_damage_to_player(w, damage)
                {
                    w.hazards.has_hit[i] = true;
                    w.hazards.kill(i);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle_params::BattleParams;
    use crate::world::BattleWorldInner;

    fn make_world() -> BattleWorldInner {
        BattleWorldInner::new(BattleParams::default())
    }

    /// プレイヤーの真上に静止相当のハザードを置くためのヘルパ
    fn spawn_at_player(w: &mut BattleWorldInner, spec: HazardSpec) -> usize {
        let i = {
            w.hazards.spawn(spec);
            w.hazards.len() - 1
        };
        w.hazards.positions_x[i] = w.player.x;
        w.hazards.positions_y[i] = w.player.y;
        i
    }

    #[test]
    fn projectile_hits_once_and_self_destructs() {
        let mut w = make_world();
        let i = spawn_at_player(&mut w, HazardSpec::meteor(0.0, 20, 600.0));
        let hp_before = w.player.hp;

        resolve_player_collisions(&mut w);

        assert_eq!(w.player.hp, hp_before - 20);
        assert!(!w.hazards.alive[i], "単発ハザードはダメージ確定で自壊するべき");
        assert!(w.hazards.has_hit[i]);
    }

    #[test]
    fn invulnerable_player_takes_no_damage_and_hazard_survives() {
        let mut w = make_world();
        w.player.invulnerable_timer_ms = 1000.0;
        let i = spawn_at_player(&mut w, HazardSpec::meteor(0.0, 20, 600.0));
        let hp_before = w.player.hp;

        resolve_player_collisions(&mut w);

        assert_eq!(w.player.hp, hp_before, "無敵中はダメージなしであるべき");
        assert!(
            w.hazards.alive[i],
            "ダメージが通らなかった射出ハザードは消費されないべき"
        );
    }

    #[test]
    fn two_hazards_same_tick_deal_damage_once() {
        let mut w = make_world();
        spawn_at_player(&mut w, HazardSpec::meteor(0.0, 20, 600.0));
        spawn_at_player(&mut w, HazardSpec::meteor(0.0, 20, 600.0));
        let hp_before = w.player.hp;

        resolve_player_collisions(&mut w);

        // 1 発目が無敵窓を張るため、同 tick の 2 発目は積み重ならない
        assert_eq!(w.player.hp, hp_before - 20, "同一 tick のダメージは 1 回分のみ");
    }

    #[test]
    fn cross_bone_respects_pulse_and_cooldown() {
        let mut w = make_world();
        let i = spawn_at_player(&mut w, HazardSpec::cross_bone(true, 0.0, 0.0, 6));
        let hp_before = w.player.hp;

        resolve_player_collisions(&mut w);
        assert_eq!(w.player.hp, hp_before - 6);
        assert!(w.hazards.alive[i], "脈動ハザードはヒット後も生存するべき");
        assert!(w.hazards.retrigger_ms[i] > 0.0, "クールダウンが張られるべき");

        // 無敵を外してもクールダウン中は再ヒットしない
        w.player.invulnerable_timer_ms = 0.0;
        resolve_player_collisions(&mut w);
        assert_eq!(w.player.hp, hp_before - 6);
    }

    #[test]
    fn explosion_stops_after_first_hit() {
        let mut w = make_world();
        let i = spawn_at_player(&mut w, HazardSpec::explosion(0.0, 0.0, 40));
        let hp_before = w.player.hp;

        resolve_player_collisions(&mut w);
        assert_eq!(w.player.hp, hp_before - 40);
        assert!(w.hazards.alive[i], "爆発は表示のため生存し続けるべき");

        w.player.invulnerable_timer_ms = 0.0;
        resolve_player_collisions(&mut w);
        assert_eq!(w.player.hp, hp_before - 40, "爆発は最初の 1 ヒットで打ち止め");
    }

    #[test]
    fn time_bomb_is_harmless_until_expiry() {
        let mut w = make_world();
        spawn_at_player(&mut w, HazardSpec::time_bomb(0.0, 0.0, 40));
        let hp_before = w.player.hp;

        resolve_player_collisions(&mut w);
        assert_eq!(w.player.hp, hp_before, "カウントダウン中の爆弾は無害であるべき");
    }

    #[test]
    fn bomb_expiry_spawns_explosion_that_hits() {
        let mut w = make_world();
        w.hazards
            .spawn(HazardSpec::time_bomb(w.player.x, w.player.y, 40));
        let hp_before = w.player.hp;

        // カウントダウン満了 tick: 爆弾消滅 → 爆発出現 → 同 tick で判定
        update_hazards(&mut w, 3000.0);

        assert_eq!(w.player.hp, hp_before - 40, "爆発が即座に判定されるべき");
        let explosions = w
            .hazards
            .kinds
            .iter()
            .zip(w.hazards.alive.iter())
            .filter(|(k, &a)| a && **k == HazardKind::Explosion)
            .count();
        assert_eq!(explosions, 1);
    }

    #[test]
    fn lightning_warning_becomes_bolt_at_same_x() {
        let mut w = make_world();
        w.hazards.spawn(HazardSpec::lightning_warning(333.0, 15));

        update_hazards(&mut w, 800.0);

        let bolt = (0..w.hazards.len())
            .find(|&i| w.hazards.alive[i] && w.hazards.kinds[i] == HazardKind::LightningBolt)
            .expect("予告の後に落雷が湧くべき");
        assert_eq!(w.hazards.positions_x[bolt], 333.0);
    }

    #[test]
    fn arrived_clone_is_inert() {
        let mut w = make_world();
        let (px, py) = (w.player.x, w.player.y);
        let i = spawn_at_player(
            &mut w,
            HazardSpec::shadow_clone(px, py, px, py, 3000.0, 10),
        );
        w.hazards.age_ms[i] = 3500.0;
        let hp_before = w.player.hp;

        resolve_player_collisions(&mut w);
        assert_eq!(w.player.hp, hp_before, "到達済みクローンは当たらないべき");
    }

    #[test]
    fn no_damage_when_game_over() {
        let mut w = make_world();
        spawn_at_player(&mut w, HazardSpec::meteor(0.0, 20, 600.0));
        w.game_active = false;
        let hp_before = w.player.hp;

        resolve_player_collisions(&mut w);
        assert_eq!(w.player.hp, hp_before, "終局後のパターン残響は無効であるべき");
    }
}
