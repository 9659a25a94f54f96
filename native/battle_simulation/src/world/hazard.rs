//! Path: native/battle_simulation/src/world/hazard.rs
//! Summary: ハザード SoA（HazardWorld）と種別タグ付きスポーンファクトリ

use crate::constants::{
    BOMB_COUNTDOWN_MS, BOMB_SIZE, BONE_H_SWEEP_MS, BONE_H_WIDTH, BONE_H_HEIGHT,
    BONE_V_FALL_MS, BONE_V_HEIGHT, BONE_V_WIDTH, CLONE_LIFETIME_MS, CLONE_SIZE,
    CROSS_BONE_LEN, CROSS_BONE_THICK, CROSS_LIFETIME_MS, CROSS_PULSE_MS,
    EXPLOSION_MS, EXPLOSION_RADIUS, FIREBALL_AMPLITUDE, FIREBALL_CROSS_MS,
    FIREBALL_PERIODS, FIREBALL_SIZE, LIGHTNING_BOLT_HEIGHT, LIGHTNING_BOLT_WIDTH,
    LIGHTNING_STRIKE_MS, LIGHTNING_WARNING_HEIGHT, LIGHTNING_WARNING_MS,
    LIGHTNING_WARNING_WIDTH, METEOR_FALL_MS, METEOR_SIZE, SPIRAL_ANGULAR_VELOCITY,
};
use crate::physics::geometry::Aabb;
use crate::physics::trajectory::{homing_position, linear_sweep, sine_drift, spiral_position};

/// ハザード種別（描画側へは as_u8 で渡す）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
    BoneHorizontal,
    BoneFalling,
    CrossBoneH,
    CrossBoneV,
    SpiralBone,
    Fireball,
    LightningWarning,
    LightningBolt,
    Meteor,
    TimeBomb,
    Explosion,
    ShadowClone,
}

impl HazardKind {
    pub fn as_u8(self) -> u8 {
        match self {
            HazardKind::BoneHorizontal => 0,
            HazardKind::BoneFalling => 1,
            HazardKind::CrossBoneH => 2,
            HazardKind::CrossBoneV => 3,
            HazardKind::SpiralBone => 4,
            HazardKind::Fireball => 5,
            HazardKind::LightningWarning => 6,
            HazardKind::LightningBolt => 7,
            HazardKind::Meteor => 8,
            HazardKind::TimeBomb => 9,
            HazardKind::Explosion => 10,
            HazardKind::ShadowClone => 11,
        }
    }

    /// 自身は無害なハザード（予告・カウントダウン）。damage は後継ハザード用。
    pub fn is_harmless(self) -> bool {
        matches!(self, HazardKind::TimeBomb | HazardKind::LightningWarning)
    }

    /// 一度ダメージを与えたら自壊する単発ハザード
    pub fn is_projectile(self) -> bool {
        matches!(
            self,
            HazardKind::BoneHorizontal
                | HazardKind::BoneFalling
                | HazardKind::Fireball
                | HazardKind::LightningBolt
                | HazardKind::Meteor
                | HazardKind::ShadowClone
        )
    }
}

/// 寿命切れ時の後継スポーン（爆弾 → 爆発、予告 → 落雷）
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HazardExpiry {
    Explode { x: f32, y: f32, damage: i32 },
    Strike { x: f32, damage: i32 },
}

/// スポーンファクトリへ渡す 1 ハザード分の仕様。
/// p0..p3 は種別ごとの軌道パラメータ（始点・終点・中心・位相など）。
#[derive(Clone, Copy, Debug)]
pub struct HazardSpec {
    pub kind: HazardKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub damage: i32,
    pub lifetime_ms: f64,
    /// 軌道評価に使う区間。通常は lifetime と同じ。
    /// 影クローンのみホーミング時間 < lifetime（到達後は不活性）。
    pub active_ms: f64,
    pub p0: f32,
    pub p1: f32,
    pub p2: f32,
    pub p3: f32,
}

impl HazardSpec {
    /// 横薙ぎ骨。左右どちらかの場外から反対側の場外まで掃く。
    pub fn horizontal_bone(from_left: bool, y: f32, damage: i32, arena_w: f32) -> Self {
        let (from, to) = if from_left {
            (-BONE_H_WIDTH / 2.0, arena_w + BONE_H_WIDTH / 2.0)
        } else {
            (arena_w + BONE_H_WIDTH / 2.0, -BONE_H_WIDTH / 2.0)
        };
        Self {
            kind: HazardKind::BoneHorizontal,
            x: from,
            y,
            w: BONE_H_WIDTH,
            h: BONE_H_HEIGHT,
            damage,
            lifetime_ms: BONE_H_SWEEP_MS,
            active_ms: BONE_H_SWEEP_MS,
            p0: from,
            p1: to,
            p2: 0.0,
            p3: 0.0,
        }
    }

    /// 落下骨。上端場外からアリーナ下端まで落ちる。
    pub fn falling_bone(x: f32, damage: i32, arena_h: f32) -> Self {
        let from = -BONE_V_HEIGHT / 2.0;
        let to = arena_h + BONE_V_HEIGHT / 2.0;
        Self {
            kind: HazardKind::BoneFalling,
            x,
            y: from,
            w: BONE_V_WIDTH,
            h: BONE_V_HEIGHT,
            damage,
            lifetime_ms: BONE_V_FALL_MS,
            active_ms: BONE_V_FALL_MS,
            p0: from,
            p1: to,
            p2: 0.0,
            p3: 0.0,
        }
    }

    /// クロスパターンの静止骨（点滅しながら可視フェーズでのみ当たる）
    pub fn cross_bone(horizontal: bool, x: f32, y: f32, damage: i32) -> Self {
        let (kind, w, h) = if horizontal {
            (HazardKind::CrossBoneH, CROSS_BONE_LEN, CROSS_BONE_THICK)
        } else {
            (HazardKind::CrossBoneV, CROSS_BONE_THICK, CROSS_BONE_LEN)
        };
        Self {
            kind,
            x,
            y,
            w,
            h,
            damage,
            lifetime_ms: CROSS_LIFETIME_MS,
            active_ms: CROSS_LIFETIME_MS,
            p0: 0.0,
            p1: 0.0,
            p2: 0.0,
            p3: 0.0,
        }
    }

    /// 回転リングの 1 本。phase はリング内の位相オフセット。
    pub fn spiral_bone(
        cx: f32,
        cy: f32,
        radius: f32,
        phase: f32,
        damage: i32,
        lifetime_ms: f64,
    ) -> Self {
        let (x, y) = spiral_position(cx, cy, radius, phase);
        Self {
            kind: HazardKind::SpiralBone,
            x,
            y,
            w: BONE_V_WIDTH,
            h: BONE_V_HEIGHT,
            damage,
            lifetime_ms,
            active_ms: lifetime_ms,
            p0: cx,
            p1: cy,
            p2: radius,
            p3: phase,
        }
    }

    /// 火球。左場外から右場外へ、正弦波ドリフト付きで横断する。
    pub fn fireball(base_y: f32, damage: i32, arena_w: f32) -> Self {
        let from = -40.0;
        let to = arena_w + 80.0;
        Self {
            kind: HazardKind::Fireball,
            x: from,
            y: base_y,
            w: FIREBALL_SIZE,
            h: FIREBALL_SIZE,
            damage,
            lifetime_ms: FIREBALL_CROSS_MS,
            active_ms: FIREBALL_CROSS_MS,
            p0: from,
            p1: to,
            p2: base_y,
            p3: FIREBALL_AMPLITUDE,
        }
    }

    /// 落雷予告。寿命切れで同じ x に落雷を生む。damage は落雷用。
    pub fn lightning_warning(x: f32, bolt_damage: i32) -> Self {
        Self {
            kind: HazardKind::LightningWarning,
            x,
            y: -LIGHTNING_WARNING_HEIGHT / 2.0,
            w: LIGHTNING_WARNING_WIDTH,
            h: LIGHTNING_WARNING_HEIGHT,
            damage: bolt_damage,
            lifetime_ms: LIGHTNING_WARNING_MS,
            active_ms: LIGHTNING_WARNING_MS,
            p0: 0.0,
            p1: 0.0,
            p2: 0.0,
            p3: 0.0,
        }
    }

    /// 落雷本体。上端場外から一気に落ちる。
    pub fn lightning_bolt(x: f32, damage: i32, arena_h: f32) -> Self {
        let from = -LIGHTNING_BOLT_HEIGHT / 2.0;
        let to = arena_h + LIGHTNING_BOLT_HEIGHT / 2.0;
        Self {
            kind: HazardKind::LightningBolt,
            x,
            y: from,
            w: LIGHTNING_BOLT_WIDTH,
            h: LIGHTNING_BOLT_HEIGHT,
            damage,
            lifetime_ms: LIGHTNING_STRIKE_MS,
            active_ms: LIGHTNING_STRIKE_MS,
            p0: from,
            p1: to,
            p2: 0.0,
            p3: 0.0,
        }
    }

    pub fn meteor(x: f32, damage: i32, arena_h: f32) -> Self {
        let from = -METEOR_SIZE / 2.0;
        let to = arena_h + METEOR_SIZE / 2.0;
        Self {
            kind: HazardKind::Meteor,
            x,
            y: from,
            w: METEOR_SIZE,
            h: METEOR_SIZE,
            damage,
            lifetime_ms: METEOR_FALL_MS,
            active_ms: METEOR_FALL_MS,
            p0: from,
            p1: to,
            p2: 0.0,
            p3: 0.0,
        }
    }

    /// 時限爆弾。カウントダウン後に自位置で爆発する。damage は爆発用。
    pub fn time_bomb(x: f32, y: f32, explosion_damage: i32) -> Self {
        Self {
            kind: HazardKind::TimeBomb,
            x,
            y,
            w: BOMB_SIZE,
            h: BOMB_SIZE,
            damage: explosion_damage,
            lifetime_ms: BOMB_COUNTDOWN_MS,
            active_ms: BOMB_COUNTDOWN_MS,
            p0: 0.0,
            p1: 0.0,
            p2: 0.0,
            p3: 0.0,
        }
    }

    /// 爆発。半径内を毎 tick 判定し、最初の 1 ヒットで打ち止め。
    pub fn explosion(x: f32, y: f32, damage: i32) -> Self {
        Self {
            kind: HazardKind::Explosion,
            x,
            y,
            w: EXPLOSION_RADIUS * 2.0,
            h: EXPLOSION_RADIUS * 2.0,
            damage,
            lifetime_ms: EXPLOSION_MS,
            active_ms: EXPLOSION_MS,
            p0: 0.0,
            p1: 0.0,
            p2: 0.0,
            p3: 0.0,
        }
    }

    /// 影クローン。スポーン時に捕捉した目標点へ homing_ms かけて収束し、
    /// 到達後は寿命まで不活性のまま残る。
    pub fn shadow_clone(
        sx: f32,
        sy: f32,
        tx: f32,
        ty: f32,
        homing_ms: f64,
        damage: i32,
    ) -> Self {
        Self {
            kind: HazardKind::ShadowClone,
            x: sx,
            y: sy,
            w: CLONE_SIZE,
            h: CLONE_SIZE,
            damage,
            lifetime_ms: CLONE_LIFETIME_MS,
            active_ms: homing_ms,
            p0: sx,
            p1: sy,
            p2: tx,
            p3: ty,
        }
    }
}

/// ハザード SoA（Structure of Arrays）
pub struct HazardWorld {
    pub kinds:        Vec<HazardKind>,
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    pub widths:       Vec<f32>,
    pub heights:      Vec<f32>,
    pub damage:       Vec<i32>,
    pub age_ms:       Vec<f64>,
    pub lifetime_ms:  Vec<f64>,
    pub active_ms:    Vec<f64>,
    pub params_0:     Vec<f32>,
    pub params_1:     Vec<f32>,
    pub params_2:     Vec<f32>,
    pub params_3:     Vec<f32>,
    pub alive:        Vec<bool>,
    /// 単発ハザードのダメージ確定フラグ（爆発は生存したまま打ち止め）
    pub has_hit:      Vec<bool>,
    /// 脈動ハザードの再ヒット抑止クールダウン（残りミリ秒）
    pub retrigger_ms: Vec<f64>,
    pub count:        usize,
    /// 空きスロットのインデックススタック — O(1) でスロットを取得・返却
    free_list:        Vec<usize>,
}

impl HazardWorld {
    pub fn new() -> Self {
        Self {
            kinds:        Vec::new(),
            positions_x:  Vec::new(),
            positions_y:  Vec::new(),
            widths:       Vec::new(),
            heights:      Vec::new(),
            damage:       Vec::new(),
            age_ms:       Vec::new(),
            lifetime_ms:  Vec::new(),
            active_ms:    Vec::new(),
            params_0:     Vec::new(),
            params_1:     Vec::new(),
            params_2:     Vec::new(),
            params_3:     Vec::new(),
            alive:        Vec::new(),
            has_hit:      Vec::new(),
            retrigger_ms: Vec::new(),
            count:        0,
            free_list:    Vec::new(),
        }
    }

    pub fn spawn(&mut self, spec: HazardSpec) {
        if let Some(i) = self.free_list.pop() {
            self.kinds[i]        = spec.kind;
            self.positions_x[i]  = spec.x;
            self.positions_y[i]  = spec.y;
            self.widths[i]       = spec.w;
            self.heights[i]      = spec.h;
            self.damage[i]       = spec.damage;
            self.age_ms[i]       = 0.0;
            self.lifetime_ms[i]  = spec.lifetime_ms;
            self.active_ms[i]    = spec.active_ms;
            self.params_0[i]     = spec.p0;
            self.params_1[i]     = spec.p1;
            self.params_2[i]     = spec.p2;
            self.params_3[i]     = spec.p3;
            self.alive[i]        = true;
            self.has_hit[i]      = false;
            self.retrigger_ms[i] = 0.0;
        } else {
            self.kinds.push(spec.kind);
            self.positions_x.push(spec.x);
            self.positions_y.push(spec.y);
            self.widths.push(spec.w);
            self.heights.push(spec.h);
            self.damage.push(spec.damage);
            self.age_ms.push(0.0);
            self.lifetime_ms.push(spec.lifetime_ms);
            self.active_ms.push(spec.active_ms);
            self.params_0.push(spec.p0);
            self.params_1.push(spec.p1);
            self.params_2.push(spec.p2);
            self.params_3.push(spec.p3);
            self.alive.push(true);
            self.has_hit.push(false);
            self.retrigger_ms.push(0.0);
        }
        self.count += 1;
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    /// 全ハザードを除去する（パターン終了・リスタート用）
    pub fn clear(&mut self) {
        self.kinds.clear();
        self.positions_x.clear();
        self.positions_y.clear();
        self.widths.clear();
        self.heights.clear();
        self.damage.clear();
        self.age_ms.clear();
        self.lifetime_ms.clear();
        self.active_ms.clear();
        self.params_0.clear();
        self.params_1.clear();
        self.params_2.clear();
        self.params_3.clear();
        self.alive.clear();
        self.has_hit.clear();
        self.retrigger_ms.clear();
        self.count = 0;
        self.free_list.clear();
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn aabb(&self, i: usize) -> Aabb {
        Aabb::from_center(
            self.positions_x[i],
            self.positions_y[i],
            self.widths[i],
            self.heights[i],
        )
    }

    /// クロス骨の可視フェーズか（点滅周期の偶数側でのみダメージ判定）
    pub fn is_pulse_visible(&self, i: usize) -> bool {
        (self.age_ms[i] / CROSS_PULSE_MS) as u64 % 2 == 0
    }

    /// 全ハザードの時間を進め、位置を再評価する。
    /// 寿命切れは kill し、後継スポーン（爆発・落雷）を expiries に積む。
    pub fn advance(&mut self, delta_ms: f64, expiries: &mut Vec<HazardExpiry>) {
        let len = self.len();
        for i in 0..len {
            if !self.alive[i] {
                continue;
            }
            self.age_ms[i] += delta_ms;
            if self.retrigger_ms[i] > 0.0 {
                self.retrigger_ms[i] = (self.retrigger_ms[i] - delta_ms).max(0.0);
            }

            if self.age_ms[i] >= self.lifetime_ms[i] {
                match self.kinds[i] {
                    HazardKind::TimeBomb => expiries.push(HazardExpiry::Explode {
                        x: self.positions_x[i],
                        y: self.positions_y[i],
                        damage: self.damage[i],
                    }),
                    HazardKind::LightningWarning => expiries.push(HazardExpiry::Strike {
                        x: self.positions_x[i],
                        damage: self.damage[i],
                    }),
                    _ => {}
                }
                self.kill(i);
                continue;
            }

            let active = self.active_ms[i];
            let p = if active > 0.0 {
                (self.age_ms[i] / active) as f32
            } else {
                1.0
            };
            match self.kinds[i] {
                HazardKind::BoneHorizontal => {
                    self.positions_x[i] = linear_sweep(self.params_0[i], self.params_1[i], p);
                }
                HazardKind::BoneFalling | HazardKind::Meteor | HazardKind::LightningBolt => {
                    self.positions_y[i] = linear_sweep(self.params_0[i], self.params_1[i], p);
                }
                HazardKind::Fireball => {
                    self.positions_x[i] = linear_sweep(self.params_0[i], self.params_1[i], p);
                    self.positions_y[i] = sine_drift(
                        self.params_2[i],
                        self.params_3[i],
                        FIREBALL_PERIODS,
                        p,
                    );
                }
                HazardKind::SpiralBone => {
                    let angle = self.params_3[i]
                        + SPIRAL_ANGULAR_VELOCITY * (self.age_ms[i] / 1000.0) as f32;
                    let (x, y) = spiral_position(
                        self.params_0[i],
                        self.params_1[i],
                        self.params_2[i],
                        angle,
                    );
                    self.positions_x[i] = x;
                    self.positions_y[i] = y;
                }
                HazardKind::ShadowClone => {
                    let (x, y) = homing_position(
                        self.params_0[i],
                        self.params_1[i],
                        self.params_2[i],
                        self.params_3[i],
                        p,
                    );
                    self.positions_x[i] = x;
                    self.positions_y[i] = y;
                }
                // 静止ハザード（クロス骨・爆弾・爆発・予告）は動かない
                _ => {}
            }
        }
    }
}
