//! Path: native/battle_simulation/src/world/pattern.rs
//! Summary: 攻撃パターン状態（ActivePattern・TimedSpawn・VortexField）

/// ボスのコンボパターン種別（ボスターンごとに 7 択から一様抽選）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    BoneStorm,
    SpiralFire,
    LightningVortex,
    MeteorBomb,
    ShadowVortex,
    TimeVortex,
    UltimateChaos,
}

impl PatternKind {
    pub const ALL: [PatternKind; 7] = [
        PatternKind::BoneStorm,
        PatternKind::SpiralFire,
        PatternKind::LightningVortex,
        PatternKind::MeteorBomb,
        PatternKind::ShadowVortex,
        PatternKind::TimeVortex,
        PatternKind::UltimateChaos,
    ];

    pub fn as_u8(self) -> u8 {
        match self {
            PatternKind::BoneStorm => 0,
            PatternKind::SpiralFire => 1,
            PatternKind::LightningVortex => 2,
            PatternKind::MeteorBomb => 3,
            PatternKind::ShadowVortex => 4,
            PatternKind::TimeVortex => 5,
            PatternKind::UltimateChaos => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::BoneStorm => "Bone Storm",
            PatternKind::SpiralFire => "Spiral Fire",
            PatternKind::LightningVortex => "Lightning Vortex",
            PatternKind::MeteorBomb => "Meteor Bomb",
            PatternKind::ShadowVortex => "Shadow Vortex",
            PatternKind::TimeVortex => "Time Vortex",
            PatternKind::UltimateChaos => "Ultimate Chaos",
        }
    }
}

/// スケジュール上の 1 スポーン指示。
/// 座標・向きの乱数は発火時に引く（スケジュール構築時ではない）。
/// 影クローンの目標捕捉をスポーン時点のプレイヤー位置にするための設計。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnSpec {
    HorizontalBone,
    FallingBone,
    /// 画面中央のクロスパターン（pairs 組の縦横骨）
    CrossPattern { pairs: u32 },
    /// 中心を回る骨リング
    SpiralRing { count: u32, radius: f32, lifetime_ms: f64 },
    /// row 段目の火球（基準 y = margin + row * 70）
    Fireball { row: u32 },
    /// ランダム x への落雷（予告 → 本体）
    LightningStrike,
    Meteor,
    TimeBomb,
    /// 目標を囲む円周上にクローンを配置し、スポーン時のプレイヤー位置へ収束させる
    CloneRing {
        count: u32,
        distance: f32,
        around_player: bool,
        homing_ms: f64,
        damage: i32,
    },
}

/// パターン開始からのオフセットで発火するスポーンイベント
#[derive(Clone, Copy, Debug)]
pub struct TimedSpawn {
    pub at_ms: f64,
    pub spec: SpawnSpec,
}

/// 中心引力フィールド。inner..outer の帯域でプレイヤーを中心へ引き、
/// contact_damage > 0 の変種は inner 内で接触ダメージを与える。
#[derive(Clone, Copy, Debug)]
pub struct VortexField {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// 50ms あたりに変位を縮める割合（原典のインターバル周期基準）
    pub force: f32,
    pub contact_damage: i32,
    /// 描画用の見かけ半径
    pub visual_radius: f32,
    /// この時刻以降は強化表示（演出のみ、判定は不変）
    pub intensify_at_ms: f64,
}

impl VortexField {
    /// tick 長に正規化した引力係数
    pub fn factor(&self, delta_ms: f64) -> f32 {
        (self.force * (delta_ms / 50.0) as f32).min(1.0)
    }

    pub fn is_intensified(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.intensify_at_ms
    }
}

/// 実行中の攻撃パターン。ボスターンあたり常に 1 つだけ存在する。
/// フェーズ遷移は純粋に時間駆動で、保留スポーンはすべてここに載るため
/// パターン破棄 = 全タイマーのキャンセルになる。
pub struct ActivePattern {
    pub kind: PatternKind,
    pub elapsed_ms: f64,
    pub total_ms: f64,
    /// at_ms 降順に積む。末尾 pop で発火順に取り出せる。
    pub pending: Vec<TimedSpawn>,
    pub vortex: Option<VortexField>,
    /// プレイヤー入力変位の倍率（Time Vortex で 0.4）
    pub move_factor: f32,
}

impl ActivePattern {
    pub fn new(kind: PatternKind, total_ms: f64, mut pending: Vec<TimedSpawn>) -> Self {
        pending.sort_by(|a, b| {
            b.at_ms
                .partial_cmp(&a.at_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self {
            kind,
            elapsed_ms: 0.0,
            total_ms,
            pending,
            vortex: None,
            move_factor: 1.0,
        }
    }

    /// 発火時刻を過ぎたスポーン指示を取り出す
    pub fn drain_due(&mut self, into: &mut Vec<SpawnSpec>) {
        while let Some(&TimedSpawn { at_ms, spec }) = self.pending.last() {
            if at_ms > self.elapsed_ms {
                break;
            }
            into.push(spec);
            self.pending.pop();
        }
    }

    /// 固定の総尺を過ぎたか（ハザードの完了状態に関わらず強制クリーンアップ）
    pub fn is_done(&self) -> bool {
        self.elapsed_ms >= self.total_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_due_fires_in_schedule_order() {
        let mut pat = ActivePattern::new(
            PatternKind::BoneStorm,
            8000.0,
            vec![
                TimedSpawn { at_ms: 400.0, spec: SpawnSpec::FallingBone },
                TimedSpawn { at_ms: 0.0, spec: SpawnSpec::HorizontalBone },
                TimedSpawn { at_ms: 200.0, spec: SpawnSpec::HorizontalBone },
            ],
        );

        let mut due = Vec::new();
        pat.elapsed_ms = 250.0;
        pat.drain_due(&mut due);
        assert_eq!(
            due,
            vec![SpawnSpec::HorizontalBone, SpawnSpec::HorizontalBone],
            "発火時刻を過ぎた分だけ時刻順に出るべき"
        );

        due.clear();
        pat.elapsed_ms = 500.0;
        pat.drain_due(&mut due);
        assert_eq!(due, vec![SpawnSpec::FallingBone]);
        assert!(pat.pending.is_empty());
    }

    #[test]
    fn pattern_done_at_total_duration() {
        let mut pat = ActivePattern::new(PatternKind::SpiralFire, 7000.0, vec![]);
        pat.elapsed_ms = 6999.0;
        assert!(!pat.is_done());
        pat.elapsed_ms = 7000.0;
        assert!(pat.is_done());
    }

    #[test]
    fn vortex_factor_scales_with_tick_length() {
        let v = VortexField {
            inner_radius: 30.0,
            outer_radius: 150.0,
            force: 0.08,
            contact_damage: 0,
            visual_radius: 100.0,
            intensify_at_ms: f64::INFINITY,
        };
        assert!((v.factor(50.0) - 0.08).abs() < 1e-6);
        assert!((v.factor(25.0) - 0.04).abs() < 1e-6);
        // 極端に長い tick でも変位を 100% 以上は縮めない
        assert_eq!(v.factor(100_000.0), 1.0);
    }

    #[test]
    fn all_seven_patterns_listed() {
        assert_eq!(PatternKind::ALL.len(), 7);
        for (i, kind) in PatternKind::ALL.iter().enumerate() {
            assert_eq!(kind.as_u8() as usize, i);
        }
    }
}
