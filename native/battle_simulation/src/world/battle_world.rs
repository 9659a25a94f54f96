//! Path: native/battle_simulation/src/world/battle_world.rs
//! Summary: バトルワールド（BattleWorldInner, BattleWorld）

use super::battle_event::BattleEvent;
use super::hazard::HazardWorld;
use super::pattern::ActivePattern;
use super::player::PlayerState;
use crate::battle_params::BattleParams;
use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH, WORLD_RNG_SEED};
use crate::physics::rng::SimpleRng;
use std::sync::RwLock;

/// ターン状態機械のフェーズ
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattlePhase {
    PlayerTurn,
    /// 選択済みアクションの解決待ち（遅延中は再選択不可）
    ActionResolving,
    BossTurn,
    Victory,
    Defeat,
}

/// ターン機械の遅延遷移。clock_ms 基準の絶対時刻で発火する。
/// 原典の setTimeout 連鎖の置き換えで、リスタート時に丸ごと破棄できる。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingEvent {
    pub at_ms: f64,
    pub action: PendingAction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    /// Fight のダメージロールと適用
    ResolveFight,
    /// 慈悲ゲージ満タン時、ボス HP を 1 に固定する
    ExposeBoss,
    StartBossTurn,
    /// Mercy 成立の勝利確定
    MercyVictory,
    /// ボスターン明けの選択再有効化
    EnableSelection,
}

/// バトルワールド内部状態。
/// 全コンポーネントがここを唯一の可変状態として参照し、
/// グローバル変数は存在しない。
pub struct BattleWorldInner {
    pub frame_id: u32,
    /// シミュレーション時計（ms）。PendingEvent の基準。
    pub clock_ms: f64,
    pub arena_w:  f32,
    pub arena_h:  f32,
    pub player:   PlayerState,
    pub boss_hp:  i32,
    /// 経過ボスターン数。ダメージ・物量スケーリングの入力。
    pub turn_count: u32,
    pub mercy_progress: u32,
    pub items: u32,
    /// ボスターン明けに +step される難度値（cap で頭打ち）
    pub difficulty: f32,
    pub phase: BattlePhase,
    /// false の間は一切のダメージ適用を遮断する（終局後のパターン残響対策）
    pub game_active: bool,
    pub can_select: bool,
    pub dialogue: String,
    /// ボス台詞の巡回位置
    pub dialogue_index: usize,
    pub hazards: HazardWorld,
    /// 実行中の攻撃パターン（ボスターンあたり常に 1 つ以下）
    pub pattern: Option<ActivePattern>,
    pub pending: Vec<PendingEvent>,
    /// この tick で発生したイベント（毎 tick drain される）
    pub events: Vec<BattleEvent>,
    pub rng: SimpleRng,
    pub params: BattleParams,
    /// 直近 tick の処理時間（ms、診断用）
    pub last_tick_time_ms: f64,
}

impl BattleWorldInner {
    pub fn new(params: BattleParams) -> Self {
        let params = params.normalized();
        let cx = ARENA_WIDTH / 2.0;
        let cy = ARENA_HEIGHT / 2.0;
        Self {
            frame_id: 0,
            clock_ms: 0.0,
            arena_w:  ARENA_WIDTH,
            arena_h:  ARENA_HEIGHT,
            player:   PlayerState::new(cx, cy, params.player_max_hp),
            boss_hp:  params.boss_max_hp,
            turn_count: 0,
            mercy_progress: 0,
            items: params.starting_items,
            difficulty: params.difficulty_start,
            phase: BattlePhase::PlayerTurn,
            game_active: true,
            can_select: true,
            dialogue: String::from("* What will you do?"),
            dialogue_index: 0,
            hazards: HazardWorld::new(),
            pattern: None,
            pending: Vec::new(),
            events: Vec::new(),
            rng: SimpleRng::new(WORLD_RNG_SEED),
            params,
            last_tick_time_ms: 0.0,
        }
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == BattlePhase::PlayerTurn
    }

    /// delay_ms 後に発火する遅延遷移を積む
    pub fn schedule(&mut self, delay_ms: f64, action: PendingAction) {
        self.pending.push(PendingEvent {
            at_ms: self.clock_ms + delay_ms,
            action,
        });
    }

    /// パターン・ハザード・保留遷移をすべて破棄する。
    /// 追跡済みタイマーの一括キャンセルに相当する。
    pub fn cancel_all_scheduled(&mut self) {
        self.pattern = None;
        self.pending.clear();
        self.hazards.clear();
    }

    /// 全状態を初期構成へ戻す（リスタート）。
    /// params とアリーナサイズ、RNG 状態は維持する。
    pub fn reset(&mut self) {
        self.cancel_all_scheduled();
        self.player = PlayerState::new(
            self.arena_w / 2.0,
            self.arena_h / 2.0,
            self.params.player_max_hp,
        );
        self.boss_hp = self.params.boss_max_hp;
        self.turn_count = 0;
        self.mercy_progress = 0;
        self.items = self.params.starting_items;
        self.difficulty = self.params.difficulty_start;
        self.phase = BattlePhase::PlayerTurn;
        self.game_active = true;
        self.can_select = true;
        self.dialogue = String::from("* What will you do?");
        self.dialogue_index = 0;
        self.events.clear();
    }
}

/// バトルワールド（RwLock で保護された内部状態）。
/// ロックは NIF 境界のためだけに存在し、エンジン自体は単一スレッドで回る。
pub struct BattleWorld(pub RwLock<BattleWorldInner>);

#[cfg(feature = "nif")]
impl rustler::Resource for BattleWorld {}
