//! Path: native/battle_simulation/src/constants.rs
//! Summary: アリーナ・ハザード寸法・タイミング定数

/// アリーナ既定サイズ（ホストから set_arena_size で上書き可能）
pub const ARENA_WIDTH:  f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

/// プレイヤーが移動できる境界の内側マージン
pub const BOUNDARY_MARGIN: f32 = 50.0;

/// プレイヤーハート当たり判定（正方形、中心基準）
pub const PLAYER_SIZE:   f32 = 16.0;
pub const PLAYER_RADIUS: f32 = 8.0;

/// ワールド RNG シード（テスト再現性のため固定）
pub const WORLD_RNG_SEED: u64 = 12345;

// ─── ハザード寸法 ────────────────────────────────────────────────

pub const BONE_H_WIDTH:  f32 = 100.0;
pub const BONE_H_HEIGHT: f32 = 20.0;
pub const BONE_V_WIDTH:  f32 = 20.0;
pub const BONE_V_HEIGHT: f32 = 100.0;
/// クロス骨は短い 80px 版
pub const CROSS_BONE_LEN:   f32 = 80.0;
pub const CROSS_BONE_THICK: f32 = 20.0;
pub const FIREBALL_SIZE:  f32 = 25.0;
pub const LIGHTNING_WARNING_WIDTH:  f32 = 8.0;
pub const LIGHTNING_WARNING_HEIGHT: f32 = 80.0;
pub const LIGHTNING_BOLT_WIDTH:  f32 = 12.0;
pub const LIGHTNING_BOLT_HEIGHT: f32 = 250.0;
pub const METEOR_SIZE: f32 = 35.0;
pub const BOMB_SIZE:   f32 = 60.0;
pub const CLONE_SIZE:  f32 = 35.0;
pub const EXPLOSION_RADIUS: f32 = 150.0;

// ─── ハザードタイミング ──────────────────────────────────────────

pub const BONE_H_SWEEP_MS:   f64 = 2500.0;
pub const BONE_V_FALL_MS:    f64 = 2000.0;
pub const CROSS_LIFETIME_MS: f64 = 3000.0;
/// クロス骨の点滅周期（可視フェーズでのみダメージ判定）
pub const CROSS_PULSE_MS:    f64 = 500.0;
pub const FIREBALL_CROSS_MS: f64 = 2500.0;
/// 螺旋骨の角速度（rad/s）
pub const SPIRAL_ANGULAR_VELOCITY: f32 = 1.0;
/// 火球の正弦波ドリフト振幅と周期数
pub const FIREBALL_AMPLITUDE: f32 = 60.0;
pub const FIREBALL_PERIODS:   f32 = 1.5;
pub const LIGHTNING_WARNING_MS: f64 = 800.0;
pub const LIGHTNING_STRIKE_MS:  f64 = 400.0;
pub const METEOR_FALL_MS: f64 = 3000.0;
pub const BOMB_COUNTDOWN_MS: f64 = 3000.0;
pub const EXPLOSION_MS: f64 = 600.0;
pub const CLONE_LIFETIME_MS: f64 = 5000.0;

// ─── ターン遷移タイミング ────────────────────────────────────────

pub const FIGHT_RESOLVE_MS:   f64 = 1000.0;
pub const TURN_HANDOFF_MS:    f64 = 1000.0;
pub const ACT_EXPOSE_MS:      f64 = 1000.0;
pub const ACT_HANDOFF_MS:     f64 = 3000.0;
pub const MERCY_VICTORY_MS:   f64 = 2000.0;
pub const MERCY_FAIL_MS:      f64 = 2500.0;
pub const SELECT_REENABLE_MS: f64 = 500.0;
