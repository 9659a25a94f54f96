//! Path: native/battle_simulation/src/world/player.rs
//! Summary: プレイヤー状態（PlayerState）

/// プレイヤー（ハート）の物理・被弾状態。
/// 位置の権威は入力レイヤーにあり、毎 tick input_x/input_y として注入される。
/// tick 側がスタン・移動倍率・アリーナクランプを適用して x/y を確定する。
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    /// 入力レイヤーが要求する次の位置（アリーナ座標、クランプ前でよい）
    pub input_x: f32,
    pub input_y: f32,
    pub hp: i32,
    /// 被弾後の無敵残り時間（ms）。0 以下で無敵解除。
    pub invulnerable_timer_ms: f64,
    /// 被弾後のスタン残り時間（ms）。スタン中は入力を無視する。
    pub stun_timer_ms: f64,
}

impl PlayerState {
    pub fn new(x: f32, y: f32, hp: i32) -> Self {
        Self {
            x,
            y,
            input_x: x,
            input_y: y,
            hp,
            invulnerable_timer_ms: 0.0,
            stun_timer_ms: 0.0,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer_ms > 0.0
    }

    pub fn can_move(&self) -> bool {
        self.stun_timer_ms <= 0.0
    }
}
