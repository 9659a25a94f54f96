//! Path: native/battle_simulation/src/physics/trajectory.rs
//! Summary: ハザード軌道評価（線形・正弦・螺旋・ホーミング・中心引力）

/// 進捗 p ∈ [0,1] での線形補間。p は呼び出し側で超過し得るためクランプする。
pub fn linear_sweep(from: f32, to: f32, p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    from + (to - from) * p
}

/// 基準線 + 正弦波の横ずれ（火球ドリフト）。
/// periods は横断あたりの波数。
pub fn sine_drift(base: f32, amplitude: f32, periods: f32, p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    base + (p * std::f32::consts::PI * 2.0 * periods).sin() * amplitude
}

/// 中心 + 半径・角度からの円周位置（螺旋リング）
pub fn spiral_position(cx: f32, cy: f32, radius: f32, angle: f32) -> (f32, f32) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// スポーン時に捕捉した目標点への線形ホーミング。
/// 目標は再照準されない（捕捉は一度きり）。
pub fn homing_position(sx: f32, sy: f32, tx: f32, ty: f32, p: f32) -> (f32, f32) {
    let p = p.clamp(0.0, 1.0);
    (sx + (tx - sx) * p, sy + (ty - sy) * p)
}

/// 中心引力: inner..outer の帯域内にいるとき、中心からの変位を
/// 割合 factor だけ縮める。inner 半径の内側へは引き込まない。
/// 帯域外・inner 内では位置を変えない。
pub fn apply_pull(
    cx: f32,
    cy: f32,
    x: f32,
    y: f32,
    inner: f32,
    outer: f32,
    factor: f32,
) -> (f32, f32) {
    let dx = cx - x;
    let dy = cy - y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < outer && dist > inner {
        (x + dx * factor, y + dy * factor)
    } else {
        (x, y)
    }
}
