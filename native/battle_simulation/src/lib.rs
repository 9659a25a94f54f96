//! battle_simulation: ボス戦コア（ターン状態機械・攻撃コレオグラフィ・衝突/ダメージ解決）
//! （ヘッドレス動作可能 — rustler 等の NIF 依存なし、`nif` feature で Resource 登録のみ追加）

pub mod battle_params;
pub mod constants;
pub mod physics;
pub mod snapshot;

pub mod game_logic;
pub mod world;
