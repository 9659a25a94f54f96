//! Path: native/battle_nif/src/lib.rs
//! Summary: NIF エントリ・モジュール宣言・rustler::init のみ

rustler::atoms! {
    ok,
    // メニューアクションアトム
    fight,
    act,
    item,
    mercy,
    // イベントバス用アトム
    player_hit,
    boss_hit,
    heal_used,
    pattern_started,
    match_ended,
    // フェーズアトム
    player_turn,
    action_resolving,
    boss_turn,
    victory,
    defeat,
}

mod nif;

pub use battle_simulation::battle_params::BattleParams;
pub use battle_simulation::game_logic::{tick_inner, MenuAction};
pub use battle_simulation::snapshot::{build_snapshot, BattleSnapshot, HazardView, VortexView};
pub use battle_simulation::world::{
    BattleEvent, BattlePhase, BattleWorld, BattleWorldInner, HazardKind, HazardWorld,
    PatternKind,
};

rustler::init!("Elixir.BossBattle.NifBridge", load = nif::load);
