//! Path: native/battle_simulation/src/game_logic/mod.rs
//! Summary: ゲームロジック（tick とシステム群）

pub mod systems;
mod tick;

pub use systems::turn::MenuAction;
pub use tick::tick_inner;
