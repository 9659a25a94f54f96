//! Path: native/battle_simulation/src/game_logic/systems/mod.rs
//! Summary: システム群（台帳・ハザード・パターン・ターン）

pub mod hazards;
pub mod ledger;
pub mod patterns;
pub mod turn;
