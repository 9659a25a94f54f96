//! Path: native/battle_simulation/src/physics/mod.rs
//! Summary: 幾何・軌道・RNG ユーティリティ

pub mod geometry;
pub mod rng;
pub mod trajectory;
