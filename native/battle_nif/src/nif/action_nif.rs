//! Path: native/battle_nif/src/nif/action_nif.rs
//! Summary: メニューアクション NIF（select_action）

use super::util::lock_poisoned_err;
use battle_simulation::game_logic::systems::turn::{select_action, MenuAction};
use battle_simulation::world::BattleWorld;
use rustler::{Atom, NifResult, ResourceArc};

use crate::{act, fight, item, mercy, ok};

/// アクション選択を注入する。
/// プレイヤーターン外・選択ロック中はコア側が状態を変えずに無視する。
#[rustler::nif]
pub fn select_menu_action(world: ResourceArc<BattleWorld>, action: Atom) -> NifResult<Atom> {
    let menu_action = if action == fight() {
        MenuAction::Fight
    } else if action == act() {
        MenuAction::Act
    } else if action == item() {
        MenuAction::Item
    } else if action == mercy() {
        MenuAction::Mercy
    } else {
        return Err(rustler::Error::BadArg);
    };

    let mut w = world.0.write().map_err(|_| lock_poisoned_err())?;
    select_action(&mut w, menu_action);
    Ok(ok())
}
