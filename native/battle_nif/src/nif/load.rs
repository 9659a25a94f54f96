//! Path: native/battle_nif/src/nif/load.rs
//! Summary: NIF ローダー（パニックフック・リソース登録・アトム事前登録）

use battle_simulation::world::BattleWorld;

#[cfg(debug_assertions)]
fn init_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[Rust NIF Panic] {}", info);
        eprintln!("Backtrace:\n{}", std::backtrace::Backtrace::force_capture());
    }));
}

#[allow(non_local_definitions)]
pub fn load(env: rustler::Env, _: rustler::Term) -> bool {
    #[cfg(debug_assertions)]
    init_panic_hook();
    let _ = env_logger::Builder::from_default_env().try_init();

    if env.register::<BattleWorld>().is_err() {
        return false;
    }
    let _ = crate::ok();
    let _ = crate::fight();
    let _ = crate::act();
    let _ = crate::item();
    let _ = crate::mercy();
    let _ = crate::player_hit();
    let _ = crate::boss_hit();
    let _ = crate::heal_used();
    let _ = crate::pattern_started();
    let _ = crate::match_ended();
    true
}
