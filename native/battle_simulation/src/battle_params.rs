//! Path: native/battle_simulation/src/battle_params.rs
//! Summary: バトル設定テーブル（ホストから注入可能、Default が正準構成）

/// バトルの調整値テーブル。
/// ロジック側は必ずここを参照し、数値をハードコードしない。
/// ホストは `set_battle_params` NIF で丸ごと差し替えられる。
#[derive(Clone, Debug)]
pub struct BattleParams {
    pub player_max_hp: i32,
    pub boss_max_hp:   i32,
    /// 回復アイテムの初期所持数
    pub starting_items: u32,
    pub heal_amount:    i32,
    pub mercy_max:      u32,
    /// Act 1 回あたりの慈悲ゲージ増分
    pub mercy_step:     u32,
    /// 被弾後の無敵時間（ms）。スタンより短くは正規化で許さない。
    pub invulnerability_ms: f64,
    pub stun_ms:            f64,
    pub difficulty_start: f32,
    pub difficulty_step:  f32,
    pub difficulty_cap:   f32,
    /// ボスターンごとに巡回する台詞
    pub boss_lines: Vec<String>,
}

impl Default for BattleParams {
    fn default() -> Self {
        Self {
            player_max_hp: 100,
            boss_max_hp:   800,
            starting_items: 8,
            heal_amount:    40,
            mercy_max:      100,
            mercy_step:     25,
            invulnerability_ms: 2000.0,
            stun_ms:            500.0,
            difficulty_start: 5.0,
            difficulty_step:  0.5,
            difficulty_cap:   25.0,
            boss_lines: [
                "* Prepare yourself for a real trial!",
                "* You have no idea what you are up against!",
                "* My power knows no bounds!",
                "* This will be your last battle!",
                "* You are nothing but dust beneath my feet!",
                "* You are doomed!",
                "* No one has ever defeated me!",
                "* Your attempts are laughable!",
                "* I will destroy you!",
                "* This is the end for you!",
                "* My fury knows no limit!",
                "* Your efforts are in vain!",
                "* I will become your nightmare!",
                "* Run while you still can!",
                "* Your fate is sealed!",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl BattleParams {
    /// 不変条件を満たすよう補正する: 無敵時間 ≥ スタン時間。
    /// スタン解除後に再被弾可能という状態を作らないための制約。
    pub fn normalized(mut self) -> Self {
        if self.invulnerability_ms < self.stun_ms {
            self.invulnerability_ms = self.stun_ms;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_canonical_config() {
        let params = BattleParams::default();
        assert_eq!(params.player_max_hp, 100);
        assert_eq!(params.boss_max_hp, 800);
        assert_eq!(params.starting_items, 8);
        assert_eq!(params.heal_amount, 40);
        assert_eq!(params.mercy_max, 100);
    }

    #[test]
    fn default_invulnerability_covers_stun() {
        let params = BattleParams::default();
        assert!(
            params.invulnerability_ms >= params.stun_ms,
            "無敵時間はスタン時間以上であるべき"
        );
    }

    #[test]
    fn normalized_lifts_short_invulnerability() {
        let params = BattleParams {
            invulnerability_ms: 100.0,
            stun_ms: 500.0,
            ..BattleParams::default()
        }
        .normalized();
        assert_eq!(params.invulnerability_ms, 500.0);
    }
}
