use serde::{Deserialize, Serialize};
use steel::*;

use crate::consts::*;
use crate::error::GameError;
use crate::state::config_pda;

use super::GameAccount;

/// What happens to the pool when nobody staked the winning square.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
pub enum PoolPolicy {
    /// Roll the pool into the next round.
    Carry = 0,
    /// Burn the pool.
    Burn = 1,
}

/// Operator-tunable settings.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Config {
    /// The address that can update the config.
    pub admin: Pubkey,

    /// The address that receives protocol fees.
    pub fee_collector: Pubkey,

    /// Protocol fee on the losing stake, in bps.
    pub admin_fee_bps: u64,

    /// Top miner cut of the losing stake, in bps.
    pub top_miner_bps: u64,

    /// Share weight multiplier for a correct dice-sum prediction, in bps.
    pub dice_bonus_bps: u64,

    /// Length of a staking window, in slots.
    pub round_duration: u64,

    /// `PoolPolicy` discriminant.
    pub empty_pool_policy: u8,

    /// Field pays 3:1 on 12 when set, otherwise 2:1.
    pub field_twelve_triple: u8,

    /// Padding for alignment.
    pub _padding: [u8; 6],
}

impl Config {
    pub fn pda() -> (Pubkey, u8) {
        config_pda()
    }

    pub fn pool_policy(&self) -> PoolPolicy {
        PoolPolicy::try_from(self.empty_pool_policy).unwrap_or(PoolPolicy::Carry)
    }

    pub fn field_pays_triple(&self) -> bool {
        self.field_twelve_triple == 1
    }

    /// Settings every fresh deployment starts with.
    pub fn set_defaults(&mut self, admin: Pubkey) {
        self.admin = admin;
        self.fee_collector = admin;
        self.admin_fee_bps = DEFAULT_ADMIN_FEE_BPS;
        self.top_miner_bps = DEFAULT_TOP_MINER_BPS;
        self.dice_bonus_bps = DEFAULT_DICE_BONUS_BPS;
        self.round_duration = DEFAULT_ROUND_DURATION;
        self.empty_pool_policy = PoolPolicy::Carry.into();
        self.field_twelve_triple = 0;
    }

    /// Validates and applies new settings. Nothing changes on error.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        admin: Pubkey,
        fee_collector: Pubkey,
        admin_fee_bps: u64,
        top_miner_bps: u64,
        dice_bonus_bps: u64,
        round_duration: u64,
        empty_pool_policy: u8,
        field_twelve_triple: u8,
    ) -> Result<(), GameError> {
        let cut = admin_fee_bps
            .checked_add(top_miner_bps)
            .ok_or(GameError::InvalidConfig)?;
        if cut > DENOMINATOR_BPS {
            return Err(GameError::InvalidConfig);
        }
        if !(DENOMINATOR_BPS..=MAX_DICE_BONUS_BPS).contains(&dice_bonus_bps) {
            return Err(GameError::InvalidConfig);
        }
        if round_duration == 0 {
            return Err(GameError::InvalidConfig);
        }
        PoolPolicy::try_from(empty_pool_policy).map_err(|_| GameError::InvalidConfig)?;
        if field_twelve_triple > 1 {
            return Err(GameError::InvalidConfig);
        }

        self.admin = admin;
        self.fee_collector = fee_collector;
        self.admin_fee_bps = admin_fee_bps;
        self.top_miner_bps = top_miner_bps;
        self.dice_bonus_bps = dice_bonus_bps;
        self.round_duration = round_duration;
        self.empty_pool_policy = empty_pool_policy;
        self.field_twelve_triple = field_twelve_triple;
        Ok(())
    }
}

account!(GameAccount, Config);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mut config = Config::zeroed();
        let admin = Pubkey::new_unique();
        config.set_defaults(admin);
        assert_eq!(config.admin, admin);
        assert_eq!(config.pool_policy(), PoolPolicy::Carry);
        assert!(!config.field_pays_triple());
    }

    #[test]
    fn test_update_validation() {
        let mut config = Config::zeroed();
        let admin = Pubkey::new_unique();
        config.set_defaults(admin);
        let before = config;

        assert_eq!(
            config.update(admin, admin, 6_000, 5_000, 20_000, 150, 0, 0),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            config.update(admin, admin, 100, 1_000, 9_999, 150, 0, 0),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            config.update(admin, admin, 100, 1_000, 20_000, 0, 0, 0),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            config.update(admin, admin, 100, 1_000, 20_000, 150, 2, 0),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            config.update(admin, admin, 100, 1_000, 20_000, 150, 0, 2),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(config, before);

        config
            .update(admin, admin, 250, 500, 30_000, 300, 1, 1)
            .unwrap();
        assert_eq!(config.pool_policy(), PoolPolicy::Burn);
        assert!(config.field_pays_triple());
        assert_eq!(config.round_duration, 300);
    }
}
